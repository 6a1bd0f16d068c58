//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.starting_level == 0 {
            anyhow::bail!("starting_level must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::StatMode;

    #[test]
    fn parses_partial_config() {
        let config = ConfigLoader::parse(r#"stat_mode = "complex""#).unwrap();
        assert_eq!(config.stat_mode, StatMode::Complex);
        assert_eq!(config.starting_level, GameConfig::DEFAULT_STARTING_LEVEL);
    }

    #[test]
    fn rejects_level_zero_and_unknown_modes() {
        assert!(ConfigLoader::parse("starting_level = 0").is_err());
        assert!(ConfigLoader::parse(r#"stat_mode = "chaotic""#).is_err());
    }
}
