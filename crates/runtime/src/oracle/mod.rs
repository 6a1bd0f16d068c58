//! Runtime wrappers around static game content oracles.
//!
//! The species catalog, effectiveness chart, and game configuration are
//! loaded once at startup and bundled into an [`OracleManager`] so the
//! runtime can build [`GameEnv`] views on demand. The data is immutable at
//! runtime; battle state lives in rosters and the tower session.
use std::path::Path;
use std::sync::Arc;

use game_content::{CONFIG_FILE, ContentFactory, EFFECTIVENESS_FILE, GameContent, SPECIES_FILE};
use game_core::{EffectivenessChart, GameConfig, GameEnv, SpeciesBook};

use crate::api::{Result, RuntimeError};

/// Manages all oracle implementations and provides unified access
#[derive(Clone, Debug)]
pub struct OracleManager {
    pub(crate) species: Arc<SpeciesBook>,
    pub(crate) tables: Arc<EffectivenessChart>,
    pub(crate) config: Arc<GameConfig>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(species: SpeciesBook, tables: EffectivenessChart, config: GameConfig) -> Self {
        Self {
            species: Arc::new(species),
            tables: Arc::new(tables),
            config: Arc::new(config),
        }
    }

    /// Creates an oracle manager from loaded content.
    pub fn from_content(content: GameContent) -> Self {
        Self::new(content.species, content.effectiveness, content.config)
    }

    /// Loads content from `data_dir`, or the embedded data set when `None`.
    ///
    /// Files missing from the directory fall back to their embedded copies;
    /// files that exist must parse.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let embedded = ContentFactory::embedded();
        let custom = data_dir.map(ContentFactory::new);
        let custom = custom.as_ref();

        let species = pick_source(custom, &embedded, SPECIES_FILE)
            .load_species()
            .map_err(|e| content_error(SPECIES_FILE, e))?;
        let tables = pick_source(custom, &embedded, EFFECTIVENESS_FILE)
            .load_effectiveness()
            .map_err(|e| content_error(EFFECTIVENESS_FILE, e))?;
        let config = pick_source(custom, &embedded, CONFIG_FILE)
            .load_config()
            .map_err(|e| content_error(CONFIG_FILE, e))?;

        tracing::info!(
            species = species.iter().count(),
            stat_mode = %config.stat_mode,
            "content loaded"
        );
        Ok(Self::new(species, tables, config))
    }

    /// Replaces the game configuration, keeping the other oracles shared.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::new(
            self.species.as_ref(),
            self.tables.as_ref(),
            self.config.as_ref(),
        )
    }

    pub fn species(&self) -> &SpeciesBook {
        &self.species
    }

    pub fn tables(&self) -> &EffectivenessChart {
        &self.tables
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn pick_source<'f>(
    custom: Option<&'f ContentFactory>,
    embedded: &'f ContentFactory,
    file: &'static str,
) -> &'f ContentFactory {
    match custom {
        Some(factory) if factory.provides(file) => factory,
        Some(factory) => {
            tracing::warn!(
                file,
                dir = ?factory.data_dir(),
                "content file missing, using embedded copy"
            );
            embedded
        }
        None => embedded,
    }
}

fn content_error(file: &'static str, err: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::Content {
        file,
        message: format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::ContentFactory;
    use game_core::{SpeciesOracle, StatMode};
    use std::fs;

    #[test]
    fn config_override_keeps_catalog() {
        let content = ContentFactory::embedded().load_all().unwrap();
        let oracles = OracleManager::from_content(content)
            .with_config(GameConfig::with_stat_mode(StatMode::Complex));

        let env = oracles.as_game_env();
        assert_eq!(env.config().stat_mode, StatMode::Complex);
        assert_eq!(env.species().count(), oracles.species().count());
    }

    #[test]
    fn partial_data_dir_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "stat_mode = \"complex\"\n").unwrap();

        let oracles = OracleManager::load(Some(dir.path())).unwrap();
        let embedded = OracleManager::load(None).unwrap();

        assert_eq!(oracles.config().stat_mode, StatMode::Complex);
        assert_eq!(oracles.species().count(), embedded.species().count());
        assert_eq!(oracles.tables(), embedded.tables());
    }

    #[test]
    fn malformed_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SPECIES_FILE), "not ron").unwrap();

        let err = OracleManager::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, RuntimeError::Content { file, .. } if file == SPECIES_FILE));
    }
}
