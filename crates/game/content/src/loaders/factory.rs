//! Content factory for building oracle data from data files.

use std::path::{Path, PathBuf};

use game_core::{EffectivenessChart, GameConfig, SpeciesBook};

use crate::loaders::{ConfigLoader, EffectivenessLoader, LoadResult, SpeciesLoader};

pub const SPECIES_FILE: &str = "species.ron";
pub const EFFECTIVENESS_FILE: &str = "effectiveness.ron";
pub const CONFIG_FILE: &str = "config.toml";

const EMBEDDED_SPECIES: &str = include_str!("../../data/species.ron");
const EMBEDDED_EFFECTIVENESS: &str = include_str!("../../data/effectiveness.ron");
const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Everything a battle needs from static content.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub species: SpeciesBook,
    pub effectiveness: EffectivenessChart,
    pub config: GameConfig,
}

/// Where content comes from.
#[derive(Debug, Clone)]
enum Source {
    Directory(PathBuf),
    Embedded,
}

/// Content factory that loads all game content from a data directory or
/// from the copies compiled into this crate.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── effectiveness.ron
/// └── species.ron
/// ```
#[derive(Debug, Clone)]
pub struct ContentFactory {
    source: Source,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(data_dir.into()),
        }
    }

    /// Creates a content factory backed by the built-in data set.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match &self.source {
            Source::Directory(dir) => ConfigLoader::load(&dir.join(CONFIG_FILE)),
            Source::Embedded => ConfigLoader::parse(EMBEDDED_CONFIG),
        }
    }

    /// Load the species catalog from `species.ron`.
    pub fn load_species(&self) -> LoadResult<SpeciesBook> {
        match &self.source {
            Source::Directory(dir) => SpeciesLoader::load(&dir.join(SPECIES_FILE)),
            Source::Embedded => SpeciesLoader::parse(EMBEDDED_SPECIES),
        }
    }

    /// Load the effectiveness chart from `effectiveness.ron`.
    pub fn load_effectiveness(&self) -> LoadResult<EffectivenessChart> {
        match &self.source {
            Source::Directory(dir) => EffectivenessLoader::load(&dir.join(EFFECTIVENESS_FILE)),
            Source::Embedded => EffectivenessLoader::parse(EMBEDDED_EFFECTIVENESS),
        }
    }

    /// Load every content file.
    pub fn load_all(&self) -> LoadResult<GameContent> {
        Ok(GameContent {
            species: self.load_species()?,
            effectiveness: self.load_effectiveness()?,
            config: self.load_config()?,
        })
    }

    /// Whether this source has its own copy of `file`.
    pub fn provides(&self, file: &str) -> bool {
        match &self.source {
            Source::Directory(dir) => dir.join(file).is_file(),
            Source::Embedded => true,
        }
    }

    /// Returns the data directory path, `None` for embedded content.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Directory(dir) => Some(dir.as_path()),
            Source::Embedded => None,
        }
    }
}
