//! Traits describing read-only battle data.
//!
//! Oracles expose species descriptors and rule tables. The [`GameEnv`]
//! aggregate bundles them with the [`GameConfig`] so creatures and the battle
//! engine can access everything they need without hard coupling to concrete
//! implementations.
mod species;
mod tables;

pub use species::{CatalogError, SpeciesBook, SpeciesDescriptor, SpeciesId, SpeciesOracle};
pub use tables::{EffectivenessChart, TablesOracle};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by creatures and the battle engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    species: &'a dyn SpeciesOracle,
    tables: &'a dyn TablesOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        species: &'a dyn SpeciesOracle,
        tables: &'a dyn TablesOracle,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            species,
            tables,
            config,
        }
    }

    pub fn species(&self) -> &'a dyn SpeciesOracle {
        self.species
    }

    pub fn tables(&self) -> &'a dyn TablesOracle {
        self.tables
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("species", &self.species.count())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
