//! Content loaders for reading game data from files.
//!
//! Each loader has a `load(path)` entry point for files on disk and a
//! `parse(text)` entry point used for the embedded defaults and tests.

pub mod config;
pub mod effectiveness;
pub mod factory;
pub mod species;

pub use config::ConfigLoader;
pub use effectiveness::{EffectivenessEntry, EffectivenessLoader, EffectivenessTable};
pub use factory::{CONFIG_FILE, ContentFactory, EFFECTIVENESS_FILE, GameContent, SPECIES_FILE};
pub use species::{SpeciesCatalog, SpeciesLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
