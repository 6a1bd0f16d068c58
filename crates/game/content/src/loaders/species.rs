//! Species catalog loader.

use std::path::Path;

use game_core::{SpeciesBook, SpeciesDescriptor, SpeciesOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Species catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesDescriptor>,
}

/// Loader for the species catalog from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load a species catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SpeciesBook> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid species catalog {}: {}", path.display(), e))
    }

    /// Parse a species catalog from RON text.
    ///
    /// Formulas are validated token by token while deserializing. The
    /// catalog is then checked for unique names and resolvable evolutions,
    /// and every formula is evaluated once at level 1.
    pub fn parse(content: &str) -> LoadResult<SpeciesBook> {
        let catalog: SpeciesCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species catalog RON: {}", e))?;

        if catalog.species.is_empty() {
            anyhow::bail!("species catalog is empty");
        }

        for descriptor in &catalog.species {
            if let Some(complex) = &descriptor.complex {
                complex.compute(1).map_err(|e| {
                    anyhow::anyhow!("species '{}' has an invalid formula: {}", descriptor.name, e)
                })?;
            }
        }

        let book = SpeciesBook::new(catalog.species)?;
        if book.spawnable().is_empty() {
            anyhow::bail!("species catalog has no spawnable species");
        }
        Ok(book)
    }
}
