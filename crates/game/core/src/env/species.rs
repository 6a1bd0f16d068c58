//! Species catalog.
//!
//! Species are static descriptors looked up by [`SpeciesId`]; creatures hold
//! an id plus their own battle state, never a copy of the descriptor.

use std::collections::HashMap;

use crate::config::StatMode;
use crate::element::Element;
use crate::formula::FormulaError;
use crate::stats::{ComplexStats, StatBlock};

/// Index of a species in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesId(pub u16);

impl SpeciesId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Static description of one species.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesDescriptor {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub element: Element,
    /// Name of the species this one evolves into.
    #[cfg_attr(feature = "serde", serde(default))]
    pub evolution: Option<String>,
    /// Whether selection may put this species on a team directly.
    pub spawnable: bool,
    pub simple: StatBlock,
    /// Formula stats; species without them use `simple` at every level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub complex: Option<ComplexStats>,
}

impl SpeciesDescriptor {
    pub fn new(name: impl Into<String>, element: Element, simple: StatBlock) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            element,
            evolution: None,
            spawnable: true,
            simple,
            complex: None,
        }
    }

    pub fn with_evolution(mut self, target: impl Into<String>) -> Self {
        self.evolution = Some(target.into());
        self
    }

    pub fn with_complex(mut self, complex: ComplexStats) -> Self {
        self.complex = Some(complex);
        self
    }

    pub fn with_spawnable(mut self, spawnable: bool) -> Self {
        self.spawnable = spawnable;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Resolves stats for `mode` at `level`.
    pub fn stats_at(&self, mode: StatMode, level: u32) -> Result<StatBlock, FormulaError> {
        match (mode, &self.complex) {
            (StatMode::Complex, Some(complex)) => complex.compute(level),
            _ => Ok(self.simple),
        }
    }
}

/// Read-only access to species descriptors.
pub trait SpeciesOracle: Send + Sync {
    fn descriptor(&self, id: SpeciesId) -> Option<&SpeciesDescriptor>;

    /// Case-insensitive lookup by name.
    fn find(&self, name: &str) -> Option<SpeciesId>;

    /// Species this one evolves into, if any.
    fn evolution_of(&self, id: SpeciesId) -> Option<SpeciesId>;

    /// Number of species in the catalog.
    fn count(&self) -> usize;

    /// All ids in catalog order.
    fn ids(&self) -> Vec<SpeciesId> {
        (0..self.count()).map(|i| SpeciesId(i as u16)).collect()
    }

    /// Ids of species selection may spawn, in catalog order.
    fn spawnable(&self) -> Vec<SpeciesId> {
        self.ids()
            .into_iter()
            .filter(|id| self.descriptor(*id).is_some_and(|d| d.spawnable))
            .collect()
    }
}

/// Catalog construction failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("species '{name}' is defined more than once")]
    DuplicateName { name: String },

    #[error("species '{species}' evolves into unknown species '{target}'")]
    UnknownEvolution { species: String, target: String },

    #[error("catalog holds {count} species, more than the id space allows")]
    TooManySpecies { count: usize },
}

impl crate::error::GameError for CatalogError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "CATALOG_DUPLICATE_NAME",
            Self::UnknownEvolution { .. } => "CATALOG_UNKNOWN_EVOLUTION",
            Self::TooManySpecies { .. } => "CATALOG_TOO_MANY_SPECIES",
        }
    }
}

/// In-memory species catalog with resolved evolution links.
#[derive(Clone, Debug, Default)]
pub struct SpeciesBook {
    entries: Vec<SpeciesDescriptor>,
    evolutions: Vec<Option<SpeciesId>>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesBook {
    /// Builds a catalog, validating unique names and evolution targets.
    pub fn new(entries: Vec<SpeciesDescriptor>) -> Result<Self, CatalogError> {
        if entries.len() > usize::from(u16::MAX) {
            return Err(CatalogError::TooManySpecies {
                count: entries.len(),
            });
        }

        let mut by_name = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let key = entry.name.to_ascii_lowercase();
            if by_name.insert(key, SpeciesId(index as u16)).is_some() {
                return Err(CatalogError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }

        let evolutions = entries
            .iter()
            .map(|entry| match &entry.evolution {
                None => Ok(None),
                Some(target) => by_name
                    .get(&target.to_ascii_lowercase())
                    .copied()
                    .map(Some)
                    .ok_or_else(|| CatalogError::UnknownEvolution {
                        species: entry.name.clone(),
                        target: target.clone(),
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entries,
            evolutions,
            by_name,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SpeciesDescriptor)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, d)| (SpeciesId(i as u16), d))
    }
}

impl SpeciesOracle for SpeciesBook {
    fn descriptor(&self, id: SpeciesId) -> Option<&SpeciesDescriptor> {
        self.entries.get(id.index())
    }

    fn find(&self, name: &str) -> Option<SpeciesId> {
        self.by_name.get(&name.trim().to_ascii_lowercase()).copied()
    }

    fn evolution_of(&self, id: SpeciesId) -> Option<SpeciesId> {
        self.evolutions.get(id.index()).copied().flatten()
    }

    fn count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> SpeciesBook {
        SpeciesBook::new(vec![
            SpeciesDescriptor::new("Flamikin", Element::Fire, StatBlock::new(6, 4, 8, 6))
                .with_evolution("Infernoth"),
            SpeciesDescriptor::new("Infernoth", Element::Fire, StatBlock::new(12, 8, 10, 12))
                .with_spawnable(false),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_names_and_evolutions() {
        let book = book();
        let flamikin = book.find("flamikin").unwrap();
        let infernoth = book.find("INFERNOTH").unwrap();
        assert_eq!(book.evolution_of(flamikin), Some(infernoth));
        assert_eq!(book.evolution_of(infernoth), None);
        assert_eq!(book.spawnable(), vec![flamikin]);
    }

    #[test]
    fn rejects_duplicates_and_dangling_evolutions() {
        let dup = SpeciesBook::new(vec![
            SpeciesDescriptor::new("A", Element::Fire, StatBlock::default()),
            SpeciesDescriptor::new("a", Element::Water, StatBlock::default()),
        ]);
        assert!(matches!(dup, Err(CatalogError::DuplicateName { .. })));

        let dangling = SpeciesBook::new(vec![
            SpeciesDescriptor::new("A", Element::Fire, StatBlock::default()).with_evolution("B"),
        ]);
        assert!(matches!(dangling, Err(CatalogError::UnknownEvolution { .. })));
    }

    #[test]
    fn simple_mode_ignores_formulas() {
        let descriptor = SpeciesDescriptor::new("A", Element::Fire, StatBlock::new(1, 2, 3, 4))
            .with_complex(ComplexStats::constant(StatBlock::new(9, 9, 9, 9)));
        assert_eq!(
            descriptor.stats_at(StatMode::Simple, 5).unwrap(),
            StatBlock::new(1, 2, 3, 4)
        );
        assert_eq!(
            descriptor.stats_at(StatMode::Complex, 5).unwrap(),
            StatBlock::new(9, 9, 9, 9)
        );
    }
}
