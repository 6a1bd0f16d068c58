//! Element effectiveness chart loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{EffectivenessChart, Element};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Multipliers a chart may contain.
pub const ALLOWED_MULTIPLIERS: [f64; 6] = [0.0, 0.5, 1.0, 1.25, 1.5, 2.0];

/// One non-default cell of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessEntry {
    pub attacker: Element,
    pub defender: Element,
    pub multiplier: f64,
}

/// Effectiveness chart structure for RON files: a default multiplier plus
/// the pairs that differ from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessTable {
    #[serde(default = "neutral")]
    pub default: f64,
    #[serde(default)]
    pub overrides: Vec<EffectivenessEntry>,
}

fn neutral() -> f64 {
    EffectivenessChart::NEUTRAL
}

impl EffectivenessTable {
    /// Validates the table and builds the dense chart.
    pub fn build(&self) -> LoadResult<EffectivenessChart> {
        check_multiplier(self.default)
            .map_err(|e| anyhow::anyhow!("invalid default multiplier: {}", e))?;

        let mut chart = EffectivenessChart::uniform(self.default);
        let mut seen = HashSet::with_capacity(self.overrides.len());
        for entry in &self.overrides {
            if !seen.insert((entry.attacker, entry.defender)) {
                anyhow::bail!(
                    "duplicate effectiveness entry for {} against {}",
                    entry.attacker,
                    entry.defender
                );
            }
            check_multiplier(entry.multiplier).map_err(|e| {
                anyhow::anyhow!("{} against {}: {}", entry.attacker, entry.defender, e)
            })?;
            chart.set(entry.attacker, entry.defender, entry.multiplier);
        }
        Ok(chart)
    }
}

fn check_multiplier(value: f64) -> LoadResult<()> {
    if ALLOWED_MULTIPLIERS.contains(&value) {
        Ok(())
    } else {
        anyhow::bail!(
            "multiplier {} is not one of {:?}",
            value,
            ALLOWED_MULTIPLIERS
        )
    }
}

/// Loader for the element effectiveness chart from RON files.
pub struct EffectivenessLoader;

impl EffectivenessLoader {
    /// Load an effectiveness chart from a RON file.
    pub fn load(path: &Path) -> LoadResult<EffectivenessChart> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid effectiveness chart {}: {}", path.display(), e))
    }

    /// Parse an effectiveness chart from RON text.
    pub fn parse(content: &str) -> LoadResult<EffectivenessChart> {
        let table: EffectivenessTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effectiveness RON: {}", e))?;
        table.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::TablesOracle;

    #[test]
    fn unlisted_pairs_use_default() {
        let chart = EffectivenessLoader::parse(
            "(overrides: [(attacker: water, defender: fire, multiplier: 2.0)])",
        )
        .unwrap();
        assert_eq!(chart.effectiveness(Element::Water, Element::Fire), 2.0);
        assert_eq!(chart.effectiveness(Element::Fire, Element::Water), 1.0);
    }

    #[test]
    fn rejects_values_outside_the_allowed_set() {
        let err = EffectivenessLoader::parse(
            "(default: 1.0, overrides: [(attacker: fire, defender: ice, multiplier: 3.0)])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("fire against ice"), "{err}");
        assert!(EffectivenessLoader::parse("(default: -1.0)").is_err());
    }

    #[test]
    fn rejects_duplicate_pairs() {
        let table = EffectivenessTable {
            default: 1.0,
            overrides: vec![
                EffectivenessEntry {
                    attacker: Element::Ghost,
                    defender: Element::Normal,
                    multiplier: 0.0,
                },
                EffectivenessEntry {
                    attacker: Element::Ghost,
                    defender: Element::Normal,
                    multiplier: 0.5,
                },
            ],
        };
        assert!(table.build().is_err());
    }
}
