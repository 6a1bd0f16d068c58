use crate::element::Element;

/// Oracle providing game rules and balance tables.
///
/// This oracle defines the elemental effectiveness rules consulted by every
/// attack. It does NOT define species data (use [`super::SpeciesOracle`]).
pub trait TablesOracle: Send + Sync {
    /// Damage multiplier for `attacker` hitting `defender`.
    fn effectiveness(&self, attacker: Element, defender: Element) -> f64;
}

/// Dense element-vs-element multiplier table.
///
/// Built once at startup and shared by reference afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectivenessChart {
    cells: [[f64; Element::COUNT]; Element::COUNT],
}

impl EffectivenessChart {
    /// Multiplier used for pairs a chart does not list.
    pub const NEUTRAL: f64 = 1.0;

    /// Chart where every pair uses `multiplier`.
    pub const fn uniform(multiplier: f64) -> Self {
        Self {
            cells: [[multiplier; Element::COUNT]; Element::COUNT],
        }
    }

    /// Sets one pair (builder pattern).
    #[must_use]
    pub fn with(mut self, attacker: Element, defender: Element, multiplier: f64) -> Self {
        self.set(attacker, defender, multiplier);
        self
    }

    pub fn set(&mut self, attacker: Element, defender: Element, multiplier: f64) {
        self.cells[attacker.as_index()][defender.as_index()] = multiplier;
    }

    pub fn get(&self, attacker: Element, defender: Element) -> f64 {
        self.cells[attacker.as_index()][defender.as_index()]
    }
}

impl Default for EffectivenessChart {
    fn default() -> Self {
        Self::uniform(Self::NEUTRAL)
    }
}

impl TablesOracle for EffectivenessChart {
    fn effectiveness(&self, attacker: Element, defender: Element) -> f64 {
        self.get(attacker, defender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_pairs_are_neutral() {
        let chart = EffectivenessChart::default()
            .with(Element::Water, Element::Fire, 2.0)
            .with(Element::Normal, Element::Ghost, 0.0);
        assert_eq!(chart.effectiveness(Element::Water, Element::Fire), 2.0);
        assert_eq!(chart.effectiveness(Element::Fire, Element::Water), 1.0);
        assert_eq!(chart.effectiveness(Element::Normal, Element::Ghost), 0.0);
    }
}
