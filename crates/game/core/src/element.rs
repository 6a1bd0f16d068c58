//! Elemental typing for creatures.
//!
//! Every species carries exactly one element. Attack damage is scaled by the
//! effectiveness of the attacker's element against the defender's element,
//! looked up through [`crate::env::TablesOracle`].

/// Creature element.
///
/// Declaration order is the canonical element index order; anything that
/// reports sets of elements (e.g. the tower's out-of-meta query) sorts by it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Fire,
    Water,
    Grass,
    Bug,
    Dragon,
    Electric,
    Fighting,
    Flying,
    Ghost,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Fairy,
    Dark,
    Steel,
}

impl Element {
    /// Number of elements.
    pub const COUNT: usize = <Self as strum::EnumCount>::COUNT;

    /// Position of this element in index order.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Iterates every element in index order.
    pub fn all() -> impl Iterator<Item = Element> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}
