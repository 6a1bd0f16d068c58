//! Creature stats.
//!
//! A species provides two stat sources:
//!
//! ```text
//! [ Simple: fixed StatBlock ]      [ Complex: four postfix formulas ]
//!              \                              /
//!               +--- StatBlock at level N ---+
//! ```
//!
//! The active source is picked by [`crate::config::StatMode`]. A creature
//! caches the resolved [`StatBlock`] and recomputes it whenever its level or
//! species changes.

mod block;
mod complex;

pub use block::StatBlock;
pub use complex::ComplexStats;

/// Attribute selector used for priority ordering and generic stat queries.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    /// Current hit points.
    #[default]
    Hp,
    Attack,
    Defense,
    Speed,
    Level,
}
