/// Which stat source creatures use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatMode {
    /// Fixed per-species values that ignore level.
    #[default]
    Simple,
    /// Postfix formulas evaluated at the creature's current level.
    Complex,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Stat source used when spawning creatures.
    pub stat_mode: StatMode,
    /// Level assigned to freshly spawned creatures.
    pub starting_level: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of creatures a roster holds.
    pub const ROSTER_CAPACITY: usize = 6;
    /// Creatures reordered by a LIFO special.
    pub const STACK_REORDER_DEPTH: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_LEVEL: u32 = 1;

    pub fn new() -> Self {
        Self {
            stat_mode: StatMode::default(),
            starting_level: Self::DEFAULT_STARTING_LEVEL,
        }
    }

    pub fn with_stat_mode(stat_mode: StatMode) -> Self {
        Self {
            stat_mode,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
