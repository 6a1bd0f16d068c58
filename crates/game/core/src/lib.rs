//! Deterministic battle rules shared by the runtime, content loaders, and tools.
//!
//! `game-core` defines the canonical rules (creatures, rosters, the battle
//! engine, postfix stat formulas) and exposes pure APIs: no I/O, no
//! randomness, no logging. Battles run through [`engine::BattleEngine`],
//! which reports what happened as [`engine::BattleEvent`]s so callers can log
//! or render them.
pub mod combat;
pub mod config;
pub mod creature;
pub mod element;
pub mod engine;
pub mod env;
pub mod error;
pub mod formula;
pub mod roster;
pub mod stats;

pub use config::{GameConfig, StatMode};
pub use creature::{Creature, CreatureError};
pub use element::Element;
pub use engine::{
    ActionProvider, BattleAction, BattleEngine, BattleError, BattleEvent, BattleOutcome,
    BattlePhase, BattleResult, BattleState, FixedAction, ScriptedActions, Side, SpeedHpHeuristic,
    TurnReport,
};
pub use env::{
    CatalogError, EffectivenessChart, GameEnv, SpeciesBook, SpeciesDescriptor, SpeciesId,
    SpeciesOracle, TablesOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use formula::{Formula, FormulaError};
pub use roster::{PriorityKey, Roster, RosterError, RosterMode, SortOrder};
pub use stats::{ComplexStats, StatBlock, StatKind};
