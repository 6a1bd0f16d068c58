//! Battle tower runtime.
//!
//! Wires `game-core` rules to static content and randomness: team selection,
//! enemy generation, life bookkeeping across repeated battles, and tracing of
//! the events each battle reports.
//!
//! Modules:
//! - [`api`]: error types surfaced to clients
//! - [`config`]: environment-driven session configuration
//! - [`oracle`]: shared content oracles and [`game_core::GameEnv`] views
//! - [`selection`]: building rosters from a selection mode
//! - [`tower`]: the tower session itself
pub mod api;
pub mod config;
pub mod events;
pub mod oracle;
pub mod selection;
pub mod tower;

pub use api::{Result, RuntimeError};
pub use config::TowerConfig;
pub use oracle::OracleManager;
pub use selection::{SelectionError, TeamSelection, TeamSpec, build_roster, resolve_species};
pub use tower::{TowerRound, TowerSession};
