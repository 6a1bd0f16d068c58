//! Tracing of battle events.
//!
//! `game-core` reports what happened in a turn without logging anything;
//! this module turns those reports into `tracing` records.
use game_core::TurnReport;

/// Emits one debug record per event in a turn report.
pub fn trace_turn(report: &TurnReport) {
    for event in &report.events {
        tracing::debug!(turn = report.turn, "{event}");
    }
}
