//! Combat resolution.
//!
//! Pure damage math shared by creature attacks. Everything here is
//! deterministic and side-effect free; applying the result to HP is the
//! caller's job.

pub mod damage;

pub use damage::{DamageTier, apply_damage, calculate_damage, damage_tier, elemental_damage};
