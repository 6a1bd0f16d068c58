//! Damage calculation and application.

use crate::element::Element;
use crate::env::TablesOracle;

// ============================================================================
// Damage Tier
// ============================================================================

/// Which branch of the damage rule an exchange falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageTier {
    /// Defense below half the attack: full difference goes through.
    Overwhelming,
    /// Defense below the attack: partially absorbed.
    Glancing,
    /// Defense at or above the attack: a quarter of the attack.
    Blocked,
}

/// Classifies an exchange by attack and defense.
pub fn damage_tier(attack: i32, defense: i32) -> DamageTier {
    let attack = f64::from(attack);
    let defense = f64::from(defense);
    if defense < attack / 2.0 {
        DamageTier::Overwhelming
    } else if defense < attack {
        DamageTier::Glancing
    } else {
        DamageTier::Blocked
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// if defense < attack / 2:   raw = attack - defense
/// elif defense < attack:     raw = 5/8 * attack - defense / 4
/// else:                      raw = attack / 4
///
/// damage = max(ceil(multiplier * raw), 0)
/// ```
///
/// The multiplier comes from the effectiveness table for the attacker's and
/// defender's elements. A multiplier of 0 is total immunity.
pub fn calculate_damage(attack: i32, defense: i32, multiplier: f64) -> u32 {
    let a = f64::from(attack);
    let d = f64::from(defense);

    let raw = match damage_tier(attack, defense) {
        DamageTier::Overwhelming => a - d,
        DamageTier::Glancing => 5.0 / 8.0 * a - d / 4.0,
        DamageTier::Blocked => a / 4.0,
    };

    let scaled = (multiplier * raw).ceil();
    if scaled.is_finite() && scaled > 0.0 {
        scaled.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Damage dealt by an `attacker` element creature to a `defender` element one.
pub fn elemental_damage(
    attack: i32,
    defense: i32,
    attacker: Element,
    defender: Element,
    tables: &(impl TablesOracle + ?Sized),
) -> u32 {
    calculate_damage(attack, defense, tables.effectiveness(attacker, defender))
}

/// Apply damage to current HP.
///
/// HP may go to zero or below; a creature at or below zero has fainted.
pub fn apply_damage(current_hp: i32, damage: u32) -> i32 {
    let damage = i32::try_from(damage).unwrap_or(i32::MAX);
    current_hp.saturating_sub(damage)
}
