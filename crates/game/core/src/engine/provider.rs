//! Action selection for each side of a battle.
//!
//! The engine never decides what a side does; it asks that side's
//! [`ActionProvider`] once per turn and consumes the returned value.

use crate::creature::Creature;
use crate::roster::Roster;

/// What a side does this turn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleAction {
    /// Attack the opposing active creature.
    Attack,
    /// Send out the next creature and return the current one to the roster.
    Swap,
    /// Apply the roster's reorder.
    Special,
}

/// Chooses one action per turn for a side.
pub trait ActionProvider {
    fn choose_action(&mut self, own: &Creature, enemy: &Creature, roster: &Roster)
    -> BattleAction;
}

/// Default strategy: attack when faster or healthier, otherwise swap.
///
/// A side with nothing left in its roster cannot swap and always attacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeedHpHeuristic;

impl ActionProvider for SpeedHpHeuristic {
    fn choose_action(
        &mut self,
        own: &Creature,
        enemy: &Creature,
        roster: &Roster,
    ) -> BattleAction {
        if roster.is_empty() || own.speed() >= enemy.speed() || own.hp() >= enemy.hp() {
            BattleAction::Attack
        } else {
            BattleAction::Swap
        }
    }
}

/// Always returns the same action.
#[derive(Clone, Copy, Debug)]
pub struct FixedAction(pub BattleAction);

impl ActionProvider for FixedAction {
    fn choose_action(&mut self, _: &Creature, _: &Creature, _: &Roster) -> BattleAction {
        self.0
    }
}

/// Replays a fixed sequence of actions, then repeats the last one.
///
/// An empty script always attacks.
#[derive(Clone, Debug, Default)]
pub struct ScriptedActions {
    script: Vec<BattleAction>,
    cursor: usize,
}

impl ScriptedActions {
    pub fn new(script: impl IntoIterator<Item = BattleAction>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl ActionProvider for ScriptedActions {
    fn choose_action(&mut self, _: &Creature, _: &Creature, _: &Roster) -> BattleAction {
        let action = self
            .script
            .get(self.cursor)
            .or_else(|| self.script.last())
            .copied()
            .unwrap_or(BattleAction::Attack);
        self.cursor = self.cursor.saturating_add(1);
        action
    }
}
