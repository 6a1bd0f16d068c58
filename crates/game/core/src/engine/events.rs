//! Battle events reported by each turn.

use super::{BattleAction, BattleResult, Side};

/// One thing that happened during a turn, in resolution order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    ActionChosen {
        side: Side,
        action: BattleAction,
    },
    Reordered {
        side: Side,
    },
    Swapped {
        side: Side,
        out: String,
        sent: String,
    },
    Attacked {
        side: Side,
        attacker: String,
        defender: String,
        damage: u32,
        remaining: i32,
    },
    Attrition {
        side: Side,
        creature: String,
        remaining: i32,
    },
    Fainted {
        side: Side,
        creature: String,
    },
    SentOut {
        side: Side,
        creature: String,
    },
    LeveledUp {
        side: Side,
        creature: String,
        level: u32,
    },
    Evolved {
        side: Side,
        from: String,
        into: String,
    },
    Finished {
        result: BattleResult,
    },
}

impl core::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ActionChosen { side, action } => write!(f, "{side} chose {action}"),
            Self::Reordered { side } => write!(f, "{side} reordered its roster"),
            Self::Swapped { side, out, sent } => write!(f, "{side} swapped {out} for {sent}"),
            Self::Attacked {
                attacker,
                defender,
                damage,
                remaining,
                ..
            } => write!(
                f,
                "{attacker} hit {defender} for {damage} ({remaining} HP left)"
            ),
            Self::Attrition {
                creature,
                remaining,
                ..
            } => write!(f, "{creature} tires ({remaining} HP left)"),
            Self::Fainted { side, creature } => write!(f, "{side}: {creature} fainted"),
            Self::SentOut { side, creature } => write!(f, "{side} sent out {creature}"),
            Self::LeveledUp {
                creature, level, ..
            } => write!(f, "{creature} reached level {level}"),
            Self::Evolved { from, into, .. } => write!(f, "{from} evolved into {into}"),
            Self::Finished { result } => write!(f, "battle over: {result}"),
        }
    }
}

/// Everything one call to `process_turn` resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub actions: [BattleAction; 2],
    pub events: Vec<BattleEvent>,
    /// Set when this turn ended the battle.
    pub result: Option<BattleResult>,
}

impl TurnReport {
    pub fn is_final(&self) -> bool {
        self.result.is_some()
    }

    pub fn total_damage(&self, side: Side) -> u32 {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::Attacked {
                    side: attacker,
                    damage,
                    ..
                } if *attacker == side => Some(*damage),
                _ => None,
            })
            .sum()
    }
}
