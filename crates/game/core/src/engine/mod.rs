//! Turn-based battle resolution.
//!
//! The [`BattleEngine`] runs a match between two [`Roster`]s. Each turn moves
//! the [`BattleState`] through
//!
//! ```text
//! AwaitingActions -> Resolving -> AwaitingActions (continue)
//!                              \-> Terminal(result)
//! ```
//!
//! Resolution order inside a turn: action choice, non-attack actions (side 1
//! then side 2), attacks by speed, attrition when nobody fainted, then
//! fainting/replacement and level-up/evolution. Everything that happens is
//! reported as [`BattleEvent`]s in the turn's [`TurnReport`].

mod errors;
mod events;
mod provider;
mod turns;

pub use errors::BattleError;
pub use events::{BattleEvent, TurnReport};
pub use provider::{ActionProvider, BattleAction, FixedAction, ScriptedActions, SpeedHpHeuristic};

use crate::creature::Creature;
use crate::env::GameEnv;
use crate::roster::{Roster, RosterError};

/// One of the two battling teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[strum(to_string = "team 1")]
    One,
    #[strum(to_string = "team 2")]
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Result declaring this side the winner.
    pub const fn wins(self) -> BattleResult {
        match self {
            Self::One => BattleResult::Side1Wins,
            Self::Two => BattleResult::Side2Wins,
        }
    }
}

/// Final outcome of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    #[strum(to_string = "team 1 wins")]
    Side1Wins,
    #[strum(to_string = "team 2 wins")]
    Side2Wins,
    #[strum(to_string = "draw")]
    Draw,
}

impl BattleResult {
    /// Winning side, `None` on a draw.
    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::Side1Wins => Some(Side::One),
            Self::Side2Wins => Some(Side::Two),
            Self::Draw => None,
        }
    }

    /// Sides that lose a life for this result.
    pub fn losers(self) -> &'static [Side] {
        match self {
            Self::Side1Wins => &[Side::Two],
            Self::Side2Wins => &[Side::One],
            Self::Draw => &Side::BOTH,
        }
    }
}

/// Where a battle is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    AwaitingActions,
    Resolving,
    Terminal(BattleResult),
}

/// Transient state of a running battle: the two active creatures and the
/// turn counter. The rosters themselves stay with their owners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleState {
    active: [Option<Creature>; 2],
    turn: u32,
    phase: BattlePhase,
}

impl BattleState {
    pub fn active(&self, side: Side) -> Option<&Creature> {
        self.active[side.index()].as_ref()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            BattlePhase::Terminal(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.result().is_some()
    }
}

/// Summary of a completed battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleOutcome {
    pub result: BattleResult,
    pub turns: u32,
}

/// Battle driver holding the environment and each side's action provider.
pub struct BattleEngine<'a> {
    env: GameEnv<'a>,
    providers: [Box<dyn ActionProvider + 'a>; 2],
}

impl<'a> BattleEngine<'a> {
    /// Creates an engine where both sides use [`SpeedHpHeuristic`].
    pub fn new(env: GameEnv<'a>) -> Self {
        Self {
            env,
            providers: [Box::new(SpeedHpHeuristic), Box::new(SpeedHpHeuristic)],
        }
    }

    /// Replaces the action provider of one side.
    pub fn with_provider(mut self, side: Side, provider: impl ActionProvider + 'a) -> Self {
        self.providers[side.index()] = Box::new(provider);
        self
    }

    pub fn env(&self) -> &GameEnv<'a> {
        &self.env
    }

    /// Runs a full match, returning surviving creatures to their rosters.
    pub fn battle(
        &mut self,
        team1: &mut Roster,
        team2: &mut Roster,
    ) -> Result<BattleOutcome, BattleError> {
        self.battle_with(team1, team2, |_| {})
    }

    /// Runs a full match, handing every turn report to `observer`.
    pub fn battle_with(
        &mut self,
        team1: &mut Roster,
        team2: &mut Roster,
        mut observer: impl FnMut(&TurnReport),
    ) -> Result<BattleOutcome, BattleError> {
        let mut state = self.begin(team1, team2)?;
        while !state.is_terminal() {
            let report = self.process_turn(&mut state, team1, team2)?;
            observer(&report);
        }
        let turns = state.turn;
        let result = self.conclude(state, team1, team2)?;
        Ok(BattleOutcome { result, turns })
    }

    /// Sends out the first creature of each roster.
    ///
    /// A battle where either roster starts empty is terminal immediately.
    pub fn begin(&self, team1: &mut Roster, team2: &mut Roster) -> Result<BattleState, BattleError> {
        let active = [draw_next(team1)?, draw_next(team2)?];
        let phase = match (&active[0], &active[1]) {
            (Some(_), Some(_)) => BattlePhase::AwaitingActions,
            (Some(_), None) => BattlePhase::Terminal(BattleResult::Side1Wins),
            (None, Some(_)) => BattlePhase::Terminal(BattleResult::Side2Wins),
            (None, None) => BattlePhase::Terminal(BattleResult::Draw),
        };
        Ok(BattleState {
            active,
            turn: 0,
            phase,
        })
    }

    /// Returns surviving active creatures to their rosters and yields the
    /// result of a terminal battle.
    pub fn conclude(
        &self,
        state: BattleState,
        team1: &mut Roster,
        team2: &mut Roster,
    ) -> Result<BattleResult, BattleError> {
        let result = state.result().ok_or(BattleError::NotFinished)?;

        let [first, second] = state.active;
        for (creature, team) in [(first, team1), (second, team2)] {
            if let Some(creature) = creature.filter(Creature::is_alive) {
                team.add(creature)?;
            }
        }
        Ok(result)
    }
}

/// Retrieves the next creature, mapping an empty roster to `None`.
fn draw_next(roster: &mut Roster) -> Result<Option<Creature>, RosterError> {
    match roster.retrieve() {
        Ok(creature) => Ok(Some(creature)),
        Err(RosterError::EmptyRoster) => Ok(None),
        Err(err) => Err(err),
    }
}
