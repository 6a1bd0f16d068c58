//! Battle tower sessions.
//!
//! The player's team climbs a queue of enemy teams. Each battle costs the
//! loser a life (both teams on a draw); teams are regenerated after every
//! battle and an enemy with lives left rejoins the back of the queue. The
//! session ends when the player runs out of lives or the queue empties.
use std::collections::{BTreeSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use game_core::{BattleEngine, BattleResult, Element, GameEnv, Roster, Side};

use crate::api::{Result, RuntimeError};
use crate::config::TowerConfig;
use crate::events::trace_turn;
use crate::selection::{TeamSelection, TeamSpec, build_roster};

/// Summary of one tower battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TowerRound {
    /// 1-based battle counter.
    pub round: usize,
    /// Id of the enemy team fought, in generation order.
    pub enemy_id: usize,
    pub result: BattleResult,
    pub turns: u32,
    /// Player lives after the battle.
    pub player_lives: u32,
    /// Enemy lives after the battle.
    pub enemy_lives: u32,
}

#[derive(Debug)]
struct EnemyTeam {
    id: usize,
    roster: Roster,
}

/// A running tower: the player's team, the enemy queue, and the element
/// history used for [`TowerSession::out_of_meta`].
#[derive(Debug)]
pub struct TowerSession<'a> {
    env: GameEnv<'a>,
    config: TowerConfig,
    rng: StdRng,
    player: Option<Roster>,
    enemies: VecDeque<EnemyTeam>,
    next_enemy_id: usize,
    rounds: usize,
    earlier_elements: BTreeSet<Element>,
    latest_elements: BTreeSet<Element>,
}

impl<'a> TowerSession<'a> {
    pub fn new(env: GameEnv<'a>, config: TowerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            env,
            config,
            rng,
            player: None,
            enemies: VecDeque::new(),
            next_enemy_id: 0,
            rounds: 0,
            earlier_elements: BTreeSet::new(),
            latest_elements: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &TowerConfig {
        &self.config
    }

    /// Builds a team using the session's random source.
    pub fn build_team(&mut self, spec: &TeamSpec, selection: &TeamSelection) -> Result<Roster> {
        build_roster(&self.env, spec, selection, &mut self.rng)
    }

    /// Installs the player's team with a random number of lives.
    pub fn set_my_team(&mut self, mut team: Roster) {
        let lives = self.roll_lives();
        team.set_lives(lives);
        tracing::info!(size = team.len(), mode = %team.mode(), lives, "player team ready");
        self.player = Some(team);
    }

    /// Generates `count` random enemy teams with random lives and queues them.
    pub fn generate_teams(&mut self, count: usize) -> Result<()> {
        let spec = TeamSpec::new(self.config.enemy_mode);
        for _ in 0..count {
            let mut roster = self.build_team(&spec, &TeamSelection::Random)?;
            let lives = self.roll_lives();
            roster.set_lives(lives);
            let id = self.enqueue_enemy(roster);
            tracing::debug!(enemy = id, lives, "enemy team generated");
        }
        Ok(())
    }

    /// Queues a prepared enemy team, keeping its own life count. Returns the
    /// team's id.
    pub fn enqueue_enemy(&mut self, roster: Roster) -> usize {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        self.enemies.push_back(EnemyTeam { id, roster });
        id
    }

    pub fn player(&self) -> Option<&Roster> {
        self.player.as_ref()
    }

    /// Queued enemy teams with their ids, front of the queue first.
    pub fn enemies(&self) -> impl Iterator<Item = (usize, &Roster)> + '_ {
        self.enemies.iter().map(|team| (team.id, &team.roster))
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Whether another battle can be fought.
    pub fn battles_remaining(&self) -> bool {
        self.player.as_ref().is_some_and(Roster::has_lives)
            && self.enemies.iter().any(|team| team.roster.has_lives())
    }

    /// Fights the enemy at the front of the queue.
    pub fn next_battle(&mut self) -> Result<TowerRound> {
        let env = self.env;
        let player = self.player.as_mut().ok_or(RuntimeError::NoPlayerTeam)?;
        self.enemies.retain(|team| {
            let alive = team.roster.has_lives();
            if !alive {
                tracing::debug!(enemy = team.id, "skipping enemy team without lives");
            }
            alive
        });
        let mut enemy = self
            .enemies
            .pop_front()
            .ok_or(RuntimeError::NoEnemiesRemaining)?;

        let mut elements: BTreeSet<Element> = player.elements().into_iter().collect();
        elements.extend(enemy.roster.elements());

        let outcome = BattleEngine::new(env).battle_with(player, &mut enemy.roster, trace_turn);
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                self.enemies.push_front(enemy);
                return Err(err.into());
            }
        };

        for side in outcome.result.losers() {
            match side {
                Side::One => player.lose_life(),
                Side::Two => enemy.roster.lose_life(),
            };
        }
        player.regenerate()?;
        enemy.roster.regenerate()?;

        self.rounds += 1;
        let round = TowerRound {
            round: self.rounds,
            enemy_id: enemy.id,
            result: outcome.result,
            turns: outcome.turns,
            player_lives: player.lives(),
            enemy_lives: enemy.roster.lives(),
        };
        tracing::info!(
            round = round.round,
            enemy = round.enemy_id,
            result = %round.result,
            turns = round.turns,
            player_lives = round.player_lives,
            enemy_lives = round.enemy_lives,
            "tower battle finished"
        );

        if enemy.roster.has_lives() {
            self.enemies.push_back(enemy);
        } else {
            tracing::debug!(enemy = enemy.id, "enemy team eliminated");
        }

        let previous = std::mem::replace(&mut self.latest_elements, elements);
        self.earlier_elements.extend(previous);

        Ok(round)
    }

    /// Elements seen in an earlier battle but absent from the most recent
    /// one, in canonical order.
    pub fn out_of_meta(&self) -> Vec<Element> {
        self.earlier_elements
            .difference(&self.latest_elements)
            .copied()
            .collect()
    }

    fn roll_lives(&mut self) -> u32 {
        self.rng
            .gen_range(self.config.min_lives..=self.config.max_lives)
    }
}

impl Iterator for TowerSession<'_> {
    type Item = Result<TowerRound>;

    fn next(&mut self) -> Option<Self::Item> {
        self.battles_remaining().then(|| self.next_battle())
    }
}
