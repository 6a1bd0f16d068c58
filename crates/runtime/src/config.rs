//! Tower session configuration.
use std::env;

use game_core::RosterMode;

use crate::api::{Result, RuntimeError};

/// Tunables for a tower session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TowerConfig {
    /// Fewest lives a team can be assigned.
    pub min_lives: u32,
    /// Most lives a team can be assigned.
    pub max_lives: u32,
    /// Number of enemy teams generated for a session.
    pub enemy_teams: usize,
    /// Retrieval discipline of generated enemy teams.
    pub enemy_mode: RosterMode,
    /// RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl TowerConfig {
    pub const DEFAULT_MIN_LIVES: u32 = 2;
    pub const DEFAULT_MAX_LIVES: u32 = 10;
    pub const DEFAULT_ENEMY_TEAMS: usize = 3;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TOWER_MIN_LIVES` - Fewest lives per team (default: 2)
    /// - `TOWER_MAX_LIVES` - Most lives per team (default: 10)
    /// - `TOWER_ENEMY_TEAMS` - Enemy teams per session (default: 3)
    /// - `TOWER_ENEMY_MODE` - `front`, `back` or `optimise` (default: back)
    /// - `TOWER_SEED` - RNG seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(lives) = read_env::<u32>("TOWER_MIN_LIVES") {
            config.min_lives = lives;
        }
        if let Some(lives) = read_env::<u32>("TOWER_MAX_LIVES") {
            config.max_lives = lives;
        }
        if let Some(teams) = read_env::<usize>("TOWER_ENEMY_TEAMS") {
            config.enemy_teams = teams;
        }
        if let Some(mode) = read_env::<RosterMode>("TOWER_ENEMY_MODE") {
            config.enemy_mode = mode;
        }
        if let Some(seed) = read_env::<u64>("TOWER_SEED") {
            config.seed = Some(seed);
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_enemy_teams(mut self, teams: usize) -> Self {
        self.enemy_teams = teams;
        self
    }

    pub fn with_lives(mut self, min: u32, max: u32) -> Self {
        self.min_lives = min;
        self.max_lives = max;
        self
    }

    pub fn with_enemy_mode(mut self, mode: RosterMode) -> Self {
        self.enemy_mode = mode;
        self
    }

    /// Checks the life range.
    pub fn validate(&self) -> Result<()> {
        if self.min_lives == 0 {
            return Err(RuntimeError::InvalidConfig {
                reason: "teams need at least one life".into(),
            });
        }
        if self.min_lives > self.max_lives {
            return Err(RuntimeError::InvalidConfig {
                reason: format!(
                    "min_lives ({}) exceeds max_lives ({})",
                    self.min_lives, self.max_lives
                ),
            });
        }
        Ok(())
    }
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            min_lives: Self::DEFAULT_MIN_LIVES,
            max_lives: Self::DEFAULT_MAX_LIVES,
            enemy_teams: Self::DEFAULT_ENEMY_TEAMS,
            enemy_mode: RosterMode::Back,
            seed: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
