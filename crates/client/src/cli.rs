//! Command-line arguments.
use std::path::PathBuf;

use clap::Parser;

use game_core::{RosterMode, SortOrder, StatKind, StatMode};
use tower_runtime::{TeamSelection, TeamSpec, TowerConfig};

/// Run a battle tower session
#[derive(Parser, Debug)]
#[command(name = "tower")]
#[command(about = "Battle a team through a tower of random enemy teams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RNG seed (overrides TOWER_SEED)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Number of enemy teams (overrides TOWER_ENEMY_TEAMS)
    #[arg(long, value_name = "N")]
    pub enemies: Option<usize>,

    /// Retrieval discipline of the player's team
    #[arg(long, value_enum, default_value = "back")]
    pub mode: Mode,

    /// Stat ordering an optimised team by
    #[arg(long, value_enum, default_value = "hp")]
    pub sort_key: SortKey,

    /// Sort an optimised team lowest first
    #[arg(long)]
    pub ascending: bool,

    /// Comma-separated species names; a random team when omitted
    #[arg(long, value_delimiter = ',', value_name = "NAME,...")]
    pub team: Vec<String>,

    /// Comma-separated 1-based catalog indices, as an alternative to --team
    #[arg(long, value_delimiter = ',', value_name = "N,...", conflicts_with = "team")]
    pub pick: Vec<usize>,

    /// Directory overriding species.ron, effectiveness.ron and config.toml
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Stat source, overriding config.toml
    #[arg(long, value_enum)]
    pub stat_mode: Option<Stats>,

    /// Print rounds as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Mode {
    /// Last recruited fights first (stack)
    #[value(alias = "lifo")]
    Front,
    /// First recruited fights first (queue)
    #[value(alias = "fifo")]
    Back,
    /// Ordered by a stat
    #[value(alias = "optimize")]
    Optimise,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SortKey {
    Hp,
    Attack,
    Defense,
    Speed,
    Level,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Stats {
    /// Fixed per-species stats
    Simple,
    /// Level-scaled formula stats
    Complex,
}

impl From<Mode> for RosterMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Front => RosterMode::Front,
            Mode::Back => RosterMode::Back,
            Mode::Optimise => RosterMode::Optimise,
        }
    }
}

impl From<SortKey> for StatKind {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Hp => StatKind::Hp,
            SortKey::Attack => StatKind::Attack,
            SortKey::Defense => StatKind::Defense,
            SortKey::Speed => StatKind::Speed,
            SortKey::Level => StatKind::Level,
        }
    }
}

impl From<Stats> for StatMode {
    fn from(stats: Stats) -> Self {
        match stats {
            Stats::Simple => StatMode::Simple,
            Stats::Complex => StatMode::Complex,
        }
    }
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn tower_config(&self) -> TowerConfig {
        let mut config = TowerConfig::from_env();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(enemies) = self.enemies {
            config = config.with_enemy_teams(enemies);
        }
        config
    }

    pub fn team_spec(&self) -> TeamSpec {
        let order = if self.ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };
        TeamSpec::new(self.mode.into()).sorted_by(self.sort_key.into(), order)
    }

    pub fn selection(&self) -> TeamSelection {
        if !self.team.is_empty() {
            TeamSelection::Provided(self.team.clone())
        } else if !self.pick.is_empty() {
            TeamSelection::Indexed(self.pick.clone())
        } else {
            TeamSelection::Random
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_team_list_and_aliases() {
        let cli = Cli::parse_from([
            "tower", "--mode", "lifo", "--team", "Flamikin,Aquariuma", "--seed", "9",
        ]);
        assert!(matches!(cli.mode, Mode::Front));
        assert_eq!(
            cli.selection(),
            TeamSelection::Provided(vec!["Flamikin".into(), "Aquariuma".into()])
        );
        assert_eq!(cli.tower_config().seed, Some(9));
    }

    #[test]
    fn optimised_spec_carries_sort_key() {
        let cli = Cli::parse_from(["tower", "--mode", "optimise", "--sort-key", "speed", "--ascending"]);
        let spec = cli.team_spec();
        assert_eq!(spec.mode, RosterMode::Optimise);
        assert_eq!(spec.sort_key, StatKind::Speed);
        assert_eq!(spec.order, SortOrder::Ascending);
        assert_eq!(cli.selection(), TeamSelection::Random);
    }

    #[test]
    fn pick_selects_by_index() {
        let cli = Cli::parse_from(["tower", "--pick", "1,4,4"]);
        assert_eq!(cli.selection(), TeamSelection::Indexed(vec![1, 4, 4]));
        assert!(Cli::try_parse_from(["tower", "--pick", "1", "--team", "Flamikin"]).is_err());
    }
}
