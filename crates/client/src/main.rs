//! Battle tower command-line client.
//!
//! Loads content, builds the player's team, generates enemy teams, and runs
//! the tower until the player or every enemy is out of lives.
//!
//! # Examples
//!
//! ```bash
//! # Random team, reproducible run
//! tower --seed 42
//!
//! # Hand-picked team sorted by speed, level-scaled stats, JSON output
//! tower --team Flamikin,Aquariuma,Rockodile --mode optimise --sort-key speed \
//!       --stat-mode complex --json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=tower_runtime=debug` to see every battle
//! event.
mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use game_core::{GameConfig, Roster};
use tower_runtime::{OracleManager, TowerRound, TowerSession};

use cli::Cli;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let mut oracles =
        OracleManager::load(cli.data_dir.as_deref()).context("Failed to load game content")?;
    if let Some(stats) = cli.stat_mode {
        let config = GameConfig {
            stat_mode: stats.into(),
            ..oracles.config().clone()
        };
        oracles = oracles.with_config(config);
    }

    let config = cli.tower_config();
    let enemy_teams = config.enemy_teams;
    tracing::info!(seed = ?config.seed, enemy_teams, "Starting tower");

    let mut session = TowerSession::new(oracles.as_game_env(), config)?;
    let team = session
        .build_team(&cli.team_spec(), &cli.selection())
        .context("Failed to build player team")?;
    if !cli.json {
        print_team(&team);
    }
    session.set_my_team(team);
    session
        .generate_teams(enemy_teams)
        .context("Failed to generate enemy teams")?;

    for round in session.by_ref() {
        let round = round?;
        if cli.json {
            println!("{}", serde_json::to_string(&round)?);
        } else {
            print_round(&round);
        }
    }

    let out_of_meta = session.out_of_meta();
    if cli.json {
        println!("{}", serde_json::json!({ "out_of_meta": out_of_meta }));
    } else {
        let names: Vec<String> = out_of_meta.iter().map(ToString::to_string).collect();
        println!(
            "Out of meta: {}",
            if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            }
        );
    }

    Ok(())
}

fn print_team(team: &Roster) {
    println!("Your team ({}):", team.mode());
    for creature in team.iter() {
        println!("  {creature}");
    }
}

fn print_round(round: &TowerRound) {
    println!(
        "Round {:>3} vs enemy #{}: {} in {} turns | lives: you {}, enemy {}",
        round.round,
        round.enemy_id,
        round.result,
        round.turns,
        round.player_lives,
        round.enemy_lives,
    );
}
