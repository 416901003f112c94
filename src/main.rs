//! Terminal entry point.
//!
//! ```text
//! chakra-clash --team-a naruto,sakura --team-b sasuke,gaara --seed 7
//! chakra-clash --auto --verbose
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chakra_clash::battle::{Battle, BattleStatus};
use chakra_clash::cli::{help_text, parse_command, status_report, turn_prompt, Command, ConsoleObserver};
use chakra_clash::core::{BattleConfig, CharacterId};
use chakra_clash::events::TracingObserver;
use chakra_clash::roster::{Roster, Team};

/// Turn-based team battles in the terminal
#[derive(Parser)]
#[command(name = "chakra-clash")]
#[command(about = "Turn-based shinobi team battles", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Battle configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Roster file (JSON) replacing the built-in roster
    #[arg(long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Template keys for team A, comma-separated
    #[arg(long, value_delimiter = ',', default_value = "naruto,sakura,kakashi")]
    team_a: Vec<String>,

    /// Template keys for team B, comma-separated
    #[arg(long, value_delimiter = ',', default_value = "sasuke,neji,gaara")]
    team_b: Vec<String>,

    /// Let the AI play team A as well
    #[arg(long)]
    auto: bool,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => BattleConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BattleConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let roster = match &cli.roster {
        Some(path) => Roster::load(path)
            .with_context(|| format!("Failed to load roster from {}", path.display()))?,
        None => Roster::builtin().context("Built-in roster is invalid")?,
    };

    let team_a = build_team(&roster, "Team A", &cli.team_a, 1, !cli.auto)?;
    let next_id = 1 + u32::try_from(team_a.len()).context("Team A is too large")?;
    let team_b = build_team(&roster, "Team B", &cli.team_b, next_id, false)?;

    let mut battle = Battle::new(team_a, team_b, config)?
        .with_observer(ConsoleObserver::new())
        .with_observer(TracingObserver);

    battle.start()?;
    let mut status = battle.process_turn()?;
    let mut lines = io::stdin().lock().lines();

    while let BattleStatus::AwaitingInput(actor) = status {
        print!("{}", turn_prompt(battle.state(), actor));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            println!("Input closed, leaving the battle.");
            return Ok(());
        };
        let line = line.context("Failed to read input")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command.to_action(battle.state(), actor) {
            Ok(Some(action)) => status = battle.execute_action(action)?,
            Ok(None) => match command {
                Command::Status => print!("{}", status_report(battle.state())),
                _ => println!("{}", help_text()),
            },
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

/// Spawn one character per key, numbering ids from `first_id`.
fn build_team(
    roster: &Roster,
    name: &str,
    keys: &[String],
    first_id: u32,
    player_controlled: bool,
) -> Result<Team> {
    let members = keys
        .iter()
        .zip(first_id..)
        .map(|(key, id)| roster.spawn(key.trim(), CharacterId::new(id), player_controlled))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to build {}", name))?;
    Ok(Team::new(name, members))
}
