//! Combat Groups - headless driver
//!
//! Loads a combatant snapshot (JSON) and tracker settings (TOML), then prints
//! the grouping, a group-skipping turn change, or a round of group initiative
//! rolls as JSON.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use combat_groups::core::{Combatant, Result, TrackerConfig};
use combat_groups::core::types::parse_snapshot;
use combat_groups::grouping::{build_report, partitions_from_tags, GroupSummary, GroupingReport};
use combat_groups::initiative::{roll_group_initiative, FormulaRoller, RollOptions};
use combat_groups::turns::{intercept_turn_change, TurnChange};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "combat-groups")]
#[command(about = "Group combatants, skip turns by group and roll group initiative")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Encounter {
    /// Combatant snapshot: a JSON array in canonical turn order
    #[arg(long)]
    combatants: PathBuf,

    /// Tracker settings (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured grouping mode
    #[arg(long)]
    mode: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ordered groups
    Groups {
        #[command(flatten)]
        encounter: Encounter,
    },
    /// Redirect a turn change to the neighbouring group boundary
    NextTurn {
        #[command(flatten)]
        encounter: Encounter,
        #[arg(long, default_value_t = 1)]
        from_round: u32,
        #[arg(long)]
        from_turn: usize,
        #[arg(long, default_value_t = 1)]
        to_round: u32,
        #[arg(long)]
        to_turn: usize,
    },
    /// Roll one initiative value per eligible group
    Roll {
        #[command(flatten)]
        encounter: Encounter,
        /// Random seed for deterministic rolls
        #[arg(long)]
        seed: Option<u64>,
        /// Roll groups whose members already have initiative
        #[arg(long)]
        reroll: bool,
        /// Skip groups containing player-owned combatants
        #[arg(long)]
        skip_players: bool,
    },
}

/// Turn command output
#[derive(Serialize)]
struct TurnResult {
    requested: usize,
    /// `None` means the host's change stands
    redirected: Option<usize>,
}

struct Loaded {
    config: TrackerConfig,
    combatants: Vec<Combatant>,
    mode: String,
}

impl Encounter {
    fn load(&self) -> Result<Loaded> {
        let config = match &self.config {
            Some(path) => TrackerConfig::load(path)?,
            None => TrackerConfig::default(),
        };
        let combatants = parse_snapshot(&std::fs::read_to_string(&self.combatants)?)?;
        let mode = self
            .mode
            .clone()
            .unwrap_or_else(|| config.active_mode.clone());

        Ok(Loaded {
            config,
            combatants,
            mode,
        })
    }
}

impl Loaded {
    fn group(&self) -> Result<GroupingReport<'_>> {
        let registry = self.config.registry()?;
        let partitions = partitions_from_tags(&self.combatants, &self.config.group_tag_path);
        build_report(
            &self.combatants,
            &self.mode,
            &registry,
            &self.config.options,
            &partitions,
        )
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Groups { encounter } => {
            let loaded = encounter.load()?;
            let report = loaded.group()?;
            let summaries: Vec<GroupSummary> = report.groups.iter().map(|g| g.summary()).collect();
            print_json(&summaries)
        }
        Command::NextTurn {
            encounter,
            from_round,
            from_turn,
            to_round,
            to_turn,
        } => {
            let loaded = encounter.load()?;
            let report = loaded.group()?;
            let change = TurnChange {
                from_round,
                from_turn,
                to_round,
                to_turn,
            };
            let redirected = intercept_turn_change(&report.groups, &change, &loaded.config.options);
            print_json(&TurnResult {
                requested: to_turn,
                redirected,
            })
        }
        Command::Roll {
            encounter,
            seed,
            reroll,
            skip_players,
        } => {
            let loaded = encounter.load()?;
            let report = loaded.group()?;
            let seed = seed.unwrap_or_else(|| rand::random());
            tracing::info!("Rolling group initiative with seed {}", seed);

            let mut roller =
                FormulaRoller::new(loaded.config.formula()?, ChaCha8Rng::seed_from_u64(seed));
            let options = RollOptions {
                reroll,
                skip_player_groups: skip_players,
            };
            print_json(&roll_group_initiative(&report.groups, &options, &mut roller))
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("combat_groups=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
