use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use ml_checkers::ai::Agent;
use ml_checkers::config::AppConfig;
use ml_checkers::error::PersistError;
use ml_checkers::game::{CheckersBoard, Game, TicTacToeBoard};
use ml_checkers::persist::{export_values, import_values};
use ml_checkers::session::Session;
use ml_checkers::training::Trainer;

/// Train an agent to play games using reinforcement learning.
#[derive(Parser)]
#[command(name = "ml_checkers", about = "Train an agent to play games using reinforcement learning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train an agent to play checkers, then play against it
    Checkers(GameArgs),
    /// Train an agent to play tic-tac-toe, then play against it
    Tictactoe(GameArgs),
}

#[derive(Args)]
struct GameArgs {
    /// Restore learning data from this file instead of training
    #[arg(short = 'i', long = "in-file")]
    in_file: Option<PathBuf>,

    /// Save learning data to this file once agents are ready
    #[arg(short = 'o', long = "out-file")]
    out_file: Option<PathBuf>,

    /// Number of games to run during training before playing
    #[arg(short = 't', long = "training")]
    training: Option<usize>,

    /// Silence training output, including the progress log
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed the agents' random generators for reproducible training
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Checkers(args) => run_game::<CheckersBoard>("RL Checkers", args),
        Command::Tictactoe(args) => run_game::<TicTacToeBoard>("RL Tic-Tac-Toe", args),
    }
}

fn run_game<G>(banner: &str, args: GameArgs) -> Result<()>
where
    G: Game + serde::Serialize + serde::de::DeserializeOwned,
{
    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    if let Some(games) = args.training {
        config.training.num_episodes = games;
    }
    config.validate().context("validating configuration")?;

    if !args.quiet {
        println!("{banner}");
    }

    let (mut player_one, mut player_two) = match args.seed.or(config.training.seed) {
        Some(seed) => (Agent::<G>::seeded(seed), Agent::<G>::seeded(seed.wrapping_add(1))),
        None => (Agent::<G>::new(), Agent::<G>::new()),
    };

    // Restore a saved value table, or train fresh agents. A failed import is
    // non-fatal: the agent keeps its fresh table and plays with that.
    if let Some(path) = &args.in_file {
        let restored = File::open(path)
            .map_err(PersistError::from)
            .and_then(|f| import_values(player_one.bank_mut(), BufReader::new(f)));
        match restored {
            Ok(count) => {
                if !args.quiet {
                    println!("Restored {} states from {}", count, path.display());
                }
            }
            Err(e) => eprintln!("Error: {e}; failed to read serialized data"),
        }
    } else {
        let trainer = Trainer::new(config.training.clone());
        trainer.train(&mut player_one, &mut player_two, !args.quiet);
    }

    // Save the first player's table. Also non-fatal on failure.
    if let Some(path) = &args.out_file {
        let saved = File::create(path)
            .map_err(PersistError::from)
            .and_then(|f| export_values(player_one.bank(), f));
        match saved {
            Ok(()) => {
                if !args.quiet {
                    println!("Saved {} states to {}", player_one.bank().len(), path.display());
                }
            }
            Err(e) => eprintln!("Error: {e}; failed to write serialized data"),
        }
    }

    // Human competes with the computer.
    let mut session = Session::new(&mut player_one, io::stdin().lock(), io::stdout().lock());
    session.run().context("running interactive session")?;

    Ok(())
}
