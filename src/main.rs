//! Fazan - CLI
//!
//! Word-chain elimination game played at the terminal, against friends or
//! the computer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fazan::{
    core::GameRng,
    dictionary::{DEFAULT_AGENT, Dictionary},
    game::{Console, Game, StdConsole},
    players::configure_players,
};

#[derive(Parser)]
#[command(
    name = "fazan",
    about = "Fazan: each word must start with the last two letters of the previous one",
    version,
    author
)]
struct Cli {
    /// XML word list to play with; additions and removals are saved back to it
    #[arg(short, long, default_value = "input/DEXOnline.xml")]
    dictionary: PathBuf,

    /// Seed for a reproducible game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Name recorded on entries added during play
    #[arg(short, long, default_value = DEFAULT_AGENT)]
    agent: String,

    /// Log dictionary and game events
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut rng = cli.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    log::info!("game seed {}", rng.seed());

    let mut dictionary = Dictionary::open(&cli.dictionary)
        .with_context(|| {
            format!(
                "could not create the dictionary; check that '{}' exists and is a valid XML file",
                cli.dictionary.display()
            )
        })?
        .with_agent(cli.agent);

    let mut console = StdConsole;
    let Some(players) = configure_players(&mut console, &mut rng).context("setup failed")? else {
        log::info!("input closed during setup");
        return Ok(());
    };

    let mut game = Game::new(players, rng);
    let outcome = game.play(&mut dictionary, &mut console);

    if let Err(e) = outcome.persisted {
        console.say(&format!(
            "{} dictionary changes were not saved: {e}",
            "warning:".yellow().bold()
        ));
    }

    Ok(())
}
