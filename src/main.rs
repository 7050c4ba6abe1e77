use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use minesweeper_highscores::{Difficulty, HighscoreEntry, HighscoreStore, Settings};

/// Read and record minesweeper highscores, locally or on a highscore server.
#[derive(Debug, Parser)]
#[command(name = "minesweeper-highscores", version)]
struct Args {
    /// Settings file. Defaults to settings.json in the highscore directory.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Directory holding the highscore files.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of a highscore server. When set, the server is used instead of local files.
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the highscores for a difficulty, best first.
    List {
        difficulty: Difficulty,

        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Record a finished game.
    Save {
        difficulty: Difficulty,
        name: String,
        score: u64,
    },
    /// Create the highscore directory and any missing or empty highscore files.
    Init,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let path = args.settings.clone().unwrap_or_else(Settings::settings_path);
    let mut settings = Settings::load(&path)
        .with_context(|| format!("could not load settings from {:?}", path))?
        .with_env_overrides();
    if let Some(dir) = &args.data_dir {
        settings.data_dir = dir.clone();
    }
    if let Some(url) = &args.server {
        settings.server_url = Some(url.clone());
    }
    Ok(settings)
}

fn open_store(settings: &Settings) -> Result<Box<dyn HighscoreStore>> {
    if let Some(remote) = settings.remote_store() {
        return Ok(Box::new(remote));
    }
    let local = settings
        .local_store()
        .with_context(|| format!("could not open highscores in {:?}", settings.data_dir))?;
    Ok(Box::new(local))
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;

    match args.command {
        Command::List { difficulty, limit } => {
            let list = open_store(&settings)?
                .get(difficulty)
                .with_context(|| format!("could not load the {} highscores", difficulty))?;
            if list.is_empty() {
                println!("No {} highscores yet.", difficulty);
            }
            for (rank, entry) in list.top(limit).iter().enumerate() {
                println!("{:>3}. {:<20} {}", rank + 1, entry.name(), entry.score());
            }
        }
        Command::Save {
            difficulty,
            name,
            score,
        } => {
            let entry = HighscoreEntry::new(name, score);
            open_store(&settings)?
                .save(&entry, difficulty)
                .with_context(|| format!("could not save the {} highscore", difficulty))?;
        }
        Command::Init => {
            let store = settings.local_store()?;
            store.set_empty_lists()?;
            println!("Highscores ready in {:?}", store.data_dir());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Highscores unavailable: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
