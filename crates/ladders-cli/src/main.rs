//! Ladders terminal game.

mod display;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use ladders_core::{
    history, Bot, BotDifficulty, Catalog, GameConfig, GameState, PlayerConfig, PlayerId, RandomDice,
};
use session::{Controller, Session};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_HISTORY_FILE: &str = "game_history.txt";

/// Ladders - snakes and ladders with levels, items and abilities
#[derive(Parser, Debug)]
#[command(name = "ladders")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game setup file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Turns before the game ends without a winner
    #[arg(short, long)]
    max_moves: Option<u32>,

    /// History file (default: $LADDERS_HISTORY or game_history.txt)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Player names, replacing the configured seats
    #[arg(short, long, num_args = 1..)]
    players: Vec<String>,

    /// Let bots play every seat
    #[arg(short, long)]
    autoplay: bool,

    /// Print the last game's history and exit
    #[arg(long)]
    show_history: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let history_path = args.history.clone().unwrap_or_else(|| {
        std::env::var("LADDERS_HISTORY")
            .unwrap_or_else(|_| DEFAULT_HISTORY_FILE.into())
            .into()
    });

    if args.show_history {
        let previous = history::read_history(&history_path)
            .with_context(|| format!("Failed to read {}", history_path.display()))?;
        print!("{}", display::render_history(&previous));
        return Ok(());
    }

    match history::read_history(&history_path) {
        Ok(previous) if !previous.is_empty() => {
            println!("Previous game:");
            print!("{}", display::render_history(&previous));
            println!();
        }
        Ok(_) => {}
        Err(e) => eprintln!("Could not read {}: {e}", history_path.display()),
    }

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, players = config.players.len(), "starting game");

    let mut game = GameState::from_config(&config, Catalog::standard())?;
    let controllers = config
        .players
        .iter()
        .enumerate()
        .map(|(i, seat)| match seat.bot {
            Some(difficulty) => Controller::Bot(Bot::with_seed(
                i as PlayerId,
                difficulty,
                seed.wrapping_add(i as u64 + 1),
            )),
            None => Controller::Human,
        })
        .collect();
    let mut dice = RandomDice::with_seed(seed);

    println!("{}", display::render_board(&game.board));

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut game, controllers, &mut dice, stdin.lock(), stdout.lock()).run()?;

    history::write_history(&history_path, &game.history)
        .with_context(|| format!("Failed to write {}", history_path.display()))?;
    info!(path = %history_path.display(), moves = game.history.len(), "history saved");

    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            GameConfig::from_json(&json)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if !args.players.is_empty() {
        config.players = args.players.iter().map(PlayerConfig::human).collect();
    }
    if args.autoplay {
        for seat in &mut config.players {
            seat.bot.get_or_insert(BotDifficulty::Medium);
        }
    }
    if let Some(max_moves) = args.max_moves {
        config.max_moves = max_moves;
    }

    Ok(config)
}
