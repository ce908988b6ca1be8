//! Terminal frontend for Duskfall, a turn-based survival game.

mod play;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rand::Rng;

use dusk_game::{GameConfig, GameSession, SaveOutcome};

#[derive(Parser)]
#[command(
    name = "dusk",
    about = "Duskfall — a turn-based survival game",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new character and save it to a slot
    New {
        /// Character name
        name: String,

        /// Save slot to write (1-5)
        #[arg(short, long, default_value_t = 1)]
        slot: u32,

        /// Hardcore ruleset: permadeath, tighter caps, extra afflictions
        #[arg(long)]
        hardcore: bool,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Overwrite the slot if occupied
        #[arg(short, long)]
        force: bool,

        /// Save directory
        #[arg(short, long, default_value = "saves")]
        dir: PathBuf,
    },

    /// Load a slot and play
    Play {
        /// Save slot to load (1-5)
        #[arg(short, long, default_value_t = 1)]
        slot: u32,

        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Save directory
        #[arg(short, long, default_value = "saves")]
        dir: PathBuf,
    },

    /// List the save slots
    Slots {
        /// Save directory
        #[arg(short, long, default_value = "saves")]
        dir: PathBuf,
    },

    /// Read the hardcore death log
    Graveyard {
        /// Save directory
        #[arg(short, long, default_value = "saves")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::New {
            name,
            slot,
            hardcore,
            seed,
            force,
            dir,
        } => run_new(&name, slot, hardcore, seed, force, dir),
        Commands::Play { slot, seed, dir } => run_play(slot, seed, dir),
        Commands::Slots { dir } => run_slots(dir),
        Commands::Graveyard { dir } => run_graveyard(dir),
    };
    if let Err(message) = result {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn config(dir: PathBuf, seed: Option<u64>, hardcore: bool) -> GameConfig {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    GameConfig::default()
        .with_save_dir(dir)
        .with_seed(seed)
        .with_hardcore(hardcore)
}

fn run_new(
    name: &str,
    slot: u32,
    hardcore: bool,
    seed: Option<u64>,
    force: bool,
    dir: PathBuf,
) -> Result<(), String> {
    let mut session =
        GameSession::new(name, config(dir, seed, hardcore)).map_err(|e| e.to_string())?;
    let outcome = if force {
        session.save_confirmed(slot)
    } else {
        session.save(slot)
    }
    .map_err(|e| e.to_string())?;
    match outcome {
        SaveOutcome::Saved => {
            println!(
                "Created {} '{}' in slot {slot}",
                if hardcore { "hardcore survivor" } else { "survivor" },
                name
            );
            Ok(())
        }
        SaveOutcome::NeedsConfirmation => {
            Err(format!("slot {slot} is occupied; pass --force to overwrite"))
        }
    }
}

fn run_play(slot: u32, seed: Option<u64>, dir: PathBuf) -> Result<(), String> {
    let mut session = GameSession::from_state(
        dusk_core::PlayerState::new("", "camp", false),
        config(dir, seed, false),
    );
    session.load(slot).map_err(|e| e.to_string())?;
    play::run(&mut session)
}

fn run_slots(dir: PathBuf) -> Result<(), String> {
    let slots = dusk_game::save::list_slots(&dir).map_err(|e| e.to_string())?;
    if slots.is_empty() {
        println!("No saves yet.");
        return Ok(());
    }
    println!("{}", render::slot_table(&slots));
    Ok(())
}

fn run_graveyard(dir: PathBuf) -> Result<(), String> {
    let graves = dusk_game::death_log::read_all(&dir).map_err(|e| e.to_string())?;
    if graves.is_empty() {
        println!("The graveyard is empty.");
        return Ok(());
    }
    println!("{}", render::graveyard_table(&graves));
    Ok(())
}
