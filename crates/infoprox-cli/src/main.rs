//! CLI frontend for the Infoprox text adventure.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use infoprox_core::Theme;
use infoprox_worldgen::GenConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "infoprox",
    about = "Infoprox: explore a generated world, find three artifacts, open the vault",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game
    Play {
        #[command(flatten)]
        world: WorldArgs,
    },

    /// Resume a saved game
    Load {
        /// Save file written by the in-game `save` command
        file: PathBuf,
    },

    /// Generate a world and print its rooms and solvability audit
    Inspect {
        #[command(flatten)]
        world: WorldArgs,
    },
}

/// World generation flags shared by `play` and `inspect`.
#[derive(Args)]
struct WorldArgs {
    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rooms, clamped to 8-15
    #[arg(short, long, default_value = "10")]
    rooms: usize,

    /// Theme: fantasy, scifi, or horror
    #[arg(short, long, default_value = "fantasy")]
    theme: Theme,
}

impl WorldArgs {
    fn config(&self) -> GenConfig {
        GenConfig::default()
            .with_optional_seed(self.seed)
            .with_room_count(self.rooms)
            .with_theme(self.theme)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("INFOPROX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { world } => commands::play::run(&world.config()),
        Commands::Load { file } => commands::load::run(&file),
        Commands::Inspect { world } => commands::inspect::run(&world.config()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
