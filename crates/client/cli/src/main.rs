//! Headless command-line driver for the battle rules.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Inspect boards, query paths and replay scripted matches
#[derive(Parser, Debug)]
#[command(name = "battle-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the board layout and its tile kinds
    Board {
        /// Content directory (default: builtin content)
        #[arg(long)]
        content: Option<PathBuf>,
    },

    /// Print the greedy path and the free path between two tiles
    Path {
        #[arg(long)]
        from: i32,

        #[arg(long)]
        to: i32,

        /// Movement budget in steps
        #[arg(long, default_value = "3")]
        budget: u32,

        /// Content directory (default: builtin content)
        #[arg(long)]
        content: Option<PathBuf>,
    },

    /// Print every tile reachable within a budget
    Reach {
        #[arg(long)]
        from: i32,

        /// Movement budget in steps
        #[arg(long, default_value = "3")]
        budget: u32,

        /// Content directory (default: builtin content)
        #[arg(long)]
        content: Option<PathBuf>,
    },

    /// Replay a JSON script of host actions and ticks
    Replay {
        /// Script file (JSON array of steps)
        #[arg(required = true)]
        script: PathBuf,

        /// Content directory (default: `BATTLE_CONTENT_DIR` or builtin content)
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    match Args::parse().command {
        Commands::Board { content } => commands::board::run(content),
        Commands::Path {
            from,
            to,
            budget,
            content,
        } => commands::path::run_path(content, from, to, budget),
        Commands::Reach {
            from,
            budget,
            content,
        } => commands::path::run_reach(content, from, budget),
        Commands::Replay { script, content } => commands::replay::run(&script, content),
    }
}

/// Logs go to stderr so stdout stays machine readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
