// Tooling binary: unwrap/expect/panic acceptable in tests only.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![allow(missing_docs)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carta")]
#[command(about = "Show widget screens on a reMarkable and report the user's choice", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    target: Target,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where and how the renderer runs
#[derive(Args, Debug, Clone, Default)]
struct Target {
    /// Path of the `simple` renderer binary
    #[arg(long, global = true, value_name = "PATH")]
    simple: Option<PathBuf>,

    /// Run on this host over ssh instead of locally
    #[arg(long, global = true, value_name = "HOST")]
    remote: Option<String>,

    /// Working directory for the renderer (canvas files land here)
    #[arg(long, global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Always launch through rm2fb-client
    #[arg(long, global = true, conflicts_with = "no_rm2fb")]
    rm2fb: bool,

    /// Never launch through rm2fb-client
    #[arg(long, global = true)]
    no_rm2fb: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a JSON screen and print the triggered widget
    Display {
        /// Screen description
        screen: PathBuf,
        /// Print the event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the layout script for a JSON screen without launching anything
    Compile {
        /// Screen description
        screen: PathBuf,
    },
    /// Clear the display
    Clear,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Display { screen, json } => commands::display(&cli.target, &screen, json),
        Commands::Compile { screen } => commands::compile(&screen),
        Commands::Clear => commands::clear(&cli.target),
    }
}
