//! Shelf — lending library catalog CLI.
//!
//! # Usage
//!
//! ```text
//! shelf report [--catalog <file>] [--json]
//! shelf search <query> [--catalog <file>] [--json]
//! shelf demo
//! ```
//!
//! `--catalog` falls back to `$SHELF_CATALOG`, then to the built-in demo catalog.
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{demo::DemoArgs, report::ReportArgs, search::SearchArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    version,
    about = "Browse a small lending library catalog",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print authors, books, works and borrowers.
    Report(ReportArgs),

    /// Find books by title or author name (case-insensitive).
    Search(SearchArgs),

    /// Replay the stock demo: report, a return, report again, search "ju".
    Demo(DemoArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Report(args) => args.run(),
        Commands::Search(args) => args.run(),
        Commands::Demo(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
