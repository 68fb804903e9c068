//! CEOS DB CLI
//!
//! Command-line interface for the CEOS mission catalog and its orbit
//! classifier.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::Context;

#[derive(Debug, Parser)]
#[command(name = "ceosdb")]
#[command(about = "CEOS DB - most common orbit classification for the CEOS handbook", long_about = None)]
struct Cli {
    /// SQLite store path; overrides the settings file and CEOSDB_DB
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Settings file (defaults to ./ceosdb.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Classify every subject group and store the results
    Classify(commands::classify::ClassifyArgs),
    /// Read stored results
    Results(commands::results::ResultsArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::load(cli.config.as_deref(), cli.db)?;
    ceosdb_core::logging_facility::init(ctx.settings.logging.profile);

    match cli.command {
        Commands::Seed(args) => commands::seed::execute(&ctx, args),
        Commands::Classify(args) => commands::classify::execute(&ctx, args),
        Commands::Results(args) => commands::results::execute(&ctx, args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
