//! Seed import command
//!
//! Usage: ceosdb seed import <PATH>

use super::Context;
use ceosdb_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every .yaml/.yml file of a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(ctx: &Context, args: SeedArgs) -> anyhow::Result<()> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(ctx, import_args),
    }
}

fn execute_import(ctx: &Context, args: ImportArgs) -> anyhow::Result<()> {
    let mut conn = ctx.open_store()?;

    let cmd = EngineCommand::SeedImport { path: args.path };
    let EngineCommandResult::SeedImport(reports) = apply_engine_command(cmd, &mut conn)? else {
        anyhow::bail!("unexpected engine result for seed import");
    };

    for report in reports {
        println!(
            "✓ Imported {} missions, {} instruments (digest: {})",
            report.missions, report.instruments, report.seed_digest
        );
    }
    Ok(())
}
