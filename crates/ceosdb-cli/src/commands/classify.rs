//! Classify command
//!
//! Usage: ceosdb classify [--dry-run] [--json]

use super::Context;
use ceosdb_engine::commands::classify::ClassifyOptions;
use ceosdb_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use clap::Args;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Compute and print labels without storing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(ctx: &Context, args: ClassifyArgs) -> anyhow::Result<()> {
    let mut conn = ctx.open_store()?;

    let options = ClassifyOptions {
        thresholds: ctx.settings.classifier,
        dry_run: args.dry_run,
    };
    let EngineCommandResult::Classify(outcome) =
        apply_engine_command(EngineCommand::Classify(options), &mut conn)?
    else {
        anyhow::bail!("unexpected engine result for classify");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if args.dry_run {
        for result in &outcome.results {
            println!(
                "{}\t{}\t{}",
                result.subject.kind,
                result.subject.id,
                result.label_text().as_deref().unwrap_or("-")
            );
        }
    }
    println!(
        "{} {} of {} groups (population {}, run {})",
        if outcome.persisted { "✓ Labelled" } else { "Would label" },
        outcome.labelled_count,
        outcome.group_count,
        outcome.population,
        outcome.run_id
    );
    Ok(())
}
