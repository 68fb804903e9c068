//! Results commands
//!
//! Usage:
//! - ceosdb results list [--kind <KIND>] [--json]
//! - ceosdb results show <KIND> <ID> [--json]

use super::Context;
use ceosdb_core::model::{SubjectKey, SubjectKind};
use ceosdb_engine::{apply_engine_query, EngineQuery, EngineQueryResult};
use ceosdb_store::repo::StoredResult;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ResultsArgs {
    #[command(subcommand)]
    pub command: ResultsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResultsCommand {
    /// List stored results in classification order
    List(ListArgs),
    /// Show the stored result of one subject
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// technology, instrument_type or measurement
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<SubjectKind>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// technology, instrument_type or measurement
    #[arg(value_parser = parse_kind)]
    pub kind: SubjectKind,

    /// Technology text, instrument type name or measurement name
    pub id: String,

    #[arg(long)]
    pub json: bool,
}

fn parse_kind(s: &str) -> Result<SubjectKind, String> {
    s.parse().map_err(|e: ceosdb_core::CeosError| e.to_string())
}

pub fn execute(ctx: &Context, args: ResultsArgs) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;

    match args.command {
        ResultsCommand::List(list) => {
            let EngineQueryResult::ResultsList(rows) =
                apply_engine_query(EngineQuery::ResultsList { kind: list.kind }, &conn)?
            else {
                anyhow::bail!("unexpected engine result for results list");
            };
            if list.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{}", format_row(row));
                }
            }
        }
        ResultsCommand::Show(show) => {
            let subject = SubjectKey::new(show.kind, show.id);
            let EngineQueryResult::ResultGet(row) =
                apply_engine_query(EngineQuery::ResultGet { subject }, &conn)?
            else {
                anyhow::bail!("unexpected engine result for results show");
            };
            if show.json {
                println!("{}", serde_json::to_string_pretty(&row)?);
            } else {
                println!("{}", format_row(&row));
            }
        }
    }
    Ok(())
}

fn format_row(row: &StoredResult) -> String {
    format!(
        "{}\t{}\t{}",
        row.subject.kind,
        row.subject.id,
        row.label
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string())
    )
}
