//! `observatory run` - Collect the profile and deliver it.

use anyhow::{Context as _, Result};
use colored::Colorize;
use observatory_probe::{Collection, Orchestrator};
use observatory_store::ResultStore;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::Context;
use crate::cli::args::RunArgs;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: RunArgs) -> Result<()> {
    let probe = ctx.config.probe_context();
    let extended = args.extended || ctx.config.extended;
    let deadline = args
        .deadline
        .or(ctx.config.deadline_secs)
        .map(Duration::from_secs);

    let collection = tokio::task::spawn_blocking(move || {
        let orchestrator = if extended {
            Orchestrator::extended(&probe)
        } else {
            Orchestrator::standard(&probe)
        };
        debug!(profilers = ?orchestrator.names(), ?deadline, "collecting");
        match deadline {
            Some(budget) => orchestrator.collect_until(Instant::now() + budget),
            None => Collection {
                report: orchestrator.collect(),
                skipped: Vec::new(),
            },
        }
    })
    .await
    .context("profile collection did not complete")?;

    info!(keys = collection.report.len(), partial = collection.is_partial(), "profile collected");

    let outcome = if args.no_store {
        None
    } else {
        let store = ResultStore::new(ctx.config.to_store_config(|name| std::env::var(name).ok())?)?;
        Some(store.store(&collection.report).await)
    };

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&collection.report)?,
        OutputFormat::Pretty => {
            output::print_report(&collection.report);
            if collection.is_partial() {
                eprintln!(
                    "{} deadline reached, skipped: {}",
                    "partial:".yellow().bold(),
                    collection.skipped.join(", ")
                );
            }
            if let Some(outcome) = &outcome {
                output::print_outcome(outcome);
            } else if ctx.verbose {
                eprintln!("not stored (--no-store)");
            }
        }
    }

    Ok(())
}
