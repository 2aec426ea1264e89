//! `observatory warm` - Show the warm-start state.

use anyhow::Result;
use colored::Colorize;
use observatory_core::WarmStatus;
use serde_json::json;

use super::Context;
use crate::cli::args::WarmArgs;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: WarmArgs) -> Result<()> {
    let tracker = ctx.config.probe_context().warm_tracker();
    if args.mark {
        tracker.mark_warm();
    }

    let status = tracker.status();
    let since = tracker.warm_since();
    let duration = tracker.warm_duration_seconds();

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&json!({
            "marker": tracker.marker().display().to_string(),
            "is_warm": status,
            "warm_since": since.map(|t| t.to_rfc3339()),
            "warm_for": duration,
        }))?,
        OutputFormat::Pretty => {
            let label = match status {
                WarmStatus::Warm => status.as_str().green().bold(),
                WarmStatus::NotWarm => status.as_str().yellow().bold(),
                WarmStatus::NotPossible => status.as_str().red().bold(),
            };
            println!("{label}  ({})", tracker.marker().display());
            if let Some(since) = since {
                println!("warm since {} ({duration:.0}s)", since.to_rfc3339());
            }
        }
    }

    Ok(())
}
