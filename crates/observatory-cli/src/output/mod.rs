//! Output formatting for different formats.

use clap::ValueEnum;
use colored::Colorize;
use observatory_core::Report;
use observatory_store::StoreOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line rendering of a report value.
///
/// Scalars print as-is, strings up to their first line, collections as
/// their size.
pub fn summarize(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.lines().next().unwrap_or_default().to_string(),
        Value::Array(items) => format!("[{} entries]", items.len()),
        Value::Object(map) => format!("{{{} keys}}", map.len()),
        other => other.to_string(),
    }
}

/// Key/value summary of a report with the writable paths spelled out.
pub fn print_report(report: &Report) {
    for (key, value) in report {
        println!("{:>14}  {}", key.cyan(), summarize(value));
    }
    if let Some(Value::Array(paths)) = report.get("permissions") {
        println!();
        println!("{}", "Writable paths".bold());
        for path in paths.iter().filter_map(Value::as_str) {
            println!("  {}", path.green());
        }
    }
}

pub fn print_paths(paths: &[String]) {
    for path in paths {
        println!("{}", path.green());
    }
    eprintln!("{} writable", paths.len().to_string().bold());
}

pub fn print_outcome(outcome: &StoreOutcome) {
    let line = outcome.to_string();
    match outcome {
        StoreOutcome::Posted { .. } | StoreOutcome::Archived(_) => {
            eprintln!("{} {}", "stored:".green().bold(), line);
        }
        StoreOutcome::NotConfigured => eprintln!("{} {}", "stored:".yellow().bold(), line),
        StoreOutcome::Failed(_) => eprintln!("{} {}", "stored:".red().bold(), line),
    }
}
