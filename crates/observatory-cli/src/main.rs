//! observatory - serverless sandbox fingerprinter
//!
//! Profiles the execution environment it runs in and ships the report.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    observatory_cli::run().await
}
