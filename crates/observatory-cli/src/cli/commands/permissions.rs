//! `observatory permissions` - List writable directories.

use anyhow::{Context as _, Result};
use observatory_probe::TreeWalker;
use std::path::PathBuf;

use super::Context;
use crate::cli::args::PermissionsArgs;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: PermissionsArgs) -> Result<()> {
    let probe = ctx.config.probe_context();
    let roots: Vec<PathBuf> = if args.roots.is_empty() {
        probe.scan_roots.clone()
    } else {
        args.roots
    };
    let mut walk = probe.walk;
    if let Some(depth) = args.max_depth {
        walk.max_depth = depth;
    }
    if args.no_follow {
        walk.follow_symlinks = false;
    }

    let walker = TreeWalker::new(probe.oracle).with_options(walk);
    let paths = tokio::task::spawn_blocking(move || walker.writable_paths_under(&roots))
        .await
        .context("permission scan did not complete")?;

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&paths)?,
        OutputFormat::Pretty => output::print_paths(&paths),
    }

    Ok(())
}
