//! Compressed-object fallback.

use flate2::write::GzEncoder;
use flate2::Compression;
use observatory_core::Report;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::Result;

/// Gzip-compressed JSON encoding of a report.
pub fn compress_report(report: &Report) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(report)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

/// Fresh `<uuid>.json.gz` object name.
pub fn object_name() -> String {
    format!("{}.json.gz", Uuid::new_v4().simple())
}

/// Write the compressed report as a new object in `bucket`.
pub(crate) async fn write_object(bucket: &Path, report: &Report) -> Result<PathBuf> {
    let data = compress_report(report)?;
    tokio::fs::create_dir_all(bucket).await?;
    let path = bucket.join(object_name());
    tokio::fs::write(&path, data).await?;
    Ok(path)
}
