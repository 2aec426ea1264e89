//! `/proc/cpuinfo` and `/proc/meminfo` parsing.

use observatory_core::{ObservatoryError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Parse cpuinfo text into one object per logical processor.
///
/// Blocks are separated by blank lines and keyed `proc0`, `proc1`, ...
/// A line with exactly one `:` becomes a trimmed key/value pair; any other
/// line becomes a key with an empty value.
///
/// `procfs::CpuInfo` splits on the first `:` and keys processors by index,
/// so it cannot reproduce either rule; this parser reads the raw text instead.
pub fn parse_cpuinfo(text: &str) -> Map<String, Value> {
    let mut cpus = Map::new();
    let mut current = Map::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                cpus.insert(format!("proc{}", cpus.len()), Value::Object(current));
                current = Map::new();
            }
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        let key = parts[0].trim().to_string();
        let value = if parts.len() == 2 { parts[1].trim() } else { "" };
        current.insert(key, Value::String(value.to_string()));
    }

    if !current.is_empty() {
        cpus.insert(format!("proc{}", cpus.len()), Value::Object(current));
    }
    cpus
}

/// Parse meminfo text into `{field: value}`; lines without `:` are ignored.
pub fn parse_meminfo(text: &str) -> Map<String, Value> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.to_string(), Value::String(value.trim().to_string())))
        .collect()
}

pub fn read_cpuinfo(path: &Path) -> Result<Value> {
    read(path).map(|text| Value::Object(parse_cpuinfo(&text)))
}

pub fn read_meminfo(path: &Path) -> Result<Value> {
    read(path).map(|text| Value::Object(parse_meminfo(&text)))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ObservatoryError::io(path, e))
}
