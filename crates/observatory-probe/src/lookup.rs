//! Ordered key -> probe tables.

use observatory_core::{Report, Result};
use serde_json::Value;
use tracing::debug;

type Probe = Box<dyn Fn() -> Result<Value> + Send + Sync>;

/// One report key with the probe that produces it and the value reported
/// when the probe fails.
pub struct Lookup {
    key: &'static str,
    fallback: Value,
    probe: Probe,
}

impl Lookup {
    pub fn new<F>(key: &'static str, fallback: Value, probe: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            key,
            fallback,
            probe: Box::new(probe),
        }
    }

    /// Lookup whose probe cannot fail.
    pub fn infallible<F>(key: &'static str, probe: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::new(key, Value::Null, move || Ok(probe()))
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Run the probe, substituting the fallback on failure.
    pub fn evaluate(&self) -> Value {
        match (self.probe)() {
            Ok(value) => value,
            Err(e) => {
                debug!(key = self.key, error = %e, "probe failed, using fallback");
                self.fallback.clone()
            }
        }
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup")
            .field("key", &self.key)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered set of lookups built once per profiler.
#[derive(Debug, Default)]
pub struct LookupTable {
    entries: Vec<Lookup>,
}

impl LookupTable {
    #[must_use]
    pub fn new(entries: Vec<Lookup>) -> Self {
        Self { entries }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(Lookup::key)
    }

    /// Evaluate every lookup in order.
    pub fn evaluate(&self) -> Report {
        self.entries
            .iter()
            .map(|lookup| (lookup.key.to_string(), lookup.evaluate()))
            .collect()
    }
}
