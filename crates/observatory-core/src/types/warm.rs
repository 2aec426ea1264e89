//! Warm/cold execution environment status.

use serde::{Deserialize, Serialize};

/// Whether the current execution environment has been seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarmStatus {
    /// The warm marker exists: this container was reused.
    #[serde(rename = "warm")]
    Warm,
    /// The marker directory is writable but no marker exists yet.
    #[serde(rename = "not warm")]
    NotWarm,
    /// The marker directory is not writable (read-only sandbox).
    #[serde(rename = "not possible")]
    NotPossible,
}

impl WarmStatus {
    /// Report representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::NotWarm => "not warm",
            Self::NotPossible => "not possible",
        }
    }

    #[must_use]
    pub const fn is_warm(self) -> bool {
        matches!(self, Self::Warm)
    }
}

impl std::fmt::Display for WarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_report_spelling() {
        assert_eq!(serde_json::to_string(&WarmStatus::NotWarm).unwrap(), "\"not warm\"");
        assert_eq!(
            serde_json::to_string(&WarmStatus::NotPossible).unwrap(),
            "\"not possible\""
        );
        assert_eq!(WarmStatus::Warm.to_string(), "warm");
    }
}
