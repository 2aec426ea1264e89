//! Sandbox runtime identification.

use serde::{Serialize, Serializer};

/// Environment variable that overrides runtime detection.
pub const SANDBOX_RUNTIME_VAR: &str = "SANDBOX_RUNTIME";

/// The kind of execution sandbox, inferred from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sandbox {
    /// AWS Lambda
    Lambda,
    /// Azure Functions
    Azure,
    /// Auth0 webtask
    Webtask,
    /// Explicitly named through `SANDBOX_RUNTIME`
    Named(String),
    /// Nothing matched
    Unknown,
}

impl Sandbox {
    /// Detect the sandbox from an environment lookup.
    ///
    /// An explicit `SANDBOX_RUNTIME` wins; otherwise well-known variables of
    /// each provider are checked in a fixed order.
    pub fn detect<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var(SANDBOX_RUNTIME_VAR).filter(|n| !n.is_empty()) {
            return Self::Named(name);
        }
        if var("AWS_LAMBDA_FUNCTION_NAME").is_some() || var("AWS_ACCESS_KEY_ID").is_some() {
            return Self::Lambda;
        }
        if matches!(var("OS").as_deref(), Some("WinNT" | "Windows_NT")) {
            return Self::Azure;
        }
        if var("NODE_ENV").as_deref() == Some("webtask") {
            return Self::Webtask;
        }
        Self::Unknown
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lambda => "lambda",
            Self::Azure => "azure",
            Self::Webtask => "webtask",
            Self::Named(name) => name,
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Sandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sandbox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn detect(vars: &[(&str, &str)]) -> Sandbox {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Sandbox::detect(|k| map.get(k).cloned())
    }

    #[test]
    fn explicit_runtime_wins() {
        let sandbox = detect(&[("SANDBOX_RUNTIME", "gcf"), ("AWS_ACCESS_KEY_ID", "AKIA")]);
        assert_eq!(sandbox, Sandbox::Named("gcf".into()));
    }

    #[test]
    fn provider_markers() {
        assert_eq!(detect(&[("AWS_LAMBDA_FUNCTION_NAME", "fn")]), Sandbox::Lambda);
        assert_eq!(detect(&[("OS", "Windows_NT")]), Sandbox::Azure);
        assert_eq!(detect(&[("NODE_ENV", "webtask")]), Sandbox::Webtask);
        assert_eq!(detect(&[("NODE_ENV", "production")]), Sandbox::Unknown);
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Sandbox::Lambda).unwrap(), "\"lambda\"");
    }
}
