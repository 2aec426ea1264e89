//! POSIX access capabilities.

use serde::{Deserialize, Serialize};

/// One of the three access rights encoded in a permission digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Digit bit 4
    Read,
    /// Digit bit 2
    Write,
    /// Digit bit 1
    Execute,
}

impl Capability {
    /// All capabilities, in `rwx` order.
    pub const ALL: [Self; 3] = [Self::Read, Self::Write, Self::Execute];

    /// Whether a single octal permission digit (0..=7) grants this capability.
    ///
    /// Write is granted by 2, 3, 6, 7; execute by 1, 3, 5, 7; read by 4, 5, 6, 7.
    /// Anything outside 0..=7 grants nothing.
    #[must_use]
    pub const fn grants(self, digit: u32) -> bool {
        match self {
            Self::Write => matches!(digit, 2 | 3 | 6 | 7),
            Self::Execute => matches!(digit, 1 | 3 | 5 | 7),
            Self::Read => matches!(digit, 4..=7),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Execute => write!(f, "execute"),
        }
    }
}
