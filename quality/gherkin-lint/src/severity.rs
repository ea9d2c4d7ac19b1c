//! Severity scale shared by rules and diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-level severity scale, ordered from most to least severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Definite problem
    Error = 1,
    /// Likely problem
    #[default]
    Warning = 2,
    /// Worth knowing
    Information = 3,
    /// Style nudge
    Hint = 4,
}

impl Severity {
    /// Numeric level as used on the wire (1 = Error .. 4 = Hint)
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Information => write!(f, "information"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "information" | "info" => Ok(Severity::Information),
            "hint" => Ok(Severity::Hint),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}
