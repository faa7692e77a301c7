use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Accepted and aggregated, but the value looks suspicious
    ValidWithWarning,
    /// Rejected and excluded from aggregates
    Invalid,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::ValidWithWarning => write!(f, "Valid"),
            Severity::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Per-line finding handed to a reporter, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based physical line number
    pub line_index: usize,
    /// Original line text without its terminator (may be empty)
    pub line: String,
    pub cause: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn is_rejection(&self) -> bool {
        self.severity == Severity::Invalid
    }
}
