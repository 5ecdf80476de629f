//! Severity of a diagnostic.

use serde::{Deserialize, Serialize};

/// Diagnostic severity level.
///
/// Analyzers that do not report a severity produce errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - indicates a problem that prevents correct execution
    #[default]
    Error,
    /// Warning - indicates a potential problem
    Warning,
    /// Information - informational message
    Info,
    /// Hint - a suggestion or style recommendation
    Hint,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert_ne!(Severity::Error, Severity::Warning);
    }

    #[test]
    fn test_severity_default_and_display() {
        assert_eq!(Severity::default(), Severity::Error);
        assert_eq!(format!("{}", Severity::Warning), "warning");
        assert_eq!(format!("{}", Severity::Info), "info");
    }

    #[test]
    fn test_severity_serde() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
        let parsed: Severity = serde_json::from_str("\"hint\"").unwrap();
        assert_eq!(parsed, Severity::Hint);
    }
}
