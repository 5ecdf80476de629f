//! The diagnostic shape shared by analyzers and the remapping engine.

use crate::{Fix, Position, Severity};
use serde::{Deserialize, Serialize};

/// A diagnostic reported against a source text.
///
/// Lines and columns are 1-based. The same type is used for diagnostics fresh
/// from an analyzer (virtual source coordinates) and for remapped diagnostics
/// (document coordinates); only the position fields differ between the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
    /// End line number (1-based), if the analyzer reported a span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    /// End column number (1-based), if the analyzer reported a span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    /// Human-readable message, never interpreted by the engine
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    /// Rule identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Set on parse failures that abort analysis of the whole document
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fatal: bool,
    /// Optional text edit resolving the diagnostic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Create an error diagnostic at a 1-based line and column.
    #[must_use]
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            end_line: None,
            end_column: None,
            message: message.into(),
            severity: Severity::Error,
            rule_id: None,
            fatal: false,
            fix: None,
        }
    }

    /// Create a warning diagnostic.
    #[must_use]
    pub fn warning(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::new(line, column, message).with_severity(Severity::Warning)
    }

    /// Create a fatal parse-error diagnostic.
    #[must_use]
    pub fn fatal(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            fatal: true,
            ..Self::new(line, column, message)
        }
    }

    /// Set the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Set the rule identifier.
    #[must_use]
    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Set the 1-based end position.
    #[must_use]
    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Attach a fix.
    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// The 0-based start position, or `None` for a zero line or column.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        Position::from_one_based(self.line, self.column)
    }

    /// The 0-based end position, when both end fields are present and valid.
    #[must_use]
    pub fn end_position(&self) -> Option<Position> {
        Position::from_one_based(self.end_line?, self.end_column?)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.line, self.column, self.severity, self.message
        )?;
        if let Some(rule_id) = &self.rule_id {
            write!(f, " ({rule_id})")?;
        }
        Ok(())
    }
}
