//! Snapshot testing assertions for diagnostics
//!
//! This module provides helpers for snapshot testing with insta.
//! Diagnostics are formatted consistently for readable snapshots.

use htmlscript_types::Diagnostic;

/// Format a list of diagnostics for snapshot testing.
///
/// Each line reads `[n] line:column severity message (rule)`, followed by
/// `[fatal]` for parse errors and the fix range and replacement when present.
///
/// # Example
///
/// ```ignore
/// use htmlscript_test_utils::assertions::format_diagnostics;
///
/// let diagnostics = linter.lint(SIMPLE_HTML, "simple.html");
/// insta::assert_snapshot!(format_diagnostics(&diagnostics));
/// ```
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return String::from("(no diagnostics)");
    }

    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let mut line = format!("[{}] {d}", i + 1);
            if d.fatal {
                line.push_str(" [fatal]");
            }
            if let Some(fix) = &d.fix {
                line.push_str(&format!(" fix {} {:?}", fix.range, fix.text));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format diagnostics with their messages only (without position info).
/// Useful when you only care about the error messages, not positions.
pub fn format_diagnostic_messages<T: AsRef<str>>(messages: &[T]) -> String {
    if messages.is_empty() {
        return String::from("(no diagnostics)");
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}", i + 1, m.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The `(line, column)` pairs of a list of diagnostics.
pub fn positions(diagnostics: &[Diagnostic]) -> Vec<(u32, u32)> {
    diagnostics.iter().map(|d| (d.line, d.column)).collect()
}
