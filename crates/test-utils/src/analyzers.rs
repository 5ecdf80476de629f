//! Deterministic stand-ins for a JavaScript analyzer.
//!
//! Each analyzer is a plain text scan, so tests can predict exactly where it
//! reports. They implement `Fn(&str, &str) -> Vec<Diagnostic>` through a
//! `report` method; wrap them in a closure to hand them to a linter:
//!
//! ```ignore
//! let linter = Linter::new(Settings::default(), ConsoleAnalyzer::analyzer());
//! ```

use htmlscript_types::{Diagnostic, Fix};

/// Lines of `source` with their byte offsets. A trailing `\r` is excluded.
fn lines(source: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len() + 1;
        (index, start, line.strip_suffix('\r').unwrap_or(line))
    })
}

fn one_based(value: usize) -> u32 {
    u32::try_from(value + 1).unwrap_or(u32::MAX)
}

/// Reports every `console.` as `no-console`.
///
/// Markup (a `<` followed by `!`, `/` or a letter) makes the source
/// unparseable: the analyzer then returns a single fatal
/// `Parsing error: Unexpected token <` at the first such `<`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAnalyzer;

impl ConsoleAnalyzer {
    pub const MESSAGE: &'static str = "Unexpected console statement.";
    pub const RULE: &'static str = "no-console";

    pub fn report(self, source: &str, _filename: &str) -> Vec<Diagnostic> {
        for (index, _, line) in lines(source) {
            if let Some(column) = markup_column(line) {
                return vec![Diagnostic::fatal(
                    one_based(index),
                    one_based(column),
                    "Parsing error: Unexpected token <",
                )];
            }
        }

        lines(source)
            .flat_map(|(index, _, line)| {
                line.match_indices("console.").map(move |(column, _)| {
                    Diagnostic::new(one_based(index), one_based(column), Self::MESSAGE)
                        .with_rule(Self::RULE)
                        .with_end(one_based(index), one_based(column + "console".len()))
                })
            })
            .collect()
    }

    pub fn analyzer() -> impl Fn(&str, &str) -> Vec<Diagnostic> + Sync {
        |source: &str, filename: &str| Self.report(source, filename)
    }
}

fn markup_column(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    bytes.iter().enumerate().find_map(|(i, b)| {
        let next = bytes.get(i + 1)?;
        (*b == b'<' && (matches!(next, b'!' | b'/') || next.is_ascii_alphabetic())).then_some(i)
    })
}

/// Reports every `;;` as `no-extra-semi`, with a fix deleting the second `;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraSemiAnalyzer;

impl ExtraSemiAnalyzer {
    pub const MESSAGE: &'static str = "Unnecessary semicolon.";
    pub const RULE: &'static str = "no-extra-semi";

    pub fn report(self, source: &str, _filename: &str) -> Vec<Diagnostic> {
        lines(source)
            .flat_map(|(index, start, line)| {
                line.match_indices(";;").map(move |(column, _)| {
                    let semicolon = column + 1;
                    let offset = start + semicolon;
                    Diagnostic::new(one_based(index), one_based(semicolon), Self::MESSAGE)
                        .with_rule(Self::RULE)
                        .with_fix(Fix::delete(offset, offset + 1))
                })
            })
            .collect()
    }

    pub fn analyzer() -> impl Fn(&str, &str) -> Vec<Diagnostic> + Sync {
        |source: &str, filename: &str| Self.report(source, filename)
    }
}

/// Reports the leading whitespace width of every non-blank line, at column 1,
/// as `indent <width>`. Shows the indentation the analyzer was handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingWhitespaceAnalyzer;

impl LeadingWhitespaceAnalyzer {
    pub const RULE: &'static str = "leading-whitespace";

    pub fn report(self, source: &str, _filename: &str) -> Vec<Diagnostic> {
        lines(source)
            .filter(|(_, _, line)| !line.trim().is_empty())
            .map(|(index, _, line)| {
                let width = line.len() - line.trim_start_matches([' ', '\t']).len();
                Diagnostic::warning(one_based(index), 1, format!("indent {width}"))
                    .with_rule(Self::RULE)
            })
            .collect()
    }

    pub fn analyzer() -> impl Fn(&str, &str) -> Vec<Diagnostic> + Sync {
        |source: &str, filename: &str| Self.report(source, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_analyzer() {
        let source = "\nfoo();\n  console.log(1); console.warn(2);\n";
        let diagnostics = ConsoleAnalyzer.report(source, "a.js");
        let positions: Vec<(u32, u32)> = diagnostics.iter().map(|d| (d.line, d.column)).collect();
        assert_eq!(positions, vec![(3, 3), (3, 19)]);
        assert_eq!(diagnostics[0].end_column, Some(10));
        assert_eq!(diagnostics[0].rule_id.as_deref(), Some("no-console"));
    }

    #[test]
    fn test_console_analyzer_fails_on_markup() {
        let source = "if (a < b) {}\n  <![CDATA[\nconsole.log(1);";
        let diagnostics = ConsoleAnalyzer.report(source, "a.js");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fatal);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (2, 3));
    }

    #[test]
    fn test_extra_semi_analyzer_offsets() {
        let source = "a;\r\nb;;\r\n";
        let diagnostics = ExtraSemiAnalyzer.report(source, "a.js");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (2, 3));
        let fix = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(&source[fix.range.start..fix.range.end], ";");
        assert_eq!(fix.range.start, 6);
    }

    #[test]
    fn test_leading_whitespace_analyzer() {
        let source = "a\n\n    b\n\t c\n   ";
        let messages: Vec<String> = LeadingWhitespaceAnalyzer
            .report(source, "a.js")
            .into_iter()
            .map(|d| format!("{}:{}", d.line, d.message))
            .collect();
        assert_eq!(messages, vec!["1:indent 0", "3:indent 4", "4:indent 2"]);
    }
}
