//! End-to-end linting of HTML documents.

use htmlscript_linter::prelude::*;
use htmlscript_linter::apply_fixes;
use htmlscript_test_utils::fixtures::{to_crlf, REMAP_FIX_RANGE_HTML, SIMPLE_HTML};
use htmlscript_test_utils::{
    format_diagnostics, init_test_logging, positions, ConsoleAnalyzer, ExtraSemiAnalyzer,
};

fn console_linter() -> Linter<impl Fn(&str, &str) -> Vec<Diagnostic> + Sync> {
    Linter::new(Settings::default(), ConsoleAnalyzer::analyzer())
}

#[test]
fn test_simple_html() {
    init_test_logging();
    let diagnostics = console_linter().lint(SIMPLE_HTML, "simple.html");

    insta::assert_snapshot!(format_diagnostics(&diagnostics), @r###"
    [1] 8:7 error Unexpected console statement. (no-console)
    [2] 14:7 error Unexpected console statement. (no-console)
    [3] 20:3 error Unexpected console statement. (no-console)
    [4] 23:11 error Unexpected console statement. (no-console)
    "###);
}

/// Reports every non-whitespace character of the source, with the character
/// as the message.
fn every_character(source: &str, _: &str) -> Vec<Diagnostic> {
    source
        .lines()
        .enumerate()
        .flat_map(|(line, text)| {
            text.char_indices()
                .filter(|(_, c)| !c.is_whitespace())
                .map(move |(column, c)| {
                    Diagnostic::new(line as u32 + 1, column as u32 + 1, c.to_string())
                })
        })
        .collect()
}

#[test]
fn test_positions_round_trip_to_the_same_character() {
    let text = "<html>\n<script>var a = 1;\nif (a) {\n  a++;\n}\n</script>\n</html>\n";
    let diagnostics = Linter::new(Settings::default(), every_character).lint(text, "page.html");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(diagnostics.len(), "vara=1;if(a){a++;}".len());
    for diagnostic in &diagnostics {
        let line = lines[diagnostic.line as usize - 1];
        let column = diagnostic.column as usize - 1;
        assert_eq!(&line[column..=column], diagnostic.message, "at {diagnostic}");
    }
}

#[test]
fn test_ranges_point_at_the_reported_text() {
    let diagnostics = console_linter().lint(SIMPLE_HTML, "simple.html");
    let lines: Vec<&str> = SIMPLE_HTML.lines().collect();

    assert!(!diagnostics.is_empty());
    for diagnostic in &diagnostics {
        let line = lines[diagnostic.line as usize - 1];
        let start = diagnostic.column as usize - 1;
        let end = diagnostic.end_column.unwrap() as usize - 1;
        assert_eq!(diagnostic.end_line, Some(diagnostic.line));
        assert_eq!(&line[start..end], "console", "at {diagnostic}");
    }
}

#[test]
fn test_crlf_reports_same_positions() {
    let lf = console_linter().lint(SIMPLE_HTML, "simple.html");
    let crlf = console_linter().lint(&to_crlf(SIMPLE_HTML), "simple.html");
    assert_eq!(lf, crlf);
}

#[test]
fn test_per_block_dispatch_matches_combined() {
    let combined = console_linter().lint(SIMPLE_HTML, "simple.html");
    let per_block = console_linter()
        .with_dispatch(Dispatch::PerBlock)
        .lint(SIMPLE_HTML, "simple.html");
    assert_eq!(combined, per_block);
}

#[test]
fn test_output_is_sorted_whatever_the_analyzer_order() {
    let reversed = |source: &str, filename: &str| {
        let mut diagnostics = ConsoleAnalyzer.report(source, filename);
        diagnostics.reverse();
        diagnostics
    };

    for dispatch in [Dispatch::Combined, Dispatch::PerBlock] {
        let diagnostics = Linter::new(Settings::default(), reversed)
            .with_dispatch(dispatch)
            .lint(SIMPLE_HTML, "simple.html");
        assert_eq!(
            positions(&diagnostics),
            vec![(8, 7), (14, 7), (20, 3), (23, 11)],
            "{dispatch:?}"
        );
    }
}

#[test]
fn test_blocks_on_one_line() {
    let text = "<p><script>a()</script><script>console.log(1)</script></p>";
    for dispatch in [Dispatch::Combined, Dispatch::PerBlock] {
        let diagnostics = console_linter().with_dispatch(dispatch).lint(text, "inline.html");
        assert_eq!(positions(&diagnostics), vec![(1, 32)], "{dispatch:?}");
        assert_eq!(diagnostics[0].end_column, Some(39));
    }
}

#[test]
fn test_document_without_scripts() {
    let text = "<html><body><p>console.log(1)</p></body></html>";
    assert!(console_linter().lint(text, "plain.html").is_empty());
}

#[test]
fn test_fix_ranges_apply_to_the_document() {
    let linter = Linter::new(Settings::default(), ExtraSemiAnalyzer::analyzer());
    let expected = REMAP_FIX_RANGE_HTML.replace(";;", ";");

    for text in [REMAP_FIX_RANGE_HTML.to_string(), to_crlf(REMAP_FIX_RANGE_HTML)] {
        let diagnostics = linter.lint(&text, "fix.html");
        assert_eq!(positions(&diagnostics), vec![(5, 15), (7, 16)]);

        let fixes: Vec<Fix> = diagnostics
            .iter()
            .map(|diagnostic| diagnostic.fix.clone().unwrap())
            .collect();
        for fix in &fixes {
            assert_eq!(&text[fix.range.start..fix.range.end], ";");
        }

        let fixed = apply_fixes(&text, &fixes).unwrap();
        if text.contains('\r') {
            assert_eq!(fixed, to_crlf(&expected));
        } else {
            assert_eq!(fixed, expected);
        }
    }
}

#[test]
fn test_fix_ranges_per_block() {
    let text = "<script>\n  a();;\n</script>\n<p>x</p>\n<script>\n  b();;\n</script>\n";
    let diagnostics = Linter::new(Settings::default(), ExtraSemiAnalyzer::analyzer())
        .with_dispatch(Dispatch::PerBlock)
        .lint(text, "fix.html");

    let fixes: Vec<Fix> = diagnostics.iter().filter_map(|d| d.fix.clone()).collect();
    assert_eq!(fixes.len(), 2);
    assert_eq!(
        apply_fixes(text, &fixes).unwrap(),
        "<script>\n  a();\n</script>\n<p>x</p>\n<script>\n  b();\n</script>\n"
    );
}

#[test]
fn test_unmappable_diagnostics_are_dropped() {
    let analyzer = |source: &str, filename: &str| {
        let mut diagnostics = ConsoleAnalyzer.report(source, filename);
        diagnostics.push(Diagnostic::new(1, 1, "on the doctype line"));
        diagnostics
    };
    let diagnostics = Linter::new(Settings::default(), analyzer)
        .with_remap_assertions(false)
        .lint(SIMPLE_HTML, "simple.html");

    assert_eq!(diagnostics.len(), 4);
    assert!(diagnostics
        .iter()
        .all(|diagnostic| diagnostic.message == ConsoleAnalyzer::MESSAGE));
}

#[test]
fn test_diagnostics_serialize_as_camel_case() {
    let diagnostics = console_linter().lint(SIMPLE_HTML, "simple.html");
    let json = serde_json::to_value(&diagnostics[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "line": 8,
            "column": 7,
            "endLine": 8,
            "endColumn": 14,
            "message": "Unexpected console statement.",
            "severity": "error",
            "ruleId": "no-console",
        })
    );
}

/// 1-based line and column of a byte offset.
fn line_column(source: &str, offset: usize) -> (u32, u32) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = offset - before.rfind('\n').map_or(0, |i| i + 1) + 1;
    (line as u32, column as u32)
}

/// Removes each `debugger;` statement that sits on a line of its own, line
/// break included.
fn remove_debugger_lines(source: &str, _: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut line_start = 0;
    for line in source.split_inclusive('\n') {
        let line_end = line_start + line.len();
        if line.trim() == "debugger;" {
            let (line, column) = line_column(source, line_start);
            diagnostics.push(
                Diagnostic::new(line, column, "Unexpected 'debugger' statement.")
                    .with_rule("no-debugger")
                    .with_fix(Fix::delete(line_start, line_end)),
            );
        }
        line_start = line_end;
    }
    diagnostics
}

/// Offers to delete everything before `b();`.
fn delete_before_b(source: &str, _: &str) -> Vec<Diagnostic> {
    source
        .find("b();")
        .map(|at| {
            let (line, column) = line_column(source, at);
            vec![Diagnostic::new(line, column, "Code before b().").with_fix(Fix::delete(0, at))]
        })
        .unwrap_or_default()
}

const DEBUGGER_HTML: &str = "<html>
<body>
  <script>
    var a = 1;
    debugger;
    if (a) {
      debugger;
      a++;
    }
  </script>
</body>
</html>
";

#[test]
fn test_whole_line_fixes_keep_neighbouring_indentation() {
    let expected = "<html>
<body>
  <script>
    var a = 1;
    if (a) {
      a++;
    }
  </script>
</body>
</html>
";

    for dispatch in [Dispatch::Combined, Dispatch::PerBlock] {
        for (text, expected) in [
            (DEBUGGER_HTML.to_string(), expected.to_string()),
            (to_crlf(DEBUGGER_HTML), to_crlf(expected)),
        ] {
            let diagnostics = Linter::new(Settings::default(), remove_debugger_lines)
                .with_dispatch(dispatch)
                .lint(&text, "debugger.html");
            assert_eq!(positions(&diagnostics), vec![(5, 5), (7, 5)], "{dispatch:?}");

            let fixes: Vec<Fix> = diagnostics
                .iter()
                .map(|diagnostic| diagnostic.fix.clone().unwrap())
                .collect();
            assert_eq!(apply_fixes(&text, &fixes).unwrap(), expected, "{dispatch:?}");
        }
    }
}

#[test]
fn test_fixes_spanning_markup_are_dropped() {
    let text = "<script>\n  a();\n</script>\n<p>keep</p>\n<script>\n  b();\n</script>";

    for dispatch in [Dispatch::Combined, Dispatch::PerBlock] {
        for text in [text.to_string(), to_crlf(text)] {
            let diagnostics = Linter::new(Settings::default(), delete_before_b)
                .with_dispatch(dispatch)
                .lint(&text, "blocks.html");

            assert_eq!(positions(&diagnostics), vec![(6, 3)], "{dispatch:?}");
            assert!(diagnostics[0].fix.is_none(), "{dispatch:?}");
        }
    }
}
