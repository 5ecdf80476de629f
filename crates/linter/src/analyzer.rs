use htmlscript_types::Diagnostic;

/// The script analyzer the linter delegates to.
///
/// Receives the assembled virtual source and a virtual filename, and reports
/// diagnostics with 1-based lines and columns in that source. Fix ranges are
/// byte offsets into the same source.
pub trait Analyzer {
    fn analyze(&self, source: &str, filename: &str) -> Vec<Diagnostic>;
}

impl<F> Analyzer for F
where
    F: Fn(&str, &str) -> Vec<Diagnostic>,
{
    fn analyze(&self, source: &str, filename: &str) -> Vec<Diagnostic> {
        self(source, filename)
    }
}
