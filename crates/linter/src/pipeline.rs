//! The linting pipeline: scan, plan, assemble, analyze, remap.

use crate::{bad_indent, plan_block, Analyzer, IndentPlan, Remapper, VirtualSource};
use htmlscript_config::Settings;
use htmlscript_extract::{scan, Document, ScanOptions, ScriptBlock};
use htmlscript_types::{Diagnostic, MarkupMode};
use rayon::prelude::*;
use std::path::Path;

/// How blocks are handed to the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dispatch {
    /// One analyzer call over a virtual source holding every block.
    #[default]
    Combined,
    /// One analyzer call per block, run in parallel.
    PerBlock,
}

/// A scanned and planned document, ready for the analyzer.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub document: Document,
    pub mode: MarkupMode,
    pub blocks: Vec<ScriptBlock>,
    /// `plans[i]` belongs to `blocks[i]`
    pub plans: Vec<IndentPlan>,
}

impl Prepared {
    /// Virtual source holding every block.
    #[must_use]
    pub fn virtual_source(&self) -> VirtualSource {
        VirtualSource::build(&self.document, &self.blocks, &self.plans)
    }

    /// Virtual source holding a single block.
    #[must_use]
    pub fn block_source(&self, index: usize) -> VirtualSource {
        let blocks = self.blocks.get(index..=index).unwrap_or_default();
        let plans = self.plans.get(index..=index).unwrap_or_default();
        VirtualSource::build(&self.document, blocks, plans)
    }

    /// Bad-indent diagnostics for every block, in document order.
    #[must_use]
    pub fn bad_indent_diagnostics(&self) -> Vec<Diagnostic> {
        self.blocks
            .iter()
            .zip(&self.plans)
            .flat_map(|(block, plan)| bad_indent::check(block, plan))
            .collect()
    }
}

/// Lints the scripts embedded in HTML and XML documents with an [`Analyzer`].
#[derive(Debug, Clone)]
pub struct Linter<A> {
    settings: Settings,
    analyzer: A,
    dispatch: Dispatch,
    remap_assertions: bool,
}

impl<A> Linter<A> {
    #[must_use]
    pub fn new(settings: Settings, analyzer: A) -> Self {
        Self {
            settings,
            analyzer,
            dispatch: Dispatch::default(),
            remap_assertions: cfg!(debug_assertions),
        }
    }

    #[must_use]
    pub const fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Whether an unmappable diagnostic trips a debug assertion. On by default
    /// in debug builds; when off, such diagnostics are logged and dropped.
    #[must_use]
    pub const fn with_remap_assertions(mut self, enabled: bool) -> Self {
        self.remap_assertions = enabled;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Scan options for a document named `filename`.
    #[must_use]
    pub fn scan_options(&self, filename: &str) -> ScanOptions {
        ScanOptions::new(self.settings.markup_mode(Path::new(filename)))
            .with_mime_types(self.settings.javascript_mime_types.clone())
    }

    /// Scan a document and plan its blocks.
    ///
    /// A fatal markup error comes back as the single diagnostic to report.
    #[tracing::instrument(skip(self, source), fields(len = source.len()))]
    pub fn prepare(&self, source: &str, filename: &str) -> Result<Prepared, Diagnostic> {
        let document = Document::new(source);
        let options = self.scan_options(filename);

        let blocks = scan(&document, &options).map_err(|error| {
            let position = document.position(error.offset());
            tracing::debug!(%error, %position, "Fatal markup error");
            Diagnostic::fatal(
                position.line_number(),
                position.column_number(),
                format!("Parsing error: {error}"),
            )
        })?;

        let plans = blocks
            .iter()
            .map(|block| plan_block(block, self.settings.indent))
            .collect();

        Ok(Prepared {
            document,
            mode: options.mode,
            blocks,
            plans,
        })
    }

    /// Remap analyzer diagnostics reported against `source`.
    fn remap_all(
        &self,
        prepared: &Prepared,
        source: &VirtualSource,
        reported: Vec<Diagnostic>,
    ) -> Vec<Diagnostic> {
        let remapper = Remapper::new(&prepared.document, source);

        reported
            .into_iter()
            .filter_map(|diagnostic| match remapper.diagnostic(&diagnostic) {
                Ok(remapped) => Some(remapped),
                Err(error) => {
                    tracing::error!(
                        %error,
                        line = diagnostic.line,
                        column = diagnostic.column,
                        message = %diagnostic.message,
                        "Dropping diagnostic outside script content"
                    );
                    debug_assert!(
                        !self.remap_assertions,
                        "diagnostic `{diagnostic}` could not be remapped: {error}"
                    );
                    None
                }
            })
            .collect()
    }
}

impl<A> Linter<A>
where
    A: Analyzer + Sync,
{
    /// Lint a document and return diagnostics in document coordinates, sorted
    /// by line then column.
    #[tracing::instrument(skip(self, source), fields(len = source.len(), dispatch = ?self.dispatch))]
    pub fn lint(&self, source: &str, filename: &str) -> Vec<Diagnostic> {
        let prepared = match self.prepare(source, filename) {
            Ok(prepared) => prepared,
            Err(fatal) => return vec![fatal],
        };

        let mut diagnostics = if prepared.blocks.is_empty() {
            tracing::debug!("No script blocks");
            Vec::new()
        } else {
            match self.dispatch {
                Dispatch::Combined => self.lint_combined(&prepared, filename),
                Dispatch::PerBlock => self.lint_per_block(&prepared, filename),
            }
        };

        if self.settings.report_bad_indent {
            diagnostics.extend(prepared.bad_indent_diagnostics());
        }

        diagnostics.sort_by_key(|diagnostic| (diagnostic.line, diagnostic.column));
        tracing::debug!(
            blocks = prepared.blocks.len(),
            diagnostics = diagnostics.len(),
            "Lint complete"
        );
        diagnostics
    }

    fn lint_combined(&self, prepared: &Prepared, filename: &str) -> Vec<Diagnostic> {
        let source = prepared.virtual_source();
        let virtual_filename = format!("{filename}.js");
        let reported = self.analyzer.analyze(source.text(), &virtual_filename);
        tracing::debug!(reported = reported.len(), "Analyzer finished");
        self.remap_all(prepared, &source, reported)
    }

    fn lint_per_block(&self, prepared: &Prepared, filename: &str) -> Vec<Diagnostic> {
        // Collecting an indexed parallel iterator keeps block order.
        let per_block: Vec<Vec<Diagnostic>> = (0..prepared.blocks.len())
            .into_par_iter()
            .map(|index| {
                let source = prepared.block_source(index);
                let virtual_filename = format!("{filename}.{index}.js");
                let reported = self.analyzer.analyze(source.text(), &virtual_filename);
                tracing::trace!(block = index, reported = reported.len(), "Analyzer finished");
                self.remap_all(prepared, &source, reported)
            })
            .collect();

        per_block.into_iter().flatten().collect()
    }
}
