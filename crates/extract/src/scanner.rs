//! Markup scanner.
//!
//! Walks a [`Document`] once, front to back, and records every script element
//! it meets, regardless of nesting. HTML documents go through a permissive
//! byte scanner; XML documents through `quick-xml`. Both hand script spans to
//! a [`Collector`], which builds the [`ScriptBlock`]s.

use crate::{html, xml, Attribute, Document, Result, ScriptBlock, SourceLocation};
use htmlscript_types::{MarkupMode, OffsetRange, Range, DEFAULT_JAVASCRIPT_MIME_TYPES};

/// Options controlling a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub mode: MarkupMode,
    /// Accepted `type` attribute values. A script without a `type` attribute is
    /// always accepted.
    pub javascript_mime_types: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(MarkupMode::Html)
    }
}

impl ScanOptions {
    /// Options for `mode` with the default MIME type list.
    #[must_use]
    pub fn new(mode: MarkupMode) -> Self {
        Self {
            mode,
            javascript_mime_types: DEFAULT_JAVASCRIPT_MIME_TYPES
                .iter()
                .map(|mime| (*mime).to_string())
                .collect(),
        }
    }

    /// Replace the accepted MIME types.
    #[must_use]
    pub fn with_mime_types(mut self, mime_types: Vec<String>) -> Self {
        self.javascript_mime_types = mime_types;
        self
    }

    fn is_javascript(&self, attributes: &[Attribute]) -> bool {
        let type_value = attributes
            .iter()
            .find(|attribute| self.names_match(&attribute.name, "type"))
            .and_then(|attribute| attribute.value.as_deref());

        let Some(value) = type_value else {
            return true;
        };

        let essence = value.split(';').next().unwrap_or_default().trim();
        essence.is_empty()
            || self
                .javascript_mime_types
                .iter()
                .any(|mime| mime.trim().eq_ignore_ascii_case(essence))
    }

    fn names_match(&self, name: &str, expected: &str) -> bool {
        match self.mode {
            MarkupMode::Html => name.eq_ignore_ascii_case(expected),
            MarkupMode::Xml => name == expected,
        }
    }
}

/// Scan a document for script blocks.
///
/// Returns the blocks in document order, or the first fatal error. A fatal
/// error discards every block found before it.
#[tracing::instrument(skip_all, fields(mode = %options.mode, len = document.text().len()))]
pub fn scan(document: &Document, options: &ScanOptions) -> Result<Vec<ScriptBlock>> {
    let mut collector = Collector {
        document,
        options,
        blocks: Vec::new(),
    };

    let result = match options.mode {
        MarkupMode::Html => {
            html::scan(&mut collector);
            Ok(())
        }
        MarkupMode::Xml => xml::scan(&mut collector),
    };

    match result {
        Ok(()) => {
            tracing::debug!(blocks = collector.blocks.len(), "Scan complete");
            Ok(collector.blocks)
        }
        Err(error) => {
            tracing::debug!(%error, offset = error.offset(), "Scan aborted");
            Err(error)
        }
    }
}

/// Turns script element spans into [`ScriptBlock`]s.
pub(crate) struct Collector<'a> {
    document: &'a Document,
    options: &'a ScanOptions,
    blocks: Vec<ScriptBlock>,
}

impl<'a> Collector<'a> {
    /// The normalized document text.
    pub(crate) fn text(&self) -> &'a str {
        self.document.text()
    }

    /// Record the script element whose opening tag starts at `lt`. `content`
    /// spans its text and `masks` the markup to blank out of it.
    pub(crate) fn script(
        &mut self,
        lt: usize,
        content: OffsetRange,
        attributes: Vec<Attribute>,
        masks: &[OffsetRange],
    ) {
        if !self.options.is_javascript(&attributes) {
            tracing::trace!(offset = lt, "Skipping non-JavaScript script element");
            return;
        }

        let document = self.document;
        let text = blank_out(
            &document.text()[content.start..content.end],
            content.start,
            masks,
        );

        let start_position = document.position(content.start);
        let end_position = document.position(content.end);
        let raw_start = document.to_raw_offset(content.start);
        let raw_end = document.to_raw_offset(content.end);
        let raw_text = document
            .raw()
            .get(raw_start..raw_end)
            .unwrap_or_default()
            .to_string();
        let tag_line = document.position(lt).line as usize;

        tracing::trace!(
            index = self.blocks.len(),
            line = start_position.line_number(),
            column = start_position.column_number(),
            len = text.len(),
            masked = masks.len(),
            "Found script block"
        );

        self.blocks.push(ScriptBlock {
            index: self.blocks.len(),
            mode: self.options.mode,
            span: content,
            location: SourceLocation::new(
                raw_start,
                raw_end - raw_start,
                Range::new(start_position, end_position),
            ),
            raw_text,
            text,
            tag_line_indent: document.line_indent(tag_line).to_string(),
            attributes,
        });
    }
}

/// Copy `content` (which starts at document offset `base`), replacing every
/// byte inside `masks` except line breaks with a space.
fn blank_out(content: &str, base: usize, masks: &[OffsetRange]) -> String {
    if masks.is_empty() {
        return content.to_string();
    }

    let mut bytes = content.as_bytes().to_vec();
    for mask in masks {
        let start = mask.start.saturating_sub(base).min(bytes.len());
        let end = mask.end.saturating_sub(base).min(bytes.len());
        for b in &mut bytes[start..end] {
            if *b != b'\n' {
                *b = b' ';
            }
        }
    }

    // Masks start and end on ASCII delimiters, so whole characters are replaced.
    String::from_utf8(bytes)
        .unwrap_or_else(|error| String::from_utf8_lossy(error.as_bytes()).into_owned())
}
