//! Newline normalization and offset/position bookkeeping for a markup document.

use htmlscript_types::Position;

/// Line break convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NewlineStyle {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl NewlineStyle {
    /// Detect the newline style of `text`. The first line break decides; text
    /// without any line break is LF.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(index) if index > 0 && text.as_bytes()[index - 1] == b'\r' => Self::CrLf,
            _ => Self::Lf,
        }
    }

    /// The line break sequence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Line index for a text (for position conversions).
/// Maps byte offsets to line/column positions.
///
/// Only `\n` starts a new line. In CRLF text the `\r` is the last byte of the
/// line it terminates, so columns of real characters are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
    /// Total length of the text in bytes
    len: usize,
}

impl LineIndex {
    /// Create a new line index from source text
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];

        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Convert a byte offset to a line/column pair (0-based).
    ///
    /// Offsets past the end of the text clamp to the end.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));

        let col = offset - self.line_starts[line];
        (line, col)
    }

    /// Convert a byte offset to a [`Position`].
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let (line, col) = self.line_col(offset);
        Position::new(line as u32, col as u32)
    }

    /// Convert a position back to a byte offset.
    ///
    /// Returns `None` if the line does not exist or the column lies past the
    /// line's terminating `\n`.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let start = self.line_start(line)?;
        let offset = start + position.character as usize;
        (offset <= self.line_end(line)?).then_some(offset)
    }

    /// Get the byte offset of the start of a line
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Get the byte offset of the end of a line, excluding the `\n`
    #[must_use]
    pub fn line_end(&self, line: usize) -> Option<usize> {
        if line >= self.line_starts.len() {
            return None;
        }
        Some(
            self.line_starts
                .get(line + 1)
                .map_or(self.len, |next| next - 1),
        )
    }

    /// Get the number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of the indexed text in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the indexed text is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// An immutable markup document.
///
/// Keeps the raw text as given, an LF-only copy used for scanning and line
/// splitting, and a line index over each. Both copies have the same lines and
/// the same columns; they differ only in the offset of every line after a CRLF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    raw: String,
    normalized: String,
    newline: NewlineStyle,
    raw_lines: LineIndex,
    lines: LineIndex,
}

impl Document {
    /// Build a document from its raw text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let newline = NewlineStyle::detect(&raw);
        let normalized = if raw.contains("\r\n") {
            raw.replace("\r\n", "\n")
        } else {
            raw.clone()
        };

        let raw_lines = LineIndex::new(&raw);
        let lines = LineIndex::new(&normalized);
        debug_assert_eq!(raw_lines.line_count(), lines.line_count());

        tracing::trace!(
            len = raw.len(),
            lines = lines.line_count(),
            newline = ?newline,
            "Document created"
        );

        Self {
            raw,
            normalized,
            newline,
            raw_lines,
            lines,
        }
    }

    /// The original text, verbatim.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The LF-normalized text. All scanner offsets refer to this text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.normalized
    }

    /// The detected newline style.
    #[must_use]
    pub const fn newline(&self) -> NewlineStyle {
        self.newline
    }

    /// Line index over the normalized text.
    #[must_use]
    pub const fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Line index over the raw text.
    #[must_use]
    pub const fn raw_lines(&self) -> &LineIndex {
        &self.raw_lines
    }

    /// Position of a normalized offset.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.lines.position(offset)
    }

    /// Raw-text offset of a position.
    #[must_use]
    pub fn raw_offset(&self, position: Position) -> Option<usize> {
        self.raw_lines.offset(position)
    }

    /// Convert a normalized offset into a raw-text offset.
    ///
    /// Goes through the position so that every CRLF before the offset adds one
    /// byte. Offsets past the end clamp to the end of the raw text.
    #[must_use]
    pub fn to_raw_offset(&self, offset: usize) -> usize {
        let position = self.position(offset);
        self.raw_lines
            .line_start(position.line as usize)
            .map_or(self.raw.len(), |start| start + position.character as usize)
    }

    /// Text of a line in the normalized document, without its line break.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = self.lines.line_start(line)?;
        let end = self.lines.line_end(line)?;
        self.normalized.get(start..end)
    }

    /// Leading whitespace (spaces and tabs) of a line.
    #[must_use]
    pub fn line_indent(&self, line: usize) -> &str {
        self.line_text(line).map_or("", leading_whitespace)
    }
}

/// The leading run of spaces and tabs of `line`.
#[must_use]
pub fn leading_whitespace(line: &str) -> &str {
    let width = line
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();
    &line[..width]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_new() {
        let text = "line 1\nline 2\nline 3";
        let index = LineIndex::new(text);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(7));
        assert_eq!(index.line_start(2), Some(14));
        assert_eq!(index.line_end(0), Some(6));
        assert_eq!(index.line_end(2), Some(20));
        assert_eq!(index.line_end(3), None);
    }

    #[test]
    fn test_line_index_line_col() {
        let text = "line 1\nline 2\nline 3";
        let index = LineIndex::new(text);

        assert_eq!(index.line_col(0), (0, 0));
        assert_eq!(index.line_col(5), (0, 5));
        assert_eq!(index.line_col(7), (1, 0));
        assert_eq!(index.line_col(10), (1, 3));
    }

    #[test]
    fn test_line_index_clamps_past_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_col(5), (1, 2));
        assert_eq!(index.line_col(500), (1, 2));
    }

    #[test]
    fn test_line_index_is_monotonic() {
        let text = "a\n\nbc\r\nd";
        let index = LineIndex::new(text);
        let mut previous = Position::new(0, 0);
        for offset in 0..=text.len() {
            let position = index.position(offset);
            assert!(position >= previous, "offset {offset} went backwards");
            previous = position;
        }
    }

    #[test]
    fn test_line_index_offset() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(1, 1)), Some(4));
        assert_eq!(index.offset(Position::new(0, 2)), Some(2));
        assert_eq!(index.offset(Position::new(0, 3)), None);
        assert_eq!(index.offset(Position::new(2, 0)), None);
    }

    #[test]
    fn test_line_index_empty() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert!(index.is_empty());
        assert_eq!(index.line_col(0), (0, 0));
    }

    #[test]
    fn test_newline_detection() {
        assert_eq!(NewlineStyle::detect("a\nb"), NewlineStyle::Lf);
        assert_eq!(NewlineStyle::detect("a\r\nb"), NewlineStyle::CrLf);
        assert_eq!(NewlineStyle::detect("a\r\nb\nc"), NewlineStyle::CrLf);
        assert_eq!(NewlineStyle::detect("a\nb\r\nc"), NewlineStyle::Lf);
        assert_eq!(NewlineStyle::detect("no breaks"), NewlineStyle::Lf);
        assert_eq!(NewlineStyle::detect("\n"), NewlineStyle::Lf);
        assert_eq!(NewlineStyle::CrLf.as_str(), "\r\n");
    }

    #[test]
    fn test_document_normalizes_crlf() {
        let document = Document::new("<p>\r\n  x\r\n</p>");
        assert_eq!(document.newline(), NewlineStyle::CrLf);
        assert_eq!(document.text(), "<p>\n  x\n</p>");
        assert_eq!(document.raw(), "<p>\r\n  x\r\n</p>");
        assert_eq!(document.lines().line_count(), 3);
        assert_eq!(document.raw_lines().line_count(), 3);
    }

    #[test]
    fn test_to_raw_offset_adds_one_per_crlf() {
        let document = Document::new("ab\r\ncd\r\nef");
        // 'c' is at normalized offset 3 and raw offset 4
        assert_eq!(document.to_raw_offset(3), 4);
        // 'f' is at normalized offset 7 and raw offset 9
        assert_eq!(document.to_raw_offset(7), 9);
        assert_eq!(document.to_raw_offset(0), 0);
        assert_eq!(document.to_raw_offset(8), document.raw().len());
    }

    #[test]
    fn test_to_raw_offset_identity_for_lf() {
        let text = "ab\ncd\nef";
        let document = Document::new(text);
        for offset in 0..=text.len() {
            assert_eq!(document.to_raw_offset(offset), offset);
        }
    }

    #[test]
    fn test_positions_match_across_newline_styles() {
        let lf = Document::new("one\n  two\nthree");
        let crlf = Document::new("one\r\n  two\r\nthree");
        for offset in 0..=lf.text().len() {
            assert_eq!(lf.position(offset), crlf.position(offset));
        }
        let position = Position::new(2, 3);
        assert_eq!(lf.raw_offset(position), Some(13));
        assert_eq!(crlf.raw_offset(position), Some(15));
    }

    #[test]
    fn test_lone_carriage_return_is_a_character() {
        let document = Document::new("a\rb\nc");
        assert_eq!(document.newline(), NewlineStyle::Lf);
        assert_eq!(document.text(), "a\rb\nc");
        assert_eq!(document.lines().line_count(), 2);
    }

    #[test]
    fn test_line_text_and_indent() {
        let document = Document::new("<html>\r\n  \t<script>\r\n</html>");
        assert_eq!(document.line_text(1), Some("  \t<script>"));
        assert_eq!(document.line_indent(1), "  \t");
        assert_eq!(document.line_indent(0), "");
        assert_eq!(document.line_indent(9), "");
    }
}
