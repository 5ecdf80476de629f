//! Source location information for extracted script blocks.

use htmlscript_types::{Position, Range};

/// Where a script block's content sits in the original document.
///
/// Contains both raw byte offsets (for fixes applied to the file as it is on
/// disk) and a line/column range (for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset in the raw document text
    pub offset: usize,
    /// Length in bytes of the raw content
    pub length: usize,
    /// Range in the document (line/column, 0-based)
    pub range: Range,
}

impl SourceLocation {
    /// Create a new source location.
    #[must_use]
    pub const fn new(offset: usize, length: usize, range: Range) -> Self {
        Self {
            offset,
            length,
            range,
        }
    }

    /// Raw byte offset one past the end of the content.
    #[must_use]
    pub const fn end_offset(&self) -> usize {
        self.offset + self.length
    }

    /// Position of the first content character.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.range.start
    }
}
