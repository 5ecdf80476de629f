//! Script blocks found by the scanner.

use crate::SourceLocation;
use htmlscript_types::{MarkupMode, OffsetRange, Position};

/// An attribute of an opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for HTML boolean attributes such as `<script async>`
    pub value: Option<String>,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One embedded script fragment.
///
/// Created by the scanner in document order and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    /// Position of this block among the document's blocks
    pub index: usize,
    /// Tokenization mode the block was found under
    pub mode: MarkupMode,
    /// Content span in the normalized document text
    pub span: OffsetRange,
    /// Content location in the raw document
    pub location: SourceLocation,
    /// The content exactly as it appears in the raw document
    pub raw_text: String,
    /// The script value: normalized content with any non-script markup (CDATA
    /// markers, XML comments, child tags) blanked to spaces. Same length and
    /// line structure as the normalized content.
    pub text: String,
    /// Leading whitespace of the line holding the opening tag
    pub tag_line_indent: String,
    /// Attributes of the opening tag
    pub attributes: Vec<Attribute>,
}

impl ScriptBlock {
    /// 0-based position of the first content character.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.location.range.start
    }

    /// 1-based line of the first content character.
    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.location.range.start.line + 1
    }

    /// 1-based column of the first content character.
    #[must_use]
    pub const fn start_column(&self) -> u32 {
        self.location.range.start.character + 1
    }

    /// Lines of the script value. The first line is the remainder of the line
    /// holding the opening tag.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Number of document lines the content touches.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|b| *b == b'\n').count() + 1
    }

    /// Look up an attribute by name. HTML names compare case-insensitively.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| match self.mode {
            MarkupMode::Html => attribute.name.eq_ignore_ascii_case(name),
            MarkupMode::Xml => attribute.name == name,
        })
    }
}
