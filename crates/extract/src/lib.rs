//! Script block extraction from HTML and XML documents.
//!
//! A [`Document`] holds the raw text alongside an LF-normalized copy, and
//! [`scan`] walks it once to produce the [`ScriptBlock`]s in document order.
//! Positions are 0-based lines and byte columns; the two copies share them.

mod block;
mod document;
mod error;
mod html;
mod scanner;
mod source_location;
mod xml;

pub use block::{Attribute, ScriptBlock};
pub use document::{leading_whitespace, Document, LineIndex, NewlineStyle};
pub use error::{ExtractError, Result};
pub use scanner::{scan, ScanOptions};
pub use source_location::SourceLocation;

// Re-export types from htmlscript-types for convenience
pub use htmlscript_types::{
    MarkupMode, OffsetRange, Position, Range, DEFAULT_JAVASCRIPT_MIME_TYPES,
};
