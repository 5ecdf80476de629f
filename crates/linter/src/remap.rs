//! Translation of analyzer diagnostics from virtual to document coordinates.

use crate::{Segment, VirtualSource};
use htmlscript_extract::Document;
use htmlscript_types::{Diagnostic, Fix, OffsetRange, Position};

/// A position or range the analyzer reported outside every script segment.
///
/// Virtual sources only contain script text, so this means the analyzer and the
/// assembler disagree about the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemapError {
    #[error("{line}:{column} is not a valid 1-based position")]
    InvalidPosition { line: u32, column: u32 },

    #[error("line {line} holds no script content")]
    PaddingLine { line: u32 },

    #[error("column {column} of line {line} is outside every script segment")]
    OutsideSegment { line: u32, column: u32 },

    #[error("offset {offset} is past the end of the virtual source")]
    OffsetOutOfBounds { offset: usize },

    #[error("range {0} is reversed")]
    ReversedRange(OffsetRange),

    #[error("range {0} spans markup between script segments")]
    SpansMarkup(OffsetRange),
}

pub type Result<T> = std::result::Result<T, RemapError>;

/// Maps positions in one [`VirtualSource`] back into its [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Remapper<'a> {
    document: &'a Document,
    source: &'a VirtualSource,
}

impl<'a> Remapper<'a> {
    #[must_use]
    pub const fn new(document: &'a Document, source: &'a VirtualSource) -> Self {
        Self { document, source }
    }

    /// The segment covering a 0-based virtual position.
    fn segment(&self, position: Position) -> Result<&'a Segment> {
        let segments = self.source.segments(position.line as usize);
        if segments.is_empty() {
            return Err(RemapError::PaddingLine {
                line: position.line_number(),
            });
        }

        find_segment(segments, position.character as usize).ok_or(RemapError::OutsideSegment {
            line: position.line_number(),
            column: position.column_number(),
        })
    }

    /// Map a 0-based virtual position to a 0-based document position.
    pub fn position(&self, position: Position) -> Result<Position> {
        let segment = self.segment(position)?;
        Ok(Position::new(
            position.line,
            to_u32(segment.to_original(position.character as usize)),
        ))
    }

    fn virtual_position(&self, offset: usize) -> Result<Position> {
        let index = self.source.line_index();
        if offset > index.len() {
            return Err(RemapError::OffsetOutOfBounds { offset });
        }
        Ok(index.position(offset))
    }

    fn raw_offset(&self, line: u32, column: usize) -> Result<usize> {
        let position = Position::new(line, to_u32(column));
        self.document
            .raw_offset(position)
            .ok_or(RemapError::OutsideSegment {
                line: position.line_number(),
                column: position.column_number(),
            })
    }

    /// Map a virtual offset range (a fix range) to a raw document range.
    ///
    /// Both ends must fall in the same block, and every line between them
    /// must hold that block's text. A range running from column 0 to column 0
    /// covers whole lines, so both ends take in the stripped indentation.
    /// Any other range leaves the indentation of both end lines alone.
    pub fn range(&self, range: OffsetRange) -> Result<OffsetRange> {
        if range.start > range.end {
            return Err(RemapError::ReversedRange(range));
        }

        let start = self.virtual_position(range.start)?;
        let end = self.virtual_position(range.end)?;
        let start_segment = self.segment(start)?;
        let end_segment = self.segment(end)?;

        let block = start_segment.block;
        let spans_markup = end_segment.block != block
            || (start.line + 1..end.line).any(|line| {
                !self
                    .source
                    .segments(line as usize)
                    .iter()
                    .any(|segment| segment.block == block)
            });
        if spans_markup {
            return Err(RemapError::SpansMarkup(range));
        }

        let (start_column, end_column) = if start.character == 0 && end.character == 0 {
            (start_segment.line_start, end_segment.line_start)
        } else {
            (
                start_segment.to_original(start.character as usize),
                end_segment.to_original(end.character as usize),
            )
        };

        let start = self.raw_offset(start.line, start_column)?;
        let end = self.raw_offset(end.line, end_column)?;
        Ok(OffsetRange::new(start, end.max(start)))
    }

    /// Rewrite the position fields of a diagnostic.
    ///
    /// Fails only when the start position cannot be mapped. An unmappable end
    /// position or fix is dropped with a warning.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) -> Result<Diagnostic> {
        let virtual_start = diagnostic
            .position()
            .ok_or(RemapError::InvalidPosition {
                line: diagnostic.line,
                column: diagnostic.column,
            })?;
        let start = self.position(virtual_start)?;

        let mut remapped = diagnostic.clone();
        remapped.line = start.line_number();
        remapped.column = start.column_number();

        if diagnostic.end_line.is_some() || diagnostic.end_column.is_some() {
            let end = diagnostic
                .end_position()
                .ok_or(RemapError::InvalidPosition {
                    line: diagnostic.end_line.unwrap_or_default(),
                    column: diagnostic.end_column.unwrap_or_default(),
                })
                .and_then(|end| self.position(end));

            match end {
                Ok(end) => {
                    let end = end.max(start);
                    remapped.end_line = Some(end.line_number());
                    remapped.end_column = Some(end.column_number());
                }
                Err(error) => {
                    tracing::warn!(
                        %error,
                        message = %diagnostic.message,
                        "Dropping unmappable end position"
                    );
                    remapped.end_line = None;
                    remapped.end_column = None;
                }
            }
        }

        if let Some(fix) = remapped.fix.take() {
            match self.range(fix.range) {
                Ok(range) => {
                    remapped.fix = Some(Fix {
                        range,
                        text: fix.text,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        %error,
                        message = %diagnostic.message,
                        "Dropping unmappable fix"
                    );
                }
            }
        }

        tracing::trace!(
            from = %virtual_start,
            to = %start,
            rule = diagnostic.rule_id.as_deref().unwrap_or_default(),
            "Remapped diagnostic"
        );
        Ok(remapped)
    }
}

fn find_segment(segments: &[Segment], column: usize) -> Option<&Segment> {
    segments.iter().find(|segment| segment.contains(column))
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
