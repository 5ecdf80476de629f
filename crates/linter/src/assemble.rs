//! Virtual source assembly.
//!
//! Lays the re-indented block lines out so that virtual line `n` is document
//! line `n`. Lines with no script content stay empty.

use crate::IndentPlan;
use htmlscript_extract::{Document, LineIndex, NewlineStyle, ScriptBlock};

/// A run of script text on a virtual line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Index of the block the text comes from
    pub block: usize,
    /// 0-based column of the run in the virtual line
    pub virtual_start: usize,
    /// 0-based column of the same text in the document line
    pub original_start: usize,
    /// 0-based document column where the line's script text begins before
    /// indentation is stripped: the opening tag's end on a block's first
    /// line, 0 on the others
    pub line_start: usize,
    /// Length of the run in bytes
    pub len: usize,
}

impl Segment {
    #[must_use]
    pub const fn virtual_end(&self) -> usize {
        self.virtual_start + self.len
    }

    /// Whether a virtual column falls in this run. The end is inclusive so a
    /// position just past the last character still maps.
    #[must_use]
    pub const fn contains(&self, column: usize) -> bool {
        self.virtual_start <= column && column <= self.virtual_end()
    }

    /// Document column of a virtual column inside this run.
    #[must_use]
    pub const fn to_original(&self, column: usize) -> usize {
        self.original_start + (column - self.virtual_start)
    }
}

/// One virtual line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualLine {
    pub text: String,
    pub segments: Vec<Segment>,
}

/// The text handed to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualSource {
    lines: Vec<VirtualLine>,
    text: String,
    line_index: LineIndex,
    newline: NewlineStyle,
}

impl VirtualSource {
    /// Assemble blocks with their plans. `plans[i]` must belong to `blocks[i]`.
    pub fn build(document: &Document, blocks: &[ScriptBlock], plans: &[IndentPlan]) -> Self {
        let mut lines: Vec<VirtualLine> = Vec::new();

        for (block, plan) in blocks.iter().zip(plans) {
            debug_assert_eq!(block.index, plan.block);
            let start = block.start();
            let first_line = start.line as usize;

            let lines_with_plans = plan.transformed_lines(block).zip(&plan.lines);
            for (offset, (content, line_plan)) in lines_with_plans.enumerate() {
                let line_number = first_line + offset;
                if lines.len() <= line_number {
                    lines.resize_with(line_number + 1, VirtualLine::default);
                }

                let (line_start, original_start) = if offset == 0 {
                    (start.character as usize, start.character as usize)
                } else {
                    (0, line_plan.strip)
                };

                let line = &mut lines[line_number];
                if let Some(previous) = line.segments.last() {
                    // Another block ends on this line; stand in for the markup
                    // between them.
                    let gap = original_start
                        .saturating_sub(previous.original_start + previous.len)
                        .max(1);
                    line.text.push_str(&" ".repeat(gap));
                }

                line.segments.push(Segment {
                    block: block.index,
                    virtual_start: line.text.len(),
                    original_start,
                    line_start,
                    len: content.len(),
                });
                line.text.push_str(content);
            }
        }

        let newline = document.newline();
        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join(newline.as_str());
        let line_index = LineIndex::new(&text);

        tracing::debug!(
            blocks = blocks.len(),
            lines = lines.len(),
            len = text.len(),
            "Assembled virtual source"
        );

        Self {
            lines,
            text,
            line_index,
            newline,
        }
    }

    /// The assembled text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    #[must_use]
    pub const fn newline(&self) -> NewlineStyle {
        self.newline
    }

    #[must_use]
    pub fn lines(&self) -> &[VirtualLine] {
        &self.lines
    }

    /// Segments of a 0-based virtual line. Empty for padding lines and lines
    /// past the end.
    #[must_use]
    pub fn segments(&self, line: usize) -> &[Segment] {
        self.lines
            .get(line)
            .map(|line| line.segments.as_slice())
            .unwrap_or_default()
    }

}
