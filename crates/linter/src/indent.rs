//! Indentation planning for script blocks.
//!
//! A plan says how many leading bytes to strip from each line of a block before
//! the analyzer sees it, and which lines do not carry the expected indentation.

use htmlscript_config::IndentDescriptor;
use htmlscript_extract::{leading_whitespace, ScriptBlock};

/// Classification of one block line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// The remainder of the line holding the opening tag. Never re-indented.
    First,
    /// Whitespace only. Exempt from indentation checks.
    Blank,
    /// Carries the expected indentation, which is stripped.
    Dedented,
    /// Does not carry the expected indentation. Left as is.
    BadIndent,
}

/// Plan for one block line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePlan {
    pub kind: LineKind,
    /// Bytes removed from the start of the line
    pub strip: usize,
}

impl LinePlan {
    /// Column shift applied to the line (`-strip`).
    #[must_use]
    pub fn delta(&self) -> isize {
        -isize::try_from(self.strip).unwrap_or(isize::MAX)
    }
}

/// Per-block indentation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentPlan {
    /// Index of the planned block
    pub block: usize,
    /// Indentation every full line is expected to carry
    pub expected: String,
    /// One entry per block line, the first being the opening tag's line
    pub lines: Vec<LinePlan>,
}

impl IndentPlan {
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&LinePlan> {
        self.lines.get(line)
    }

    /// Column shift of a block line; zero for lines outside the block.
    #[must_use]
    pub fn delta(&self, line: usize) -> isize {
        self.line(line).map_or(0, LinePlan::delta)
    }

    /// Block-relative indices of lines with unexpected indentation.
    pub fn bad_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.kind == LineKind::BadIndent)
            .map(|(index, _)| index)
    }

    /// The block's lines with the planned indentation removed.
    pub fn transformed_lines<'a>(
        &'a self,
        block: &'a ScriptBlock,
    ) -> impl Iterator<Item = &'a str> + 'a {
        block
            .lines()
            .zip(&self.lines)
            .map(|(text, line)| text.get(line.strip..).unwrap_or_default())
    }
}

/// Compute the indentation plan of a block.
pub fn plan_block(block: &ScriptBlock, indent: IndentDescriptor) -> IndentPlan {
    let expected = expected_indent(block, indent);
    let mut seen_content = false;

    let lines = block
        .lines()
        .enumerate()
        .map(|(index, text)| {
            if index == 0 {
                return LinePlan {
                    kind: LineKind::First,
                    strip: 0,
                };
            }

            let whitespace = leading_whitespace(text);
            let blank = is_blank(text);

            // The first content line must match exactly; later lines may be
            // indented further.
            let matches = if blank || seen_content {
                whitespace.starts_with(expected.as_str())
            } else {
                whitespace == expected
            };
            if !blank {
                seen_content = true;
            }

            let plan = match (blank, matches) {
                (true, true) => LinePlan {
                    kind: LineKind::Blank,
                    strip: expected.len(),
                },
                (true, false) => LinePlan {
                    kind: LineKind::Blank,
                    strip: 0,
                },
                (false, true) => LinePlan {
                    kind: LineKind::Dedented,
                    strip: expected.len(),
                },
                (false, false) => LinePlan {
                    kind: LineKind::BadIndent,
                    strip: 0,
                },
            };
            tracing::trace!(
                block = block.index,
                line = index,
                kind = ?plan.kind,
                strip = plan.strip,
                "Planned line"
            );
            plan
        })
        .collect();

    IndentPlan {
        block: block.index,
        expected,
        lines,
    }
}

/// Indentation every full line of `block` is expected to carry.
fn expected_indent(block: &ScriptBlock, indent: IndentDescriptor) -> String {
    match indent {
        IndentDescriptor::Auto => block
            .lines()
            .skip(1)
            .find(|line| !is_blank(line))
            .map(|line| leading_whitespace(line).to_string())
            .unwrap_or_default(),
        IndentDescriptor::Absolute(width) => " ".repeat(width),
        IndentDescriptor::Relative(delta) => {
            let mut expected = block.tag_line_indent.clone();
            if delta >= 0 {
                expected.push_str(&" ".repeat(delta.unsigned_abs()));
            } else {
                let keep = expected.len().saturating_sub(delta.unsigned_abs());
                expected.truncate(keep);
            }
            expected
        }
    }
}

fn is_blank(line: &str) -> bool {
    leading_whitespace(line).len() == line.len()
}

/// Column a 1-based original column lands on after a `delta` shift, clamped to
/// column 1.
#[must_use]
pub fn transform_column(column: u32, delta: isize) -> u32 {
    shift_column(column, delta)
}

/// Inverse of [`transform_column`]: the original 1-based column of a column
/// reported on a line shifted by `delta`, clamped to column 1.
#[must_use]
pub fn remap_column(column: u32, delta: isize) -> u32 {
    shift_column(column, delta.saturating_neg())
}

fn shift_column(column: u32, by: isize) -> u32 {
    let by = i64::try_from(by).unwrap_or(if by < 0 { i64::MIN } else { i64::MAX });
    let shifted = i64::from(column).saturating_add(by).max(1);
    u32::try_from(shifted).unwrap_or(u32::MAX)
}
