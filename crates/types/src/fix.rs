//! Text edits proposed by an analyzer.

use crate::OffsetRange;
use serde::{Deserialize, Serialize};

/// A text edit attached to a diagnostic.
///
/// `range` is a byte offset range into whichever text the diagnostic refers to:
/// the virtual source while the diagnostic is fresh from the analyzer, and the
/// original document once it has been remapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fix {
    /// Byte offset range to replace
    pub range: OffsetRange,
    /// The text to replace the range with (empty string means deletion)
    pub text: String,
}

impl Fix {
    /// Create a new fix that replaces a range with new text.
    #[must_use]
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            range: OffsetRange::new(start, end),
            text: text.into(),
        }
    }

    /// Create a deletion fix.
    #[must_use]
    pub fn delete(start: usize, end: usize) -> Self {
        Self::new(start, end, String::new())
    }

    /// Create an insertion fix.
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            range: OffsetRange::at(position),
            text: text.into(),
        }
    }

    /// Apply this fix to `source`.
    ///
    /// Returns `None` when the range is out of bounds or does not fall on
    /// character boundaries.
    #[must_use]
    pub fn apply(&self, source: &str) -> Option<String> {
        apply_fixes(source, std::slice::from_ref(self))
    }
}

/// Apply several fixes to `source` at once.
///
/// Fixes are applied from the last range to the first so earlier offsets stay
/// valid. Returns `None` if any range is invalid or two ranges overlap.
#[must_use]
pub fn apply_fixes(source: &str, fixes: &[Fix]) -> Option<String> {
    let mut sorted: Vec<&Fix> = fixes.iter().collect();
    sorted.sort_by_key(|fix| (fix.range.start, fix.range.end));

    for pair in sorted.windows(2) {
        if pair[0].range.end > pair[1].range.start {
            return None;
        }
    }

    let mut result = source.to_string();
    for fix in sorted.iter().rev() {
        let OffsetRange { start, end } = fix.range;
        if start > end
            || end > result.len()
            || !result.is_char_boundary(start)
            || !result.is_char_boundary(end)
        {
            return None;
        }
        result.replace_range(start..end, &fix.text);
    }
    Some(result)
}
