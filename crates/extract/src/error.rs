//! Errors raised while scanning a document.

/// A fatal markup error.
///
/// Every variant carries the offset (into the normalized document text) of the
/// construct that failed, so callers can turn it into a positioned diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A character that cannot appear at this point, such as an unescaped `<`
    /// in XML text.
    #[error("Unexpected token {token}")]
    UnexpectedToken { token: String, offset: usize },

    /// A comment, CDATA section, tag or declaration with no terminator.
    #[error("Unterminated {construct}")]
    Unterminated {
        construct: &'static str,
        offset: usize,
    },

    /// An XML attribute with an unquoted value, no value at all or another
    /// syntax problem. The offset is that of the tag's `<`.
    #[error("Invalid attribute: {reason}")]
    InvalidAttribute { reason: String, offset: usize },

    /// A script element whose closing tag never appears.
    #[error("Unclosed <{tag}> element")]
    UnclosedElement { tag: String, offset: usize },

    /// Any other error reported by the XML reader.
    #[error("{reason}")]
    Malformed { reason: String, offset: usize },
}

impl ExtractError {
    /// Offset of the offending construct in the normalized document text.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::Unterminated { offset, .. }
            | Self::InvalidAttribute { offset, .. }
            | Self::UnclosedElement { offset, .. }
            | Self::Malformed { offset, .. } => *offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
