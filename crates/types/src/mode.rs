//! Markup tokenization mode.

use std::path::Path;

/// File extensions that default to XML tokenization.
pub const DEFAULT_XML_EXTENSIONS: &[&str] = &["xhtml"];

/// `type` attribute values treated as JavaScript.
pub const DEFAULT_JAVASCRIPT_MIME_TYPES: &[&str] = &[
    "text/javascript",
    "application/javascript",
    "text/babel",
    "module",
    "text/jsx",
    "application/x-javascript",
    "text/ecmascript",
    "application/ecmascript",
];

/// Tokenization rules used to locate script content in a document.
///
/// HTML mode is permissive: script content is raw text up to the closing tag and
/// a stray `<` is tolerated. XML mode requires well-formed markup and unwraps
/// `<![CDATA[ ]]>` sections inside scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkupMode {
    /// Permissive HTML tokenization (the default)
    #[default]
    Html,
    /// Well-formed XML tokenization
    Xml,
}

impl MarkupMode {
    /// Pick a mode from a file path: XML if the extension is one of
    /// `xml_extensions` (compared case-insensitively), HTML otherwise.
    #[must_use]
    pub fn from_path_with<S: AsRef<str>>(path: &Path, xml_extensions: &[S]) -> Self {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return Self::Html;
        };

        let is_xml = xml_extensions.iter().any(|candidate| {
            candidate
                .as_ref()
                .trim_start_matches('.')
                .eq_ignore_ascii_case(extension)
        });

        if is_xml {
            Self::Xml
        } else {
            Self::Html
        }
    }

    /// Returns `true` for XML mode.
    #[must_use]
    pub const fn is_xml(self) -> bool {
        matches!(self, Self::Xml)
    }
}

impl std::fmt::Display for MarkupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Xml => write!(f, "xml"),
        }
    }
}
