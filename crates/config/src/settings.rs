use crate::IndentDescriptor;
use htmlscript_types::{MarkupMode, DEFAULT_JAVASCRIPT_MIME_TYPES, DEFAULT_XML_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Setting keys accepted in config files.
pub const KNOWN_KEYS: &[&str] = &[
    "xml-mode",
    "indent",
    "report-bad-indent",
    "xml-extensions",
    "javascript-mime-types",
];

/// Settings for one linting run.
///
/// Every field has a default, so an empty config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Force XML (`true`) or HTML (`false`) tokenization. When unset the file
    /// extension decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_mode: Option<bool>,

    pub indent: IndentDescriptor,

    /// Report script lines that do not carry the expected indentation.
    pub report_bad_indent: bool,

    /// Extensions (without the dot) that default to XML tokenization.
    pub xml_extensions: Vec<String>,

    /// `type` attribute values treated as JavaScript.
    pub javascript_mime_types: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            xml_mode: None,
            indent: IndentDescriptor::Auto,
            report_bad_indent: false,
            xml_extensions: to_strings(DEFAULT_XML_EXTENSIONS),
            javascript_mime_types: to_strings(DEFAULT_JAVASCRIPT_MIME_TYPES),
        }
    }
}

impl Settings {
    #[must_use]
    pub const fn with_xml_mode(mut self, xml_mode: Option<bool>) -> Self {
        self.xml_mode = xml_mode;
        self
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: IndentDescriptor) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub const fn with_report_bad_indent(mut self, report_bad_indent: bool) -> Self {
        self.report_bad_indent = report_bad_indent;
        self
    }

    /// Tokenization mode for a document at `path`.
    ///
    /// An explicit `xml-mode` wins; otherwise the extension is matched against
    /// `xml-extensions`.
    #[must_use]
    pub fn markup_mode(&self, path: &Path) -> MarkupMode {
        match self.xml_mode {
            Some(true) => MarkupMode::Xml,
            Some(false) => MarkupMode::Html,
            None => MarkupMode::from_path_with(path, &self.xml_extensions),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.xml_mode, None);
        assert_eq!(settings.indent, IndentDescriptor::Auto);
        assert!(!settings.report_bad_indent);
        assert_eq!(settings.xml_extensions, vec!["xhtml"]);
        assert_eq!(settings.javascript_mime_types.len(), 8);
        assert!(settings
            .javascript_mime_types
            .contains(&"text/babel".to_string()));
    }

    #[test]
    fn test_markup_mode_from_extension() {
        let settings = Settings::default();
        assert_eq!(settings.markup_mode(Path::new("a.html")), MarkupMode::Html);
        assert_eq!(settings.markup_mode(Path::new("a.xhtml")), MarkupMode::Xml);
        assert_eq!(settings.markup_mode(Path::new("a.XHTML")), MarkupMode::Xml);
        assert_eq!(settings.markup_mode(Path::new("a")), MarkupMode::Html);
    }

    #[test]
    fn test_markup_mode_override() {
        let forced_xml = Settings::default().with_xml_mode(Some(true));
        assert_eq!(forced_xml.markup_mode(Path::new("a.html")), MarkupMode::Xml);

        let forced_html = Settings::default().with_xml_mode(Some(false));
        assert_eq!(forced_html.markup_mode(Path::new("a.xhtml")), MarkupMode::Html);
    }

    #[test]
    fn test_custom_xml_extensions() {
        let settings = Settings {
            xml_extensions: vec!["svg".to_string(), ".xml".to_string()],
            ..Settings::default()
        };
        assert_eq!(settings.markup_mode(Path::new("icon.svg")), MarkupMode::Xml);
        assert_eq!(settings.markup_mode(Path::new("feed.xml")), MarkupMode::Xml);
        assert_eq!(settings.markup_mode(Path::new("page.xhtml")), MarkupMode::Html);
    }

    #[test]
    fn test_deserialize_kebab_case() {
        let settings: Settings = serde_json::from_str(
            r#"{"xml-mode": true, "indent": "+2", "report-bad-indent": true}"#,
        )
        .unwrap();
        assert_eq!(settings.xml_mode, Some(true));
        assert_eq!(settings.indent, IndentDescriptor::Relative(2));
        assert!(settings.report_bad_indent);
        assert_eq!(settings.xml_extensions, vec!["xhtml"]);
    }

    #[test]
    fn test_known_keys_cover_every_field() {
        let value = serde_json::to_value(Settings::default().with_xml_mode(Some(false))).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        let mut known = KNOWN_KEYS.to_vec();
        known.sort_unstable();
        assert_eq!(keys, known);
    }
}
