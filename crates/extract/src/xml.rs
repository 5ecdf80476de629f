//! XML mode, driven by `quick-xml`.
//!
//! Strict about the constructs the reader understands: a `<` that does not
//! start markup, an unterminated construct or a malformed attribute aborts the
//! scan. Inside a script, CDATA markers, comments and child elements are masked
//! out of the script value so columns do not shift.

use crate::scanner::Collector;
use crate::{Attribute, ExtractError, Result};
use htmlscript_types::OffsetRange;
use quick_xml::errors::{Error, SyntaxError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// A script element whose closing tag has not been read yet.
struct OpenScript {
    /// Offset of the opening tag's `<`
    lt: usize,
    content_start: usize,
    attributes: Vec<Attribute>,
    /// Nesting depth of child elements
    depth: usize,
    masks: Vec<OffsetRange>,
}

impl OpenScript {
    fn mask(&mut self, start: usize, end: usize) {
        self.masks.push(OffsetRange::new(start, end));
    }
}

/// Scan an XML document, handing every script element to `collector`.
pub(crate) fn scan(collector: &mut Collector<'_>) -> Result<()> {
    let text = collector.text();
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.trim_text_start = false;
    config.trim_text_end = false;
    // Closing tags are matched by hand, and only inside scripts.
    config.check_end_names = false;

    let mut open: Option<OpenScript> = None;

    loop {
        let start = reader.buffer_position() as usize;
        check_markup_start(text, start)?;

        let event = match reader.read_event() {
            Ok(event) => event,
            Err(error) => return Err(reader_error(&error, reader.error_position() as usize)),
        };
        let end = reader.buffer_position() as usize;

        match event {
            Event::Eof => {
                return match open {
                    Some(script) => Err(ExtractError::UnclosedElement {
                        tag: "script".to_string(),
                        offset: script.lt,
                    }),
                    None => Ok(()),
                };
            }
            Event::Start(tag) => {
                let attributes = parse_attributes(&tag, start)?;
                match open.as_mut() {
                    Some(script) => {
                        script.depth += 1;
                        script.mask(start, end);
                    }
                    None if tag.name().as_ref() == b"script" => {
                        open = Some(OpenScript {
                            lt: start,
                            content_start: end,
                            attributes,
                            depth: 0,
                            masks: Vec::new(),
                        });
                    }
                    None => {}
                }
            }
            Event::Empty(tag) => {
                parse_attributes(&tag, start)?;
                if let Some(script) = open.as_mut() {
                    script.mask(start, end);
                }
            }
            Event::End(tag) => match open.take() {
                Some(mut script) if script.depth > 0 => {
                    script.depth -= 1;
                    script.mask(start, end);
                    open = Some(script);
                }
                Some(script) if tag.name().as_ref() == b"script" => {
                    collector.script(
                        script.lt,
                        OffsetRange::new(script.content_start, start),
                        script.attributes,
                        &script.masks,
                    );
                }
                Some(_) => {
                    return Err(ExtractError::UnexpectedToken {
                        token: format!("</{}>", String::from_utf8_lossy(tag.name().as_ref())),
                        offset: start,
                    });
                }
                None => {}
            },
            Event::CData(_) => {
                if let Some(script) = open.as_mut() {
                    script.mask(start, start + CDATA_OPEN.len());
                    script.mask(end - CDATA_CLOSE.len(), end);
                }
            }
            Event::Text(_) => {}
            // Comments, processing instructions and declarations
            _ => {
                if let Some(script) = open.as_mut() {
                    script.mask(start, end);
                }
            }
        }
    }
}

/// A `<` must open a tag, a closing tag, a comment, a CDATA section, a
/// declaration or a processing instruction.
fn check_markup_start(text: &str, at: usize) -> Result<()> {
    let bytes = text.as_bytes();
    if bytes.get(at) != Some(&b'<') {
        return Ok(());
    }

    match bytes.get(at + 1) {
        Some(b) if is_name_start(*b) || matches!(b, b'/' | b'!' | b'?') => Ok(()),
        _ => Err(ExtractError::UnexpectedToken {
            token: "<".to_string(),
            offset: at,
        }),
    }
}

const fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b':' || b >= 0x80
}

/// Attributes of a tag starting at `lt`. Every tag is checked, not only
/// scripts.
fn parse_attributes(tag: &BytesStart<'_>, lt: usize) -> Result<Vec<Attribute>> {
    tag.attributes()
        .map(|attribute| {
            let attribute = attribute.map_err(|error| ExtractError::InvalidAttribute {
                reason: error.to_string(),
                offset: lt,
            })?;
            Ok(Attribute::new(
                String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
                Some(String::from_utf8_lossy(&attribute.value).into_owned()),
            ))
        })
        .collect()
}

fn reader_error(error: &Error, offset: usize) -> ExtractError {
    let construct = match error {
        Error::Syntax(SyntaxError::UnclosedComment) => "comment",
        Error::Syntax(SyntaxError::UnclosedCData) => "CDATA section",
        Error::Syntax(SyntaxError::UnclosedDoctype) => "declaration",
        Error::Syntax(SyntaxError::UnclosedPIOrXmlDecl) => "processing instruction",
        Error::Syntax(SyntaxError::UnclosedTag) => "tag",
        _ => {
            return ExtractError::Malformed {
                reason: error.to_string(),
                offset,
            }
        }
    };
    ExtractError::Unterminated { construct, offset }
}
