//! HTML mode: a permissive byte scanner.
//!
//! Script and style contents are raw text up to the first matching closing
//! tag, a `<` that does not start markup is plain text, and unterminated
//! constructs run to the end of the document. Nothing here is fatal.

use crate::scanner::Collector;
use crate::Attribute;
use htmlscript_types::OffsetRange;

/// Scan an HTML document, handing every script element to `collector`.
pub(crate) fn scan(collector: &mut Collector<'_>) {
    let mut scanner = HtmlScanner::new(collector.text());

    while let Some(lt) = scanner.find_byte(scanner.pos, b'<') {
        scanner.pos = scanner.step(lt, collector);
        debug_assert!(scanner.pos > lt, "scanner must make progress");
    }
}

/// An opening tag.
struct Tag {
    name: String,
    attributes: Vec<Attribute>,
    /// Offset just past the closing `>`
    end: usize,
}

/// End of a raw text element's content.
struct ContentEnd {
    /// Offset of the `<` of the closing tag
    content_end: usize,
    /// Offset just past the closing tag
    resume: usize,
}

struct HtmlScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HtmlScanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    /// Consume the markup starting at `lt`, which holds a `<`, and return the
    /// offset to resume from.
    fn step(&self, lt: usize, collector: &mut Collector<'_>) -> usize {
        let rest = &self.bytes[lt..];

        if rest.starts_with(b"<!--") {
            self.terminated(lt + 4, "-->")
        } else if rest.starts_with(b"<!") {
            self.skip_declaration(lt)
        } else if rest.starts_with(b"<?") {
            self.terminated(lt + 2, ">")
        } else if rest.starts_with(b"</") && self.is_name_start_at(lt + 2) {
            self.terminated(self.name_end(lt + 2), ">")
        } else if self.is_name_start_at(lt + 1) {
            match self.parse_tag(lt) {
                Some(tag) => self.open_element(lt, tag, collector),
                None => self.bytes.len(),
            }
        } else {
            lt + 1
        }
    }

    fn open_element(&self, lt: usize, tag: Tag, collector: &mut Collector<'_>) -> usize {
        if tag.name.eq_ignore_ascii_case("script") {
            let end = self.raw_text_end(tag.end, "script");
            collector.script(
                lt,
                OffsetRange::new(tag.end, end.content_end),
                tag.attributes,
                &[],
            );
            end.resume
        } else if tag.name.eq_ignore_ascii_case("style") {
            self.raw_text_end(tag.end, "style").resume
        } else {
            tag.end
        }
    }

    /// Find the end of a raw text element's content: the first `</name` (any
    /// case) followed by whitespace, `/`, `>` or the end of input.
    fn raw_text_end(&self, start: usize, name: &str) -> ContentEnd {
        let mut search = start;
        while let Some(p) = self.find(search, "</") {
            let name_start = p + 2;
            let name_end = name_start + name.len();
            let name_matches = self
                .bytes
                .get(name_start..name_end)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
            let boundary = self
                .bytes
                .get(name_end)
                .is_none_or(|b| is_whitespace(*b) || matches!(b, b'/' | b'>'));

            if name_matches && boundary {
                return ContentEnd {
                    content_end: p,
                    resume: self.terminated(name_end, ">"),
                };
            }
            search = name_start;
        }

        ContentEnd {
            content_end: self.bytes.len(),
            resume: self.bytes.len(),
        }
    }

    /// Parse an opening tag starting at `lt`. `None` when the tag runs to the
    /// end of input.
    fn parse_tag(&self, lt: usize) -> Option<Tag> {
        let name_end = self.name_end(lt + 1);
        let name = self.text[lt + 1..name_end].to_string();
        let mut attributes = Vec::new();
        let mut i = name_end;

        loop {
            i = self.skip_whitespace(i);
            match *self.bytes.get(i)? {
                b'>' => {
                    return Some(Tag {
                        name,
                        attributes,
                        end: i + 1,
                    });
                }
                b'/' | b'=' => {
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let attribute_start = i;
            let attribute_end = self.attribute_name_end(i);
            let attribute_name = self.text[attribute_start..attribute_end].to_string();
            i = self.skip_whitespace(attribute_end);

            if self.bytes.get(i) != Some(&b'=') {
                attributes.push(Attribute::new(attribute_name, None));
                continue;
            }

            i = self.skip_whitespace(i + 1);
            let value = match *self.bytes.get(i)? {
                quote @ (b'"' | b'\'') => {
                    let close = self.find_byte(i + 1, quote)?;
                    let value = self.text[i + 1..close].to_string();
                    i = close + 1;
                    value
                }
                _ => {
                    let end = self.unquoted_value_end(i);
                    let value = self.text[i..end].to_string();
                    i = end;
                    value
                }
            };
            attributes.push(Attribute::new(attribute_name, Some(value)));
        }
    }

    /// Skip a `<!...>` declaration, allowing a bracketed internal subset.
    fn skip_declaration(&self, lt: usize) -> usize {
        let mut depth = 0usize;
        for (i, b) in self.bytes.iter().enumerate().skip(lt + 2) {
            match b {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return i + 1,
                _ => {}
            }
        }
        self.bytes.len()
    }

    /// Offset just past `terminator`, searching from `from`, or the end of
    /// input.
    fn terminated(&self, from: usize, terminator: &str) -> usize {
        self.find(from, terminator)
            .map_or(self.bytes.len(), |found| found + terminator.len())
    }

    fn find_byte(&self, from: usize, needle: u8) -> Option<usize> {
        memchr::memchr(needle, self.bytes.get(from..)?).map(|i| from + i)
    }

    fn find(&self, from: usize, needle: &str) -> Option<usize> {
        memchr::memmem::find(self.bytes.get(from..)?, needle.as_bytes()).map(|i| from + i)
    }

    fn is_name_start_at(&self, at: usize) -> bool {
        self.bytes
            .get(at)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_' || *b >= 0x80)
    }

    /// End of a tag name starting at `from`.
    fn name_end(&self, from: usize) -> usize {
        self.scan_while(from, |b| !is_whitespace(b) && !matches!(b, b'/' | b'>' | b'<'))
    }

    fn attribute_name_end(&self, from: usize) -> usize {
        let end = self.scan_while(from, |b| {
            !is_whitespace(b) && !matches!(b, b'/' | b'>' | b'=' | b'<')
        });
        // Always consume at least one byte so a stray `<` cannot stall the loop.
        if end == from {
            from + 1
        } else {
            end
        }
    }

    fn unquoted_value_end(&self, from: usize) -> usize {
        self.scan_while(from, |b| !is_whitespace(b) && b != b'>')
    }

    fn skip_whitespace(&self, from: usize) -> usize {
        self.scan_while(from, is_whitespace)
    }

    fn scan_while(&self, from: usize, predicate: impl Fn(u8) -> bool) -> usize {
        self.bytes
            .get(from..)
            .and_then(|rest| rest.iter().position(|b| !predicate(*b)))
            .map_or(self.bytes.len().max(from), |i| from + i)
    }
}

const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}
