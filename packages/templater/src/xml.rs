//! Streaming XML reader shared by the parser.
//!
//! Wraps a `quick_xml::Reader` and reduces its events to the three the
//! parser cares about: element open, element close and decoded text.

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, TemplaterError};

/// A start tag with its name and decoded attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    /// Local name as written, without namespace prefix.
    pub name: String,
    /// Attribute local names and unescaped values, in document order.
    pub attributes: Vec<(String, String)>,
}

/// A token from [`TemplateReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEvent {
    /// An element starts. Self-closing elements are followed by `Close`.
    Open(RawElement),
    /// The most recently opened element ends.
    Close,
    /// Character data with entities decoded. CDATA sections arrive as text.
    Text(String),
    /// End of a well-formed document.
    Eof,
}

/// Forward-only tokenizer over template text.
///
/// Well-formedness problems are reported when they are reached, so
/// everything before the fault has already been handed out.
///
/// # Examples
/// ```
/// use mail_templater::xml::{TemplateEvent, TemplateReader};
///
/// let mut reader = TemplateReader::new("<SUBJECT>Fish &amp; Chips</SUBJECT>");
/// assert!(matches!(reader.next_event().unwrap(), TemplateEvent::Open(e) if e.name == "SUBJECT"));
/// assert_eq!(reader.next_event().unwrap(), TemplateEvent::Text("Fish & Chips".to_string()));
/// assert_eq!(reader.next_event().unwrap(), TemplateEvent::Close);
/// assert_eq!(reader.next_event().unwrap(), TemplateEvent::Eof);
/// ```
pub struct TemplateReader<'input> {
    reader: Reader<&'input [u8]>,
    open: Vec<String>,
    close_pending: bool,
    seen_root: bool,
}

impl<'input> TemplateReader<'input> {
    /// Start reading `text`. A leading byte-order mark is ignored.
    pub fn new(text: &'input str) -> Self {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        Self {
            reader: Reader::from_str(text),
            open: Vec::new(),
            close_pending: false,
            seen_root: false,
        }
    }

    /// Read the next event.
    ///
    /// # Errors
    /// `MalformedTemplate` at the first point the input stops being
    /// well-formed XML, including running out of input with elements open.
    pub fn next_event(&mut self) -> Result<TemplateEvent> {
        if self.close_pending {
            self.close_pending = false;
            self.open.pop();
            return Ok(TemplateEvent::Close);
        }

        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.malformed(e)),
            };

            match event {
                Event::Start(start) => {
                    let element = self.element(&start)?;
                    self.open.push(element.name.clone());
                    return Ok(TemplateEvent::Open(element));
                }
                Event::Empty(start) => {
                    let element = self.element(&start)?;
                    self.open.push(element.name.clone());
                    self.close_pending = true;
                    return Ok(TemplateEvent::Open(element));
                }
                Event::End(_) => {
                    self.open.pop();
                    return Ok(TemplateEvent::Close);
                }
                Event::Text(text) => {
                    let text = match text.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(e) => return Err(self.malformed(e)),
                    };
                    if self.open.is_empty() {
                        if text.trim().is_empty() {
                            continue;
                        }
                        return Err(self.malformed("text outside the root element"));
                    }
                    return Ok(TemplateEvent::Text(text));
                }
                Event::CData(cdata) => {
                    let text = match cdata.decode() {
                        Ok(text) => text.into_owned(),
                        Err(e) => return Err(self.malformed(e)),
                    };
                    if self.open.is_empty() {
                        return Err(self.malformed("CDATA outside the root element"));
                    }
                    return Ok(TemplateEvent::Text(text));
                }
                Event::Eof => {
                    if let Some(name) = self.open.last() {
                        let reason = format!("unexpected end of input, <{name}> is not closed");
                        return Err(self.malformed(reason));
                    }
                    if !self.seen_root {
                        return Err(self.malformed("no root element"));
                    }
                    return Ok(TemplateEvent::Eof);
                }
                _ => continue,
            }
        }
    }

    fn element(&mut self, start: &BytesStart<'_>) -> Result<RawElement> {
        if self.open.is_empty() && self.seen_root {
            return Err(self.malformed("more than one root element"));
        }
        self.seen_root = true;

        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = match attr {
                Ok(attr) => attr,
                Err(e) => return Err(self.malformed(e)),
            };
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(e) => return Err(self.malformed(e)),
            };
            attributes.push((key, value));
        }

        Ok(RawElement { name, attributes })
    }

    fn malformed(&self, reason: impl fmt::Display) -> TemplaterError {
        TemplaterError::MalformedTemplate {
            position: u64::try_from(self.reader.buffer_position()).unwrap_or(u64::MAX),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Debug for TemplateReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateReader")
            .field("position", &self.reader.buffer_position())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

/// Get the dispatch key of an element name: the name, upper-cased.
///
/// # Examples
/// ```
/// use mail_templater::xml::dispatch_key;
///
/// assert_eq!(dispatch_key("ListTemplate"), "LISTTEMPLATE");
/// ```
pub fn dispatch_key(name: &str) -> String {
    name.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn events(xml: &str) -> Result<Vec<TemplateEvent>> {
        let mut reader = TemplateReader::new(xml);
        let mut events = Vec::new();
        loop {
            let event = reader.next_event()?;
            if event == TemplateEvent::Eof {
                return Ok(events);
            }
            events.push(event);
        }
    }

    fn open(name: &str, attributes: &[(&str, &str)]) -> TemplateEvent {
        TemplateEvent::Open(RawElement {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    fn text(s: &str) -> TemplateEvent {
        TemplateEvent::Text(s.to_string())
    }

    #[test]
    fn test_self_closing_yields_close() {
        assert_eq!(
            events(r#"<MESSAGE><TO EMAIL="a@x.org"/></MESSAGE>"#).unwrap(),
            vec![
                open("MESSAGE", &[]),
                open("TO", &[("EMAIL", "a@x.org")]),
                TemplateEvent::Close,
                TemplateEvent::Close,
            ]
        );
    }

    #[test]
    fn test_text_and_attributes_unescaped() {
        assert_eq!(
            events(r#"<S NAME="Fish &amp; Co">a &lt;b&gt; &#65;</S>"#).unwrap(),
            vec![open("S", &[("NAME", "Fish & Co")]), text("a <b> A"), TemplateEvent::Close]
        );
    }

    #[test]
    fn test_cdata_is_text() {
        assert_eq!(
            events("<B>x<![CDATA[<p>&amp;</p>]]></B>").unwrap(),
            vec![open("B", &[]), text("x"), text("<p>&amp;</p>"), TemplateEvent::Close]
        );
    }

    #[test]
    fn test_namespace_prefix_dropped() {
        let xml = r#"<t:MESSAGE xmlns:t="urn:templater" t:PRIORITY="High"/>"#;
        assert_eq!(
            events(xml).unwrap(),
            vec![open("MESSAGE", &[("PRIORITY", "High")]), TemplateEvent::Close]
        );
    }

    #[test]
    fn test_declaration_comments_and_bom_skipped() {
        let xml = "\u{FEFF}<?xml version=\"1.0\"?>\n<!-- note -->\n<M/>\n";
        assert_eq!(events(xml).unwrap(), vec![open("M", &[]), TemplateEvent::Close]);
    }

    #[test]
    fn test_events_before_fault_are_delivered() {
        let mut reader = TemplateReader::new(r#"<MESSAGE><TO EMAIL="a@x.org"/><SUBJECT>x</MESSAGE>"#);
        assert_eq!(reader.next_event().unwrap(), open("MESSAGE", &[]));
        assert_eq!(reader.next_event().unwrap(), open("TO", &[("EMAIL", "a@x.org")]));
        assert_eq!(reader.next_event().unwrap(), TemplateEvent::Close);
        assert_eq!(reader.next_event().unwrap(), open("SUBJECT", &[]));
        assert_eq!(reader.next_event().unwrap(), text("x"));
        assert!(matches!(
            reader.next_event(),
            Err(TemplaterError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn test_malformed_inputs() {
        for xml in [
            "<MESSAGE><TO></MESSAGE>",
            "<MESSAGE>",
            "not xml at all",
            "<A/><B/>",
            r#"<A X="1" X="2"/>"#,
            "<A>&nosuchentity;</A>",
            "",
        ] {
            assert!(
                matches!(events(xml), Err(TemplaterError::MalformedTemplate { .. })),
                "accepted {xml:?}"
            );
        }
    }

    #[test]
    fn test_dispatch_key_upper_cases() {
        assert_eq!(dispatch_key("bodyHtml"), "BODYHTML");
    }
}
