//! Builds an [`XmlDocument`] from quick-xml events.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{XmlDocument, XmlElement, XmlNode};
use crate::error::DocError;
use crate::format::Format;
use crate::DocResult;

fn parse_error(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> DocError {
    DocError::parse(Format::Xml, err)
}

fn element_name(start: &BytesStart<'_>) -> DocResult<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_owned)
        .map_err(parse_error)
}

fn open_element(start: &BytesStart<'_>) -> DocResult<(String, XmlElement)> {
    let mut element = XmlElement::default();
    for entry in start.attributes() {
        let attribute = entry.map_err(parse_error)?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(parse_error)?
            .to_owned();
        let value = attribute.unescape_value().map_err(parse_error)?;
        element.attributes.push((key, XmlNode::Text(value.into_owned())));
    }
    Ok((element_name(start)?, element))
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<(String, XmlElement)>,
    root: Option<(String, XmlElement)>,
}

impl TreeBuilder {
    fn close(&mut self, name: String, element: XmlElement) -> DocResult<()> {
        if let Some((_, parent)) = self.open.last_mut() {
            parent.push_child(name, XmlNode::Element(element));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(parse_error(format!(
                "second document element <{name}> after the root"
            )));
        }
        self.root = Some((name, element));
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, element)) = self.open.last_mut() {
            element.text.push_str(text);
        }
    }

    fn finish(self) -> DocResult<XmlDocument> {
        if let Some((name, _)) = self.open.last() {
            return Err(parse_error(format!("element <{name}> is never closed")));
        }
        let (name, element) = self
            .root
            .ok_or_else(|| parse_error("document has no root element"))?;
        Ok(XmlDocument {
            name,
            root: XmlNode::Element(element),
        })
    }
}

/// Parse a complete XML document.
pub(super) fn parse(input: &[u8]) -> DocResult<XmlDocument> {
    let source = std::str::from_utf8(input).map_err(parse_error)?;
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut builder = TreeBuilder::default();
    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(start) => builder.open.push(open_element(&start)?),
            Event::Empty(start) => {
                let (name, element) = open_element(&start)?;
                builder.close(name, element)?;
            }
            Event::End(_) => {
                let (name, element) = builder
                    .open
                    .pop()
                    .ok_or_else(|| parse_error("closing tag without an open element"))?;
                builder.close(name, element)?;
            }
            Event::Text(content) => builder.push_text(&content.unescape().map_err(parse_error)?),
            Event::CData(cdata) => {
                let data = cdata.into_inner();
                builder.push_text(std::str::from_utf8(&data).map_err(parse_error)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    builder.finish()
}
