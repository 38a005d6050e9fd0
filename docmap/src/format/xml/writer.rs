//! Serializes a neutral tree as XML elements.

use crate::document::{Object, Value, encode_base64};
use crate::error::DocError;
use crate::format::{Format, Indent, is_xml_name};
use crate::DocResult;

use super::ITEM;

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn check_name(name: &str) -> DocResult<()> {
    if is_xml_name(name) {
        return Ok(());
    }
    Err(DocError::write(
        Format::Xml,
        format!("'{name}' is not a valid element name"),
    ))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Int(number) => Some(number.to_string()),
        Value::UInt(number) => Some(number.to_string()),
        Value::Float(number) => Some(number.to_string()),
        Value::String(text) => Some(escape_xml(text)),
        Value::Binary(bytes) => Some(encode_base64(bytes)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

struct XmlWriter {
    buffer: String,
    depth: usize,
    indent: Indent,
}

impl XmlWriter {
    const fn new(indent: Indent) -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            indent,
        }
    }

    fn line(&mut self, line: &str) {
        if self.indent.is_pretty() && !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.indent.pad(&mut self.buffer, self.depth);
        self.buffer.push_str(line);
    }

    fn element(&mut self, name: &str, value: &Value) -> DocResult<()> {
        check_name(name)?;
        match value {
            Value::Array(items) => {
                for item in items {
                    self.item(name, item)?;
                }
            }
            Value::Object(object) => self.object(name, object)?,
            Value::Null => self.line(&format!("<{name}/>")),
            scalar => match scalar_text(scalar) {
                Some(text) if !text.is_empty() => self.line(&format!("<{name}>{text}</{name}>")),
                _ => self.line(&format!("<{name}/>")),
            },
        }
        Ok(())
    }

    /// One value of a sequence. An inner sequence becomes a single element
    /// with an `<item>` child per value.
    fn item(&mut self, name: &str, value: &Value) -> DocResult<()> {
        let Value::Array(values) = value else {
            return self.element(name, value);
        };
        if values.is_empty() {
            self.line(&format!("<{name}/>"));
            return Ok(());
        }
        self.line(&format!("<{name}>"));
        self.depth += 1;
        for inner in values {
            self.item(ITEM, inner)?;
        }
        self.depth -= 1;
        self.line(&format!("</{name}>"));
        Ok(())
    }

    fn object(&mut self, name: &str, object: &Object) -> DocResult<()> {
        if object.is_empty() {
            self.line(&format!("<{name}/>"));
            return Ok(());
        }
        self.line(&format!("<{name}>"));
        self.depth += 1;
        for (key, value) in object.iter() {
            self.element(key, value)?;
        }
        self.depth -= 1;
        self.line(&format!("</{name}>"));
        Ok(())
    }

}

/// Write `root` as the document element `root_name`.
pub(super) fn render(root: &Object, root_name: &str, indent: Indent) -> DocResult<String> {
    if root_name.is_empty() {
        return Err(DocError::write(
            Format::Xml,
            "XML documents need a root element name",
        ));
    }
    check_name(root_name)?;
    let mut writer = XmlWriter::new(indent);
    writer.object(root_name, root)?;
    Ok(writer.buffer)
}
