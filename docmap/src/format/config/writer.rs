//! Serializes a neutral tree as TOML text.
//!
//! Compact output writes one `key = value` line per top-level key with
//! nested objects as inline tables. Pretty output writes scalars first and
//! then one `[section]` per nested object, indenting keys by depth.

use crate::document::{Object, Value, encode_base64};
use crate::error::DocError;
use crate::format::{Format, Indent};
use crate::DocResult;

fn write_error(message: String) -> DocError {
    DocError::write(Format::Config, message)
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'))
}

fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_owned()
    } else {
        toml::Value::String(key.to_owned()).to_string()
    }
}

fn scalar(value: &Value) -> DocResult<toml::Value> {
    Ok(match value {
        Value::Bool(flag) => toml::Value::Boolean(*flag),
        Value::Int(number) => toml::Value::Integer(*number),
        Value::UInt(number) => toml::Value::Integer(i64::try_from(*number).map_err(|_| {
            write_error(format!("{number} does not fit a TOML integer"))
        })?),
        Value::Float(number) => toml::Value::Float(*number),
        Value::String(text) => toml::Value::String(text.clone()),
        Value::Binary(bytes) => toml::Value::String(encode_base64(bytes)),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            return Err(write_error("expected a scalar value".to_owned()));
        }
    })
}

/// Inline representation of `value`: scalars, arrays and inline tables.
fn inline(value: &Value) -> DocResult<String> {
    match value {
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| match item {
                    Value::Null => Err(write_error("arrays cannot hold null values".to_owned())),
                    other => inline(other),
                })
                .collect::<DocResult<Vec<_>>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
        Value::Object(object) => {
            let entries = object
                .deduplicated()
                .into_iter()
                .filter(|(_, entry)| !matches!(entry, Value::Null))
                .map(|(key, entry)| Ok(format!("{} = {}", format_key(key), inline(entry)?)))
                .collect::<DocResult<Vec<_>>>()?;
            if entries.is_empty() {
                Ok("{}".to_owned())
            } else {
                Ok(format!("{{ {} }}", entries.join(", ")))
            }
        }
        other => Ok(scalar(other)?.to_string()),
    }
}

struct ConfigWriter {
    out: String,
    indent: Indent,
}

impl ConfigWriter {
    fn entry(&mut self, depth: usize, key: &str, value: &Value) -> DocResult<()> {
        let rendered = inline(value)?;
        self.indent.pad(&mut self.out, depth);
        self.out.push_str(&format_key(key));
        self.out.push_str(" = ");
        self.out.push_str(&rendered);
        self.out.push('\n');
        Ok(())
    }

    fn compact(&mut self, root: &Object) -> DocResult<()> {
        for (key, value) in root.deduplicated() {
            if !matches!(value, Value::Null) {
                self.entry(0, key, value)?;
            }
        }
        Ok(())
    }

    fn table(&mut self, path: &mut Vec<String>, object: &Object, depth: usize) -> DocResult<()> {
        let entries = object.deduplicated();
        for (key, value) in &entries {
            match value {
                Value::Null => tracing::trace!(key = %key, "null entry left out of TOML output"),
                Value::Object(_) => {}
                other => self.entry(depth, key, other)?,
            }
        }
        for (key, value) in &entries {
            let Value::Object(child) = value else {
                continue;
            };
            path.push(format_key(key));
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            self.indent.pad(&mut self.out, depth);
            self.out.push('[');
            self.out.push_str(&path.join("."));
            self.out.push_str("]\n");
            self.table(path, child, depth + 1)?;
            path.pop();
        }
        Ok(())
    }
}

/// Write `root` nested under the dotted path `root_name`.
pub(super) fn render(root: &Object, root_name: &str, indent: Indent) -> DocResult<String> {
    let mut nested = root.clone();
    for segment in root_name.rsplit('.').filter(|part| !part.is_empty()) {
        nested = nested.nest(segment);
    }
    let mut writer = ConfigWriter {
        out: String::new(),
        indent,
    };
    match indent {
        Indent::Compact => writer.compact(&nested)?,
        Indent::Pretty { .. } => writer.table(&mut Vec::new(), &nested, 0)?,
    }
    Ok(writer.out)
}
