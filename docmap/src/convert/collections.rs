//! Optional values, sequences and string-keyed maps.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::{Decode, Describe, Encode};
use crate::context::{DecodeContext, EncodeContext};
use crate::document::{Node, Object, Value};
use crate::schema::ValueType;
use crate::DocResult;

/// Null clears the option; anything else decodes into the existing value,
/// or into a default one when the option was empty.
impl<T: Decode + Default> Decode for Option<T> {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        if node.is_null() {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).decode(node, cx)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, cx: &EncodeContext<'_>) -> Value {
        self.as_ref().map_or(Value::Null, |value| value.encode(cx))
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> ValueType {
        ValueType::Optional {
            of: Box::new(T::describe()),
        }
    }
}

/// Sequences are replaced, not merged. A null that the format does not
/// read as a sequence clears it.
impl<T: Decode + Default> Decode for Vec<T> {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        let found = if cx.in_sequence() {
            node.items()
        } else {
            node.elements()
        };
        let Some(elements) = found else {
            if node.is_null() {
                self.clear();
                return Ok(());
            }
            return Err(cx.mismatch("array", node));
        };
        let mut items = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let mut item = T::default();
            cx.with_index(index, |inner| item.decode(element, inner))?;
            items.push(item);
        }
        *self = items;
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, cx: &EncodeContext<'_>) -> Value {
        Value::Array(self.iter().map(|item| item.encode(cx)).collect())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> ValueType {
        ValueType::List {
            of: Box::new(T::describe()),
        }
    }
}

fn decode_entries<T: Decode + Default>(
    node: &dyn Node,
    cx: &mut DecodeContext,
    mut insert: impl FnMut(String, T),
) -> DocResult<()> {
    if node.is_null() {
        return Ok(());
    }
    let entries = node.entries().ok_or_else(|| cx.mismatch("map", node))?;
    for (key, child) in entries {
        let mut value = T::default();
        cx.with_key(key, |inner| value.decode(child, inner))?;
        insert(key.to_owned(), value);
    }
    Ok(())
}

fn encode_entries<'v, T: Encode + 'v>(
    entries: impl IntoIterator<Item = (&'v String, &'v T)>,
    cx: &EncodeContext<'_>,
) -> Value {
    let mut object = Object::new();
    for (key, value) in entries {
        object.insert(key.as_str(), value.encode(cx));
    }
    Value::Object(object)
}

/// Maps are replaced, not merged.
impl<T: Decode + Default> Decode for BTreeMap<String, T> {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        let mut map = Self::new();
        decode_entries(node, cx, |key, value| {
            map.insert(key, value);
        })?;
        *self = map;
        Ok(())
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self, cx: &EncodeContext<'_>) -> Value {
        encode_entries(self, cx)
    }
}

impl<T: Describe> Describe for BTreeMap<String, T> {
    fn describe() -> ValueType {
        ValueType::Map {
            of: Box::new(T::describe()),
        }
    }
}

impl<T, S> Decode for HashMap<String, T, S>
where
    T: Decode + Default,
    S: BuildHasher + Default,
{
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        let mut map = Self::default();
        decode_entries(node, cx, |key, value| {
            map.insert(key, value);
        })?;
        *self = map;
        Ok(())
    }
}

/// Keys are written in sorted order so output does not depend on the
/// hasher.
impl<T: Encode, S> Encode for HashMap<String, T, S> {
    fn encode(&self, cx: &EncodeContext<'_>) -> Value {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
        encode_entries(entries, cx)
    }
}

impl<T: Describe, S> Describe for HashMap<String, T, S> {
    fn describe() -> ValueType {
        ValueType::Map {
            of: Box::new(T::describe()),
        }
    }
}
