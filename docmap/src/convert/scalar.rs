//! Scalar conversions.

use std::ops::{Deref, DerefMut};

use super::{Decode, Describe, Encode};
use crate::context::{DecodeContext, EncodeContext};
use crate::document::{Node, Value};
use crate::schema::ValueType;
use crate::DocResult;

macro_rules! signed_integers {
    ($($ty:ty => $bits:literal),* $(,)?) => {$(
        impl Decode for $ty {
            fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
                *self = node
                    .read_i64()
                    .and_then(|value| <$ty>::try_from(value).ok())
                    .ok_or_else(|| cx.mismatch(stringify!($ty), node))?;
                Ok(())
            }
        }

        impl Encode for $ty {
            fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
                Value::Int(i64::from(*self))
            }
        }

        impl Describe for $ty {
            fn describe() -> ValueType {
                ValueType::Integer { bits: $bits, signed: true }
            }
        }
    )*};
}

macro_rules! unsigned_integers {
    ($($ty:ty => $bits:literal),* $(,)?) => {$(
        impl Decode for $ty {
            fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
                *self = node
                    .read_u64()
                    .and_then(|value| <$ty>::try_from(value).ok())
                    .ok_or_else(|| cx.mismatch(stringify!($ty), node))?;
                Ok(())
            }
        }

        impl Encode for $ty {
            fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
                Value::Int(i64::from(*self))
            }
        }

        impl Describe for $ty {
            fn describe() -> ValueType {
                ValueType::Integer { bits: $bits, signed: false }
            }
        }
    )*};
}

signed_integers!(i8 => 8, i16 => 16, i32 => 32, i64 => 64);
unsigned_integers!(u8 => 8, u16 => 16, u32 => 32);

impl Decode for u64 {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        *self = node.read_u64().ok_or_else(|| cx.mismatch("u64", node))?;
        Ok(())
    }
}

impl Encode for u64 {
    fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
        Value::UInt(*self)
    }
}

impl Describe for u64 {
    fn describe() -> ValueType {
        ValueType::Integer {
            bits: 64,
            signed: false,
        }
    }
}

impl Decode for f64 {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        *self = node.read_f64().ok_or_else(|| cx.mismatch("f64", node))?;
        Ok(())
    }
}

impl Encode for f64 {
    fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
        Value::Float(*self)
    }
}

impl Describe for f64 {
    fn describe() -> ValueType {
        ValueType::Float { bits: 64 }
    }
}

impl Decode for f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "documents carry double precision; narrowing is the caller's choice of type"
    )]
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        *self = node.read_f64().ok_or_else(|| cx.mismatch("f32", node))? as f32;
        Ok(())
    }
}

impl Encode for f32 {
    fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Describe for f32 {
    fn describe() -> ValueType {
        ValueType::Float { bits: 32 }
    }
}

impl Decode for bool {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        *self = node.read_bool().ok_or_else(|| cx.mismatch("bool", node))?;
        Ok(())
    }
}

impl Encode for bool {
    fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
        Value::Bool(*self)
    }
}

impl Describe for bool {
    fn describe() -> ValueType {
        ValueType::Bool
    }
}

impl Decode for String {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        *self = node
            .read_str()
            .ok_or_else(|| cx.mismatch("string", node))?
            .into_owned();
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
        Value::String(self.clone())
    }
}

impl Describe for String {
    fn describe() -> ValueType {
        ValueType::String
    }
}

/// Raw bytes.
///
/// `Vec<u8>` decodes as a sequence of small integers like any other
/// `Vec<T>`; wrap it in `Binary` to use the format's byte representation
/// instead (BSON binary, base64 text elsewhere).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary(pub Vec<u8>);

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Deref for Binary {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl DerefMut for Binary {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }
}

impl Decode for Binary {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        self.0 = node
            .read_bytes()
            .ok_or_else(|| cx.mismatch("binary", node))?
            .into_owned();
        Ok(())
    }
}

impl Encode for Binary {
    fn encode(&self, _cx: &EncodeContext<'_>) -> Value {
        Value::Binary(self.0.clone())
    }
}

impl Describe for Binary {
    fn describe() -> ValueType {
        ValueType::Bytes
    }
}
