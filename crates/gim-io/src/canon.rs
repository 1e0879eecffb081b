//! Canonical JSON tree and writer.
//!
//! Documents must serialize deterministically: keys sorted alphabetically,
//! two-space indentation, floats rounded upstream by the quantity types, and
//! non-finite floats written as the bare tokens `NaN`, `Infinity` and
//! `-Infinity` (the classic permissive-JSON representation of the undefined
//! sentinel). Stock JSON writers either reject or `null` out non-finite
//! values, so the writer is built here on an owned tree that preserves them:
//! any `Serialize` model is first collected into a [`JsonValue`] and then
//! written out.
//!
//! Serializing is a pure function of model state; serializing twice yields
//! byte-identical output.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::ser::{self, Serialize};

/// An owned JSON document tree.
///
/// Unlike mainstream value types this one keeps non-finite floats, which is
/// the whole point of its existence.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Array(Vec<JsonValue>),
    /// Keys are kept sorted; `BTreeMap` ordering is the canonical ordering.
    Object(BTreeMap<String, JsonValue>),
}

/// Error raised while collecting a model into a [`JsonValue`].
#[derive(Debug, thiserror::Error)]
#[error("canonical serialization error: {0}")]
pub struct CanonError(String);

impl ser::Error for CanonError {
    fn custom<T: Display>(msg: T) -> Self {
        CanonError(msg.to_string())
    }
}

/// Collect any serializable model into a [`JsonValue`].
pub fn to_value<T: Serialize>(value: &T) -> Result<JsonValue, CanonError> {
    value.serialize(ValueSerializer)
}

/// Render a model as canonical JSON text.
pub fn to_canonical_string<T: Serialize>(value: &T) -> Result<String, CanonError> {
    let tree = to_value(value)?;
    let mut out = String::new();
    write_value(&tree, 0, &mut out);
    Ok(out)
}

// =============================================================================
// Writer
// =============================================================================

const INDENT: &str = "  ";

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_value(value: &JsonValue, depth: usize, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Int(i) => out.push_str(&i.to_string()),
        JsonValue::UInt(u) => out.push_str(&u.to_string()),
        JsonValue::Float(f) => write_float(*f, out),
        JsonValue::Str(s) => write_escaped(s, out),
        JsonValue::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(item, depth + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        JsonValue::Object(entries) => {
            if entries.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (i, (key, item)) in entries.iter().enumerate() {
                push_indent(out, depth + 1);
                write_escaped(key, out);
                out.push_str(": ");
                write_value(item, depth + 1, out);
                if i + 1 < entries.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

fn write_float(value: f64, out: &mut String) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value == f64::INFINITY {
        out.push_str("Infinity");
    } else if value == f64::NEG_INFINITY {
        out.push_str("-Infinity");
    } else {
        let mut buffer = ryu::Buffer::new();
        out.push_str(buffer.format_finite(value));
    }
}

fn write_escaped(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

// =============================================================================
// Tree-building serializer
// =============================================================================

struct ValueSerializer;

fn key_string<T: Serialize + ?Sized>(key: &T) -> Result<String, CanonError> {
    match key.serialize(ValueSerializer)? {
        JsonValue::Str(s) => Ok(s),
        other => Err(CanonError(format!("map key must be a string, got {other:?}"))),
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = JsonValue;
    type Error = CanonError;

    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = TupleVariantCollector;
    type SerializeMap = MapCollector;
    type SerializeStruct = MapCollector;
    type SerializeStructVariant = StructVariantCollector;

    fn serialize_bool(self, v: bool) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Int(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Int(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Int(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::UInt(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::UInt(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::UInt(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Float(v.into()))
    }

    fn serialize_f64(self, v: f64) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Array(
            v.iter().map(|b| JsonValue::UInt((*b).into())).collect(),
        ))
    }

    fn serialize_none(self) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<JsonValue, CanonError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<JsonValue, CanonError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<JsonValue, CanonError> {
        let mut entries = BTreeMap::new();
        entries.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(JsonValue::Object(entries))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCollector, CanonError> {
        Ok(SeqCollector {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector, CanonError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqCollector, CanonError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantCollector, CanonError> {
        Ok(TupleVariantCollector {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapCollector, CanonError> {
        Ok(MapCollector {
            entries: BTreeMap::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<MapCollector, CanonError> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<StructVariantCollector, CanonError> {
        Ok(StructVariantCollector {
            variant,
            entries: BTreeMap::new(),
        })
    }
}

struct SeqCollector {
    items: Vec<JsonValue>,
}

impl ser::SerializeSeq for SeqCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CanonError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Array(self.items))
    }
}

impl ser::SerializeTuple for SeqCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CanonError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CanonError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        ser::SerializeSeq::end(self)
    }
}

struct TupleVariantCollector {
    variant: &'static str,
    items: Vec<JsonValue>,
}

impl ser::SerializeTupleVariant for TupleVariantCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CanonError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        let mut entries = BTreeMap::new();
        entries.insert(self.variant.to_string(), JsonValue::Array(self.items));
        Ok(JsonValue::Object(entries))
    }
}

struct MapCollector {
    entries: BTreeMap<String, JsonValue>,
    pending_key: Option<String>,
}

impl ser::SerializeMap for MapCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), CanonError> {
        self.pending_key = Some(key_string(key)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CanonError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| CanonError("map value without a key".to_string()))?;
        self.entries.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Object(self.entries))
    }
}

impl ser::SerializeStruct for MapCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CanonError> {
        self.entries
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        Ok(JsonValue::Object(self.entries))
    }
}

struct StructVariantCollector {
    variant: &'static str,
    entries: BTreeMap<String, JsonValue>,
}

impl ser::SerializeStructVariant for StructVariantCollector {
    type Ok = JsonValue;
    type Error = CanonError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CanonError> {
        self.entries
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue, CanonError> {
        let mut outer = BTreeMap::new();
        outer.insert(
            self.variant.to_string(),
            JsonValue::Object(self.entries),
        );
        Ok(JsonValue::Object(outer))
    }
}
