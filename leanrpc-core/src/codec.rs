//! Codec for turning values into JSON text and back
//!
//! Encoding goes through the writer contract: [`JsonWriter`] is a
//! [`Writer`] that assembles a `serde_json` document from the calls a
//! [`Value`] makes while it walks itself, and `serde_json` renders the text.
//! Decoding leaves lexing to `serde_json` and maps its data model onto
//! [`Value`].
//!
//! # Why a Codec Module?
//!
//! - **One traversal**: encoding runs through [`Value::write`], so the wire
//!   form follows the same rules as every other writer (undefined object
//!   members vanish, undefined array elements become null)
//! - **Error mapping**: malformed text becomes a parse-error [`Fault`]
//! - **Serde integration**: [`Value`] implements `Serialize` and
//!   `Deserialize`, so it can sit inside any serde-derived type
//!
//! # Number Mapping
//!
//! Decoded integers that fit in 32 bits become `Int32`; every other number
//! becomes `Double`. Non-finite doubles have no JSON form and are written
//! as null.
//!
//! # Examples
//!
//! ```rust
//! use leanrpc_core::{codec, Value};
//!
//! let value = Value::from_iterable([("sum", Value::from(8)), ("skip", Value::UNDEFINED)]);
//! assert_eq!(codec::encode(&value).unwrap(), r#"{"sum":8}"#);
//!
//! let decoded = codec::decode("[1, 2.5, null]").unwrap();
//! assert_eq!(decoded.as_array().unwrap().len(), 3);
//! ```

use crate::error::{Error, Fault, Result};
use crate::types::Message;
use crate::value::{Array, Object, Repr, Value};
use crate::writer::Writer;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

enum Frame {
    Array(Vec<serde_json::Value>),
    Struct {
        members: serde_json::Map<String, serde_json::Value>,
        key: Option<String>,
    },
}

/// Writer that builds a `serde_json::Value` document
///
/// Feed it through [`Value::write`] (or any other producer of writer calls)
/// and collect the result with [`finish`](JsonWriter::finish).
///
/// ```rust
/// use leanrpc_core::codec::JsonWriter;
/// use leanrpc_core::Writer;
///
/// let mut writer = JsonWriter::new();
/// writer.start_array();
/// writer.write_int32(1);
/// writer.write_double(f64::NAN);
/// writer.end_array();
///
/// assert_eq!(writer.finish().unwrap(), serde_json::json!([1, null]));
/// ```
#[derive(Default)]
pub struct JsonWriter {
    stack: Vec<Frame>,
    root: Option<serde_json::Value>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the completed document
    ///
    /// # Errors
    ///
    /// `Error::Serialization` if nothing was written or a struct or array
    /// is still open.
    pub fn finish(self) -> Result<serde_json::Value> {
        if !self.stack.is_empty() {
            return Err(Error::Serialization(format!(
                "{} unclosed struct or array",
                self.stack.len()
            )));
        }
        self.root
            .ok_or_else(|| Error::Serialization("No value was written".to_string()))
    }

    fn emit(&mut self, value: serde_json::Value) {
        match self.stack.last_mut() {
            None => {
                if self.root.replace(value).is_some() {
                    tracing::warn!("Top-level value written twice; keeping the last one");
                }
            }
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Struct { members, key }) => match key.take() {
                Some(key) => {
                    members.insert(key, value);
                }
                None => tracing::warn!("Struct member value written without a key; dropped"),
            },
        }
    }
}

impl Writer for JsonWriter {
    fn write_null(&mut self) {
        self.emit(serde_json::Value::Null);
    }

    fn write_bool(&mut self, value: bool) {
        self.emit(serde_json::Value::Bool(value));
    }

    fn write_double(&mut self, value: f64) {
        let number = serde_json::Number::from_f64(value)
            .map_or(serde_json::Value::Null, serde_json::Value::Number);
        self.emit(number);
    }

    fn write_int32(&mut self, value: i32) {
        self.emit(serde_json::Value::from(value));
    }

    fn write_string(&mut self, value: &str) {
        self.emit(serde_json::Value::String(value.to_owned()));
    }

    fn start_struct(&mut self) {
        self.stack.push(Frame::Struct {
            members: serde_json::Map::new(),
            key: None,
        });
    }

    fn start_struct_element(&mut self, name: &str) {
        match self.stack.last_mut() {
            Some(Frame::Struct { key, .. }) => *key = Some(name.to_owned()),
            _ => tracing::warn!(key = name, "Struct element started outside a struct"),
        }
    }

    fn end_struct_element(&mut self) {
        if let Some(Frame::Struct { key, .. }) = self.stack.last_mut() {
            if let Some(unused) = key.take() {
                tracing::warn!(key = %unused, "Struct element closed without a value");
            }
        }
    }

    fn end_struct(&mut self) {
        match self.stack.pop() {
            Some(Frame::Struct { members, .. }) => self.emit(serde_json::Value::Object(members)),
            Some(frame) => {
                tracing::warn!("end_struct called while an array is open");
                self.stack.push(frame);
            }
            None => tracing::warn!("end_struct called with nothing open"),
        }
    }

    fn start_array(&mut self) {
        self.stack.push(Frame::Array(Vec::new()));
    }

    fn end_array(&mut self) {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.emit(serde_json::Value::Array(items)),
            Some(frame) => {
                tracing::warn!("end_array called while a struct is open");
                self.stack.push(frame);
            }
            None => tracing::warn!("end_array called with nothing open"),
        }
    }
}

/// Convert a value to a `serde_json` document via the writer contract
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    let mut writer = JsonWriter::new();
    value.write(&mut writer);
    writer.finish()
}

/// Encode a value as compact JSON text
///
/// # Errors
///
/// `Error::Serialization` if the document cannot be rendered.
pub fn encode(value: &Value) -> Result<String> {
    let json = to_json(value)?;
    let text = serde_json::to_string(&json).map_err(|e| Error::Serialization(e.to_string()))?;
    tracing::trace!(bytes = text.len(), "Encoded value");
    Ok(text)
}

/// Encode a value as indented JSON text
pub fn encode_pretty(value: &Value) -> Result<String> {
    let json = to_json(value)?;
    serde_json::to_string_pretty(&json).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode JSON text into a value
///
/// # Errors
///
/// `Error::Fault` carrying a parse-error fault (-32700) if the text is not
/// valid JSON.
pub fn decode(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse JSON text");
        Error::Fault(Fault::parse_error())
    })
}

/// Encode a JSON-RPC message
///
/// ```rust
/// use leanrpc_core::{codec, Id, Message, Request, Value};
///
/// let request = Request::new("ping", Value::UNDEFINED, Id::Number(1));
/// let text = codec::encode_message(&Message::Request(request)).unwrap();
/// assert_eq!(text, r#"{"id":1,"jsonrpc":"2.0","method":"ping"}"#);
/// ```
pub fn encode_message(message: &Message) -> Result<String> {
    let mut writer = JsonWriter::new();
    message.write(&mut writer);
    let json = writer.finish()?;
    serde_json::to_string(&json).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a JSON-RPC message
///
/// # Errors
///
/// - Parse-error fault if the text is not JSON
/// - Invalid-request fault if the JSON is not a request, notification or
///   response
pub fn decode_message(text: &str) -> Result<Message> {
    let value = decode(text)?;
    Message::from_value(value).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected JSON-RPC message");
    })
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.repr {
            Repr::Undefined | Repr::Null => serializer.serialize_unit(),
            Repr::Boolean(b) => serializer.serialize_bool(*b),
            Repr::Double(d) => serializer.serialize_f64(*d),
            Repr::Int32(i) => serializer.serialize_i32(*i),
            Repr::String(s) => serializer.serialize_str(s),
            Repr::Object(members) => {
                let present = members.iter().filter(|(_, v)| !v.is_undefined());
                let mut map = serializer.serialize_map(Some(present.clone().count()))?;
                for (key, member) in present {
                    map.serialize_entry(key, member)?;
                }
                map.end()
            }
            Repr::Array(elements) => serializer.collect_seq(elements),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::NULL)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::NULL)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(i32::try_from(v).map_or_else(|_| Value::from(v as f64), Value::from))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(i32::try_from(v).map_or_else(|_| Value::from(v as f64), Value::from))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut elements = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element::<Value>()? {
            elements.push(element);
        }
        Ok(Value::from(elements))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
        let mut members = Object::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, member)) = map.next_entry::<String, Value>()? {
            members.insert(key, member);
        }
        Ok(Value::from(members))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::NULL,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => match n.as_i64().map(i32::try_from) {
                Some(Ok(i)) => Value::from(i),
                _ => Value::from(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::from(items.into_iter().map(Value::from).collect::<Array>())
            }
            serde_json::Value::Object(members) => Value::from(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}
