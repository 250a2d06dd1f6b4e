//! JSON-RPC 2.0 message envelopes
//!
//! These types frame [`Value`] payloads as JSON-RPC 2.0 messages
//! (https://www.jsonrpc.org/specification). They serialize through the
//! writer contract, so the same envelope can be emitted by any [`Writer`].
//!
//! # Message Types
//!
//! 1. **Request**: a call that expects a response, identified by an [`Id`]
//! 2. **Notification**: a call with no `id` and no response
//! 3. **Response**: the outcome of a request, either a result or a [`Fault`]
//!
//! # Parameters
//!
//! `params` is an Array (positional) or an Object (named). An undefined
//! `params` is left off the wire entirely.
//!
//! # Examples
//!
//! ```rust
//! use leanrpc_core::{codec, Id, Message, Request, Value};
//!
//! let params = Value::from_iterable([("a", 5), ("b", 3)]);
//! let request = Request::new("add", params, Id::Number(1));
//!
//! let text = codec::encode_message(&Message::Request(request)).unwrap();
//! let decoded = codec::decode_message(&text).unwrap();
//! assert!(decoded.is_request());
//! ```

use crate::error::{Error, Fault, Result};
use crate::value::{Type, Value};
use crate::writer::Writer;
use std::fmt;

/// Protocol version carried in every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// ```rust
/// use leanrpc_core::Id;
///
/// let id1: Id = "req-123".into();
/// let id2: Id = 42i64.into();
///
/// assert_eq!(id1.to_string(), "\"req-123\"");
/// assert_eq!(id2.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Id {
    /// String identifier
    String(String),
    /// Numeric identifier
    Number(i64),
    /// Null identifier; used when the request id could not be read
    Null,
}

impl Id {
    /// Read an id from a decoded value
    ///
    /// Accepts strings, null, and numbers with no fractional part.
    pub fn from_value(value: &Value) -> Result<Id> {
        match value.get_type() {
            Type::String => Ok(Id::String(value.as_string()?.to_owned())),
            Type::Int32 => Ok(Id::Number(i64::from(value.as_int32()?))),
            Type::Double => {
                let d = value.as_double()?;
                if d.is_finite() && d.fract() == 0.0 && d.abs() < 9.007_199_254_740_992e15 {
                    Ok(Id::Number(d as i64))
                } else {
                    Err(Fault::invalid_request("Request id must be an integer").into())
                }
            }
            Type::Null => Ok(Id::Null),
            other => Err(Fault::invalid_request(format!("Request id cannot be {}", other)).into()),
        }
    }

    /// Emit the id through the writer contract
    ///
    /// Numbers outside the `i32` range are written as doubles.
    pub fn write(&self, writer: &mut dyn Writer) {
        match self {
            Id::String(s) => writer.write_string(s),
            Id::Number(n) => match i32::try_from(*n) {
                Ok(small) => writer.write_int32(small),
                Err(_) => writer.write_double(*n as f64),
            },
            Id::Null => writer.write_null(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::Number(i64::from(n))
    }
}

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Name of the remote method
    pub method: String,
    /// Array or Object parameters; undefined when omitted
    pub params: Value,
    /// Correlates the response with this request
    pub id: Id,
}

impl Request {
    /// Create a request; pass `Value::UNDEFINED` for no parameters
    ///
    /// ```rust
    /// use leanrpc_core::{Id, Request, Value};
    ///
    /// let request = Request::new("ping", Value::UNDEFINED, Id::Number(1));
    /// assert_eq!(request.method, "ping");
    /// ```
    pub fn new(method: impl Into<String>, params: impl Into<Value>, id: Id) -> Self {
        Self {
            method: method.into(),
            params: params.into(),
            id,
        }
    }

    pub fn write(&self, writer: &mut dyn Writer) {
        writer.start_struct();
        write_version(writer);
        write_call(writer, &self.method, &self.params);
        writer.start_struct_element("id");
        self.id.write(writer);
        writer.end_struct_element();
        writer.end_struct();
    }
}

/// JSON-RPC 2.0 notification: a request without an id, never answered
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub method: String,
    pub params: Value,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: impl Into<Value>) -> Self {
        Self {
            method: method.into(),
            params: params.into(),
        }
    }

    pub fn write(&self, writer: &mut dyn Writer) {
        writer.start_struct();
        write_version(writer);
        write_call(writer, &self.method, &self.params);
        writer.end_struct();
    }
}

/// JSON-RPC 2.0 response
///
/// Exactly one of `result` and `fault` is present; the constructors
/// enforce this.
///
/// ```rust
/// use leanrpc_core::{Fault, Id, Response, Value};
///
/// let ok = Response::success(Value::from(42), Id::Number(1));
/// assert!(ok.is_success());
///
/// let failed = Response::failure(Fault::method_not_found("nope"), Id::Number(2));
/// assert!(failed.is_fault());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub result: Option<Value>,
    pub fault: Option<Fault>,
    pub id: Id,
}

impl Response {
    pub fn success(result: impl Into<Value>, id: Id) -> Self {
        Self {
            result: Some(result.into()),
            fault: None,
            id,
        }
    }

    pub fn failure(fault: Fault, id: Id) -> Self {
        Self {
            result: None,
            fault: Some(fault),
            id,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_fault(&self) -> bool {
        self.fault.is_some()
    }

    /// Emits `result` or `error`, then `id`
    pub fn write(&self, writer: &mut dyn Writer) {
        writer.start_struct();
        write_version(writer);
        if let Some(fault) = &self.fault {
            writer.start_struct_element("error");
            fault.write(writer);
            writer.end_struct_element();
        } else {
            writer.start_struct_element("result");
            match &self.result {
                Some(result) => result.write(writer),
                None => writer.write_null(),
            }
            writer.end_struct_element();
        }
        writer.start_struct_element("id");
        self.id.write(writer);
        writer.end_struct_element();
        writer.end_struct();
    }
}

/// Any single JSON-RPC message
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Request(Request),
    Notification(Notification),
    Response(Response),
}

impl Message {
    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(_))
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, Message::Notification(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }

    pub fn write(&self, writer: &mut dyn Writer) {
        match self {
            Message::Request(request) => request.write(writer),
            Message::Notification(notification) => notification.write(writer),
            Message::Response(response) => response.write(writer),
        }
    }

    /// Classify a decoded value as a message
    ///
    /// An object with `method` and `id` is a request, with `method` alone a
    /// notification, and with `result` or `error` a response.
    ///
    /// # Errors
    ///
    /// An invalid-request fault when the value is not an object, the version
    /// is not "2.0", `method` is not a string, `params` is neither an array
    /// nor an object, or the object matches no message shape.
    pub fn from_value(mut value: Value) -> Result<Message> {
        let members = value
            .as_object_mut()
            .map_err(|_| invalid("Message must be an object"))?;

        match members.remove("jsonrpc") {
            Some(version) if version.as_string().ok() == Some(JSONRPC_VERSION) => {}
            _ => return Err(invalid("Unsupported or missing jsonrpc version")),
        }

        if let Some(method) = members.remove("method") {
            let method = method
                .as_string()
                .map_err(|_| invalid("Method must be a string"))?
                .to_owned();
            let params = members.remove("params").unwrap_or_default();
            if !(params.is_undefined() || params.is_array() || params.is_object()) {
                return Err(invalid("Params must be an array or object"));
            }
            return Ok(match members.remove("id") {
                Some(id) => Message::Request(Request {
                    method,
                    params,
                    id: Id::from_value(&id)?,
                }),
                None => Message::Notification(Notification { method, params }),
            });
        }

        let id = match members.remove("id") {
            Some(id) => Id::from_value(&id)?,
            None => return Err(invalid("Response is missing an id")),
        };
        if let Some(error) = members.remove("error") {
            return Ok(Message::Response(Response::failure(Fault::try_from(error)?, id)));
        }
        match members.remove("result") {
            Some(result) => Ok(Message::Response(Response::success(result, id))),
            None => Err(invalid("Message is neither a request nor a response")),
        }
    }
}

fn invalid(msg: &str) -> Error {
    Error::Fault(Fault::invalid_request(msg))
}

fn write_version(writer: &mut dyn Writer) {
    writer.start_struct_element("jsonrpc");
    writer.write_string(JSONRPC_VERSION);
    writer.end_struct_element();
}

fn write_call(writer: &mut dyn Writer, method: &str, params: &Value) {
    writer.start_struct_element("method");
    writer.write_string(method);
    writer.end_struct_element();
    if !params.is_undefined() {
        writer.start_struct_element("params");
        params.write(writer);
        writer.end_struct_element();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode_message, to_json, JsonWriter};
    use serde_json::json;

    fn message_json(message: &Message) -> serde_json::Value {
        let mut writer = JsonWriter::new();
        message.write(&mut writer);
        writer.finish().unwrap()
    }

    #[test]
    fn test_id_display() {
        assert_eq!(Id::String("test".to_string()).to_string(), "\"test\"");
        assert_eq!(Id::Number(42).to_string(), "42");
        assert_eq!(Id::Null.to_string(), "null");
    }

    #[test]
    fn test_id_from_value() {
        assert_eq!(Id::from_value(&Value::from(7)).unwrap(), Id::Number(7));
        assert_eq!(Id::from_value(&Value::from(8.0)).unwrap(), Id::Number(8));
        assert_eq!(Id::from_value(&Value::from("a")).unwrap(), Id::from("a"));
        assert_eq!(Id::from_value(&Value::NULL).unwrap(), Id::Null);
        assert!(Id::from_value(&Value::from(1.5)).is_err());
        assert!(Id::from_value(&Value::from(true)).is_err());
    }

    #[test]
    fn test_request_envelope() {
        let request = Request::new("subtract", Value::from_iterable([42, 23]), Id::Number(1));
        assert_eq!(
            message_json(&Message::Request(request)),
            json!({"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1})
        );
    }

    #[test]
    fn test_notification_has_no_id() {
        let notification = Notification::new("update", Value::UNDEFINED);
        assert_eq!(
            message_json(&Message::Notification(notification)),
            json!({"jsonrpc": "2.0", "method": "update"})
        );
    }

    #[test]
    fn test_response_envelopes() {
        let ok = Response::success(Value::from("done"), Id::from("r1"));
        assert_eq!(
            message_json(&Message::Response(ok)),
            json!({"jsonrpc": "2.0", "result": "done", "id": "r1"})
        );

        let failed = Response::failure(Fault::method_not_found("x"), Id::Null);
        assert_eq!(
            message_json(&Message::Response(failed)),
            json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": "Method not found: x"},
                "id": null
            })
        );
    }

    #[test]
    fn test_large_id_written_as_double() {
        let request = Request::new("m", Value::UNDEFINED, Id::Number(1 << 40));
        let json = message_json(&Message::Request(request));
        assert_eq!(json["id"].as_f64(), Some((1u64 << 40) as f64));
    }

    #[test]
    fn test_classify_messages() {
        let request = decode(r#"{"jsonrpc":"2.0","method":"m","params":{"a":1},"id":3}"#).unwrap();
        assert!(Message::from_value(request).unwrap().is_request());

        let notification = decode(r#"{"jsonrpc":"2.0","method":"m"}"#).unwrap();
        assert!(Message::from_value(notification).unwrap().is_notification());

        let response = decode(r#"{"jsonrpc":"2.0","result":null,"id":3}"#).unwrap();
        match Message::from_value(response).unwrap() {
            Message::Response(response) => {
                assert!(response.is_success());
                assert_eq!(response.result, Some(Value::NULL));
            }
            other => panic!("Expected response, got {:?}", other),
        }

        let error = decode(r#"{"jsonrpc":"2.0","error":{"code":-32600,"message":"bad"},"id":null}"#)
            .unwrap();
        match Message::from_value(error).unwrap() {
            Message::Response(response) => {
                assert_eq!(response.fault.unwrap().code, Fault::INVALID_REQUEST);
                assert_eq!(response.id, Id::Null);
            }
            other => panic!("Expected response, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_invalid_messages() {
        let cases = [
            r#"[1, 2]"#,
            r#"{"method":"m","id":1}"#,
            r#"{"jsonrpc":"1.0","method":"m","id":1}"#,
            r#"{"jsonrpc":"2.0","method":5,"id":1}"#,
            r#"{"jsonrpc":"2.0","method":"m","params":3,"id":1}"#,
            r#"{"jsonrpc":"2.0","id":1}"#,
            r#"{"jsonrpc":"2.0","result":1}"#,
        ];
        for text in cases {
            let value = decode(text).unwrap();
            match Message::from_value(value) {
                Err(Error::Fault(fault)) => assert_eq!(fault.code, Fault::INVALID_REQUEST, "{}", text),
                other => panic!("Expected invalid request for {}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_message_round_trip_preserves_params() {
        let params = Value::from_iterable([("name", Value::from("x")), ("n", Value::from(2))]);
        let message = Message::Request(Request::new("call", params.clone(), Id::from("q")));

        let text = encode_message(&message).unwrap();
        let decoded = crate::codec::decode_message(&text).unwrap();
        match decoded {
            Message::Request(request) => {
                assert_eq!(request.params, params);
                assert_eq!(to_json(&request.params).unwrap(), json!({"name": "x", "n": 2}));
            }
            other => panic!("Expected request, got {:?}", other),
        }
    }
}
