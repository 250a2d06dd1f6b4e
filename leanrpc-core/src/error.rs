//! Error types for leanrpc
//!
//! This module provides the fault signal of the value layer. It defines two
//! main types:
//!
//! - **Error**: Failures raised by [`Value`] operations and the codec (uses thiserror)
//! - **Fault**: Wire-format JSON-RPC error objects, as carried in responses
//!
//! # Error Kinds
//!
//! Value operations signal three kinds of precondition failure:
//!
//! - `TypeChangeViolation`: assignment would change the type of a frozen value
//! - `InvalidAccess`: a typed accessor was used against the wrong type
//! - `InvalidConversion`: a value has no string form (objects)
//!
//! Every failing operation leaves the value exactly as it was before the call.
//! Nothing is logged or retried here; callers decide how to surface errors,
//! typically by turning them into a [`Fault`] with `Fault::from`.
//!
//! # Standard Fault Codes
//!
//! JSON-RPC 2.0 reserves these codes:
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `-32000 to -32099`: Server error
//!
//! # Examples
//!
//! ```rust
//! use leanrpc_core::{Error, Fault, Type, Value};
//!
//! let value = Value::from("text");
//! let err = value.as_int32().unwrap_err();
//! assert_eq!(err, Error::InvalidAccess { expected: Type::Int32, actual: Type::String });
//!
//! let fault = Fault::from(err);
//! assert_eq!(fault.code, -32602);
//! ```
//!
//! [`Value`]: crate::Value

use crate::value::{Type, Value};
use crate::writer::Writer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for leanrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for value and codec operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Assignment would change the runtime type of a frozen value
    ///
    /// Raised by `assign`, `assign_move` and `set` when the destination is
    /// frozen and the source carries a different type tag.
    #[error("Type change violation: frozen {from} value cannot become {to}")]
    TypeChangeViolation {
        /// Type the frozen value is locked to
        from: Type,
        /// Type the rejected source carried
        to: Type,
    },

    /// Typed accessor used against a value of another type
    #[error("Invalid access: expected {expected}, found {actual}")]
    InvalidAccess {
        /// Type the accessor requires
        expected: Type,
        /// Type the value actually holds
        actual: Type,
    },

    /// Conversion requested for a type with no defined form
    #[error("Invalid conversion: {0} value has no string form")]
    InvalidConversion(Type),

    /// Encoding or decoding failure in the codec
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Protocol fault, already in wire format
    #[error("JSON-RPC fault: {0}")]
    Fault(#[from] Fault),
}

/// JSON-RPC 2.0 error object
///
/// This is the exact wire form of an error, as it appears in the `error`
/// member of a response. `data` is an arbitrary [`Value`] and is left off
/// the wire when absent.
///
/// # Examples
///
/// ```rust
/// use leanrpc_core::{Fault, Value};
///
/// let fault = Fault::method_not_found("calculate");
/// assert_eq!(fault.code, -32601);
///
/// let custom = Fault::with_data(1001, "Insufficient funds", Value::from(50));
/// assert!(custom.data.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// Numeric error code; -32768 to -32000 are reserved
    pub code: i32,

    /// Short human-readable description
    pub message: String,

    /// Optional additional information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Fault {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const SERVER_ERROR: i32 = -32000;

    /// Create a fault with code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a fault carrying additional data
    pub fn with_data(code: i32, message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data.into()),
        }
    }

    /// Parse error (-32700): invalid JSON was received
    pub fn parse_error() -> Self {
        Self::new(Self::PARSE_ERROR, "Parse error")
    }

    /// Invalid request (-32600): the JSON is not a valid request object
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(Self::INVALID_REQUEST, msg)
    }

    /// Method not found (-32601)
    ///
    /// ```rust
    /// use leanrpc_core::Fault;
    ///
    /// let fault = Fault::method_not_found("calculateFoo");
    /// assert_eq!(fault.message, "Method not found: calculateFoo");
    /// ```
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            Self::METHOD_NOT_FOUND,
            format!("Method not found: {}", method.into()),
        )
    }

    /// Invalid params (-32602)
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, msg)
    }

    /// Internal error (-32603)
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, msg)
    }

    /// Implementation-defined server error (-32000)
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::new(Self::SERVER_ERROR, msg)
    }

    /// Emit this fault as a struct through the writer contract
    pub fn write(&self, writer: &mut dyn Writer) {
        writer.start_struct();

        writer.start_struct_element("code");
        writer.write_int32(self.code);
        writer.end_struct_element();

        writer.start_struct_element("message");
        writer.write_string(&self.message);
        writer.end_struct_element();

        if let Some(data) = self.data.as_ref().filter(|d| !d.is_undefined()) {
            writer.start_struct_element("data");
            data.write(writer);
            writer.end_struct_element();
        }

        writer.end_struct();
    }
}

impl std::fmt::Display for Fault {
    /// Formats as "[code] message", e.g. "[-32601] Method not found: foo"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Fault {}

impl TryFrom<Value> for Fault {
    type Error = Error;

    /// Read a fault back from the `error` member of a decoded response
    fn try_from(mut value: Value) -> Result<Self> {
        let members = value
            .as_object_mut()
            .map_err(|_| Fault::invalid_request("Error member must be an object"))?;

        let code = members
            .get("code")
            .and_then(fault_code)
            .ok_or_else(|| Fault::invalid_request("Error code must be an integer"))?;
        let message = match members.remove("message") {
            Some(message) => message
                .as_string()
                .map_err(|_| Fault::invalid_request("Error message must be a string"))?
                .to_owned(),
            None => return Err(Fault::invalid_request("Error message is missing").into()),
        };
        let data = members.remove("data");

        Ok(Fault {
            code,
            message,
            data,
        })
    }
}

/// A fault code: an Int32, or a whole Double within the i32 range
fn fault_code(code: &Value) -> Option<i32> {
    match code.get_type() {
        Type::Int32 => code.as_int32().ok(),
        Type::Double => {
            let d = code.to_double();
            let in_range = d >= f64::from(i32::MIN) && d <= f64::from(i32::MAX);
            (d.fract() == 0.0 && in_range).then_some(d as i32)
        }
        _ => None,
    }
}

impl From<Fault> for Value {
    fn from(fault: Fault) -> Self {
        let mut members = crate::value::Object::new();
        members.insert("code".to_string(), Value::from(fault.code));
        members.insert("message".to_string(), Value::from(fault.message));
        if let Some(data) = fault.data {
            members.insert("data".to_string(), data);
        }
        Value::from(members)
    }
}

impl From<Error> for Fault {
    /// Map a value-layer error onto the protocol fault a caller would send
    ///
    /// Wrong-type access and conversion failures are the caller's fault and
    /// become invalid params; a type change on a frozen slot is a server-side
    /// bug and becomes an internal error.
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidAccess { .. } | Error::InvalidConversion(_) => {
                Fault::invalid_params(err.to_string())
            }
            Error::TypeChangeViolation { .. } => Fault::internal_error(err.to_string()),
            Error::Serialization(_) => Fault::parse_error(),
            Error::Fault(fault) => fault,
        }
    }
}
