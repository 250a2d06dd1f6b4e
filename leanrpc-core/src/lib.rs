//! Dynamic JSON-RPC values for leanrpc
//!
//! This crate provides the value layer that JSON-RPC parameters and results
//! are built from. It includes:
//!
//! - **Value**: A dynamically-typed tree (undefined, null, boolean, double,
//!   int32, string, object, array) with type freezing and move/copy semantics
//! - **Writer**: A push-style serialization contract any output format can implement
//! - **Codec**: A JSON backend for the writer contract, plus serde support
//! - **Error handling**: Precondition errors and JSON-RPC faults
//! - **Types**: JSON-RPC 2.0 envelopes (requests, responses, notifications)
//! - **Observability**: `tracing-subscriber` setup for the crate's log events
//!
//! # Freezing
//!
//! A frozen value keeps its type: assigning a value of another type through
//! [`Value::assign`], [`Value::assign_move`] or [`Value::set`] fails with
//! [`Error::TypeChangeViolation`] and leaves the value untouched. Same-type
//! assignment replaces the payload in place.
//!
//! # Example
//!
//! ```rust
//! use leanrpc_core::{codec, Error, Value};
//!
//! let mut port = Value::from(8080);
//! port.freeze();
//!
//! port.set(9090).unwrap();
//! assert!(matches!(port.set("nine"), Err(Error::TypeChangeViolation { .. })));
//!
//! let params = Value::from_iterable([("port", port)]);
//! assert_eq!(codec::encode(&params).unwrap(), r#"{"port":9090}"#);
//! ```

pub mod codec;
pub mod error;
pub mod number;
pub mod observability;
pub mod types;
pub mod value;
pub mod writer;

mod construct;
mod convert;

// Re-export the most commonly used types for convenience
pub use construct::Element;
pub use convert::ToType;
pub use error::{Error, Fault, Result};
pub use observability::{init_observability, ObservabilityConfig};
pub use types::{Id, Message, Notification, Request, Response};
pub use value::{Array, AsType, Object, Type, Value};
pub use writer::Writer;
