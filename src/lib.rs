//! leanrpc - dynamically-typed JSON-RPC values
//!
//! This is the convenience crate that re-exports the leanrpc sub-crates.
//!
//! # Architecture
//!
//! - **leanrpc-core**: Value type, writer contract, codec, faults, message
//!   envelopes and logging setup
//!
//! # Quick Start
//!
//! ```rust
//! use leanrpc::{codec, Id, Message, Request, Value};
//!
//! let params = Value::from_iterable([("a", 5), ("b", 3)]);
//! let request = Request::new("add", params, Id::Number(1));
//!
//! let text = codec::encode_message(&Message::Request(request)).unwrap();
//! assert!(text.contains(r#""method":"add""#));
//! ```

pub use leanrpc_core as core;

pub use leanrpc_core::{
    codec, init_observability, Array, Error, Fault, Id, Message, Notification, Object,
    ObservabilityConfig, Request, Response, Result, Type, Value, Writer,
};
