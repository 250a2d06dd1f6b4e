//! The writer contract
//!
//! A [`Writer`] is the sink a [`Value`] drives to serialize itself. The value
//! walks its own structure depth-first and pushes one call per scalar plus
//! bracketing calls around objects and arrays; the writer decides what bytes
//! (or documents) come out. The JSON codec in [`crate::codec`] is one such
//! writer; tests use recording writers to check the exact call sequence.
//!
//! # Call Sequence
//!
//! For an object the value emits:
//!
//! ```text
//! start_struct
//!   start_struct_element(key) <value calls> end_struct_element   (per member)
//! end_struct
//! ```
//!
//! For an array:
//!
//! ```text
//! start_array
//!   <value calls>                                                (per element)
//! end_array
//! ```
//!
//! Writers are infallible sinks. A writer that targets fallible output should
//! buffer and report failures when it is finished, the way
//! [`JsonWriter`](crate::codec::JsonWriter) hands back a document.
//!
//! [`Value`]: crate::Value

/// Push-style serialization sink driven by [`Value::write`](crate::Value::write)
pub trait Writer {
    /// Write a JSON null
    fn write_null(&mut self);

    /// Write a boolean
    fn write_bool(&mut self, value: bool);

    /// Write a double; may be NaN or infinite
    fn write_double(&mut self, value: f64);

    /// Write a 32-bit integer
    fn write_int32(&mut self, value: i32);

    /// Write a string
    fn write_string(&mut self, value: &str);

    /// Open a struct (JSON object)
    fn start_struct(&mut self);

    /// Open a struct member; exactly one value follows before the matching
    /// [`end_struct_element`](Writer::end_struct_element)
    fn start_struct_element(&mut self, key: &str);

    /// Close the current struct member
    fn end_struct_element(&mut self);

    /// Close the current struct
    fn end_struct(&mut self);

    /// Open an array
    fn start_array(&mut self);

    /// Close the current array
    fn end_array(&mut self);
}
