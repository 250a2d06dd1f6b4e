//! Common test utilities for leanrpc-core integration tests
//!
//! This module provides a recording writer so tests can assert on the exact
//! sequence of calls a value makes through the writer contract.

#![allow(dead_code)]

use leanrpc_core::Writer;

/// One call made on a [`RecordingWriter`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Null,
    Bool(bool),
    Double(f64),
    Int32(i32),
    String(String),
    StartStruct,
    StartElement(String),
    EndElement,
    EndStruct,
    StartArray,
    EndArray,
}

/// Writer that records every call it receives
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub events: Vec<Event>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded struct keys, in emission order
    pub fn keys(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::StartElement(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Writer for RecordingWriter {
    fn write_null(&mut self) {
        self.events.push(Event::Null);
    }

    fn write_bool(&mut self, value: bool) {
        self.events.push(Event::Bool(value));
    }

    fn write_double(&mut self, value: f64) {
        self.events.push(Event::Double(value));
    }

    fn write_int32(&mut self, value: i32) {
        self.events.push(Event::Int32(value));
    }

    fn write_string(&mut self, value: &str) {
        self.events.push(Event::String(value.to_string()));
    }

    fn start_struct(&mut self) {
        self.events.push(Event::StartStruct);
    }

    fn start_struct_element(&mut self, key: &str) {
        self.events.push(Event::StartElement(key.to_string()));
    }

    fn end_struct_element(&mut self) {
        self.events.push(Event::EndElement);
    }

    fn end_struct(&mut self) {
        self.events.push(Event::EndStruct);
    }

    fn start_array(&mut self) {
        self.events.push(Event::StartArray);
    }

    fn end_array(&mut self) {
        self.events.push(Event::EndArray);
    }
}

/// Record what `value` writes
pub fn record(value: &leanrpc_core::Value) -> Vec<Event> {
    let mut writer = RecordingWriter::new();
    value.write(&mut writer);
    writer.events
}
