//! Building values
//!
//! A candidate payload is turned into exactly one value type, in a fixed
//! order of precedence:
//!
//! 1. Scalars: `bool` → Boolean; `i8`, `i16`, `i32`, `u8`, `u16` → Int32;
//!    `f32`, `f64` → Double. Wider integers (`i64`, `u32`, `u64`) do not fit
//!    Int32 and are carried as Double.
//! 2. String-like values (`&str`, `String`, `Cow<str>`) → String.
//! 3. Values already shaped as [`Object`] or [`Array`] → Object / Array.
//! 4. Anything else that can be iterated goes element by element through
//!    [`Element`]: characters build a String, key/value pairs build an
//!    Object, and any other value-convertible element builds an Array.
//!
//! Step 4 backs both [`Value::from_iterable`] (any `IntoIterator`) and
//! [`Value::from_elements`] (an iterator already in hand), as well as
//! `collect::<Value>()`. An element type that matches none of the three
//! shapes has no [`Element`] impl and fails to compile.
//!
//! # Examples
//!
//! ```rust
//! use leanrpc_core::Value;
//!
//! let text = Value::from_iterable(vec!['o', 'k']);
//! assert_eq!(text.as_string().unwrap(), "ok");
//!
//! let object: Value = vec![("a", 1), ("b", 2)].into_iter().collect();
//! assert!(object.is_object());
//!
//! let array = Value::from_iterable([1.5, 2.5]);
//! assert_eq!(array.as_array().unwrap().len(), 2);
//! ```

use crate::value::{Array, Object, Repr, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::from_repr(Repr::Boolean(value))
    }
}

macro_rules! from_int32 {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::from_repr(Repr::Int32(i32::from(value)))
                }
            }
        )*
    };
}

from_int32!(i8, i16, i32, u8, u16);

macro_rules! from_wide {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                /// Carried as Double; precision is lost beyond 2^53
                fn from(value: $ty) -> Self {
                    Value::from_repr(Repr::Double(value as f64))
                }
            }
        )*
    };
}

from_wide!(i64, u32, u64);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from_repr(Repr::Double(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_repr(Repr::Double(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_repr(Repr::String(value.to_owned()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::from_repr(Repr::String(value))
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::from_repr(Repr::String(value.clone()))
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::from_repr(Repr::String(value.into_owned()))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::from_repr(Repr::Object(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::from_repr(Repr::Array(value))
    }
}

impl From<&Value> for Value {
    /// Deep copy, same as [`Clone`]
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes Null
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::NULL, Into::into)
    }
}

/// Element shapes that decide what an iterable builds
///
/// Implemented for `char` (→ String), `(K, V)` pairs (→ Object) and
/// value-convertible element types (→ Array). Nested containers
/// (`Vec<T>`, maps) are elements too and build nested values.
pub trait Element: Sized {
    /// Build a value from a sequence of elements of this shape
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value;
}

impl Element for char {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::String(elements.collect()))
    }
}

impl<K: Into<String>, V: Into<Value>> Element for (K, V) {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        let members: Object = elements.map(|(k, v)| (k.into(), v.into())).collect();
        Value::from_repr(Repr::Object(members))
    }
}

macro_rules! array_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
                    Value::from_repr(Repr::Array(elements.map(Value::from).collect()))
                }
            }
        )*
    };
}

array_element!(Value, bool, i8, i16, i32, u8, u16, i64, u32, u64, f32, f64, String);

impl<'a> Element for &'a str {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.map(Value::from).collect()))
    }
}

impl<'a> Element for &'a String {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.map(Value::from).collect()))
    }
}

impl<'a> Element for &'a Value {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.cloned().collect()))
    }
}

impl<T: Into<Value>> Element for Option<T> {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.map(Value::from).collect()))
    }
}

impl<T: Element> Element for Vec<T> {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.map(Value::from_iterable).collect()))
    }
}

impl<K: Into<String>, V: Into<Value>, S> Element for HashMap<K, V, S> {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.map(Value::from_iterable).collect()))
    }
}

impl<K: Into<String>, V: Into<Value>> Element for BTreeMap<K, V> {
    fn collect_value<I: Iterator<Item = Self>>(elements: I) -> Value {
        Value::from_repr(Repr::Array(elements.map(Value::from_iterable).collect()))
    }
}

impl<E: Element> FromIterator<E> for Value {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        E::collect_value(iter.into_iter())
    }
}

impl Value {
    /// Build a value from any iterable, dispatching on its element shape
    ///
    /// ```rust
    /// use leanrpc_core::Value;
    /// use std::collections::BTreeMap;
    ///
    /// let mut params = BTreeMap::new();
    /// params.insert("x", 1);
    /// let value = Value::from_iterable(params);
    /// assert_eq!(value.as_object().unwrap()["x"], Value::from(1));
    /// ```
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator,
        I::Item: Element,
    {
        <I::Item as Element>::collect_value(iterable.into_iter())
    }

    /// Build a value from an iterator, dispatching on its element shape
    ///
    /// The iterator plays the part of a `[first, last)` position pair: only
    /// the elements it yields are consumed.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: Iterator,
        I::Item: Element,
    {
        <I::Item as Element>::collect_value(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Type;

    fn only_predicate(value: &Value) -> Vec<&'static str> {
        let checks = [
            ("undefined", value.is_undefined()),
            ("null", value.is_null()),
            ("boolean", value.is_boolean()),
            ("double", value.is_double()),
            ("int32", value.is_int32()),
            ("string", value.is_string()),
            ("object", value.is_object()),
            ("array", value.is_array()),
        ];
        checks
            .iter()
            .filter(|(_, hit)| *hit)
            .map(|(name, _)| *name)
            .collect()
    }

    #[test]
    fn test_scalar_construction_sets_one_type() {
        let cases = vec![
            (Value::UNDEFINED, "undefined"),
            (Value::NULL, "null"),
            (Value::from(true), "boolean"),
            (Value::from(2.5), "double"),
            (Value::from(-3), "int32"),
            (Value::from("s"), "string"),
            (Value::from(Object::new()), "object"),
            (Value::from(Array::new()), "array"),
        ];

        for (value, expected) in cases {
            assert_eq!(only_predicate(&value), vec![expected]);
        }
    }

    #[test]
    fn test_number_category() {
        assert!(Value::from(1).is_number());
        assert!(Value::from(1.0).is_number());
        assert!(!Value::from("1").is_number());
        assert!(!Value::from(true).is_number());
    }

    #[test]
    fn test_small_integers_are_int32() {
        assert_eq!(Value::from(7u8).get_type(), Type::Int32);
        assert_eq!(Value::from(-7i16).get_type(), Type::Int32);
        assert_eq!(Value::from(65535u16).as_int32().unwrap(), 65535);
    }

    #[test]
    fn test_wide_integers_are_double() {
        assert_eq!(Value::from(5_000_000_000i64).as_double().unwrap(), 5e9);
        assert_eq!(Value::from(u32::MAX).get_type(), Type::Double);
        assert_eq!(Value::from(1u64).get_type(), Type::Double);
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_chars_build_string() {
        let value = Value::from_iterable("héllo".chars());
        assert_eq!(value.as_string().unwrap(), "héllo");
    }

    #[test]
    fn test_pairs_build_object() {
        let value = Value::from_iterable(vec![("a".to_string(), Value::from(1)), ("b".to_string(), Value::NULL)]);
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert!(members["b"].is_null());
    }

    #[test]
    fn test_duplicate_pair_keys_keep_last() {
        let value = Value::from_iterable([("k", 1), ("k", 2)]);
        assert_eq!(value.as_object().unwrap()["k"], Value::from(2));
    }

    #[test]
    fn test_values_build_array_in_order() {
        let value = Value::from_iterable(vec!["x", "y", "x"]);
        let elements = value.as_array().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], Value::from("x"));
        assert_eq!(elements[2], Value::from("x"));
    }

    #[test]
    fn test_empty_iterables_keep_shape() {
        assert_eq!(Value::from_iterable(Vec::<char>::new()).get_type(), Type::String);
        assert_eq!(Value::from_iterable(Vec::<(String, i32)>::new()).get_type(), Type::Object);
        assert_eq!(Value::from_iterable(Vec::<i32>::new()).get_type(), Type::Array);
    }

    #[test]
    fn test_nested_iterables() {
        let value = Value::from_iterable(vec![vec![1, 2], vec![3]]);
        let outer = value.as_array().unwrap();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].as_array().unwrap().len(), 2);

        let mut row = HashMap::new();
        row.insert("id", 1);
        let rows = Value::from_iterable(vec![row]);
        assert!(rows.as_array().unwrap()[0].is_object());
    }

    #[test]
    fn test_from_elements_consumes_range() {
        let source = [10, 20, 30, 40];
        let value = Value::from_elements(source[1..3].iter().copied());
        assert_eq!(value, Value::from(vec![Value::from(20), Value::from(30)]));
    }

    #[test]
    fn test_borrowed_values_are_copied() {
        let original = vec![Value::from("a")];
        let copy = Value::from_iterable(&original);
        assert_eq!(copy.as_array().unwrap(), &original);
    }

    #[test]
    fn test_collect_into_value() {
        let value: Value = (1..=3).collect();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }
}
