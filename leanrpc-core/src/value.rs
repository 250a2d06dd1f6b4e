//! The dynamic value type
//!
//! [`Value`] carries RPC parameters, results and fault data. It covers the
//! JSON data model plus an explicit `Undefined` state:
//!
//! | Type        | Payload                    |
//! |-------------|----------------------------|
//! | `Undefined` | none (absence of a value)  |
//! | `Null`      | none                       |
//! | `Boolean`   | `bool`                     |
//! | `Int32`     | `i32`                      |
//! | `Double`    | `f64` (NaN/infinity legal) |
//! | `String`    | owned `String`             |
//! | `Object`    | owned `HashMap<String, Value>` |
//! | `Array`     | owned `Vec<Value>`         |
//!
//! # Freezing
//!
//! A holder can [`freeze`](Value::freeze) a value to lock its runtime type.
//! Checked assignment ([`assign`](Value::assign),
//! [`assign_move`](Value::assign_move), [`set`](Value::set)) then only
//! accepts sources of the same type and replaces the payload in place, so
//! the payload slot a caller obtained through `as_string_mut` and friends
//! stays where it is while its content changes.
//!
//! Plain Rust assignment (`*slot = value`) and moves are language operations
//! and are not checked; code that relies on freezing must go through the
//! checked methods.
//!
//! # Ownership
//!
//! Payloads are exclusively owned. [`Clone`] is a deep copy and the copy
//! starts unfrozen. [`assign_move`](Value::assign_move) steals the payload
//! when both sides are mutable (leaving the source `Undefined`) and swaps
//! contents in place when either side is frozen.
//!
//! # Examples
//!
//! ```rust
//! use leanrpc_core::{Error, Value};
//!
//! let mut slot = Value::from("hello");
//! slot.freeze();
//!
//! slot.set("world").unwrap();
//! assert_eq!(slot.as_string().unwrap(), "world");
//!
//! let err = slot.set(42).unwrap_err();
//! assert!(matches!(err, Error::TypeChangeViolation { .. }));
//! ```

use crate::error::{Error, Result};
use crate::writer::Writer;
use std::collections::HashMap;
use std::fmt;
use std::mem;

/// Object payload: unique keys, unspecified iteration order
pub type Object = HashMap<String, Value>;

/// Array payload: ordered, duplicates and mixed types allowed
pub type Array = Vec<Value>;

/// Runtime type tag of a [`Value`]
///
/// The discriminants keep the bit layout used on the wire-library side:
/// both number representations share [`Type::NUMBER_BIT`], and `Array`
/// shares the object bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Type {
    Undefined = 0x00,
    Null = 0x01,
    Boolean = 0x02,
    Double = 0x04,
    Int32 = 0x05,
    String = 0x08,
    Object = 0x10,
    Array = 0x11,
}

impl Type {
    /// Category bit shared by `Double` and `Int32`
    pub const NUMBER_BIT: u8 = 0x04;

    /// Raw tag bits
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// True for `Double` and `Int32`
    pub const fn is_number(self) -> bool {
        self.bits() & Self::NUMBER_BIT != 0
    }

    /// True for the types whose payload lives on the heap
    pub const fn is_container(self) -> bool {
        matches!(self, Type::String | Type::Object | Type::Array)
    }

    /// Lowercase name, as used in error messages
    pub const fn name(self) -> &'static str {
        match self {
            Type::Undefined => "undefined",
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Double => "double",
            Type::Int32 => "int32",
            Type::String => "string",
            Type::Object => "object",
            Type::Array => "array",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
pub(crate) enum Repr {
    Undefined,
    Null,
    Boolean(bool),
    Double(f64),
    Int32(i32),
    String(String),
    Object(Object),
    Array(Array),
}

impl Repr {
    fn get_type(&self) -> Type {
        match self {
            Repr::Undefined => Type::Undefined,
            Repr::Null => Type::Null,
            Repr::Boolean(_) => Type::Boolean,
            Repr::Double(_) => Type::Double,
            Repr::Int32(_) => Type::Int32,
            Repr::String(_) => Type::String,
            Repr::Object(_) => Type::Object,
            Repr::Array(_) => Type::Array,
        }
    }

    /// Empty a container payload without changing its type
    fn clear(&mut self) {
        match self {
            Repr::String(s) => s.clear(),
            Repr::Object(o) => o.clear(),
            Repr::Array(a) => a.clear(),
            _ => {}
        }
    }
}

/// A dynamically-typed JSON-RPC value
///
/// See the [module documentation](self) for the type model, freezing and
/// ownership rules.
pub struct Value {
    pub(crate) repr: Repr,
    frozen: bool,
}

impl Value {
    /// The undefined value
    pub const UNDEFINED: Value = Value::from_repr(Repr::Undefined);

    /// The null value
    pub const NULL: Value = Value::from_repr(Repr::Null);

    /// Quiet NaN, the result of failed numeric conversions
    pub const NAN: f64 = f64::NAN;

    pub(crate) const fn from_repr(repr: Repr) -> Self {
        Self {
            repr,
            frozen: false,
        }
    }

    /// Create an undefined value
    pub const fn undefined() -> Self {
        Self::UNDEFINED
    }

    /// Create a null value
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Canonical type tag, independent of the frozen flag
    pub fn get_type(&self) -> Type {
        self.repr.get_type()
    }

    /// Lock the runtime type of this value
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Release a previous [`freeze`](Value::freeze)
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// True while the runtime type is locked
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// True iff the value is not frozen
    pub fn can_change_type(&self) -> bool {
        !self.frozen
    }

    /// True if the value may be assigned a source of type `other`
    ///
    /// A frozen value still accepts its own type.
    pub fn can_change_type_to(&self, other: Type) -> bool {
        self.can_change_type() || self.get_type() == other
    }

    fn check_type_change(&self, to: Type) -> Result<()> {
        if self.can_change_type_to(to) {
            Ok(())
        } else {
            Err(Error::TypeChangeViolation {
                from: self.get_type(),
                to,
            })
        }
    }

    /// True for the undefined value
    pub fn is_undefined(&self) -> bool {
        matches!(self.repr, Repr::Undefined)
    }

    /// True for `Null` (not for `Undefined`)
    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null)
    }

    /// True for `Boolean`
    pub fn is_boolean(&self) -> bool {
        matches!(self.repr, Repr::Boolean(_))
    }

    /// True for both `Int32` and `Double`
    pub fn is_number(&self) -> bool {
        self.get_type().is_number()
    }

    /// True for `Double` only
    pub fn is_double(&self) -> bool {
        matches!(self.repr, Repr::Double(_))
    }

    /// True for `Int32` only
    pub fn is_int32(&self) -> bool {
        matches!(self.repr, Repr::Int32(_))
    }

    /// True for `String`
    pub fn is_string(&self) -> bool {
        matches!(self.repr, Repr::String(_))
    }

    /// True for `Object`
    pub fn is_object(&self) -> bool {
        matches!(self.repr, Repr::Object(_))
    }

    /// True for `Array`
    pub fn is_array(&self) -> bool {
        matches!(self.repr, Repr::Array(_))
    }

    /// True only for `Boolean(true)`
    pub fn is_true(&self) -> bool {
        matches!(self.repr, Repr::Boolean(true))
    }

    /// True only for `Boolean(false)`
    pub fn is_false(&self) -> bool {
        matches!(self.repr, Repr::Boolean(false))
    }

    /// The boolean payload; [`Error::InvalidAccess`] for any other type
    pub fn as_boolean(&self) -> Result<bool> {
        match self.repr {
            Repr::Boolean(b) => Ok(b),
            _ => Err(self.access_error(Type::Boolean)),
        }
    }

    /// Mutable boolean payload; [`Error::InvalidAccess`] for any other type
    pub fn as_boolean_mut(&mut self) -> Result<&mut bool> {
        match &mut self.repr {
            Repr::Boolean(b) => Ok(b),
            other => Err(mismatch(Type::Boolean, other.get_type())),
        }
    }

    /// The double payload; [`Error::InvalidAccess`] for any other type, `Int32` included
    pub fn as_double(&self) -> Result<f64> {
        match self.repr {
            Repr::Double(d) => Ok(d),
            _ => Err(self.access_error(Type::Double)),
        }
    }

    /// Mutable double payload; [`Error::InvalidAccess`] for any other type
    pub fn as_double_mut(&mut self) -> Result<&mut f64> {
        match &mut self.repr {
            Repr::Double(d) => Ok(d),
            other => Err(mismatch(Type::Double, other.get_type())),
        }
    }

    /// The int32 payload; [`Error::InvalidAccess`] for any other type, `Double` included
    pub fn as_int32(&self) -> Result<i32> {
        match self.repr {
            Repr::Int32(i) => Ok(i),
            _ => Err(self.access_error(Type::Int32)),
        }
    }

    /// Mutable int32 payload; [`Error::InvalidAccess`] for any other type
    pub fn as_int32_mut(&mut self) -> Result<&mut i32> {
        match &mut self.repr {
            Repr::Int32(i) => Ok(i),
            other => Err(mismatch(Type::Int32, other.get_type())),
        }
    }

    /// The string payload; [`Error::InvalidAccess`] for any other type
    pub fn as_string(&self) -> Result<&str> {
        match &self.repr {
            Repr::String(s) => Ok(s.as_str()),
            _ => Err(self.access_error(Type::String)),
        }
    }

    /// Mutable access to the string payload
    ///
    /// [`Error::InvalidAccess`] for any other type. The returned buffer may be edited freely; the value stays a string.
    pub fn as_string_mut(&mut self) -> Result<&mut String> {
        match &mut self.repr {
            Repr::String(s) => Ok(s),
            other => Err(mismatch(Type::String, other.get_type())),
        }
    }

    /// The object payload; [`Error::InvalidAccess`] for any other type
    pub fn as_object(&self) -> Result<&Object> {
        match &self.repr {
            Repr::Object(o) => Ok(o),
            _ => Err(self.access_error(Type::Object)),
        }
    }

    /// Mutable object payload; [`Error::InvalidAccess`] for any other type
    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match &mut self.repr {
            Repr::Object(o) => Ok(o),
            other => Err(mismatch(Type::Object, other.get_type())),
        }
    }

    /// The array payload; [`Error::InvalidAccess`] for any other type
    pub fn as_array(&self) -> Result<&Array> {
        match &self.repr {
            Repr::Array(a) => Ok(a),
            _ => Err(self.access_error(Type::Array)),
        }
    }

    /// Mutable array payload; [`Error::InvalidAccess`] for any other type
    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match &mut self.repr {
            Repr::Array(a) => Ok(a),
            other => Err(mismatch(Type::Array, other.get_type())),
        }
    }

    /// Generic form of the `as_*` accessors
    ///
    /// ```rust
    /// use leanrpc_core::{Array, Value};
    ///
    /// let value = Value::from(vec![Value::from(1)]);
    /// assert_eq!(value.as_type::<Array>().unwrap().len(), 1);
    /// assert!(value.as_type::<bool>().is_err());
    /// ```
    pub fn as_type<T: AsType>(&self) -> Result<&T> {
        T::as_ref(self)
    }

    /// Mutable form of [`as_type`](Value::as_type)
    pub fn as_type_mut<T: AsType>(&mut self) -> Result<&mut T> {
        T::as_mut(self)
    }

    /// Alias of [`as_object`](Value::as_object), for code that says "struct"
    pub fn as_struct(&self) -> Result<&Object> {
        self.as_object()
    }

    /// Alias of [`as_object_mut`](Value::as_object_mut)
    pub fn as_struct_mut(&mut self) -> Result<&mut Object> {
        self.as_object_mut()
    }

    /// Alias of [`is_null`](Value::is_null)
    pub fn is_nil(&self) -> bool {
        self.is_null()
    }

    /// Alias of [`is_int32`](Value::is_int32)
    pub fn is_integer32(&self) -> bool {
        self.is_int32()
    }

    /// Alias of [`as_int32`](Value::as_int32)
    pub fn as_integer32(&self) -> Result<i32> {
        self.as_int32()
    }

    fn access_error(&self, expected: Type) -> Error {
        mismatch(expected, self.get_type())
    }

    /// Copy-assign from `source`
    ///
    /// A same-type source overwrites the payload in place. A different-type
    /// source replaces the value with a deep copy, unless this value is
    /// frozen, in which case nothing changes and
    /// [`Error::TypeChangeViolation`] is returned. The frozen flag of `self`
    /// is kept either way.
    pub fn assign(&mut self, source: &Value) -> Result<()> {
        let incoming = source.get_type();
        if self.get_type() == incoming {
            match (&mut self.repr, &source.repr) {
                (Repr::String(dst), Repr::String(src)) => dst.clone_from(src),
                (Repr::Object(dst), Repr::Object(src)) => dst.clone_from(src),
                (Repr::Array(dst), Repr::Array(src)) => dst.clone_from(src),
                (dst, src) => *dst = src.clone(),
            }
            return Ok(());
        }

        self.check_type_change(incoming)?;
        self.repr = source.repr.clone();
        Ok(())
    }

    /// Move-assign from `source`
    ///
    /// - When both sides are mutable, the source gives up its payload and
    ///   becomes `Undefined`.
    /// - When either side is frozen, neither changes type: a same-type
    ///   container payload is swapped in after this value's own payload is
    ///   cleared, leaving the source with an empty payload of its type, and
    ///   anything else is copied with the source left as it was.
    ///
    /// A frozen `self` only accepts sources of its own type and reports
    /// [`Error::TypeChangeViolation`] otherwise, with both values untouched.
    ///
    /// ```rust
    /// use leanrpc_core::Value;
    ///
    /// let mut dst = Value::null();
    /// let mut src = Value::from("payload");
    /// dst.assign_move(&mut src).unwrap();
    /// assert_eq!(dst.as_string().unwrap(), "payload");
    /// assert!(src.is_undefined());
    /// ```
    pub fn assign_move(&mut self, source: &mut Value) -> Result<()> {
        let current = self.get_type();
        let incoming = source.get_type();
        self.check_type_change(incoming)?;

        if self.can_change_type() && source.can_change_type() {
            self.repr = mem::replace(&mut source.repr, Repr::Undefined);
        } else if incoming.is_container() && current == incoming {
            self.repr.clear();
            mem::swap(&mut self.repr, &mut source.repr);
        } else {
            self.repr = source.repr.clone();
        }
        Ok(())
    }

    /// Generic checked assignment from anything convertible to a value
    pub fn set<T: Into<Value>>(&mut self, value: T) -> Result<()> {
        let mut source = value.into();
        self.assign_move(&mut source)
    }

    /// Move the content out into a new, mutable value
    ///
    /// A mutable `self` is left `Undefined`. A frozen `self` cannot give up
    /// its payload and is copied instead.
    pub fn take(&mut self) -> Value {
        if self.can_change_type() {
            Value::from_repr(mem::replace(&mut self.repr, Repr::Undefined))
        } else {
            Value::from_repr(self.repr.clone())
        }
    }

    /// Drive `writer` through this value, depth-first
    ///
    /// Undefined object members are skipped entirely; undefined array
    /// elements are written as null, as is a top-level undefined value.
    pub fn write<W: Writer + ?Sized>(&self, writer: &mut W) {
        match &self.repr {
            Repr::Undefined | Repr::Null => writer.write_null(),
            Repr::Boolean(b) => writer.write_bool(*b),
            Repr::Double(d) => writer.write_double(*d),
            Repr::Int32(i) => writer.write_int32(*i),
            Repr::String(s) => writer.write_string(s),
            Repr::Object(members) => {
                writer.start_struct();
                for (key, member) in members {
                    if member.is_undefined() {
                        continue;
                    }
                    writer.start_struct_element(key);
                    member.write(writer);
                    writer.end_struct_element();
                }
                writer.end_struct();
            }
            Repr::Array(elements) => {
                writer.start_array();
                for element in elements {
                    if element.is_undefined() {
                        writer.write_null();
                    } else {
                        element.write(writer);
                    }
                }
                writer.end_array();
            }
        }
    }
}

fn mismatch(expected: Type, actual: Type) -> Error {
    Error::InvalidAccess { expected, actual }
}

impl Default for Value {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl Clone for Value {
    /// Deep copy; the copy is never frozen
    fn clone(&self) -> Self {
        Value::from_repr(self.repr.clone())
    }
}

impl PartialEq for Value {
    /// Type-strict equality: `Int32(1)` and `Double(1.0)` differ
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (&self.repr, &other.repr) {
            (Repr::Undefined, Repr::Undefined) | (Repr::Null, Repr::Null) => true,
            (Repr::Boolean(a), Repr::Boolean(b)) => a == b,
            (Repr::Double(a), Repr::Double(b)) => a == b,
            (Repr::Int32(a), Repr::Int32(b)) => a == b,
            (Repr::String(a), Repr::String(b)) => a == b,
            (Repr::Object(a), Repr::Object(b)) => a == b,
            (Repr::Array(a), Repr::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    /// Diagnostic rendering, e.g. `{a: 1, b: "x"}` or `[1, null]`
    ///
    /// Strings are quoted but not escaped; this is not a wire format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Undefined => f.write_str("undefined"),
            Repr::Null => f.write_str("null"),
            Repr::Boolean(b) => write!(f, "{}", b),
            Repr::Double(d) => write!(f, "{}", d),
            Repr::Int32(i) => write!(f, "{}", i),
            Repr::String(s) => write!(f, "\"{}\"", s),
            Repr::Object(members) => {
                f.write_str("{")?;
                for (i, (key, member)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {:?}", key, member)?;
                }
                f.write_str("}")
            }
            Repr::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}", element)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Payload types reachable through [`Value::as_type`]
pub trait AsType: Sized {
    fn as_ref(value: &Value) -> Result<&Self>;
    fn as_mut(value: &mut Value) -> Result<&mut Self>;
}

macro_rules! impl_as_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsType for $ty {
                fn as_ref(value: &Value) -> Result<&Self> {
                    match &value.repr {
                        Repr::$variant(payload) => Ok(payload),
                        other => Err(mismatch(Type::$variant, other.get_type())),
                    }
                }

                fn as_mut(value: &mut Value) -> Result<&mut Self> {
                    match &mut value.repr {
                        Repr::$variant(payload) => Ok(payload),
                        other => Err(mismatch(Type::$variant, other.get_type())),
                    }
                }
            }
        )*
    };
}

impl_as_type! {
    bool => Boolean,
    f64 => Double,
    i32 => Int32,
    String => String,
    Object => Object,
    Array => Array,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_bits() {
        assert!(Type::Double.is_number());
        assert!(Type::Int32.is_number());
        assert!(!Type::Boolean.is_number());
        assert!(!Type::Array.is_number());
        assert_eq!(Type::Array.bits() & Type::Object.bits(), Type::Object.bits());
        assert_eq!(Type::Int32.to_string(), "int32");
    }

    #[test]
    fn test_default_is_undefined() {
        let value = Value::default();
        assert!(value.is_undefined());
        assert!(!value.is_frozen());
        assert_eq!(value.get_type(), Type::Undefined);
    }

    #[test]
    fn test_frozen_flag_does_not_change_type() {
        let mut value = Value::from(3);
        value.freeze();
        assert_eq!(value.get_type(), Type::Int32);
        assert!(!value.can_change_type());
        assert!(value.can_change_type_to(Type::Int32));
        assert!(!value.can_change_type_to(Type::Double));

        value.unfreeze();
        assert!(value.can_change_type());
        assert!(value.can_change_type_to(Type::Double));
    }

    #[test]
    fn test_accessor_mismatch_leaves_value() {
        let mut value = Value::from("abc");
        let err = value.as_array_mut().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidAccess {
                expected: Type::Array,
                actual: Type::String
            }
        );
        assert_eq!(value.as_string().unwrap(), "abc");
    }

    #[test]
    fn test_as_double_is_exact() {
        assert!(Value::from(1).as_double().is_err());
        assert_eq!(Value::from(1.5).as_double().unwrap(), 1.5);
    }

    #[test]
    fn test_mutation_through_accessor() {
        let mut value = Value::from(vec![Value::from(1)]);
        value.as_array_mut().unwrap().push(Value::from("two"));
        *value.as_array_mut().unwrap()[0].as_int32_mut().unwrap() += 10;

        let elements = value.as_array().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], Value::from(11));
    }

    #[test]
    fn test_as_type_generic() {
        let mut value = Value::from(true);
        *value.as_type_mut::<bool>().unwrap() = false;
        assert!(value.is_false());
        assert!(value.as_type::<String>().is_err());
    }

    #[test]
    fn test_struct_and_integer_aliases() {
        let mut object = Value::from_iterable([("a", 1)]);
        assert_eq!(object.as_struct().unwrap().len(), 1);
        object
            .as_struct_mut()
            .unwrap()
            .insert("b".to_string(), Value::from(2));
        assert_eq!(object.as_object().unwrap().len(), 2);
        assert!(Value::from(1.0).as_struct().is_err());

        assert!(Value::NULL.is_nil());
        assert!(!Value::UNDEFINED.is_nil());
        assert!(Value::from(5).is_integer32());
        assert!(!Value::from(5.0).is_integer32());
        assert_eq!(Value::from(5).as_integer32().unwrap(), 5);
        assert!(Value::from("5").as_integer32().is_err());
    }

    #[test]
    fn test_clone_starts_unfrozen() {
        let mut original = Value::from("x");
        original.freeze();
        let copy = original.clone();
        assert!(!copy.is_frozen());
        assert_eq!(copy, original);
    }

    #[test]
    fn test_assign_keeps_own_frozen_flag() {
        let mut dst = Value::from(1);
        let mut src = Value::from(2);
        src.freeze();
        dst.assign(&src).unwrap();
        assert!(!dst.is_frozen());
        assert_eq!(dst.as_int32().unwrap(), 2);
    }

    #[test]
    fn test_take_from_frozen_copies() {
        let mut frozen = Value::from("keep");
        frozen.freeze();
        let taken = frozen.take();
        assert_eq!(taken.as_string().unwrap(), "keep");
        assert_eq!(frozen.as_string().unwrap(), "keep");
        assert!(!taken.is_frozen());
    }

    #[test]
    fn test_take_from_mutable_steals() {
        let mut value = Value::from(7);
        let taken = value.take();
        assert!(value.is_undefined());
        assert_eq!(taken.as_int32().unwrap(), 7);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Value::UNDEFINED), "undefined");
        assert_eq!(format!("{:?}", Value::NULL), "null");
        assert_eq!(format!("{:?}", Value::from("a\"b")), "\"a\"b\"");

        let array = Value::from(vec![Value::from(1), Value::from("x"), Value::NULL]);
        assert_eq!(format!("{:?}", array), "[1, \"x\", null]");

        let object = Value::from_iterable([("k", 2)]);
        assert_eq!(format!("{:?}", object), "{k: 2}");
    }

    #[test]
    fn test_nan_equals_itself_only_by_identity() {
        let nan = Value::from(Value::NAN);
        let same = &nan;
        assert!(*same == nan);
        assert_ne!(nan, Value::from(f64::NAN));
    }
}
