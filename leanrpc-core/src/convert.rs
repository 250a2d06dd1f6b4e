//! Lossy conversions
//!
//! Unlike the `as_*` accessors, which demand an exact type, the `to_*`
//! conversions accept any value and coerce it with fixed, JavaScript-like
//! rules. Only [`Value::to_string`] can fail: objects have no string form.

use crate::error::{Error, Result};
use crate::number::parse_double;
use crate::value::{Repr, Value};

impl Value {
    /// Truthiness
    ///
    /// Undefined and null are false, numbers are true when nonzero (NaN
    /// included), strings when non-empty. Objects and arrays are always
    /// true, even when empty.
    pub fn to_boolean(&self) -> bool {
        match &self.repr {
            Repr::Undefined | Repr::Null => false,
            Repr::Boolean(b) => *b,
            Repr::Int32(i) => *i != 0,
            Repr::Double(d) => *d != 0.0,
            Repr::String(s) => !s.is_empty(),
            Repr::Object(_) | Repr::Array(_) => true,
        }
    }

    /// Same as [`to_boolean`](Value::to_boolean)
    pub fn is_truthy(&self) -> bool {
        self.to_boolean()
    }

    pub fn is_falsy(&self) -> bool {
        !self.to_boolean()
    }

    /// Numeric value
    ///
    /// Strings go through [`parse_double`]. An array converts like its only
    /// element, an empty one is `0.0` and a longer one is NaN. Undefined and
    /// objects are NaN.
    pub fn to_double(&self) -> f64 {
        match &self.repr {
            Repr::Double(d) => *d,
            Repr::Int32(i) => f64::from(*i),
            Repr::Boolean(b) => f64::from(u8::from(*b)),
            Repr::Null => 0.0,
            Repr::String(s) => parse_double(s),
            Repr::Array(elements) => match elements.as_slice() {
                [] => 0.0,
                [only] => only.to_double(),
                _ => Value::NAN,
            },
            Repr::Undefined | Repr::Object(_) => Value::NAN,
        }
    }

    /// Integer value
    ///
    /// Int32 passes through; everything else is [`to_double`](Value::to_double)
    /// truncated toward zero, saturating at the `i32` range, with NaN and
    /// infinities mapped to `0`.
    pub fn to_int32(&self) -> i32 {
        if let Repr::Int32(i) = self.repr {
            return i;
        }
        let d = self.to_double();
        if d.is_finite() {
            d.trunc() as i32
        } else {
            0
        }
    }

    /// String form
    ///
    /// Doubles use the shortest decimal that round-trips, or `NaN`,
    /// `Infinity`, `-Infinity`. Arrays join their elements' string forms
    /// with commas, without brackets.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConversion`] for objects, including objects nested in
    /// an array.
    ///
    /// ```rust
    /// use leanrpc_core::Value;
    ///
    /// let list = Value::from_iterable([Value::from(1), Value::from(true), Value::NULL]);
    /// assert_eq!(list.to_string().unwrap(), "1,true,null");
    /// ```
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String> {
        match &self.repr {
            Repr::String(s) => Ok(s.clone()),
            Repr::Undefined => Ok("undefined".to_string()),
            Repr::Null => Ok("null".to_string()),
            Repr::Boolean(b) => Ok(b.to_string()),
            Repr::Double(d) => Ok(format_double(*d)),
            Repr::Int32(i) => Ok(i.to_string()),
            Repr::Array(elements) => {
                let parts = elements
                    .iter()
                    .map(Value::to_string)
                    .collect::<Result<Vec<_>>>()?;
                Ok(parts.join(","))
            }
            Repr::Object(_) => Err(Error::InvalidConversion(self.get_type())),
        }
    }

    /// Generic form of the `to_*` conversions
    ///
    /// ```rust
    /// use leanrpc_core::Value;
    ///
    /// let value = Value::from("42");
    /// assert_eq!(value.to_type::<i32>().unwrap(), 42);
    /// assert_eq!(value.to_type::<f64>().unwrap(), 42.0);
    /// ```
    pub fn to_type<T: ToType>(&self) -> Result<T> {
        T::convert(self)
    }
}

fn format_double(d: f64) -> String {
    if d.is_nan() {
        "NaN".to_string()
    } else if d.is_infinite() {
        let text = if d < 0.0 { "-Infinity" } else { "Infinity" };
        text.to_string()
    } else {
        d.to_string()
    }
}

/// Targets of [`Value::to_type`]
pub trait ToType: Sized {
    fn convert(value: &Value) -> Result<Self>;
}

impl ToType for bool {
    fn convert(value: &Value) -> Result<Self> {
        Ok(value.to_boolean())
    }
}

impl ToType for f64 {
    fn convert(value: &Value) -> Result<Self> {
        Ok(value.to_double())
    }
}

impl ToType for i32 {
    fn convert(value: &Value) -> Result<Self> {
        Ok(value.to_int32())
    }
}

impl ToType for String {
    fn convert(value: &Value) -> Result<Self> {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Array, Object, Type};

    #[test]
    fn test_truthiness() {
        assert!(!Value::UNDEFINED.to_boolean());
        assert!(!Value::NULL.to_boolean());
        assert!(Value::from(true).to_boolean());
        assert!(!Value::from(false).to_boolean());
        assert!(!Value::from(0).to_boolean());
        assert!(Value::from(-1).to_boolean());
        assert!(!Value::from(0.0).to_boolean());
        assert!(Value::from(f64::NAN).to_boolean());
        assert!(!Value::from("").to_boolean());
        assert!(Value::from("0").to_boolean());
    }

    #[test]
    fn test_empty_containers_are_truthy() {
        assert!(Value::from(Array::new()).to_boolean());
        assert!(Value::from(Object::new()).to_boolean());
        assert!(Value::from(Array::new()).is_truthy());
        assert!(Value::from("").is_falsy());
    }

    #[test]
    fn test_to_double_scalars() {
        assert_eq!(Value::from(2.5).to_double(), 2.5);
        assert_eq!(Value::from(-4).to_double(), -4.0);
        assert_eq!(Value::from(true).to_double(), 1.0);
        assert_eq!(Value::from(false).to_double(), 0.0);
        assert_eq!(Value::NULL.to_double(), 0.0);
        assert!(Value::UNDEFINED.to_double().is_nan());
        assert!(Value::from(Object::new()).to_double().is_nan());
    }

    #[test]
    fn test_to_double_strings() {
        assert_eq!(Value::from(" 12.5 ").to_double(), 12.5);
        assert_eq!(Value::from("").to_double(), 0.0);
        assert!(Value::from("12abc").to_double().is_nan());
    }

    #[test]
    fn test_to_double_arrays() {
        assert_eq!(Value::from(Array::new()).to_double(), 0.0);
        assert_eq!(Value::from(vec![Value::from("7")]).to_double(), 7.0);
        assert_eq!(
            Value::from(vec![Value::from(vec![Value::from(3)])]).to_double(),
            3.0
        );
        assert!(Value::from(vec![Value::from(1), Value::from(2)]).to_double().is_nan());
    }

    #[test]
    fn test_to_int32() {
        assert_eq!(Value::from(9).to_int32(), 9);
        assert_eq!(Value::from(2.9).to_int32(), 2);
        assert_eq!(Value::from(-2.9).to_int32(), -2);
        assert_eq!(Value::from("41.7").to_int32(), 41);
        assert_eq!(Value::from(f64::NAN).to_int32(), 0);
        assert_eq!(Value::from(f64::INFINITY).to_int32(), 0);
        assert_eq!(Value::from(1e12).to_int32(), i32::MAX);
        assert_eq!(Value::UNDEFINED.to_int32(), 0);
    }

    #[test]
    fn test_to_string_scalars() {
        assert_eq!(Value::UNDEFINED.to_string().unwrap(), "undefined");
        assert_eq!(Value::NULL.to_string().unwrap(), "null");
        assert_eq!(Value::from(false).to_string().unwrap(), "false");
        assert_eq!(Value::from(-12).to_string().unwrap(), "-12");
        assert_eq!(Value::from(0.5).to_string().unwrap(), "0.5");
        assert_eq!(Value::from("as is").to_string().unwrap(), "as is");
    }

    #[test]
    fn test_to_string_non_finite() {
        assert_eq!(Value::from(f64::NAN).to_string().unwrap(), "NaN");
        assert_eq!(Value::from(f64::INFINITY).to_string().unwrap(), "Infinity");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string().unwrap(), "-Infinity");
    }

    #[test]
    fn test_to_string_array_joins() {
        let value = Value::from_iterable(vec![
            Value::from(1),
            Value::from("two"),
            Value::from(vec![Value::from(3), Value::from(4)]),
        ]);
        assert_eq!(value.to_string().unwrap(), "1,two,3,4");
        assert_eq!(Value::from(Array::new()).to_string().unwrap(), "");
    }

    #[test]
    fn test_to_string_object_fails() {
        let object = Value::from(Object::new());
        assert_eq!(
            object.to_string().unwrap_err(),
            Error::InvalidConversion(Type::Object)
        );

        let nested = Value::from(vec![Value::from(1), Value::from(Object::new())]);
        assert!(nested.to_string().is_err());
    }

    #[test]
    fn test_to_type_generic() {
        let value = Value::from(3.75);
        assert!(value.to_type::<bool>().unwrap());
        assert_eq!(value.to_type::<i32>().unwrap(), 3);
        assert_eq!(value.to_type::<String>().unwrap(), "3.75");
    }
}
