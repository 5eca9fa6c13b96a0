//! Typed access to managed values.
//!
//! - [`FromValue`]: extract a Rust value from a [`Value`]
//! - [`IntoValue`]: wrap a Rust value into a [`Value`]
//!
//! Extraction is exact: an `i32` comes only from [`Value::Int32`], never
//! from another width.
//!
//! ## Example
//!
//! ```
//! use sigbridge_core::{FromValue, IntoValue, Value};
//!
//! let value = 42i32.into_value();
//! assert_eq!(value, Value::Int32(42));
//! assert_eq!(i32::from_value(&value), Ok(42));
//! assert!(i64::from_value(&value).is_err());
//! ```

use super::{ObjectId, Value, Variant};
use crate::StringName;
use crate::error::ConversionError;

/// Extract a typed Rust value from a managed value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Convert a Rust value into a managed value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

macro_rules! impl_value_conversions {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::$variant(v) => Ok(v.clone()),
                        other => Err(ConversionError::TypeMismatch {
                            expected: $name,
                            actual: other.type_name(),
                        }),
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_value_conversions! {
    bool => Bool, "bool";
    i8 => Int8, "i8";
    i16 => Int16, "i16";
    i32 => Int32, "i32";
    i64 => Int64, "i64";
    u8 => UInt8, "u8";
    u16 => UInt16, "u16";
    u32 => UInt32, "u32";
    f32 => Float32, "f32";
    f64 => Float64, "f64";
    String => String, "String";
    StringName => StringName, "StringName";
    Option<ObjectId> => Object, "object";
    Variant => Variant, "Variant";
}

impl FromValue for ObjectId {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Object(Some(id)) => Ok(*id),
            Value::Object(None) => Err(ConversionError::TypeMismatch {
                expected: "object",
                actual: "null object",
            }),
            other => Err(ConversionError::TypeMismatch {
                expected: "object",
                actual: other.type_name(),
            }),
        }
    }
}

impl IntoValue for ObjectId {
    fn into_value(self) -> Value {
        Value::Object(Some(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Nil
    }
}
