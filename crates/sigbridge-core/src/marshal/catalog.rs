//! The marshal catalog: classification and both conversion directions.
//!
//! All three functions are pure. [`classify`] is total over [`ManagedType`]
//! and answers `None` for shapes it does not support instead of guessing.

use super::{MarshalType, Value, Variant};
use crate::ManagedType;
use crate::error::ConversionError;

/// Map a managed type to its marshal type, or `None` if it cannot cross
/// the boundary.
///
/// `u64` is rejected because the boundary integer is signed 64-bit and the
/// upper half of the range would not survive the trip.
pub fn classify(managed: &ManagedType) -> Option<MarshalType> {
    match managed {
        ManagedType::Bool => Some(MarshalType::Bool),
        ManagedType::Int8 => Some(MarshalType::Int8),
        ManagedType::Int16 => Some(MarshalType::Int16),
        ManagedType::Int32 => Some(MarshalType::Int32),
        ManagedType::Int64 => Some(MarshalType::Int64),
        ManagedType::UInt8 => Some(MarshalType::UInt8),
        ManagedType::UInt16 => Some(MarshalType::UInt16),
        ManagedType::UInt32 => Some(MarshalType::UInt32),
        ManagedType::Float32 => Some(MarshalType::Float32),
        ManagedType::Float64 => Some(MarshalType::Float64),
        ManagedType::String => Some(MarshalType::String),
        ManagedType::StringName => Some(MarshalType::StringName),
        ManagedType::Object { .. } => Some(MarshalType::Object),
        ManagedType::Variant => Some(MarshalType::Variant),
        ManagedType::UInt64 | ManagedType::Unit | ManagedType::Other { .. } => None,
    }
}

fn mismatch(expected: MarshalType, actual: &'static str) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: expected.name(),
        actual,
    }
}

macro_rules! narrow_int {
    ($value:expr, $ty:ty, $variant:ident) => {
        <$ty>::try_from($value)
            .map(Value::$variant)
            .map_err(|_| ConversionError::IntegerOverflow {
                value: $value,
                target: stringify!($ty),
            })
    };
}

/// Convert a boundary value into the managed value of the given shape.
pub fn to_managed(ty: MarshalType, value: &Variant) -> Result<Value, ConversionError> {
    match (ty, value) {
        (MarshalType::Variant, v) => Ok(Value::Variant(v.clone())),
        (MarshalType::Nil, Variant::Nil) => Ok(Value::Nil),
        (MarshalType::Bool, Variant::Bool(b)) => Ok(Value::Bool(*b)),
        (MarshalType::Int8, Variant::Int(v)) => narrow_int!(*v, i8, Int8),
        (MarshalType::Int16, Variant::Int(v)) => narrow_int!(*v, i16, Int16),
        (MarshalType::Int32, Variant::Int(v)) => narrow_int!(*v, i32, Int32),
        (MarshalType::Int64, Variant::Int(v)) => Ok(Value::Int64(*v)),
        (MarshalType::UInt8, Variant::Int(v)) => narrow_int!(*v, u8, UInt8),
        (MarshalType::UInt16, Variant::Int(v)) => narrow_int!(*v, u16, UInt16),
        (MarshalType::UInt32, Variant::Int(v)) => narrow_int!(*v, u32, UInt32),
        (MarshalType::Float32, Variant::Float(v)) => {
            // Infinities and NaN carry over; finite values must fit exactly.
            let narrowed = *v as f32;
            if !v.is_finite() {
                Ok(Value::Float32(narrowed))
            } else if *v > f32::MAX as f64 || *v < f32::MIN as f64 {
                Err(ConversionError::FloatOverflow {
                    value: *v,
                    target: "f32",
                })
            } else if f64::from(narrowed) != *v {
                Err(ConversionError::FloatPrecision {
                    value: *v,
                    target: "f32",
                })
            } else {
                Ok(Value::Float32(narrowed))
            }
        }
        (MarshalType::Float64, Variant::Float(v)) => Ok(Value::Float64(*v)),
        (MarshalType::String, Variant::String(s)) => Ok(Value::String(s.clone())),
        (MarshalType::StringName, Variant::StringName(n)) => Ok(Value::StringName(n.clone())),
        (MarshalType::Object, Variant::Object(id)) => Ok(Value::Object(Some(*id))),
        (MarshalType::Object, Variant::Nil) => Ok(Value::Object(None)),
        (ty, other) => Err(mismatch(ty, other.type_name())),
    }
}

/// Convert a managed value of the given shape into its boundary value.
pub fn to_boundary(ty: MarshalType, value: &Value) -> Result<Variant, ConversionError> {
    match (ty, value) {
        (MarshalType::Nil, Value::Nil) => Ok(Variant::Nil),
        (MarshalType::Bool, Value::Bool(b)) => Ok(Variant::Bool(*b)),
        (MarshalType::Int8, Value::Int8(v)) => Ok(Variant::Int(i64::from(*v))),
        (MarshalType::Int16, Value::Int16(v)) => Ok(Variant::Int(i64::from(*v))),
        (MarshalType::Int32, Value::Int32(v)) => Ok(Variant::Int(i64::from(*v))),
        (MarshalType::Int64, Value::Int64(v)) => Ok(Variant::Int(*v)),
        (MarshalType::UInt8, Value::UInt8(v)) => Ok(Variant::Int(i64::from(*v))),
        (MarshalType::UInt16, Value::UInt16(v)) => Ok(Variant::Int(i64::from(*v))),
        (MarshalType::UInt32, Value::UInt32(v)) => Ok(Variant::Int(i64::from(*v))),
        (MarshalType::Float32, Value::Float32(v)) => Ok(Variant::Float(f64::from(*v))),
        (MarshalType::Float64, Value::Float64(v)) => Ok(Variant::Float(*v)),
        (MarshalType::String, Value::String(s)) => Ok(Variant::String(s.clone())),
        (MarshalType::StringName, Value::StringName(n)) => Ok(Variant::StringName(n.clone())),
        (MarshalType::Object, Value::Object(Some(id))) => Ok(Variant::Object(*id)),
        (MarshalType::Object, Value::Object(None)) => Ok(Variant::Nil),
        (MarshalType::Variant, Value::Variant(v)) => Ok(v.clone()),
        (ty, other) => Err(mismatch(ty, other.type_name())),
    }
}
