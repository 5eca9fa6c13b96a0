//! Managed values handed to signal handlers.

use std::fmt;

use super::{MarshalType, ObjectId, Variant};
use crate::StringName;

/// A typed managed value.
///
/// One case per [`MarshalType`], carrying the exact managed width.
#[derive(Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    Float32(f32),
    Float64(f64),
    String(String),
    StringName(StringName),
    /// Object handle; `None` is a null object.
    Object(Option<ObjectId>),
    /// Untyped boundary value passed through unchanged.
    Variant(Variant),
}

impl Value {
    /// The marshal type this value belongs to.
    pub fn marshal_type(&self) -> MarshalType {
        match self {
            Value::Nil => MarshalType::Nil,
            Value::Bool(_) => MarshalType::Bool,
            Value::Int8(_) => MarshalType::Int8,
            Value::Int16(_) => MarshalType::Int16,
            Value::Int32(_) => MarshalType::Int32,
            Value::Int64(_) => MarshalType::Int64,
            Value::UInt8(_) => MarshalType::UInt8,
            Value::UInt16(_) => MarshalType::UInt16,
            Value::UInt32(_) => MarshalType::UInt32,
            Value::Float32(_) => MarshalType::Float32,
            Value::Float64(_) => MarshalType::Float64,
            Value::String(_) => MarshalType::String,
            Value::StringName(_) => MarshalType::StringName,
            Value::Object(_) => MarshalType::Object,
            Value::Variant(_) => MarshalType::Variant,
        }
    }

    /// Get a human-readable name for this value's type.
    pub fn type_name(&self) -> &'static str {
        self.marshal_type().name()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int8(v) => write!(f, "Int8({})", v),
            Value::Int16(v) => write!(f, "Int16({})", v),
            Value::Int32(v) => write!(f, "Int32({})", v),
            Value::Int64(v) => write!(f, "Int64({})", v),
            Value::UInt8(v) => write!(f, "UInt8({})", v),
            Value::UInt16(v) => write!(f, "UInt16({})", v),
            Value::UInt32(v) => write!(f, "UInt32({})", v),
            Value::Float32(v) => write!(f, "Float32({})", v),
            Value::Float64(v) => write!(f, "Float64({})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::StringName(s) => write!(f, "StringName({:?})", s.as_str()),
            Value::Object(Some(id)) => write!(f, "Object({})", id),
            Value::Object(None) => write!(f, "Object(null)"),
            Value::Variant(v) => write!(f, "Variant({:?})", v),
        }
    }
}
