//! Supported boundary shapes and their boundary type tags.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Type tag of a boundary value, with the integer codes the native runtime uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(i32)]
#[serde(into = "i32", try_from = "i32")]
pub enum VariantType {
    Nil = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    String = 4,
    StringName = 21,
    Object = 24,
}

impl VariantType {
    /// Human-readable name of the tag.
    pub const fn name(self) -> &'static str {
        match self {
            VariantType::Nil => "nil",
            VariantType::Bool => "bool",
            VariantType::Int => "int",
            VariantType::Float => "float",
            VariantType::String => "string",
            VariantType::StringName => "string_name",
            VariantType::Object => "object",
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value shape that can cross the boundary.
///
/// Closed set: every case has both conversion directions in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarshalType {
    Nil,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    Float32,
    Float64,
    String,
    StringName,
    Object,
    /// Untyped passthrough; any boundary value is accepted as-is.
    Variant,
}

impl MarshalType {
    /// Every marshal type, in declaration order.
    pub const ALL: [MarshalType; 15] = [
        MarshalType::Nil,
        MarshalType::Bool,
        MarshalType::Int8,
        MarshalType::Int16,
        MarshalType::Int32,
        MarshalType::Int64,
        MarshalType::UInt8,
        MarshalType::UInt16,
        MarshalType::UInt32,
        MarshalType::Float32,
        MarshalType::Float64,
        MarshalType::String,
        MarshalType::StringName,
        MarshalType::Object,
        MarshalType::Variant,
    ];

    /// The boundary type tag values of this shape travel as.
    ///
    /// `Variant` reports `Nil`; metadata distinguishes it with a usage flag.
    pub const fn variant_type(self) -> VariantType {
        match self {
            MarshalType::Nil | MarshalType::Variant => VariantType::Nil,
            MarshalType::Bool => VariantType::Bool,
            MarshalType::Int8
            | MarshalType::Int16
            | MarshalType::Int32
            | MarshalType::Int64
            | MarshalType::UInt8
            | MarshalType::UInt16
            | MarshalType::UInt32 => VariantType::Int,
            MarshalType::Float32 | MarshalType::Float64 => VariantType::Float,
            MarshalType::String => VariantType::String,
            MarshalType::StringName => VariantType::StringName,
            MarshalType::Object => VariantType::Object,
        }
    }

    /// Whether this shape accepts any boundary value.
    pub const fn is_variant(self) -> bool {
        matches!(self, MarshalType::Variant)
    }

    /// Name of the managed representation.
    pub const fn name(self) -> &'static str {
        match self {
            MarshalType::Nil => "nil",
            MarshalType::Bool => "bool",
            MarshalType::Int8 => "i8",
            MarshalType::Int16 => "i16",
            MarshalType::Int32 => "i32",
            MarshalType::Int64 => "i64",
            MarshalType::UInt8 => "u8",
            MarshalType::UInt16 => "u16",
            MarshalType::UInt32 => "u32",
            MarshalType::Float32 => "f32",
            MarshalType::Float64 => "f64",
            MarshalType::String => "String",
            MarshalType::StringName => "StringName",
            MarshalType::Object => "object",
            MarshalType::Variant => "Variant",
        }
    }
}

impl fmt::Display for MarshalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
