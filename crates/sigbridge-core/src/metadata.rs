//! Boundary metadata for signals.
//!
//! The metadata projector turns a [`SignalDescriptor`] into a
//! [`MethodDescriptor`], the self-describing record the native runtime
//! registers. Projection is pure and deterministic.
//!
//! Serialized shape of one descriptor:
//!
//! ```text
//! {
//!   "name": "Changed",
//!   "returnDescriptor": { "type": 0, "name": "", "hint": 0, "hintString": "",
//!                         "usageFlags": 131072, "exported": false },
//!   "flags": 1,
//!   "arguments": [ { "type": 2, "name": "amount", ... } ]
//! }
//! ```
//!
//! `arguments` is omitted for signals without parameters and
//! `defaultArguments` is always omitted.

use bitflags::bitflags;
use num_enum::IntoPrimitive;
use serde::{Serialize, Serializer};

use crate::marshal::{MarshalType, VariantType};
use crate::{ParameterDescriptor, SignalDescriptor, StringName, Variant};

bitflags! {
    /// How a described value is used by the native runtime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyUsage: u32 {
        const NONE = 0;
        const STORAGE = 1 << 1;
        const EDITOR = 1 << 2;
        const DEFAULT = Self::STORAGE.bits() | Self::EDITOR.bits();
        /// A `Nil` type tag means "any value" rather than "no value".
        const NIL_IS_VARIANT = 1 << 17;
    }
}

bitflags! {
    /// Method registration flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodFlags: u32 {
        const NORMAL = 1;
        const EDITOR = 1 << 1;
        const CONST = 1 << 2;
        const VIRTUAL = 1 << 3;
        const VARARG = 1 << 4;
        const STATIC = 1 << 5;
        const DEFAULT = Self::NORMAL.bits();
    }
}

impl Default for MethodFlags {
    fn default() -> Self {
        MethodFlags::DEFAULT
    }
}

/// Editor hint attached to a described value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, Serialize)]
#[repr(i32)]
#[serde(into = "i32")]
pub enum PropertyHint {
    #[default]
    None = 0,
    Range = 1,
    Enum = 2,
    Flags = 6,
    File = 13,
    ResourceType = 17,
}

fn serialize_bits<S, F>(flags: &F, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    F: bitflags::Flags<Bits = u32>,
{
    serializer.serialize_u32(flags.bits())
}

/// Descriptor of one argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    #[serde(rename = "type")]
    pub ty: VariantType,
    pub name: StringName,
    pub hint: PropertyHint,
    pub hint_string: String,
    #[serde(rename = "usageFlags", serialize_with = "serialize_bits")]
    pub usage: PropertyUsage,
    pub exported: bool,
}

impl PropertyInfo {
    /// The "untyped, accepts anything" return marker.
    pub fn untyped_return() -> Self {
        Self {
            ty: VariantType::Nil,
            name: StringName::new(""),
            hint: PropertyHint::None,
            hint_string: String::new(),
            usage: PropertyUsage::NIL_IS_VARIANT,
            exported: false,
        }
    }

    /// Project a parameter with inert hint and usage.
    pub fn argument(param: &ParameterDescriptor) -> Self {
        let usage = if param.ty.is_variant() {
            PropertyUsage::NIL_IS_VARIANT
        } else {
            PropertyUsage::NONE
        };
        Self {
            ty: param.ty.variant_type(),
            name: param.name.clone(),
            hint: PropertyHint::None,
            hint_string: String::new(),
            usage,
            exported: false,
        }
    }
}

/// Serialization-ready description of one signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: StringName,
    pub return_descriptor: PropertyInfo,
    #[serde(serialize_with = "serialize_bits")]
    pub flags: MethodFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<PropertyInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_arguments: Option<Vec<Variant>>,
}

impl MethodDescriptor {
    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.arguments.as_ref().map_or(0, Vec::len)
    }
}

/// Project a signal with the default method flags.
pub fn project(signal: &SignalDescriptor) -> MethodDescriptor {
    project_with_flags(signal, MethodFlags::DEFAULT)
}

/// Project a signal with an explicit flag constant.
pub fn project_with_flags(signal: &SignalDescriptor, flags: MethodFlags) -> MethodDescriptor {
    let return_descriptor = if signal.return_descriptor.ty == MarshalType::Nil {
        PropertyInfo::untyped_return()
    } else {
        PropertyInfo::argument(&signal.return_descriptor)
    };

    let arguments = if signal.parameters.is_empty() {
        None
    } else {
        Some(signal.parameters.iter().map(PropertyInfo::argument).collect())
    };

    MethodDescriptor {
        name: signal.name.clone(),
        return_descriptor,
        flags,
        arguments,
        default_arguments: None,
    }
}
