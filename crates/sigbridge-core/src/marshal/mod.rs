//! Boundary value shapes and their conversions.
//!
//! ## Key Types
//!
//! - [`MarshalType`]: closed set of shapes that can cross the boundary
//! - [`VariantType`]: integer type tag the native runtime uses for a shape
//! - [`Variant`]: a value on the boundary side
//! - [`Value`]: a typed value on the managed side
//! - [`classify`], [`to_managed`], [`to_boundary`]: the catalog functions

mod catalog;
mod convert;
mod marshal_type;
mod value;
mod variant;

pub use catalog::{classify, to_boundary, to_managed};
pub use convert::{FromValue, IntoValue};
pub use marshal_type::{MarshalType, VariantType};
pub use value::Value;
pub use variant::{ObjectId, Variant};
