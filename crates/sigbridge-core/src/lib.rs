//! Core types for the sigbridge signal bridge.
//!
//! This crate holds everything that is decided once per script type:
//!
//! - [`marshal`]: supported boundary shapes and both conversion directions
//! - [`CandidateSignal`]: declarations as handed over by the symbol model
//! - [`SignalBuilder`]: validation of candidates into [`SignalDescriptor`]s
//! - [`project`]: projection of descriptors into boundary [`MethodDescriptor`]s
//! - [`Diagnostics`]: collection of validation failures
//!
//! Runtime pieces (event channels, dispatch) live in the `sigbridge` crate.

mod candidate;
mod descriptor;
mod diagnostics;
mod error;
pub mod marshal;
mod metadata;
mod string_name;

pub use candidate::{
    CandidateParameter, CandidateSignal, Location, ManagedType, MarkerPredicate, RefKind,
    SignalPredicate,
};
pub use descriptor::{
    DEFAULT_SIGNAL_SUFFIX, HandlerShape, ParameterDescriptor, ReturnDescriptor, SignalBuilder,
    SignalDescriptor,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
pub use error::{ConversionError, ShapeViolation, ValidationError, ValidationErrors};
pub use marshal::{
    FromValue, IntoValue, MarshalType, ObjectId, Value, Variant, VariantType, classify,
    to_boundary, to_managed,
};
pub use metadata::{
    MethodDescriptor, MethodFlags, PropertyHint, PropertyInfo, PropertyUsage, project,
    project_with_flags,
};
pub use string_name::StringName;
