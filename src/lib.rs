//! Sigbridge: a signal bridge between managed script types and a native
//! runtime.
//!
//! Signals are declared on script types, validated once per type into a
//! [`SignalTable`], described to the runtime as [`MethodDescriptor`]s, and
//! delivered at runtime through per-instance [`EventChannel`]s.
//!
//! ```text
//! declarations ─▶ SignalGenerator ─▶ SignalTable (per type, shared)
//!                      │                 ├─▶ MethodDescriptor table / artifacts
//!                      ▼                 └─▶ SignalSet (per instance)
//!                 Diagnostics                   ├─ EventChannel per signal
//!                                               └─ Dispatch (boundary → handlers)
//! ```
//!
//! # Example
//!
//! ```
//! use sigbridge::prelude::*;
//!
//! #[signal(owner = "Wallet")]
//! pub type ChangedEventHandler = fn(amount: i32);
//!
//! let mut diagnostics = Diagnostics::new();
//! let generated = SignalGenerator::new(GeneratorConfig::default())
//!     .generate(&[__signal_ChangedEventHandler_candidate()], &mut diagnostics);
//! assert!(diagnostics.is_empty());
//!
//! let table = generated.table("Wallet").unwrap();
//! let mut wallet = SignalSet::new(table.clone());
//! wallet
//!     .connect("Changed", Handler::new(|args| {
//!         assert_eq!(args.get::<i32>(0)?, 42);
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! let outcome = wallet.dispatch("Changed", &[Variant::Int(42)]).unwrap();
//! assert_eq!(outcome, DispatchOutcome::Handled);
//! ```

mod artifact;
mod channel;
mod config;
mod error;
mod generator;
mod instance;
mod router;
mod table;

pub use artifact::{Artifact, EmissionSink};
pub use channel::{EventChannel, Handler, SignalArgs};
pub use config::GeneratorConfig;
pub use error::{ArtifactError, DispatchError, EmitError, HandlerError, HostError, UnknownSignal};
pub use generator::{GeneratedSignals, SignalGenerator};
pub use instance::{SignalHost, SignalSet};
pub use router::{Dispatch, DispatchChain, DispatchOutcome, DispatchRouter};
pub use table::SignalTable;

pub use sigbridge_core::{
    CandidateParameter, CandidateSignal, ConversionError, DEFAULT_SIGNAL_SUFFIX, Diagnostic,
    DiagnosticSink, Diagnostics, FromValue, HandlerShape, IntoValue, Location, ManagedType,
    MarkerPredicate, MarshalType, MethodDescriptor, MethodFlags, ObjectId, ParameterDescriptor,
    PropertyHint, PropertyInfo, PropertyUsage, RefKind, ReturnDescriptor, ShapeViolation,
    SignalBuilder, SignalDescriptor, SignalPredicate, StringName, ValidationError,
    ValidationErrors, Value, Variant, VariantType, classify, project, project_with_flags,
    to_boundary, to_managed,
};
pub use sigbridge_macros::signal;

/// Marshal catalog re-exported for hosts that convert values themselves.
pub mod marshal {
    pub use sigbridge_core::marshal::*;
}

// Re-export main types
pub mod prelude {
    pub use crate::{
        CandidateParameter, CandidateSignal, Diagnostics, Dispatch, DispatchChain,
        DispatchOutcome, EventChannel, GeneratedSignals, GeneratorConfig, Handler,
        HandlerError, ManagedType, SignalArgs, SignalGenerator, SignalHost, SignalSet,
        SignalTable, StringName, Value, Variant, signal,
    };
}
