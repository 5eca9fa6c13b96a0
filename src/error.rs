//! Runtime error types.
//!
//! ```text
//! HandlerError   - raised by a subscribed handler
//! DispatchError  - a matched boundary call failed (conversion or handler)
//! UnknownSignal  - a name that the instance does not declare
//! EmitError      - raising a signal from managed code failed
//! HostError      - the native runtime rejected an emission
//! ArtifactError  - rendering a registration artifact failed
//! ```
//!
//! "No such signal here" is never an error on the dispatch path; it is
//! [`DispatchOutcome::NotMatched`](crate::DispatchOutcome::NotMatched).

use std::error::Error as StdError;

use thiserror::Error;

use sigbridge_core::{ConversionError, StringName};

/// Error raised by a signal handler.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl HandlerError {
    /// Create a handler error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ConversionError> for HandlerError {
    fn from(err: ConversionError) -> Self {
        HandlerError::new(err.to_string()).with_source(err)
    }
}

/// A matched dispatch could not complete.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A boundary argument did not fit the declared parameter shape.
    #[error("argument {index} of signal '{signal}': {source}")]
    Conversion {
        signal: StringName,
        index: usize,
        #[source]
        source: ConversionError,
    },

    /// A handler failed; remaining handlers were not invoked.
    #[error("handler for signal '{signal}' failed: {source}")]
    Handler {
        signal: StringName,
        #[source]
        source: HandlerError,
    },
}

/// The named signal is not declared on the instance's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{owner}' has no signal named '{signal}'")]
pub struct UnknownSignal {
    pub signal: String,
    pub owner: String,
}

/// The native runtime refused an emitted signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host rejected signal: {message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raising a signal from managed code failed.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    UnknownSignal(#[from] UnknownSignal),

    #[error("signal '{signal}' takes {expected} arguments, got {actual}")]
    ArityMismatch {
        signal: StringName,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of signal '{signal}': {source}")]
    Conversion {
        signal: StringName,
        index: usize,
        #[source]
        source: ConversionError,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Rendering a registration artifact failed.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to serialize signal table for '{type_name}': {source}")]
    Serialize {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
}
