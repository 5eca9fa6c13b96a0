//! Error types for signal validation and value marshalling.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ValidationError    - build-time, one per defect found on a candidate
//! ├── MissingSuffix
//! ├── UnsupportedParameterShape (with ShapeViolation)
//! ├── NonVoidReturn
//! ├── DuplicateSignal
//! └── ArityMismatch
//! ValidationErrors   - every defect found on one candidate
//! ConversionError    - runtime, boundary value did not fit the expected shape
//! ```
//!
//! Validation never stops at the first defect: the builder pushes each
//! violation into a [`ValidationErrors`] and only then decides whether the
//! candidate survives.

use std::fmt;

use thiserror::Error;

use crate::{ManagedType, RefKind};

// ============================================================================
// Validation Errors
// ============================================================================

/// Why a parameter cannot cross the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeViolation {
    /// The parameter is declared by-reference or by-output.
    ByReference(RefKind),
    /// The parameter type has no marshal type.
    Unclassifiable(ManagedType),
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeViolation::ByReference(kind) => {
                write!(f, "{} parameters are not supported", kind)
            }
            ShapeViolation::Unclassifiable(ty) => {
                write!(f, "type '{}' cannot be marshalled", ty)
            }
        }
    }
}

/// A single defect found while validating a candidate signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The declared name does not end with the recognized signal suffix.
    #[error("signal declaration '{declared}' must end with '{suffix}'")]
    MissingSuffix { declared: String, suffix: String },

    /// A parameter cannot be marshalled across the boundary.
    #[error("parameter '{parameter}' of signal '{signal}': {reason}")]
    UnsupportedParameterShape {
        signal: String,
        parameter: String,
        reason: ShapeViolation,
    },

    /// The signal declares a return value.
    #[error("signal '{signal}' must return void")]
    NonVoidReturn { signal: String },

    /// Another signal on the same type already uses this name.
    #[error("signal '{signal}' is already declared on '{owner}'")]
    DuplicateSignal { signal: String, owner: String },

    /// A descriptor whose handler arity disagrees with its parameter list.
    #[error("signal '{signal}' has {parameters} parameters but its handler takes {handler_arity}")]
    ArityMismatch {
        signal: String,
        parameters: usize,
        handler_arity: usize,
    },
}

impl ValidationError {
    /// Short stable code for the error kind, suitable for diagnostic ids.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingSuffix { .. } => "SIG0001",
            ValidationError::UnsupportedParameterShape { .. } => "SIG0002",
            ValidationError::NonVoidReturn { .. } => "SIG0003",
            ValidationError::DuplicateSignal { .. } => "SIG0004",
            ValidationError::ArityMismatch { .. } => "SIG0005",
        }
    }
}

/// All defects found on one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Convert to a Vec of errors.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// `Ok(())` if nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// Conversion Errors
// ============================================================================

/// A boundary or managed value did not fit the expected marshal type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value has a different shape than expected.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer does not fit the target width.
    #[error("integer {value} out of range for {target}")]
    IntegerOverflow { value: i64, target: &'static str },

    /// A finite float does not fit the target width.
    #[error("float {value} out of range for {target}")]
    FloatOverflow { value: f64, target: &'static str },

    /// A finite float is in range but would be rounded by the target width.
    #[error("float {value} is not exactly representable as {target}")]
    FloatPrecision { value: f64, target: &'static str },
}
