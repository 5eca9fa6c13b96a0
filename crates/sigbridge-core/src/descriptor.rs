//! Signal descriptors and the builder that validates candidates into them.
//!
//! The builder runs every check on a candidate and collects each violation
//! before deciding. A candidate with three problems yields three errors in
//! one call. Errors are ordered by rule first, then by parameter:
//!
//! 1. declared name must end with the signal suffix ([`ValidationError::MissingSuffix`])
//! 2. no by-reference or by-output parameters ([`ValidationError::UnsupportedParameterShape`])
//! 3. every parameter type must classify ([`ValidationError::UnsupportedParameterShape`])
//! 4. the return type must be void ([`ValidationError::NonVoidReturn`])
//!
//! # Example
//!
//! ```
//! use sigbridge_core::{CandidateParameter, CandidateSignal, ManagedType, MarshalType, SignalBuilder};
//!
//! let builder = SignalBuilder::new("EventHandler");
//! let candidate = CandidateSignal::new("Wallet", "ChangedEventHandler")
//!     .with_parameter(CandidateParameter::new("amount", ManagedType::Int32));
//!
//! let signal = builder.build(&candidate).unwrap();
//! assert_eq!(signal.name, "Changed");
//! assert_eq!(signal.parameters[0].name, "amount");
//! assert_eq!(signal.parameters[0].ty, MarshalType::Int32);
//! ```

use crate::error::{ShapeViolation, ValidationError, ValidationErrors};
use crate::marshal::{MarshalType, classify};
use crate::{CandidateSignal, RefKind, StringName};

/// Default suffix marking a declaration as a signal.
pub const DEFAULT_SIGNAL_SUFFIX: &str = "EventHandler";

/// One parameter of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: StringName,
    pub ty: MarshalType,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<StringName>, ty: MarshalType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Return shape of a signal: unnamed and nil.
    pub fn void_return() -> Self {
        Self::new("", MarshalType::Nil)
    }
}

/// Same shape as a parameter, with an empty name.
pub type ReturnDescriptor = ParameterDescriptor;

/// The managed callable shape a signal's handlers must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerShape {
    /// Name the handler type was declared with (suffix included).
    pub declared_name: String,
    /// Number of arguments handlers receive.
    pub arity: usize,
}

/// A validated signal.
///
/// Invariant: `parameters.len() == handler.arity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalDescriptor {
    /// Boundary-visible name (declared name without the suffix).
    pub name: StringName,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    pub return_descriptor: ReturnDescriptor,
    pub handler: HandlerShape,
}

impl SignalDescriptor {
    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Marshal type of each parameter, in order.
    pub fn parameter_types(&self) -> impl Iterator<Item = MarshalType> + '_ {
        self.parameters.iter().map(|p| p.ty)
    }
}

/// Validates candidates and produces [`SignalDescriptor`]s.
#[derive(Debug, Clone)]
pub struct SignalBuilder {
    suffix: String,
}

impl Default for SignalBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNAL_SUFFIX)
    }
}

impl SignalBuilder {
    /// Builder recognizing declarations ending in `suffix`.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The recognized suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Strip the suffix, returning the effective signal name.
    ///
    /// A name consisting of the suffix alone has no effective name.
    pub fn effective_name<'a>(&self, declared: &'a str) -> Option<&'a str> {
        declared
            .strip_suffix(self.suffix.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Validate a candidate.
    ///
    /// Every violation is collected; the descriptor is only produced when
    /// none were found.
    pub fn build(&self, candidate: &CandidateSignal) -> Result<SignalDescriptor, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let effective = self.effective_name(&candidate.declared_name);
        if effective.is_none() {
            errors.push(ValidationError::MissingSuffix {
                declared: candidate.declared_name.clone(),
                suffix: self.suffix.clone(),
            });
        }
        let signal_name = effective.unwrap_or(&candidate.declared_name);

        // One pass per rule, so errors come out in rule order and then in
        // parameter order within a rule.
        for param in &candidate.parameters {
            if param.ref_kind != RefKind::None {
                errors.push(ValidationError::UnsupportedParameterShape {
                    signal: signal_name.to_string(),
                    parameter: param.name.clone(),
                    reason: ShapeViolation::ByReference(param.ref_kind),
                });
            }
        }

        let mut parameters = Vec::with_capacity(candidate.parameters.len());
        for param in &candidate.parameters {
            match classify(&param.managed_type) {
                Some(ty) => parameters.push(ParameterDescriptor::new(param.name.as_str(), ty)),
                None => errors.push(ValidationError::UnsupportedParameterShape {
                    signal: signal_name.to_string(),
                    parameter: param.name.clone(),
                    reason: ShapeViolation::Unclassifiable(param.managed_type.clone()),
                }),
            }
        }

        if !candidate.returns_void {
            errors.push(ValidationError::NonVoidReturn {
                signal: signal_name.to_string(),
            });
        }

        errors.into_result()?;

        Ok(SignalDescriptor {
            name: StringName::new(signal_name),
            handler: HandlerShape {
                declared_name: candidate.declared_name.clone(),
                arity: parameters.len(),
            },
            parameters,
            return_descriptor: ReturnDescriptor::void_return(),
        })
    }
}
