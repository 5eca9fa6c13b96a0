//! Reporting validation failures.
//!
//! The generator hands every [`ValidationError`] it finds to a
//! [`DiagnosticSink`] together with a [`Location`] hint. Reporting is
//! fire-and-forget: the sink cannot stop processing of other candidates.
//!
//! [`Diagnostics`] is the stock sink; it keeps every report in order.
//!
//! # Examples
//!
//! ```
//! use sigbridge_core::{DiagnosticSink, Diagnostics, Location, ValidationError};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.report(
//!     ValidationError::NonVoidReturn { signal: "Hit".into() },
//!     Location::member("Player", "HitEventHandler"),
//! );
//!
//! assert!(diagnostics.has_errors());
//! assert_eq!(
//!     diagnostics.to_string(),
//!     "Player::HitEventHandler: error[SIG0003]: signal 'Hit' must return void\n"
//! );
//! ```

use std::fmt;

use crate::{Location, ValidationError};

/// A single reported validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: ValidationError,
    pub location: Location,
}

impl Diagnostic {
    /// Stable code of the underlying error.
    pub fn code(&self) -> &'static str {
        self.error.code()
    }

    /// Rendered error message, without location.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: error[{}]: {}",
            self.location,
            self.code(),
            self.error
        )
    }
}

/// Receives validation failures.
pub trait DiagnosticSink {
    fn report(&mut self, error: ValidationError, location: Location);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(ValidationError, Location),
{
    fn report(&mut self, error: ValidationError, location: Location) {
        (self)(error, location)
    }
}

/// Ordered collection of reported diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new, empty diagnostics collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if anything was reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns `true` if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of reported diagnostics.
    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics reported against the given script type.
    pub fn for_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.location.type_name == type_name)
    }

    /// Removes all diagnostics.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Consume into the underlying list.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, error: ValidationError, location: Location) {
        self.diagnostics.push(Diagnostic { error, location });
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}
