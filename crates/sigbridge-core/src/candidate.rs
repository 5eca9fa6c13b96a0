//! Candidate signal declarations.
//!
//! A candidate is a declaration handed over by the symbol model before any
//! validation has run: a name, the declared parameters with their managed
//! types and passing modes, whether it returns void, and the type that
//! encloses it. The `#[signal]` attribute macro produces these from Rust
//! type aliases; hosts with their own symbol model can build them directly.
//!
//! # Example
//!
//! ```
//! use sigbridge_core::{CandidateParameter, CandidateSignal, ManagedType};
//!
//! let candidate = CandidateSignal::new("Player", "HealthChangedEventHandler")
//!     .with_parameter(CandidateParameter::new("amount", ManagedType::Int32));
//! assert_eq!(candidate.parameters.len(), 1);
//! assert!(candidate.returns_void);
//! assert!(candidate.has_marker);
//! ```

use std::fmt;

/// Managed-side type of a declared parameter, as seen by the symbol model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManagedType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    StringName,
    /// Handle to a native object of the given class.
    Object {
        class: String,
    },
    /// Dynamically typed boundary value.
    Variant,
    /// The unit type `()`.
    Unit,
    /// Anything the symbol model could not name more precisely.
    Other {
        name: String,
    },
}

impl ManagedType {
    /// Object handle of the given class.
    pub fn object(class: impl Into<String>) -> Self {
        ManagedType::Object {
            class: class.into(),
        }
    }

    /// Any other named type.
    pub fn other(name: impl Into<String>) -> Self {
        ManagedType::Other { name: name.into() }
    }
}

impl fmt::Display for ManagedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagedType::Bool => f.write_str("bool"),
            ManagedType::Int8 => f.write_str("i8"),
            ManagedType::Int16 => f.write_str("i16"),
            ManagedType::Int32 => f.write_str("i32"),
            ManagedType::Int64 => f.write_str("i64"),
            ManagedType::UInt8 => f.write_str("u8"),
            ManagedType::UInt16 => f.write_str("u16"),
            ManagedType::UInt32 => f.write_str("u32"),
            ManagedType::UInt64 => f.write_str("u64"),
            ManagedType::Float32 => f.write_str("f32"),
            ManagedType::Float64 => f.write_str("f64"),
            ManagedType::String => f.write_str("String"),
            ManagedType::StringName => f.write_str("StringName"),
            ManagedType::Object { class } => write!(f, "Gd<{}>", class),
            ManagedType::Variant => f.write_str("Variant"),
            ManagedType::Unit => f.write_str("()"),
            ManagedType::Other { name } => f.write_str(name),
        }
    }
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    /// By value.
    #[default]
    None,
    /// By shared or mutable reference.
    Ref,
    /// By output reference.
    Out,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::None => f.write_str("by-value"),
            RefKind::Ref => f.write_str("ref"),
            RefKind::Out => f.write_str("out"),
        }
    }
}

/// Source location attached to diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Enclosing script type.
    pub type_name: String,
    /// Declared member name.
    pub member: String,
    /// Source file, if known.
    pub file: Option<String>,
    /// Line number (1-based, 0 if unknown).
    pub line: u32,
    /// Column number (1-based, 0 if unknown).
    pub column: u32,
}

impl Location {
    /// Location naming only the type and member.
    pub fn member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: member.into(),
            ..Self::default()
        }
    }

    /// Attach a file/line/column position.
    pub fn at(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self.column = column;
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}: ", file, self.line, self.column)?;
        }
        write!(f, "{}::{}", self.type_name, self.member)
    }
}

/// A declared parameter of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateParameter {
    pub name: String,
    pub managed_type: ManagedType,
    pub ref_kind: RefKind,
}

impl CandidateParameter {
    /// By-value parameter.
    pub fn new(name: impl Into<String>, managed_type: ManagedType) -> Self {
        Self {
            name: name.into(),
            managed_type,
            ref_kind: RefKind::None,
        }
    }

    /// Parameter with an explicit passing mode.
    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }
}

/// A declaration that may represent a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSignal {
    /// Name of the enclosing script type.
    pub enclosing_type: String,
    /// Name as declared, including the signal suffix.
    pub declared_name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<CandidateParameter>,
    /// Whether the declaration returns void.
    pub returns_void: bool,
    /// Whether the declaration carries the explicit signal marker.
    pub has_marker: bool,
    /// Where the declaration lives, for diagnostics.
    pub location: Option<Location>,
}

impl CandidateSignal {
    /// A marked, void-returning declaration with no parameters.
    pub fn new(enclosing_type: impl Into<String>, declared_name: impl Into<String>) -> Self {
        Self {
            enclosing_type: enclosing_type.into(),
            declared_name: declared_name.into(),
            parameters: Vec::new(),
            returns_void: true,
            has_marker: true,
            location: None,
        }
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: CandidateParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set whether the declaration returns void.
    pub fn with_returns_void(mut self, returns_void: bool) -> Self {
        self.returns_void = returns_void;
        self
    }

    /// Set whether the declaration carries the signal marker.
    pub fn with_marker(mut self, has_marker: bool) -> Self {
        self.has_marker = has_marker;
        self
    }

    /// Attach a source location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// The location to report diagnostics against.
    pub fn location_hint(&self) -> Location {
        self.location
            .clone()
            .unwrap_or_else(|| Location::member(&self.enclosing_type, &self.declared_name))
    }
}

/// Decides which declarations are meant as signals.
///
/// Implemented for any `Fn(&CandidateSignal) -> bool`.
pub trait SignalPredicate {
    fn is_signal(&self, candidate: &CandidateSignal) -> bool;
}

impl<F> SignalPredicate for F
where
    F: Fn(&CandidateSignal) -> bool,
{
    fn is_signal(&self, candidate: &CandidateSignal) -> bool {
        (self)(candidate)
    }
}

/// Default predicate: the declaration carries the explicit signal marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerPredicate;

impl SignalPredicate for MarkerPredicate {
    fn is_signal(&self, candidate: &CandidateSignal) -> bool {
        candidate.has_marker
    }
}
