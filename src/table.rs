//! Per-type signal tables.
//!
//! A [`SignalTable`] holds the validated descriptors of one script type. It
//! is built once, wrapped in an `Arc`, and shared read-only by every
//! instance of that type. The projected [`MethodDescriptor`]s are computed
//! on first request and cached.
//!
//! # Thread Safety
//!
//! Mutation (`try_insert`, `set_base`) takes `&mut self` and happens before
//! the table is shared. Once behind an `Arc` the table is immutable and can
//! be read from any thread without synchronization.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use sigbridge_core::{
    MethodDescriptor, MethodFlags, SignalDescriptor, StringName, ValidationError,
    project_with_flags,
};

/// The signals declared by one script type.
#[derive(Debug, Clone)]
pub struct SignalTable {
    type_name: String,
    signals: Vec<SignalDescriptor>,
    by_name: FxHashMap<StringName, usize>,
    flags: MethodFlags,
    methods: OnceLock<Vec<MethodDescriptor>>,
    base: Option<Arc<SignalTable>>,
}

impl SignalTable {
    /// Empty table for the named type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            signals: Vec::new(),
            by_name: FxHashMap::default(),
            flags: MethodFlags::DEFAULT,
            methods: OnceLock::new(),
            base: None,
        }
    }

    /// Set the flags stamped on projected descriptors.
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self.methods = OnceLock::new();
        self
    }

    /// Link to the table of the base type.
    pub fn with_base(mut self, base: Arc<SignalTable>) -> Self {
        self.set_base(base);
        self
    }

    /// Link to the table of the base type.
    pub fn set_base(&mut self, base: Arc<SignalTable>) {
        self.base = Some(base);
    }

    /// Add a descriptor.
    ///
    /// Fails with [`ValidationError::DuplicateSignal`] if this type already
    /// declares a signal with the same name; the existing one is kept.
    /// Fails with [`ValidationError::ArityMismatch`] if the descriptor's
    /// handler arity disagrees with its parameter list.
    pub fn try_insert(&mut self, signal: SignalDescriptor) -> Result<(), ValidationError> {
        if signal.handler.arity != signal.arity() {
            return Err(ValidationError::ArityMismatch {
                signal: signal.name.to_string(),
                parameters: signal.arity(),
                handler_arity: signal.handler.arity,
            });
        }
        if self.by_name.contains_key(signal.name.as_str()) {
            return Err(ValidationError::DuplicateSignal {
                signal: signal.name.to_string(),
                owner: self.type_name.clone(),
            });
        }
        self.by_name.insert(signal.name.clone(), self.signals.len());
        self.signals.push(signal);
        self.methods = OnceLock::new();
        Ok(())
    }

    /// Name of the owning type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Base type table, if linked.
    pub fn base(&self) -> Option<&Arc<SignalTable>> {
        self.base.as_ref()
    }

    /// Number of signals declared by this type (base excluded).
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Check if this type declares no signals.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SignalDescriptor> {
        self.signals.iter()
    }

    /// Signal names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &StringName> {
        self.signals.iter().map(|s| &s.name)
    }

    /// Position of a signal in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look up a signal declared by this type.
    pub fn get(&self, name: &str) -> Option<&SignalDescriptor> {
        self.position(name).map(|i| &self.signals[i])
    }

    /// Descriptor at a position.
    pub fn get_index(&self, index: usize) -> Option<&SignalDescriptor> {
        self.signals.get(index)
    }

    /// Match a boundary call by name and argument count.
    pub fn find(&self, name: &str, arg_count: usize) -> Option<(usize, &SignalDescriptor)> {
        let index = self.position(name)?;
        let signal = &self.signals[index];
        (signal.arity() == arg_count).then_some((index, signal))
    }

    /// Whether this type or any base declares the signal.
    pub fn has_signal(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
            || self.base.as_ref().is_some_and(|base| base.has_signal(name))
    }

    /// Projected descriptors for this type's own signals, computed once.
    pub fn method_descriptors(&self) -> &[MethodDescriptor] {
        self.methods.get_or_init(|| {
            self.signals
                .iter()
                .map(|signal| project_with_flags(signal, self.flags))
                .collect()
        })
    }

    /// Projected descriptors including inherited signals.
    ///
    /// Base signals come first; a derived signal replaces a base signal of
    /// the same name in place.
    pub fn method_descriptors_with_base(&self) -> Vec<MethodDescriptor> {
        let mut methods = match &self.base {
            Some(base) => base.method_descriptors_with_base(),
            None => Vec::new(),
        };
        for method in self.method_descriptors() {
            match methods.iter_mut().find(|m| m.name == method.name) {
                Some(slot) => *slot = method.clone(),
                None => methods.push(method.clone()),
            }
        }
        methods
    }
}
