//! Turning candidate declarations into per-type signal tables.
//!
//! [`SignalGenerator::generate`] is the build-time pass. It filters the
//! candidates through the injectable [`SignalPredicate`], validates each one
//! with the [`SignalBuilder`], and groups the survivors by enclosing type.
//! Every violation goes to the [`DiagnosticSink`]; the offending candidate
//! is dropped and the pass moves on.
//!
//! # Example
//!
//! ```
//! use sigbridge::{CandidateParameter, CandidateSignal, Diagnostics, GeneratorConfig, ManagedType};
//! use sigbridge::SignalGenerator;
//!
//! let candidates = vec![
//!     CandidateSignal::new("Wallet", "ChangedEventHandler")
//!         .with_parameter(CandidateParameter::new("amount", ManagedType::Int32)),
//!     CandidateSignal::new("Wallet", "Broken"),
//! ];
//!
//! let mut diagnostics = Diagnostics::new();
//! let generated = SignalGenerator::new(GeneratorConfig::default())
//!     .generate(&candidates, &mut diagnostics);
//!
//! assert_eq!(diagnostics.count(), 1);
//! assert!(generated.table("Wallet").unwrap().has_signal("Changed"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use sigbridge_core::{
    CandidateSignal, DiagnosticSink, MarkerPredicate, SignalBuilder, SignalPredicate,
};

use crate::artifact::{Artifact, EmissionSink};
use crate::config::GeneratorConfig;
use crate::error::ArtifactError;
use crate::table::SignalTable;

/// Build-time pass over candidate declarations.
#[derive(Debug, Clone)]
pub struct SignalGenerator<P = MarkerPredicate> {
    config: GeneratorConfig,
    builder: SignalBuilder,
    predicate: P,
}

impl SignalGenerator<MarkerPredicate> {
    /// Generator recognizing marked declarations.
    pub fn new(config: GeneratorConfig) -> Self {
        let builder = SignalBuilder::new(config.signal_suffix.as_str());
        Self {
            config,
            builder,
            predicate: MarkerPredicate,
        }
    }
}

impl<P: SignalPredicate> SignalGenerator<P> {
    /// Replace the predicate deciding which declarations are signals.
    pub fn with_predicate<Q: SignalPredicate>(self, predicate: Q) -> SignalGenerator<Q> {
        SignalGenerator {
            config: self.config,
            builder: self.builder,
            predicate,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate and group candidates.
    ///
    /// Types that end up with no valid signal still get an (empty) table so
    /// their instances can be constructed uniformly.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(
        &self,
        candidates: &[CandidateSignal],
        diagnostics: &mut dyn DiagnosticSink,
    ) -> GeneratedSignals {
        let mut tables: BTreeMap<String, SignalTable> = BTreeMap::new();

        for candidate in candidates {
            if !self.predicate.is_signal(candidate) {
                continue;
            }

            let table = tables
                .entry(candidate.enclosing_type.clone())
                .or_insert_with(|| {
                    SignalTable::new(candidate.enclosing_type.as_str())
                        .with_flags(self.config.method_flags)
                });

            let signal = match self.builder.build(candidate) {
                Ok(signal) => signal,
                Err(errors) => {
                    tracing::debug!(
                        owner = %candidate.enclosing_type,
                        declared = %candidate.declared_name,
                        errors = errors.len(),
                        "dropping invalid signal declaration"
                    );
                    for error in errors {
                        diagnostics.report(error, candidate.location_hint());
                    }
                    continue;
                }
            };

            if let Err(error) = table.try_insert(signal) {
                tracing::debug!(
                    owner = %candidate.enclosing_type,
                    declared = %candidate.declared_name,
                    "dropping duplicate signal declaration"
                );
                diagnostics.report(error, candidate.location_hint());
            }
        }

        let tables = tables
            .into_iter()
            .map(|(name, table)| {
                tracing::debug!(owner = %name, signals = table.len(), "signal table built");
                (name, Arc::new(table))
            })
            .collect();

        GeneratedSignals {
            tables,
            artifact_extension: self.config.artifact_extension.clone(),
            pretty: self.config.pretty,
        }
    }
}

/// Output of one generator pass: a signal table per script type.
#[derive(Debug, Clone)]
pub struct GeneratedSignals {
    tables: BTreeMap<String, Arc<SignalTable>>,
    artifact_extension: String,
    pretty: bool,
}

impl GeneratedSignals {
    /// Table of a script type.
    pub fn table(&self, type_name: &str) -> Option<&Arc<SignalTable>> {
        self.tables.get(type_name)
    }

    /// Script types in name order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// All tables in type name order.
    pub fn tables(&self) -> impl Iterator<Item = &Arc<SignalTable>> {
        self.tables.values()
    }

    /// Number of script types.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no script type was seen.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Record that `derived` inherits from `base`.
    ///
    /// Returns `false` if either type is unknown. Link bases before
    /// deriving instances from the tables; instances keep the table they
    /// were created with.
    pub fn link(&mut self, derived: &str, base: &str) -> bool {
        let Some(base) = self.tables.get(base).cloned() else {
            return false;
        };
        match self.tables.get_mut(derived) {
            Some(table) => {
                Arc::make_mut(table).set_base(base);
                true
            }
            None => false,
        }
    }

    /// Render one artifact per script type and hand each to `sink`.
    ///
    /// Returns the number of artifacts emitted.
    pub fn emit_artifacts(&self, sink: &mut dyn EmissionSink) -> Result<usize, ArtifactError> {
        for (name, table) in &self.tables {
            let artifact = Artifact::render(
                name,
                &self.artifact_extension,
                table.method_descriptors(),
                self.pretty,
            )?;
            sink.accept(artifact);
        }
        Ok(self.tables.len())
    }
}
