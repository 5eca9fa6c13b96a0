//! Boundary-to-managed dispatch.
//!
//! The native runtime probes script instances with a signal name and a
//! buffer of boundary values. A [`DispatchRouter`] answers for one type:
//! it matches name and argument count against the type's [`SignalTable`],
//! converts every argument through the marshal catalog, and invokes the
//! matching [`EventChannel`].
//!
//! A miss is [`DispatchOutcome::NotMatched`], never an error, so the same
//! call can be offered to several layers in turn (see [`DispatchChain`]).

use sigbridge_core::{Value, Variant, to_managed};

use crate::channel::EventChannel;
use crate::error::DispatchError;
use crate::table::SignalTable;

/// Result of offering a boundary call to a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A signal matched and its handlers ran.
    Handled,
    /// No signal with this name and argument count.
    NotMatched,
}

impl DispatchOutcome {
    pub fn is_handled(self) -> bool {
        self == DispatchOutcome::Handled
    }
}

/// Anything that can answer a boundary call.
pub trait Dispatch {
    fn dispatch(&self, name: &str, args: &[Variant]) -> Result<DispatchOutcome, DispatchError>;
}

/// Stateless router over one type's signal table.
#[derive(Debug, Clone, Copy)]
pub struct DispatchRouter<'t> {
    table: &'t SignalTable,
}

impl<'t> DispatchRouter<'t> {
    pub fn new(table: &'t SignalTable) -> Self {
        Self { table }
    }

    /// The table this router matches against.
    pub fn table(&self) -> &'t SignalTable {
        self.table
    }

    /// Route a boundary call to the matching channel.
    ///
    /// `channels` must be parallel to the table: `channels[i]` belongs to the
    /// i-th declared signal.
    ///
    /// # Panics
    ///
    /// Panics if a matched signal has no channel at its position, or the
    /// channel there belongs to another signal.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn dispatch(
        &self,
        channels: &[EventChannel],
        name: &str,
        args: &[Variant],
    ) -> Result<DispatchOutcome, DispatchError> {
        let Some((index, signal)) = self.table.find(name, args.len()) else {
            tracing::trace!(
                owner = self.table.type_name(),
                signal = name,
                argc = args.len(),
                "dispatch not matched"
            );
            return Ok(DispatchOutcome::NotMatched);
        };

        // Name and count matched, so the buffer covers every parameter.
        assert_eq!(
            args.len(),
            signal.arity(),
            "argument buffer does not cover signal '{}'",
            signal.name
        );
        let Some(channel) = channels.get(index).filter(|c| c.signal() == &signal.name) else {
            panic!(
                "channel list of '{}' does not line up with its signal table at '{}'",
                self.table.type_name(),
                signal.name
            );
        };

        let managed = signal
            .parameters
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (param, arg))| {
                to_managed(param.ty, arg).map_err(|source| DispatchError::Conversion {
                    signal: signal.name.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<Value>, _>>()?;

        tracing::trace!(
            owner = self.table.type_name(),
            signal = %signal.name,
            handlers = channel.len(),
            "dispatch matched"
        );

        channel
            .invoke(&managed)
            .map_err(|source| DispatchError::Handler {
                signal: signal.name.clone(),
                source,
            })?;

        Ok(DispatchOutcome::Handled)
    }
}

/// Layers probed in order until one handles the call.
///
/// Push the most derived layer first. Each layer only sees the call if every
/// layer before it answered [`DispatchOutcome::NotMatched`].
#[derive(Default)]
pub struct DispatchChain<'a> {
    layers: Vec<&'a dyn Dispatch>,
}

impl<'a> DispatchChain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer below the existing ones.
    pub fn push(&mut self, layer: &'a dyn Dispatch) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the chain has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Dispatch for DispatchChain<'_> {
    fn dispatch(&self, name: &str, args: &[Variant]) -> Result<DispatchOutcome, DispatchError> {
        for layer in &self.layers {
            if layer.dispatch(name, args)?.is_handled() {
                return Ok(DispatchOutcome::Handled);
            }
        }
        Ok(DispatchOutcome::NotMatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Handler;
    use crate::error::HandlerError;
    use sigbridge_core::{
        CandidateParameter, CandidateSignal, ConversionError, ManagedType, SignalBuilder,
    };
    use std::sync::{Arc, Mutex};

    fn table() -> SignalTable {
        let builder = SignalBuilder::default();
        let mut table = SignalTable::new("Wallet");
        table
            .try_insert(
                builder
                    .build(
                        &CandidateSignal::new("Wallet", "ChangedEventHandler")
                            .with_parameter(CandidateParameter::new("amount", ManagedType::Int32)),
                    )
                    .unwrap(),
            )
            .unwrap();
        table
            .try_insert(
                builder
                    .build(&CandidateSignal::new("Wallet", "EmptiedEventHandler"))
                    .unwrap(),
            )
            .unwrap();
        table
    }

    fn channels(table: &SignalTable) -> Vec<EventChannel> {
        table.names().cloned().map(EventChannel::new).collect()
    }

    #[test]
    fn converts_and_invokes() {
        let table = table();
        let mut channels = channels(&table);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        channels[0].subscribe(Handler::new(move |args| {
            sink.lock().unwrap().push(args.get::<i32>(0)?);
            Ok(())
        }));

        let router = DispatchRouter::new(&table);
        let outcome = router
            .dispatch(&channels, "Changed", &[Variant::Int(42)])
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(*seen.lock().unwrap(), [42]);
    }

    #[test]
    fn unknown_name_not_matched() {
        let table = table();
        let router = DispatchRouter::new(&table);
        let outcome = router.dispatch(&channels(&table), "Spent", &[]).unwrap();
        assert_eq!(outcome, DispatchOutcome::NotMatched);
    }

    #[test]
    fn wrong_arity_not_matched() {
        let table = table();
        let router = DispatchRouter::new(&table);
        let channels = channels(&table);
        assert_eq!(
            router.dispatch(&channels, "Changed", &[]).unwrap(),
            DispatchOutcome::NotMatched
        );
        assert_eq!(
            router
                .dispatch(&channels, "Emptied", &[Variant::Nil])
                .unwrap(),
            DispatchOutcome::NotMatched
        );
    }

    #[test]
    fn matched_without_handlers_is_handled() {
        let table = table();
        let router = DispatchRouter::new(&table);
        let outcome = router.dispatch(&channels(&table), "Emptied", &[]).unwrap();
        assert!(outcome.is_handled());
    }

    #[test]
    fn conversion_failure_reports_position() {
        let table = table();
        let router = DispatchRouter::new(&table);
        let err = router
            .dispatch(&channels(&table), "Changed", &[Variant::from("lots")])
            .unwrap_err();
        match err {
            DispatchError::Conversion { signal, index, source } => {
                assert_eq!(signal, "Changed");
                assert_eq!(index, 0);
                assert!(matches!(source, ConversionError::TypeMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[should_panic(expected = "channel list of 'Wallet' does not line up")]
    fn missing_channel_is_a_defect() {
        let table = table();
        DispatchRouter::new(&table)
            .dispatch(&[], "Emptied", &[])
            .ok();
    }

    #[test]
    #[should_panic(expected = "does not line up with its signal table at 'Changed'")]
    fn misaligned_channel_is_a_defect() {
        let table = table();
        let channels = [EventChannel::new("Emptied"), EventChannel::new("Changed")];
        DispatchRouter::new(&table)
            .dispatch(&channels, "Changed", &[Variant::Int(1)])
            .ok();
    }

    #[test]
    fn handler_error_propagates() {
        let table = table();
        let mut channels = channels(&table);
        channels[1].subscribe(Handler::new(|_| Err(HandlerError::new("broke"))));

        let router = DispatchRouter::new(&table);
        let err = router.dispatch(&channels, "Emptied", &[]).unwrap_err();
        assert!(matches!(err, DispatchError::Handler { .. }));
        assert_eq!(err.to_string(), "handler for signal 'Emptied' failed: broke");
    }
}
