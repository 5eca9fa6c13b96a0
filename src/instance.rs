//! Per-instance signal state.
//!
//! Every script instance owns a [`SignalSet`]: one [`EventChannel`] per
//! signal its type declares, created empty, plus a shared handle to the
//! type's [`SignalTable`]. The set is the instance's dispatch entry point
//! and the place managed code raises signals from.
//!
//! If the table is linked to a base table, the set also carries a base
//! layer with channels for the inherited signals. Lookups, dispatch and
//! emission try the derived layer first and fall back to the base, so
//! everything [`SignalTable::has_signal`] reports can be connected,
//! dispatched and emitted on the same instance.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sigbridge::{Dispatch, DispatchOutcome, Handler, SignalSet, SignalTable};
//! use sigbridge::{CandidateSignal, SignalBuilder};
//!
//! let mut table = SignalTable::new("Door");
//! let opened = SignalBuilder::default()
//!     .build(&CandidateSignal::new("Door", "OpenedEventHandler"))
//!     .unwrap();
//! table.try_insert(opened).unwrap();
//!
//! let mut door = SignalSet::new(Arc::new(table));
//! door.connect("Opened", Handler::new(|_| Ok(()))).unwrap();
//! assert_eq!(door.dispatch("Opened", &[]).unwrap(), DispatchOutcome::Handled);
//! ```

use std::sync::Arc;

use sigbridge_core::{IntoValue, SignalDescriptor, StringName, Value, Variant, to_boundary};

use crate::channel::{EventChannel, Handler};
use crate::error::{DispatchError, EmitError, HostError, UnknownSignal};
use crate::router::{Dispatch, DispatchOutcome, DispatchRouter};
use crate::table::SignalTable;

/// The native side of an emitted signal.
pub trait SignalHost {
    /// Deliver a signal to boundary-side listeners.
    fn emit_signal(&mut self, signal: &StringName, args: &[Variant]) -> Result<(), HostError>;
}

impl<F> SignalHost for F
where
    F: FnMut(&StringName, &[Variant]) -> Result<(), HostError>,
{
    fn emit_signal(&mut self, signal: &StringName, args: &[Variant]) -> Result<(), HostError> {
        (self)(signal, args)
    }
}

/// The event channels of one script instance.
#[derive(Debug, Clone)]
pub struct SignalSet {
    table: Arc<SignalTable>,
    channels: Vec<EventChannel>,
    base: Option<Box<SignalSet>>,
}

impl SignalSet {
    /// Fresh set with an empty channel per declared or inherited signal.
    pub fn new(table: Arc<SignalTable>) -> Self {
        let channels = table.names().cloned().map(EventChannel::new).collect();
        let base = table
            .base()
            .map(|base| Box::new(SignalSet::new(Arc::clone(base))));
        Self {
            table,
            channels,
            base,
        }
    }

    /// The shared type table.
    pub fn table(&self) -> &Arc<SignalTable> {
        &self.table
    }

    /// Layer holding the inherited signals, if the type has a base.
    pub fn base(&self) -> Option<&SignalSet> {
        self.base.as_deref()
    }

    /// Descriptor of a declared or inherited signal, most derived first.
    pub fn descriptor(&self, signal: &str) -> Option<&SignalDescriptor> {
        match self.table.get(signal) {
            Some(descriptor) => Some(descriptor),
            None => self.base.as_deref()?.descriptor(signal),
        }
    }

    /// Channel of a declared or inherited signal.
    pub fn channel(&self, signal: &str) -> Option<&EventChannel> {
        match self.table.position(signal) {
            Some(i) => Some(&self.channels[i]),
            None => self.base.as_deref()?.channel(signal),
        }
    }

    /// Mutable channel of a declared or inherited signal.
    pub fn channel_mut(&mut self, signal: &str) -> Option<&mut EventChannel> {
        match self.table.position(signal) {
            Some(i) => Some(&mut self.channels[i]),
            None => self.base.as_deref_mut()?.channel_mut(signal),
        }
    }

    /// Subscribe a handler to a declared signal.
    pub fn connect(&mut self, signal: &str, handler: Handler) -> Result<(), UnknownSignal> {
        let owner = self.table.type_name().to_string();
        let channel = self.channel_mut(signal).ok_or_else(|| UnknownSignal {
            signal: signal.to_string(),
            owner,
        })?;
        channel.subscribe(handler);
        Ok(())
    }

    /// Unsubscribe a handler; `Ok(false)` if it was not subscribed.
    pub fn disconnect(&mut self, signal: &str, handler: &Handler) -> Result<bool, UnknownSignal> {
        let owner = self.table.type_name().to_string();
        let channel = self.channel_mut(signal).ok_or_else(|| UnknownSignal {
            signal: signal.to_string(),
            owner,
        })?;
        Ok(channel.unsubscribe(handler))
    }

    /// Raise a signal from managed code.
    ///
    /// Every argument is converted to its boundary shape before the host
    /// sees anything; a failed conversion sends nothing.
    pub fn emit(
        &self,
        host: &mut dyn SignalHost,
        signal: &str,
        args: &[Value],
    ) -> Result<(), EmitError> {
        let descriptor = self.descriptor(signal).ok_or_else(|| UnknownSignal {
            signal: signal.to_string(),
            owner: self.table.type_name().to_string(),
        })?;

        if descriptor.arity() != args.len() {
            return Err(EmitError::ArityMismatch {
                signal: descriptor.name.clone(),
                expected: descriptor.arity(),
                actual: args.len(),
            });
        }

        let boundary = descriptor
            .parameters
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (param, value))| {
                to_boundary(param.ty, value).map_err(|source| EmitError::Conversion {
                    signal: descriptor.name.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            owner = self.table.type_name(),
            signal = %descriptor.name,
            argc = boundary.len(),
            "emit"
        );
        host.emit_signal(&descriptor.name, &boundary)?;
        Ok(())
    }

    /// [`emit`](Self::emit) taking any values convertible to managed form.
    pub fn emit_with<I>(
        &self,
        host: &mut dyn SignalHost,
        signal: &str,
        args: I,
    ) -> Result<(), EmitError>
    where
        I: IntoIterator,
        I::Item: IntoValue,
    {
        let values: Vec<Value> = args.into_iter().map(IntoValue::into_value).collect();
        self.emit(host, signal, &values)
    }
}

impl Dispatch for SignalSet {
    fn dispatch(&self, name: &str, args: &[Variant]) -> Result<DispatchOutcome, DispatchError> {
        let outcome = DispatchRouter::new(&self.table).dispatch(&self.channels, name, args)?;
        match (outcome, &self.base) {
            (DispatchOutcome::NotMatched, Some(base)) => base.dispatch(name, args),
            _ => Ok(outcome),
        }
    }
}
