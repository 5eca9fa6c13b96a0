//! Per-signal handler lists.
//!
//! An [`EventChannel`] is the subscribe/unsubscribe surface of one signal on
//! one instance. User code can only add and remove [`Handler`]s; invoking a
//! channel is reserved for the dispatch router inside this crate.
//!
//! Handlers are compared by identity: cloning a `Handler` yields the same
//! handler, while wrapping the same closure twice yields two distinct ones.
//!
//! # Example
//!
//! ```
//! use sigbridge::{EventChannel, Handler};
//!
//! let mut channel = EventChannel::new("Changed");
//! let handler = Handler::new(|args| {
//!     let amount: i32 = args.get(0)?;
//!     assert!(amount >= 0);
//!     Ok(())
//! });
//!
//! channel.subscribe(handler.clone());
//! assert_eq!(channel.len(), 1);
//! assert!(channel.unsubscribe(&handler));
//! assert!(channel.is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use sigbridge_core::{ConversionError, FromValue, StringName, Value};

use crate::error::HandlerError;

/// Managed arguments delivered to a handler, in parameter order.
#[derive(Debug, Clone, Copy)]
pub struct SignalArgs<'a> {
    values: &'a [Value],
}

impl<'a> SignalArgs<'a> {
    pub fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw managed value at `index`.
    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// All managed values.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Typed argument at `index`.
    ///
    /// An out-of-range index reports a mismatch against `nil`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ConversionError> {
        match self.values.get(index) {
            Some(value) => T::from_value(value),
            None => Err(ConversionError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                actual: "nil",
            }),
        }
    }
}

type HandlerFn = dyn Fn(&SignalArgs<'_>) -> Result<(), HandlerError> + Send + Sync;

/// A subscribed callable.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerFn>,
}

impl Handler {
    /// Wrap a closure as a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&SignalArgs<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Call the handler.
    pub fn call(&self, args: &SignalArgs<'_>) -> Result<(), HandlerError> {
        (self.inner)(args)
    }

    /// Whether two handles refer to the same handler.
    pub fn same_as(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

/// Ordered multicast list of handlers for one signal.
#[derive(Debug, Clone)]
pub struct EventChannel {
    signal: StringName,
    handlers: Vec<Handler>,
}

impl EventChannel {
    /// Empty channel for the named signal.
    pub fn new(signal: impl Into<StringName>) -> Self {
        Self {
            signal: signal.into(),
            handlers: Vec::new(),
        }
    }

    /// The signal this channel belongs to.
    pub fn signal(&self) -> &StringName {
        &self.signal
    }

    /// Append a handler. The same handler may be subscribed more than once.
    pub fn subscribe(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    /// Remove the first subscription of `handler`.
    ///
    /// Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, handler: &Handler) -> bool {
        match self.handlers.iter().position(|h| h.same_as(handler)) {
            Some(pos) => {
                self.handlers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of subscriptions.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether `handler` is subscribed.
    pub fn contains(&self, handler: &Handler) -> bool {
        self.handlers.iter().any(|h| h.same_as(handler))
    }

    /// Call every handler in subscription order.
    ///
    /// The first failing handler stops the invocation and its error is
    /// returned as-is.
    pub(crate) fn invoke(&self, args: &[Value]) -> Result<(), HandlerError> {
        let args = SignalArgs::new(args);
        for handler in &self.handlers {
            handler.call(&args)?;
        }
        Ok(())
    }
}
