//! Sigbridge Proc Macros
//!
//! This crate provides the `#[signal]` attribute, which turns a Rust
//! function type alias into a candidate signal declaration.
//!
//! The macro does not validate anything. It records what was declared
//! (name, parameters, passing modes, return) and leaves every decision to
//! `SignalBuilder`, so a bad declaration surfaces as a diagnostic with a
//! source location instead of a compile error.
//!
//! # Example
//!
//! ```ignore
//! use sigbridge::signal;
//!
//! #[signal(owner = "Wallet")]
//! pub type ChangedEventHandler = fn(amount: i32);
//!
//! let candidate = __signal_ChangedEventHandler_candidate();
//! assert_eq!(candidate.enclosing_type, "Wallet");
//! ```

use proc_macro::TokenStream;

mod signal;

/// Declare a signal from a function type alias.
///
/// Keeps the alias and adds a function
/// `__signal_<Alias>_candidate() -> sigbridge_core::CandidateSignal`
/// describing the declaration.
///
/// # Attributes
///
/// - `owner = "..."` - Script type that declares the signal (required)
/// - `name = "..."` - Override the declared name (default: the alias name)
///
/// # Parameter Mapping
///
/// - `bool`, `i8`..`i64`, `u8`..`u64`, `f32`, `f64` - matching primitive
/// - `String`, `StringName`, `Variant` - matching boundary type
/// - `Gd<T>` - object handle of class `T`
/// - `&T` / `&mut T` - by-reference / by-output passing of `T`
/// - `()` and anything else - passed through for the builder to reject
///
/// Unnamed parameters are called `arg0`, `arg1`, ...
///
/// # Example
///
/// ```ignore
/// #[signal(owner = "Player")]
/// pub type HitEventHandler = fn(damage: f32, source: Gd<Node>);
/// ```
#[proc_macro_attribute]
pub fn signal(attr: TokenStream, item: TokenStream) -> TokenStream {
    signal::signal_impl(attr, item)
}
