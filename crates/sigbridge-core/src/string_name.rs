//! Interned signal and member names.
//!
//! [`StringName`] is the boundary-visible identity of a signal. It is a cheap
//! to clone shared string carrying a precomputed XXHash64 digest, so repeated
//! comparisons during dispatch can reject non-matching names without touching
//! the string bytes.
//!
//! `Hash`, `Eq` and `Borrow<str>` agree with `str`, which lets tables keyed by
//! `StringName` be queried directly with a `&str`.
//!
//! # Examples
//!
//! ```
//! use sigbridge_core::StringName;
//!
//! let a = StringName::new("Ready");
//! let b = StringName::from("Ready");
//! assert_eq!(a, b);
//! assert_eq!(a.digest(), b.digest());
//! assert_eq!(a.as_str(), "Ready");
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use xxhash_rust::xxh64::xxh64;

/// Seed mixed into every name digest.
const NAME_SEED: u64 = 0x1a095090689d4647;

/// An interned, immutable name.
#[derive(Clone)]
pub struct StringName {
    text: Arc<str>,
    digest: u64,
}

impl StringName {
    /// Intern a name.
    pub fn new(text: impl AsRef<str>) -> Self {
        let text: Arc<str> = Arc::from(text.as_ref());
        let digest = xxh64(text.as_bytes(), NAME_SEED);
        Self { text, digest }
    }

    /// The name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Precomputed 64-bit digest of the name.
    #[inline]
    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// Check if the name is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Compare against a raw string.
    pub fn matches(&self, other: &str) -> bool {
        &*self.text == other
    }
}

impl PartialEq for StringName {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.text == other.text
    }
}

impl Eq for StringName {}

impl PartialEq<str> for StringName {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<&str> for StringName {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl Hash for StringName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for StringName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for StringName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for StringName {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StringName {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{:?}", self.as_str())
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StringName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StringName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::new(text))
    }
}
