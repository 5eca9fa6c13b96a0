//! Generator configuration.
//!
//! Hosts usually keep these settings next to their project files; the
//! struct deserializes from JSON with every field optional.
//!
//! # Example
//!
//! ```
//! use sigbridge::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_json(r#"{ "signal_suffix": "Signal" }"#).unwrap();
//! assert_eq!(config.signal_suffix, "Signal");
//! assert_eq!(config.artifact_extension, "signals.json");
//! ```

use serde::{Deserialize, Serialize};

use sigbridge_core::{DEFAULT_SIGNAL_SUFFIX, MethodFlags};

/// Settings for [`SignalGenerator`](crate::SignalGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Suffix a declaration name must end with; stripped to form the signal name.
    pub signal_suffix: String,
    /// Flags stamped on every projected method descriptor.
    #[serde(with = "method_flags_bits")]
    pub method_flags: MethodFlags,
    /// Extension of emitted artifacts (`<Type>.<extension>`).
    pub artifact_extension: String,
    /// Pretty-print emitted artifacts.
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            signal_suffix: DEFAULT_SIGNAL_SUFFIX.to_string(),
            method_flags: MethodFlags::DEFAULT,
            artifact_extension: "signals.json".to_string(),
            pretty: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_signal_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.signal_suffix = suffix.into();
        self
    }

    pub fn with_method_flags(mut self, flags: MethodFlags) -> Self {
        self.method_flags = flags;
        self
    }

    pub fn with_artifact_extension(mut self, extension: impl Into<String>) -> Self {
        self.artifact_extension = extension.into();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

mod method_flags_bits {
    use serde::{Deserialize, Deserializer, Serializer};
    use sigbridge_core::MethodFlags;

    pub fn serialize<S: Serializer>(flags: &MethodFlags, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(flags.bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MethodFlags, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(MethodFlags::from_bits_truncate(bits))
    }
}
