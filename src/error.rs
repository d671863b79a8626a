//! Configuration errors

use core::fmt;

use crate::config::EnvKey;

/// Why a configuration value cannot be used.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Value is an empty string
    EmptyValue(EnvKey),
    /// Value still holds a `YOUR_*` placeholder
    Placeholder(EnvKey),
    /// Not an `https://host/...` URL
    InvalidUrl(EnvKey),
    /// History URL embeds a different key than COINDESK_API_KEY
    KeyMismatch(EnvKey),
    /// History URL path or query does not match its granularity
    GranularityMismatch(EnvKey),
    /// Value contains characters that would need URL escaping
    InvalidValue(EnvKey),
    /// Output buffer too small
    CapacityExceeded,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyValue(k) => write!(f, "{} is empty", k.name()),
            ConfigError::Placeholder(k) => write!(f, "{} still holds a YOUR_* placeholder", k.name()),
            ConfigError::InvalidUrl(k) => write!(f, "{} is not an https URL", k.name()),
            ConfigError::KeyMismatch(k) => write!(f, "{} embeds a key other than COINDESK_API_KEY", k.name()),
            ConfigError::GranularityMismatch(k) => {
                write!(f, "{} does not match its granularity or query", k.name())
            }
            ConfigError::InvalidValue(k) => write!(f, "{} needs URL escaping", k.name()),
            ConfigError::CapacityExceeded => f.write_str("buffer capacity exceeded"),
        }
    }
}
