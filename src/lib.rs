#![cfg_attr(not(test), no_std)]

//! Compile-time environment for the BTC ticker firmware.
//!
//! `env` holds the raw constants to fill in before flashing. The other
//! modules give firmware a typed, checkable view of them.

pub mod coindesk;
pub mod config;
pub mod env;
pub mod error;
pub mod format;
pub mod url;

pub use config::{EnvConfig, EnvKey};
pub use error::ConfigError;
