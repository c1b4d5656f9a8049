//! Error types for configuration handling.
//!
//! Validation problems found in a division scheme request are *not* errors
//! in this sense: they are accumulated as data and returned to the caller
//! (see [`crate::scheme::validation`]). The types here cover the ambient
//! concerns where the process genuinely cannot proceed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("cannot read configuration file {path}")]
    Read {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the expected shape.
    #[error("cannot parse configuration file {path}")]
    Parse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A setting carries a value the tool cannot work with.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Which setting is wrong and why.
        message: String,
    },
}

impl ConfigError {
    /// Creates an error for a rejected setting value.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
