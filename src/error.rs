//! Error types for the Cube client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors fall into two kinds: configuration errors, raised before any
//! network I/O and never retried, and API failures, raised after I/O and
//! never retried by the client itself. Use [`Error::is_configuration`] and
//! [`Error::is_api_failure`] to distinguish them.

use thiserror::Error;

/// The main error type for the Cube client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// The supplied parameter set is unsatisfiable
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required configuration field is absent or empty
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    /// A YAML config document could not be parsed
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A JSON value could not be parsed or serialized
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// The token could not be signed
    #[error("Token signing failed: {message}")]
    TokenSign { message: String },

    // ============================================================================
    // API Failures
    // ============================================================================
    /// A transport-level failure (timeout, connection reset); terminal
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("Cube API call failed: {reason}")]
    Api { reason: String },

    /// The accumulated wait exceeded the configured ceiling
    #[error("Cube API took longer than {max_wait_secs} seconds to respond")]
    WaitTimeout { max_wait_secs: u64 },

    /// A pre-aggregations job reported a failure status
    #[error("Pre-aggregations build failed: {status}")]
    JobFailed { status: String },

    /// Every pre-aggregations job is blocked with no partition to build
    #[error("Pre-aggregations build failed: all jobs reported missing partitions")]
    NoLiveJobs,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Filesystem failure while loading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// A contextualized error produced by [`ResultExt`]
    #[error("{0}")]
    Other(String),

    /// Passthrough for errors raised through anyhow
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a token signing error
    pub fn token_sign(message: impl Into<String>) -> Self {
        Self::TokenSign {
            message: message.into(),
        }
    }

    /// Create an API failure from the transport reason text
    pub fn api(reason: impl Into<String>) -> Self {
        Self::Api {
            reason: reason.into(),
        }
    }

    /// Create a job failure carrying the offending status text
    pub fn job_failed(status: impl Into<String>) -> Self {
        Self::JobFailed {
            status: status.into(),
        }
    }

    /// Check if this error was caused by an unsatisfiable parameter set,
    /// raised before any network I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::YamlParse(_)
                | Error::JsonParse(_)
                | Error::TokenSign { .. }
        )
    }

    /// Check if this error was raised by a remote call after I/O started
    pub fn is_api_failure(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Api { .. }
                | Error::WaitTimeout { .. }
                | Error::JobFailed { .. }
                | Error::NoLiveJobs
        )
    }
}

/// Result type alias for the Cube client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
