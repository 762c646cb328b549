//! Error types for mechlab.
//!
//! Ticking a scenario is plain arithmetic and never fails. Errors come from
//! the outer surfaces: configuration loading, parameter names, CLI input,
//! export I/O, and the Jidoka guard reporting a non-finite state.

use thiserror::Error;

/// Result type alias for mechlab operations.
pub type LabResult<T> = Result<T, LabError>;

/// Unified error type for all mechlab operations.
#[derive(Debug, Error)]
pub enum LabError {
    // ===== Jidoka Violations =====
    /// A state component became NaN or infinite.
    #[error("Jidoka: non-finite value {value} in {scenario}.{component}")]
    NonFinite {
        /// Scenario that produced the value.
        scenario: &'static str,
        /// State component name (e.g. "angle").
        component: &'static str,
        /// The offending value.
        value: f64,
    },

    // ===== Scenario Errors =====
    /// Parameter name not known to the scenario.
    #[error("Unknown parameter '{name}' for {scenario} (expected one of: {expected})")]
    UnknownParameter {
        /// Scenario the lookup was made against.
        scenario: &'static str,
        /// Requested name.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    /// Scenario name could not be parsed.
    #[error("Unknown scenario '{0}' (expected pendulum, incline or bounce)")]
    UnknownScenario(String),

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Malformed command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ===== I/O Errors =====
    /// File or stream I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LabError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unknown-parameter error listing the accepted names.
    #[must_use]
    pub fn unknown_parameter(scenario: &'static str, name: &str, expected: &[&str]) -> Self {
        Self::UnknownParameter {
            scenario,
            name: name.to_string(),
            expected: expected.join(", "),
        }
    }

    /// Check if this error is a Jidoka violation (the scenario was stopped).
    #[must_use]
    pub const fn is_jidoka_violation(&self) -> bool {
        matches!(self, Self::NonFinite { .. })
    }
}
