use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Misconfiguration detected while resolving the project configuration.
///
/// Every variant is fatal: the invoking process aborts before any compiler,
/// network or verification tooling is started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("{variable} is not a valid http(s) endpoint: {value}")]
    InvalidUrl { variable: String, value: String },

    // The offending value is a secret and is never echoed back.
    #[error("{variable} does not hold a 32-byte hex private key")]
    InvalidCredential { variable: String },

    #[error("network '{0}' has no block explorer for contract verification")]
    NoExplorer(String),

    #[error("network '{0}' has no signing credential source")]
    NoSignerSource(String),

    #[error("missing required value: {0}")]
    MissingValue(String),

    #[error("duplicate chain id {chain_id} declared by '{first}' and '{second}'")]
    DuplicateChainId {
        chain_id: u64,
        first: String,
        second: String,
    },

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid settings in {path}: {message}")]
    Settings { path: String, message: String },
}

/// A credential or API key that was never configured was used.
///
/// Raised lazily, at the point a consumer needs the value, never during
/// resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{purpose} requires {variable}, which is not set")]
pub struct UnresolvedSecretError {
    pub variable: String,
    pub purpose: String,
}

impl UnresolvedSecretError {
    pub fn new(variable: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            purpose: purpose.into(),
        }
    }
}

/// Top-level error for the configuration layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainCfgError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Unresolved secret: {0}")]
    UnresolvedSecret(#[from] UnresolvedSecretError),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Operator or programmer error in the static or environment inputs.
    Configuration,
    /// A credential was needed but the environment never provided it.
    UnresolvedSecret,
}

impl ChainCfgError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::UnresolvedSecret(_) => ErrorCategory::UnresolvedSecret,
        }
    }

    /// Returns a message suitable for printing to an operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(ConfigurationError::UnknownNetwork(name)) => {
                format!("Unknown network '{name}'. Run `chaincfg show` to list networks.")
            }
            Self::Configuration(err) => format!("Configuration issue: {err}"),
            Self::UnresolvedSecret(err) => format!(
                "{} is not configured. Set it in the environment or in .env ({}).",
                err.variable, err.purpose
            ),
        }
    }
}
