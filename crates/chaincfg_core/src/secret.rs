use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::UnresolvedSecretError;

/// An environment-derived secret that may not have been configured.
///
/// `Unresolved` keeps the name of the variable that was missing, so a later
/// failure reads "BASE_ETHERSCAN_API_KEY is not set" rather than a generic
/// empty-value error.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    Resolved(String),
    Unresolved { variable: String },
}

impl Secret {
    pub fn unresolved(variable: impl Into<String>) -> Self {
        Self::Unresolved {
            variable: variable.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The secret value, or an [`UnresolvedSecretError`] naming what needed it.
    pub fn require(&self, purpose: &str) -> Result<&str, UnresolvedSecretError> {
        match self {
            Self::Resolved(value) => Ok(value),
            Self::Unresolved { variable } => Err(UnresolvedSecretError::new(variable, purpose)),
        }
    }

    /// The secret value, if resolved.
    pub fn expose(&self) -> Option<&str> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Unresolved { .. } => None,
        }
    }

    /// Copy with the value masked, for printing.
    pub fn redacted(&self) -> Self {
        match self {
            Self::Resolved(value) => Self::Resolved(redact(value)),
            unresolved => unresolved.clone(),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(_) => f.write_str("Secret(<redacted>)"),
            Self::Unresolved { variable } => write!(f, "Secret(<unresolved {variable}>)"),
        }
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(value) => f.write_str(&redact(value)),
            Self::Unresolved { variable } => write!(f, "<unresolved: {variable}>"),
        }
    }
}

/// Unresolved secrets serialize as `null`, never as an empty string.
impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Resolved(value) => serializer.serialize_str(value),
            Self::Unresolved { .. } => serializer.serialize_none(),
        }
    }
}

/// Mask a secret, keeping a short prefix and suffix for identification.
pub fn redact(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_returns_value_when_resolved() {
        let secret = Secret::Resolved("key".into());
        assert_eq!(secret.require("verification").unwrap(), "key");
    }

    #[test]
    fn require_names_missing_variable() {
        let secret = Secret::unresolved("BASE_ETHERSCAN_API_KEY");
        let err = secret.require("verification").unwrap_err();
        assert_eq!(err.variable, "BASE_ETHERSCAN_API_KEY");
        assert_eq!(err.purpose, "verification");
    }

    #[test]
    fn debug_and_display_never_leak() {
        let secret = Secret::Resolved("supersecretapikey123456".into());
        assert!(!format!("{secret:?}").contains("supersecret"));
        assert_eq!(secret.to_string(), "supers…3456");
    }

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(redact("abc"), "****");
    }

    #[test]
    fn serializes_unresolved_as_null() {
        let json = serde_json::to_value(Secret::unresolved("X")).unwrap();
        assert!(json.is_null());
        let json = serde_json::to_value(Secret::Resolved("v".into())).unwrap();
        assert_eq!(json, serde_json::json!("v"));
    }
}
