use std::fmt;

use serde::{Serialize, Serializer};

use chaincfg_core::{ConfigurationError, redact};

/// Account #0 of the local development node. Publicly documented and
/// therefore worthless as a secret; only ever used for `localhost`.
pub const DEVELOPMENT_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

const PRIVATE_KEY_LEN: usize = 32;

/// Where a credential came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSource {
    /// Environment variable the key was read from, `None` for the built-in key.
    pub variable: Option<String>,
    /// Set only for the well-known development key.
    pub is_development_default: bool,
}

/// A signing key and its provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    source: CredentialSource,
}

impl Credential {
    /// Validate and wrap a key read from `variable`.
    pub fn from_env(variable: &str, key: &str) -> Result<Self, ConfigurationError> {
        if !is_private_key(key) {
            return Err(ConfigurationError::InvalidCredential {
                variable: variable.to_string(),
            });
        }
        Ok(Self {
            key: key.to_string(),
            source: CredentialSource {
                variable: Some(variable.to_string()),
                is_development_default: false,
            },
        })
    }

    /// The insecure, publicly known development key.
    pub fn development_default() -> Self {
        Self {
            key: DEVELOPMENT_PRIVATE_KEY.to_string(),
            source: CredentialSource {
                variable: None,
                is_development_default: true,
            },
        }
    }

    /// The raw private key, exactly as configured.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    pub fn is_development_default(&self) -> bool {
        self.source.is_development_default
    }

    fn redacted(&self) -> Self {
        Self {
            key: redact(&self.key),
            source: self.source.clone(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Ordered signing credentials for a network, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSet(Vec<Credential>);

impl CredentialSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn single(credential: Credential) -> Self {
        Self(vec![credential])
    }

    pub fn first(&self) -> Option<&Credential> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw keys in order.
    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(Credential::key).collect()
    }

    pub fn redacted(&self) -> Self {
        Self(self.0.iter().map(Credential::redacted).collect())
    }
}

/// Serialized as the plain list of keys the build tool expects.
impl Serialize for CredentialSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(Credential::key))
    }
}

/// 32 bytes of hex, with or without a `0x` prefix.
pub fn is_private_key(value: &str) -> bool {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    matches!(hex::decode(digits), Ok(bytes) if bytes.len() == PRIVATE_KEY_LEN)
}
