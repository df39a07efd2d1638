use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use chaincfg_core::{ChainCfgError, ConfigurationError, UnresolvedSecretError};

use crate::credentials::{Credential, CredentialSet};

/// Environment variable holding the signing key for test deployments.
pub const TESTNET_PRIVATE_KEY: &str = "TESTNET_PRIVATE_KEY";
/// Environment variable overriding the Base Sepolia RPC endpoint.
pub const BASE_SEPOLIA_RPC_URL: &str = "BASE_SEPOLIA_RPC_URL";
/// Environment variable overriding the Base mainnet RPC endpoint.
pub const BASE_RPC_URL: &str = "BASE_RPC_URL";

/// Request timeout for remote HTTP networks, in milliseconds.
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 40_000;

/// Networks a deployment can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Network {
    /// Local development node.
    Localhost,
    /// Base Sepolia testnet.
    BaseSepolia,
    /// Base mainnet.
    Base,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Localhost, Network::BaseSepolia, Network::Base];

    /// Key used by the build tool's `networks` table.
    pub fn key(&self) -> &'static str {
        match self {
            Network::Localhost => "localhost",
            Network::BaseSepolia => "baseSepolia",
            Network::Base => "base",
        }
    }

    /// Human-readable label for the network.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Localhost => "Local development node",
            Network::BaseSepolia => "Base Sepolia",
            Network::Base => "Base Mainnet",
        }
    }

    /// EVM chain id.
    pub fn chain_id(&self) -> u64 {
        self.declaration().chain_id
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Network::Localhost)
    }

    /// Static declaration the resolver starts from.
    pub fn declaration(&self) -> NetworkDeclaration {
        match self {
            Network::Localhost => NetworkDeclaration {
                chain_id: 31337,
                default_url: "http://127.0.0.1:8545",
                url_variable: None,
                credential_variable: Some(TESTNET_PRIVATE_KEY),
                allows_development_key: true,
                timeout_ms: 0,
                gas: GasPolicy::Dynamic,
                logging_enabled: false,
            },
            // Legacy transactions on the testnet; mainnet uses EIP-1559.
            Network::BaseSepolia => NetworkDeclaration {
                chain_id: 84532,
                default_url: "https://sepolia.base.org",
                url_variable: Some(BASE_SEPOLIA_RPC_URL),
                credential_variable: Some(TESTNET_PRIVATE_KEY),
                allows_development_key: false,
                timeout_ms: DEFAULT_REMOTE_TIMEOUT_MS,
                gas: GasPolicy::Legacy {
                    gas_price: 2_000_000_000,
                    block_gas_limit: 25_000_000,
                },
                logging_enabled: true,
            },
            Network::Base => NetworkDeclaration {
                chain_id: 8453,
                default_url: "https://mainnet.base.org/",
                url_variable: Some(BASE_RPC_URL),
                credential_variable: None,
                allows_development_key: false,
                timeout_ms: DEFAULT_REMOTE_TIMEOUT_MS,
                gas: GasPolicy::Dynamic,
                logging_enabled: true,
            },
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Network {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "localhost" | "local-dev" => Ok(Network::Localhost),
            "baseSepolia" | "base-sepolia" | "test-network-A" => Ok(Network::BaseSepolia),
            "base" | "production-network" => Ok(Network::Base),
            other => Err(ConfigurationError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Static, environment-independent part of a network profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDeclaration {
    pub chain_id: u64,
    pub default_url: &'static str,
    /// Variable that may override `default_url`. `None` means no override.
    pub url_variable: Option<&'static str>,
    /// Variable holding the signing key. `None` means never sign locally.
    pub credential_variable: Option<&'static str>,
    /// Whether an empty credential set is replaced by the development key.
    pub allows_development_key: bool,
    pub timeout_ms: u64,
    pub gas: GasPolicy,
    pub logging_enabled: bool,
}

/// Transaction fee model for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GasPolicy {
    /// Single fixed gas price (pre EIP-1559), values in wei and gas units.
    Legacy { gas_price: u64, block_gas_limit: u64 },
    /// Base fee plus priority fee, left to the node.
    Dynamic,
}

impl GasPolicy {
    pub fn is_legacy(&self) -> bool {
        matches!(self, GasPolicy::Legacy { .. })
    }
}

/// Fully resolved parameters for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub network: Network,
    pub chain_id: u64,
    pub url: String,
    /// Whether `url` came from an environment override.
    pub url_is_custom: bool,
    /// Request timeout in milliseconds, 0 for unbounded.
    pub timeout_ms: u64,
    pub accounts: CredentialSet,
    pub gas: GasPolicy,
    pub logging_enabled: bool,
}

impl NetworkProfile {
    /// The signer for broadcast operations.
    ///
    /// Networks that declare no credential variable never have a local
    /// signer; that is a configuration error, not a missing secret.
    pub fn require_signer(&self) -> Result<&Credential, ChainCfgError> {
        if let Some(credential) = self.accounts.first() {
            return Ok(credential);
        }
        match self.network.declaration().credential_variable {
            Some(variable) => Err(UnresolvedSecretError::new(
                variable,
                format!("broadcasting to {}", self.network),
            )
            .into()),
            None => Err(ConfigurationError::NoSignerSource(self.network.to_string()).into()),
        }
    }

    /// True if any account is the publicly known development key.
    pub fn has_development_credentials(&self) -> bool {
        self.accounts.iter().any(Credential::is_development_default)
    }

    /// Copy with every private key masked.
    pub fn redacted(&self) -> Self {
        Self {
            accounts: self.accounts.redacted(),
            ..self.clone()
        }
    }
}

/// Serializes in the build tool's network directive shape. Gas overrides are
/// only present for legacy networks.
impl Serialize for NetworkProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("chainId", &self.chain_id)?;
        map.serialize_entry("url", &self.url)?;
        map.serialize_entry("timeout", &self.timeout_ms)?;
        map.serialize_entry("accounts", &self.accounts)?;
        if let GasPolicy::Legacy {
            gas_price,
            block_gas_limit,
        } = self.gas
        {
            map.serialize_entry("gasPrice", &gas_price)?;
            map.serialize_entry("blockGasLimit", &block_gas_limit)?;
        }
        map.serialize_entry("loggingEnabled", &self.logging_enabled)?;
        map.end()
    }
}
