use serde::Serialize;

use chaincfg_core::{ConfigurationError, EnvSnapshot, Secret, UnresolvedSecretError};

use crate::network::Network;

/// Environment variable holding the block explorer API key for Base networks.
pub const BASE_ETHERSCAN_API_KEY: &str = "BASE_ETHERSCAN_API_KEY";

/// Verification service endpoints and credential for one network.
///
/// Serializes as `{apiKey, apiURL, browserURL}`; the chain id already lives
/// in the network directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerMapping {
    #[serde(skip)]
    pub network: Network,
    #[serde(skip)]
    pub chain_id: u64,
    pub api_key: Secret,
    #[serde(rename = "apiURL")]
    pub api_url: String,
    #[serde(rename = "browserURL")]
    pub browser_url: String,
    /// The verification tool has no built-in entry for this chain and must be
    /// given the URLs explicitly.
    #[serde(skip)]
    pub is_custom_chain: bool,
}

impl ExplorerMapping {
    /// Build the mapping for `network`. A missing API key is recorded as
    /// unresolved rather than failing.
    ///
    /// Only Base Sepolia is wired for verification. `BASE_ETHERSCAN_API_KEY`
    /// is a testnet key and is not reused for mainnet.
    pub fn resolve(network: Network, env: &EnvSnapshot) -> Result<Self, ConfigurationError> {
        let (api_url, browser_url, is_custom_chain) = match network {
            Network::BaseSepolia => (
                "https://api-sepolia.basescan.org/api",
                "https://sepolia.basescan.org/",
                true,
            ),
            Network::Base | Network::Localhost => {
                return Err(ConfigurationError::NoExplorer(network.to_string()));
            }
        };

        let api_key = match env.get(BASE_ETHERSCAN_API_KEY) {
            Some(key) => Secret::Resolved(key.to_string()),
            None => Secret::unresolved(BASE_ETHERSCAN_API_KEY),
        };

        Ok(Self {
            network,
            chain_id: network.chain_id(),
            api_key,
            api_url: api_url.to_string(),
            browser_url: browser_url.to_string(),
            is_custom_chain,
        })
    }

    /// The API key, for a verification attempt on this network.
    pub fn require_api_key(&self) -> Result<&str, UnresolvedSecretError> {
        self.api_key
            .require(&format!("contract verification on {}", self.network))
    }

    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.redacted(),
            ..self.clone()
        }
    }
}
