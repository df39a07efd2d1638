use std::collections::BTreeMap;

use serde::Serialize;

use chaincfg_core::ConfigurationError;

use crate::compiler::CompilerProfile;
use crate::explorer::ExplorerMapping;
use crate::export::ExportPolicy;
use crate::lint::LintRule;
use crate::network::{Network, NetworkProfile};
use crate::rpc::validate_url;

/// The complete resolved configuration handed to external tooling.
///
/// Field names follow the consuming tools: `solidity` for the compiler,
/// `etherscan` for verification, `abiExporter` and `lintStaged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    #[serde(rename = "solidity")]
    pub compiler: CompilerProfile,
    pub networks: BTreeMap<Network, NetworkProfile>,
    #[serde(rename = "etherscan")]
    pub verification: BTreeMap<Network, ExplorerMapping>,
    #[serde(rename = "abiExporter")]
    pub export: ExportPolicy,
    #[serde(rename = "lintStaged")]
    pub lint: Vec<LintRule>,
}

impl ProjectConfig {
    /// Check cross-field invariants. Run by the resolver before returning.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (network, profile) in &self.networks {
            if profile.chain_id == 0 {
                return Err(ConfigurationError::MissingValue(format!(
                    "chain id for {network}"
                )));
            }
            if !validate_url(&profile.url) {
                return Err(ConfigurationError::InvalidUrl {
                    variable: format!("networks.{network}.url"),
                    value: profile.url.clone(),
                });
            }
            if profile.has_development_credentials() && !network.is_local() {
                return Err(ConfigurationError::InvalidCredential {
                    variable: format!("networks.{network}.accounts"),
                });
            }
        }

        for (network, mapping) in &self.verification {
            let declared = self.networks.get(network).map(|p| p.chain_id);
            if declared.is_some_and(|id| id != mapping.chain_id) {
                return Err(ConfigurationError::MissingValue(format!(
                    "explorer chain id for {network} does not match the network"
                )));
            }
        }

        self.export.matcher()?;
        for rule in &self.lint {
            rule.matcher()?;
        }
        Ok(())
    }

    /// Copy with private keys and API keys masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            compiler: self.compiler.clone(),
            networks: self
                .networks
                .iter()
                .map(|(n, p)| (*n, p.redacted()))
                .collect(),
            verification: self
                .verification
                .iter()
                .map(|(n, m)| (*n, m.redacted()))
                .collect(),
            export: self.export.clone(),
            lint: self.lint.clone(),
        }
    }
}
