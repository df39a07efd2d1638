use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use chaincfg_core::{ConfigurationError, EnvSnapshot, Settings};

use crate::compiler::CompilerProfile;
use crate::credentials::{Credential, CredentialSet};
use crate::directive::ProjectConfig;
use crate::explorer::ExplorerMapping;
use crate::export::ExportPolicy;
use crate::lint::{LintRule, lint_rules};
use crate::network::{Network, NetworkDeclaration, NetworkProfile};
use crate::rpc::resolve_endpoint;

/// Builds the project configuration from static declarations and an
/// injected environment snapshot.
///
/// Every method is a pure function of the snapshot and settings captured at
/// construction: calling it twice yields equal results.
/// `Debug` output lists variable names only, never their values.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    env: EnvSnapshot,
    settings: Settings,
}

impl ConfigResolver {
    pub fn new(env: EnvSnapshot) -> Self {
        Self::with_settings(env, Settings::default())
    }

    pub fn with_settings(env: EnvSnapshot, settings: Settings) -> Self {
        Self { env, settings }
    }

    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resolve_compiler_profile(&self) -> CompilerProfile {
        CompilerProfile::default()
    }

    /// Resolve the profile for a network given by name or alias.
    pub fn resolve_network_profile(&self, name: &str) -> Result<NetworkProfile, ConfigurationError> {
        self.resolve_network(name.parse()?)
    }

    pub fn resolve_network(&self, network: Network) -> Result<NetworkProfile, ConfigurationError> {
        let decl = network.declaration();
        let endpoint = resolve_endpoint(&self.env, decl.url_variable, decl.default_url)?;
        let accounts = self.resolve_credentials(network, &decl)?;

        info!(
            network = %network,
            chain_id = decl.chain_id,
            custom_url = endpoint.is_custom,
            accounts = accounts.len(),
            "resolved network profile"
        );

        Ok(NetworkProfile {
            network,
            chain_id: decl.chain_id,
            url: endpoint.url,
            url_is_custom: endpoint.is_custom,
            timeout_ms: decl.timeout_ms,
            accounts,
            gas: decl.gas,
            logging_enabled: decl.logging_enabled,
        })
    }

    /// Resolve every known network, checking chain ids are unique.
    pub fn resolve_networks(&self) -> Result<BTreeMap<Network, NetworkProfile>, ConfigurationError> {
        let mut profiles: BTreeMap<Network, NetworkProfile> = BTreeMap::new();
        for network in Network::ALL {
            let profile = self.resolve_network(network)?;
            if let Some(existing) = profiles.values().find(|p| p.chain_id == profile.chain_id) {
                return Err(ConfigurationError::DuplicateChainId {
                    chain_id: profile.chain_id,
                    first: existing.network.to_string(),
                    second: network.to_string(),
                });
            }
            profiles.insert(network, profile);
        }
        Ok(profiles)
    }

    /// Resolve the verification endpoints for a network given by name.
    ///
    /// A missing API key is not an error here; it surfaces when the key is
    /// required.
    pub fn resolve_explorer_mapping(&self, name: &str) -> Result<ExplorerMapping, ConfigurationError> {
        let mapping = ExplorerMapping::resolve(name.parse()?, &self.env)?;
        if !mapping.api_key.is_resolved() {
            debug!(network = %mapping.network, "explorer API key not configured");
        }
        Ok(mapping)
    }

    /// Explorer mappings for every network that has one.
    ///
    /// Networks without an explorer are left out; any other failure aborts.
    pub fn resolve_verification(
        &self,
    ) -> Result<BTreeMap<Network, ExplorerMapping>, ConfigurationError> {
        let mut mappings = BTreeMap::new();
        for network in Network::ALL {
            match ExplorerMapping::resolve(network, &self.env) {
                Ok(mapping) => {
                    mappings.insert(network, mapping);
                }
                Err(ConfigurationError::NoExplorer(_)) => {
                    debug!(network = %network, "no explorer, skipping verification entry");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(mappings)
    }

    pub fn resolve_export_policy(&self) -> ExportPolicy {
        ExportPolicy::default()
    }

    /// The single authoritative lint declaration selected in settings.
    pub fn resolve_lint_rules(&self) -> Vec<LintRule> {
        lint_rules(self.settings.lint.rule_set)
    }

    /// Resolve and validate the whole configuration.
    pub fn resolve(&self) -> Result<ProjectConfig, ConfigurationError> {
        let config = ProjectConfig {
            compiler: self.resolve_compiler_profile(),
            networks: self.resolve_networks()?,
            verification: self.resolve_verification()?,
            export: self.resolve_export_policy(),
            lint: self.resolve_lint_rules(),
        };
        config.validate()?;
        Ok(config)
    }

    fn resolve_credentials(
        &self,
        network: Network,
        decl: &NetworkDeclaration,
    ) -> Result<CredentialSet, ConfigurationError> {
        let configured = decl
            .credential_variable
            .and_then(|var| self.env.get(var).map(|key| (var, key)));

        match configured {
            Some((variable, key)) => Ok(CredentialSet::single(Credential::from_env(variable, key)?)),
            None if decl.allows_development_key => {
                warn!(
                    network = %network,
                    "no signing key configured, using the public development key"
                );
                Ok(CredentialSet::single(Credential::development_default()))
            }
            None => {
                debug!(network = %network, "no signing key configured");
                Ok(CredentialSet::empty())
            }
        }
    }
}
