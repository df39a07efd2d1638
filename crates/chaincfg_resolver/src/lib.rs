//! Build and deploy configuration for the contracts project: compiler
//! settings, per-network deployment parameters, verification endpoints, ABI
//! export and lint rules, resolved from static declarations and an injected
//! environment snapshot.

pub mod compiler;
pub mod credentials;
pub mod directive;
pub mod explorer;
pub mod export;
pub mod lint;
pub mod network;
pub mod resolver;
pub mod rpc;

// Re-export primary types for convenient access.
pub use compiler::{CompilerProfile, OptimizerSettings, OutputArtifact};
pub use credentials::{Credential, CredentialSet, CredentialSource, DEVELOPMENT_PRIVATE_KEY};
pub use directive::ProjectConfig;
pub use explorer::{BASE_ETHERSCAN_API_KEY, ExplorerMapping};
pub use export::{ExportMatcher, ExportPolicy};
pub use lint::{GlobMatcher, LintRule, LintStep, LintTask, LintTool, lint_plan, lint_rules};
pub use network::{GasPolicy, Network, NetworkProfile};
pub use resolver::ConfigResolver;
pub use rpc::validate_url;
