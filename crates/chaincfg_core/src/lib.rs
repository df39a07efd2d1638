pub mod env;
pub mod error;
pub mod logging;
pub mod secret;
pub mod settings;

pub use env::EnvSnapshot;
pub use error::{ChainCfgError, ConfigurationError, ErrorCategory, UnresolvedSecretError};
pub use secret::{Secret, redact};
pub use settings::{LintRuleSet, Settings};
