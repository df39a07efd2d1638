use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Default settings file name, looked up in the project root.
pub const SETTINGS_FILE: &str = "chaincfg.toml";

/// Default log filter when neither `RUST_LOG` nor the settings file set one.
pub const DEFAULT_LOG_FILTER: &str = "info,chaincfg_core=info,chaincfg_resolver=info";

/// Project-level settings stored in `chaincfg.toml`.
///
/// Every field has a default, so an absent file or an empty table is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lint: LintSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSettings {
    pub rule_set: LintRuleSet,
}

/// Which of the two lint declarations is authoritative.
///
/// Only one is ever exposed; they are never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintRuleSet {
    /// Lint contracts with solhint, reformat contracts, tests and scripts.
    #[default]
    LintOnly,
    /// Reformat contracts before linting them, reformat tests and scripts.
    FormatThenLint,
}

impl LintRuleSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LintOnly => "lint-only",
            Self::FormatThenLint => "format-then-lint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. A missing file yields defaults.
    ///
    /// Emits no log events: settings are read before the subscriber exists.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigurationError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let settings_error = |message: String| ConfigurationError::Settings {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| settings_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| settings_error(e.to_string()))
    }
}
