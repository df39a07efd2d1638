use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::ConfigurationError;

/// Immutable snapshot of environment variables, captured once and injected
/// into the resolver.
///
/// Resolution never reads the live process environment, so the same snapshot
/// always resolves to the same configuration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// An empty environment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Capture the process environment layered over a `.env` file.
    ///
    /// Values already present in the process environment win over the file.
    /// A missing file is not an error. The real process environment is left
    /// untouched.
    pub fn from_process_with_dotenv(path: &Path) -> Result<Self, ConfigurationError> {
        let mut snapshot = Self::from_dotenv_file(path)?;
        snapshot.vars.extend(Self::from_process().vars);
        Ok(snapshot)
    }

    /// Read only the variables declared in a `.env` file.
    pub fn from_dotenv_file(path: &Path) -> Result<Self, ConfigurationError> {
        let settings_error = |message: String| ConfigurationError::Settings {
            path: path.display().to_string(),
            message,
        };

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => {
                debug!(path = %path.display(), "no .env file, using process environment only");
                return Ok(Self::empty());
            }
            Err(err) => return Err(settings_error(err.to_string())),
        };

        let mut vars = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| settings_error(e.to_string()))?;
            vars.insert(key, value);
        }
        debug!(path = %path.display(), count = vars.len(), "loaded .env file");
        Ok(Self { vars })
    }

    /// Look up a variable. Empty and whitespace-only values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Return a copy with one variable set. Mostly useful in tests.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Lists variable names only; values may be private keys or API keys.
impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSnapshot")
            .field("vars", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}
