use regex::Regex;
use serde::Serialize;

use chaincfg_core::ConfigurationError;

/// Which compiled artifacts get an exported ABI file, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPolicy {
    /// Export after every compilation.
    pub run_on_compile: bool,
    /// Remove previously exported files first.
    pub clear: bool,
    /// Output directory.
    pub path: String,
    /// Write every ABI into `path` directly instead of mirroring source dirs.
    pub flat: bool,
    /// Patterns a fully-qualified contract name must match (any of).
    pub only: Vec<String>,
    /// Patterns that exclude a contract even if `only` matched.
    pub except: Vec<String>,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            run_on_compile: true,
            clear: true,
            path: "./abi".into(),
            flat: false,
            only: vec!["src/".into()],
            except: vec!["src/flattened-contracts".into()],
        }
    }
}

impl ExportPolicy {
    /// Compile the include/exclude patterns.
    pub fn matcher(&self) -> Result<ExportMatcher, ConfigurationError> {
        Ok(ExportMatcher {
            only: compile_all(&self.only)?,
            except: compile_all(&self.except)?,
        })
    }
}

/// Compiled form of an [`ExportPolicy`]'s patterns.
#[derive(Debug, Clone)]
pub struct ExportMatcher {
    only: Vec<Regex>,
    except: Vec<Regex>,
}

impl ExportMatcher {
    /// Whether the contract `name` (e.g. `src/Token.sol:Token`) is exported.
    ///
    /// Patterns are unanchored: `src/` matches anywhere in the name.
    pub fn selects(&self, name: &str) -> bool {
        if !self.only.is_empty() && !self.only.iter().any(|re| re.is_match(name)) {
            return false;
        }
        !self.except.iter().any(|re| re.is_match(name))
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ConfigurationError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ConfigurationError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_values() {
        let policy = ExportPolicy::default();
        assert!(policy.run_on_compile);
        assert!(policy.clear);
        assert_eq!(policy.only, vec!["src/"]);
        assert_eq!(policy.except, vec!["src/flattened-contracts"]);
    }

    #[test]
    fn selects_production_sources_only() {
        let matcher = ExportPolicy::default().matcher().unwrap();
        assert!(matcher.selects("src/Token.sol:Token"));
        assert!(matcher.selects("src/governance/Vault.sol:Vault"));
        assert!(!matcher.selects("test/Token.t.sol:TokenTest"));
        assert!(!matcher.selects("@openzeppelin/contracts/token/ERC20/ERC20.sol:ERC20"));
    }

    #[test]
    fn flattened_contracts_are_excluded() {
        let matcher = ExportPolicy::default().matcher().unwrap();
        assert!(!matcher.selects("src/flattened-contracts/Token.sol:Token"));
    }

    #[test]
    fn empty_only_selects_everything_not_excepted() {
        let policy = ExportPolicy {
            only: Vec::new(),
            ..ExportPolicy::default()
        };
        let matcher = policy.matcher().unwrap();
        assert!(matcher.selects("lib/Foo.sol:Foo"));
        assert!(!matcher.selects("src/flattened-contracts/Foo.sol:Foo"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let policy = ExportPolicy {
            only: vec!["src/(".into()],
            ..ExportPolicy::default()
        };
        let err = policy.matcher().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { ref pattern, .. } if pattern == "src/("));
    }

    #[test]
    fn serializes_as_export_directive() {
        let json = serde_json::to_value(ExportPolicy::default()).unwrap();
        assert_eq!(json["runOnCompile"], true);
        assert_eq!(json["clear"], true);
        assert_eq!(json["only"], serde_json::json!(["src/"]));
        assert_eq!(json["except"], serde_json::json!(["src/flattened-contracts"]));
    }
}
