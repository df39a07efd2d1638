use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Extra compiler outputs requested for every contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutputArtifact {
    #[serde(rename = "storageLayout")]
    StorageLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

/// Compiler settings shared by every build. Fully static.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerProfile {
    pub version: String,
    pub optimizer: OptimizerSettings,
    pub output_selection: Vec<OutputArtifact>,
    /// Target EVM hard fork.
    pub evm_version: String,
}

impl CompilerProfile {
    pub fn requests(&self, artifact: OutputArtifact) -> bool {
        self.output_selection.contains(&artifact)
    }
}

impl Default for CompilerProfile {
    fn default() -> Self {
        Self {
            version: "0.8.20".into(),
            optimizer: OptimizerSettings {
                enabled: true,
                runs: 500,
            },
            output_selection: vec![OutputArtifact::StorageLayout],
            evm_version: "paris".into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SolcSettings<'a> {
    optimizer: &'a OptimizerSettings,
    output_selection: BTreeMap<&'static str, BTreeMap<&'static str, &'a [OutputArtifact]>>,
    evm_version: &'a str,
}

#[derive(Serialize)]
struct SolcDirective<'a> {
    version: &'a str,
    settings: SolcSettings<'a>,
}

/// Serialized as the compiler directive: outputs are requested for every
/// contract in every source file.
impl Serialize for CompilerProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let per_contract = BTreeMap::from([("*", self.output_selection.as_slice())]);
        SolcDirective {
            version: &self.version,
            settings: SolcSettings {
                optimizer: &self.optimizer,
                output_selection: BTreeMap::from([("*", per_contract)]),
                evm_version: &self.evm_version,
            },
        }
        .serialize(serializer)
    }
}
