use std::collections::HashSet;

use chaincfg_core::{ChainCfgError, ConfigurationError, EnvSnapshot, ErrorCategory, Secret, Settings};
use chaincfg_resolver::*;

const TEST_KEY: &str = "0xabc0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff8";

fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
    EnvSnapshot::from_pairs(pairs.iter().copied())
}

#[test]
fn chain_ids_are_positive_and_unique_across_profiles() {
    let resolver = ConfigResolver::new(EnvSnapshot::empty());
    let mut seen = HashSet::new();
    for name in ["local-dev", "test-network-A", "production-network"] {
        let profile = resolver.resolve_network_profile(name).unwrap();
        assert!(profile.chain_id > 0);
        assert!(seen.insert(profile.chain_id), "duplicate chain id {}", profile.chain_id);
    }
}

#[test]
fn local_dev_substitutes_development_key_only_when_unset() {
    let unset = ConfigResolver::new(EnvSnapshot::empty())
        .resolve_network_profile("local-dev")
        .unwrap();
    assert_eq!(unset.accounts.len(), 1);
    let credential = unset.accounts.first().unwrap();
    assert_eq!(credential.key(), DEVELOPMENT_PRIVATE_KEY);
    assert!(credential.source().is_development_default);

    let set = ConfigResolver::new(env(&[("TESTNET_PRIVATE_KEY", TEST_KEY)]))
        .resolve_network_profile("local-dev")
        .unwrap();
    assert_eq!(set.accounts.keys(), vec![TEST_KEY]);
}

#[test]
fn test_network_has_no_substitution() {
    let profile = ConfigResolver::new(EnvSnapshot::empty())
        .resolve_network_profile("test-network-A")
        .unwrap();
    assert!(profile.accounts.is_empty());

    let err = profile.require_signer().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UnresolvedSecret);
    assert!(err.to_string().contains("TESTNET_PRIVATE_KEY"));
}

#[test]
fn mainnet_signer_error_does_not_blame_testnet_key() {
    let profile = ConfigResolver::new(env(&[("TESTNET_PRIVATE_KEY", TEST_KEY)]))
        .resolve_network_profile("base")
        .unwrap();

    let err = profile.require_signer().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(matches!(
        err,
        ChainCfgError::Configuration(ConfigurationError::NoSignerSource(ref n)) if n == "base"
    ));
    assert!(!err.user_message().contains("TESTNET_PRIVATE_KEY"));
}

#[test]
fn unknown_network_fails_with_configuration_error() {
    let resolver = ConfigResolver::new(EnvSnapshot::empty());
    let err = resolver.resolve_network_profile("optimism").unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownNetwork(_)));

    let err = resolver.resolve_explorer_mapping("optimism").unwrap_err();
    let err: ChainCfgError = err.into();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn resolution_is_idempotent() {
    let resolver = ConfigResolver::new(env(&[
        ("TESTNET_PRIVATE_KEY", TEST_KEY),
        ("BASE_RPC_URL", "https://base.example.com"),
        ("BASE_ETHERSCAN_API_KEY", "KEY123"),
    ]));

    assert_eq!(resolver.resolve_compiler_profile(), resolver.resolve_compiler_profile());
    for network in Network::ALL {
        assert_eq!(
            resolver.resolve_network(network).unwrap(),
            resolver.resolve_network(network).unwrap()
        );
    }
    assert_eq!(
        resolver.resolve_explorer_mapping("baseSepolia").unwrap(),
        resolver.resolve_explorer_mapping("baseSepolia").unwrap()
    );
    assert_eq!(resolver.resolve_export_policy(), resolver.resolve_export_policy());
    assert_eq!(resolver.resolve_lint_rules(), resolver.resolve_lint_rules());
    assert_eq!(resolver.resolve().unwrap(), resolver.resolve().unwrap());
}

#[test]
fn missing_explorer_key_is_unresolved_marker() {
    let mapping = ConfigResolver::new(EnvSnapshot::empty())
        .resolve_explorer_mapping("test-network-A")
        .unwrap();
    assert!(matches!(mapping.api_key, Secret::Unresolved { .. }));
    assert_eq!(mapping.api_key.expose(), None);

    let err: ChainCfgError = mapping.require_api_key().unwrap_err().into();
    assert_eq!(err.category(), ErrorCategory::UnresolvedSecret);
}

#[test]
fn compiler_profile_ignores_environment() {
    let noisy = env(&[
        ("TESTNET_PRIVATE_KEY", TEST_KEY),
        ("BASE_SEPOLIA_RPC_URL", "https://x.example.com"),
    ]);
    for resolver in [ConfigResolver::new(EnvSnapshot::empty()), ConfigResolver::new(noisy)] {
        let profile = resolver.resolve_compiler_profile();
        assert!(profile.optimizer.enabled);
        assert_eq!(profile.optimizer.runs, 500);
        assert!(profile.requests(OutputArtifact::StorageLayout));
    }
}

#[test]
fn key_set_and_rpc_unset_end_to_end() {
    let resolver = ConfigResolver::new(env(&[("TESTNET_PRIVATE_KEY", TEST_KEY)]));
    let profile = resolver.resolve_network_profile("test-network-A").unwrap();

    assert_eq!(profile.accounts.keys(), vec![TEST_KEY]);
    assert_eq!(profile.url, "https://sepolia.base.org");
    assert!(!profile.url_is_custom);
    assert_eq!(profile.require_signer().unwrap().key(), TEST_KEY);
}

#[test]
fn full_directive_shape() {
    let config = ConfigResolver::new(env(&[("BASE_ETHERSCAN_API_KEY", "KEY123")]))
        .resolve()
        .unwrap();
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["solidity"]["settings"]["optimizer"]["runs"], 500);
    assert_eq!(json["networks"]["localhost"]["chainId"], 31337);
    assert_eq!(json["networks"]["localhost"]["timeout"], 0);
    assert_eq!(json["networks"]["baseSepolia"]["blockGasLimit"], 25_000_000);
    assert_eq!(json["networks"]["baseSepolia"]["loggingEnabled"], true);
    assert_eq!(json["networks"]["base"]["accounts"], serde_json::json!([]));
    assert_eq!(json["etherscan"]["baseSepolia"]["apiKey"], "KEY123");
    assert_eq!(json["abiExporter"]["runOnCompile"], true);
    assert_eq!(json["lintStaged"].as_array().map(Vec::len), Some(2));
}

#[test]
fn directive_serializes_to_toml() {
    let config = ConfigResolver::new(EnvSnapshot::empty()).resolve().unwrap();
    let rendered = toml::to_string(&config.redacted()).unwrap();
    assert!(rendered.contains("chainId = 84532"));
    // Unresolved API keys are omitted rather than written as empty strings.
    assert!(!rendered.contains("apiKey = \"\""));
}

#[test]
fn settings_select_single_lint_declaration() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("chaincfg.toml");
    std::fs::write(&path, "[lint]\nrule_set = \"format-then-lint\"\n").unwrap();

    let settings = Settings::load_from_path(&path).unwrap();
    let rules = ConfigResolver::with_settings(EnvSnapshot::empty(), settings).resolve_lint_rules();
    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules[0].commands(),
        vec![
            "prettier --write --plugin=prettier-plugin-solidity",
            "solhint --max-warnings 0"
        ]
    );
}

#[test]
fn dotenv_values_feed_resolution() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(".env");
    std::fs::write(
        &path,
        format!("TESTNET_PRIVATE_KEY={TEST_KEY}\nBASE_SEPOLIA_RPC_URL=https://rpc.example.org\n"),
    )
    .unwrap();

    let env = EnvSnapshot::from_dotenv_file(&path).unwrap();
    let profile = ConfigResolver::new(env).resolve_network(Network::BaseSepolia).unwrap();
    assert_eq!(profile.url, "https://rpc.example.org");
    assert!(profile.url_is_custom);
    assert_eq!(profile.accounts.keys(), vec![TEST_KEY]);
}
