/*
[INPUT]:  Temporary config files and injected environment maps
[OUTPUT]: Test results for configuration layering
[POS]:    Integration tests - CLI configuration
[UPDATE]: When configuration options change
*/

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use derive_cli::CliConfig;
use derive_client::Environment;
use tokio_test::assert_ok;

fn write_config(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("derive-cli-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_load_from_file() {
    let path = write_config(
        "file",
        r#"
environment = "test"
wallet = "0x8772185a1516f0d61fC1c2524926BfC69F95d698"
subaccount_id = 30769
timeout_secs = 5
"#,
    );

    let config = assert_ok!(CliConfig::load_with_env(Some(&path), env(&[])));
    assert_eq!(config.environment, Environment::Test);
    assert_eq!(
        config.wallet.as_deref(),
        Some("0x8772185a1516f0d61fC1c2524926BfC69F95d698")
    );
    assert_eq!(config.subaccount_id, Some(30769));
    assert_eq!(config.timeout_secs, 5);
    assert!(config.session_key.is_none());
    assert_eq!(
        config.endpoints().base_url,
        "https://api-demo.lyra.finance"
    );
}

#[test]
fn test_environment_overrides_file() {
    let path = write_config("override", "environment = \"test\"\nsubaccount_id = 1\n");

    let config = assert_ok!(CliConfig::load_with_env(
        Some(&path),
        env(&[
            ("DERIVE_ENVIRONMENT", "prod"),
            ("DERIVE_SUBACCOUNT_ID", "42"),
            ("DERIVE_SESSION_KEY", "0xabc"),
        ])
    ));
    assert_eq!(config.environment, Environment::Prod);
    assert_eq!(config.subaccount_id, Some(42));
    assert_eq!(config.session_key.as_deref(), Some("0xabc"));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let path = std::env::temp_dir().join("derive-cli-does-not-exist/config.toml");
    assert!(CliConfig::load_with_env(Some(&path), env(&[])).is_err());
}

#[test]
fn test_invalid_environment_is_error() {
    let path = write_config("invalid", "environment = \"staging\"\n");
    assert!(CliConfig::load_with_env(Some(&path), env(&[])).is_err());
}
