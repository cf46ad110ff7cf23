/*
[INPUT]:  Optional TOML/YAML/JSON file plus DERIVE_* environment variables
[OUTPUT]: Parsed CLI configuration and client settings derived from it
[POS]:    Configuration layer - credentials and endpoint selection
[UPDATE]: When adding new configuration options
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use derive_client::{ClientConfig, Credentials, EnvConfig, Environment};
use serde::{Deserialize, Serialize};

/// Prefix of environment variables read by the CLI (e.g. `DERIVE_WALLET`)
pub const ENV_PREFIX: &str = "DERIVE";

/// Top-level configuration for the Derive CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Deployment to talk to: "prod" or "test"
    #[serde(default)]
    pub environment: Environment,
    /// Derive smart-contract wallet address
    #[serde(default)]
    pub wallet: Option<String>,
    /// Hex private key of a session key registered for `wallet`
    #[serde(default)]
    pub session_key: Option<String>,
    /// Subaccount used by private calls that do not name one
    #[serde(default)]
    pub subaccount_id: Option<u64>,
    /// Overrides the environment's REST endpoint
    #[serde(default)]
    pub base_url: Option<String>,
    /// Overrides the environment's websocket endpoint
    #[serde(default)]
    pub ws_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            wallet: None,
            session_key: None,
            subaccount_id: None,
            base_url: None,
            ws_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// `<config dir>/derive/config.toml`, used when `--config` is not given
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("derive").join("config.toml"))
}

impl CliConfig {
    /// Load configuration from an optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as `load`, reading variables from `env` instead of the process
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                let path_str = path.to_str().context("config path must be valid utf-8")?;
                builder = builder.add_source(config::File::with_name(path_str).required(true));
            }
            None => {
                if let Some(default_path) = default_config_path()
                    && let Some(path_str) = default_path.to_str()
                {
                    builder =
                        builder.add_source(config::File::with_name(path_str).required(false));
                }
            }
        }

        let cfg = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("read configuration")?;

        cfg.try_deserialize().context("parse configuration")
    }

    /// Endpoints after applying overrides
    pub fn endpoints(&self) -> EnvConfig {
        let defaults = EnvConfig::for_environment(self.environment);
        EnvConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            ws_url: self.ws_url.clone().unwrap_or(defaults.ws_url),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }

    /// Credentials for private commands
    pub fn credentials(&self) -> Result<Credentials> {
        let wallet = self
            .wallet
            .clone()
            .context("wallet not configured (set `wallet` or DERIVE_WALLET)")?;
        let session_key = self
            .session_key
            .clone()
            .context("session key not configured (set `session_key` or DERIVE_SESSION_KEY)")?;

        let credentials = Credentials::new(wallet, session_key);
        Ok(match self.subaccount_id {
            Some(id) => credentials.with_subaccount(id),
            None => credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.endpoints().base_url, "https://api.lyra.finance");
    }

    #[test]
    fn test_credentials_require_wallet_and_key() {
        let mut config = CliConfig::default();
        let err = config.credentials().unwrap_err();
        assert!(err.to_string().contains("DERIVE_WALLET"));

        config.wallet = Some("0xWallet".to_string());
        let err = config.credentials().unwrap_err();
        assert!(err.to_string().contains("DERIVE_SESSION_KEY"));

        config.session_key = Some("0xkey".to_string());
        config.subaccount_id = Some(9);
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.subaccount_id, Some(9));
    }

    #[test]
    fn test_base_url_override() {
        let config = CliConfig {
            environment: Environment::Test,
            base_url: Some("http://127.0.0.1:8080".to_string()),
            ..Default::default()
        };
        let endpoints = config.endpoints();
        assert_eq!(endpoints.base_url, "http://127.0.0.1:8080");
        assert_eq!(endpoints.ws_url, "wss://api-demo.lyra.finance/ws");
    }
}
