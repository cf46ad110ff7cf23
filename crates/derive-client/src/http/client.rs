/*
[INPUT]:  HTTP configuration (environment, base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client carrying JSON-RPC calls to Derive
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::auth::SessionSigner;
use crate::http::rpc::{self, RpcCall, RpcTransport};
use crate::http::{DeriveError, RequestSigner, Result};
use crate::types::Environment;

/// Base URLs for Derive API
const PROD_BASE_URL: &str = "https://api.lyra.finance";
const PROD_WS_URL: &str = "wss://api.lyra.finance/ws";
const TEST_BASE_URL: &str = "https://api-demo.lyra.finance";
const TEST_WS_URL: &str = "wss://api-demo.lyra.finance/ws";

/// Endpoints of one Derive deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub base_url: String,
    pub ws_url: String,
}

impl EnvConfig {
    pub fn for_environment(env: Environment) -> Self {
        let (base_url, ws_url) = match env {
            Environment::Prod => (PROD_BASE_URL, PROD_WS_URL),
            Environment::Test => (TEST_BASE_URL, TEST_WS_URL),
        };
        Self {
            base_url: base_url.to_string(),
            ws_url: ws_url.to_string(),
        }
    }
}

impl From<Environment> for EnvConfig {
    fn from(env: Environment) -> Self {
        Self::for_environment(env)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Clone)]
pub struct Credentials {
    /// Derive smart-contract wallet address
    pub wallet: String,
    /// Hex private key of a session key registered for `wallet`
    pub session_key: String,
    pub subaccount_id: Option<u64>,
}

impl Credentials {
    pub fn new(wallet: impl Into<String>, session_key: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
            session_key: session_key.into(),
            subaccount_id: None,
        }
    }

    pub fn with_subaccount(mut self, subaccount_id: u64) -> Self {
        self.subaccount_id = Some(subaccount_id);
        self
    }

    /// Build a request signer from the session key
    pub fn request_signer(&self) -> Result<RequestSigner> {
        if self.wallet.trim().is_empty() {
            return Err(DeriveError::Config("wallet address is empty".to_string()));
        }
        let session = SessionSigner::new(&self.session_key)?;
        Ok(RequestSigner::new(self.wallet.clone(), Arc::new(session)))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("wallet", &self.wallet)
            .field("session_key", &"<redacted>")
            .field("subaccount_id", &self.subaccount_id)
            .finish()
    }
}

/// Signer plus default subaccount, shared by the HTTP clients
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) signer: RequestSigner,
    pub(crate) subaccount_id: Option<u64>,
}

impl Session {
    pub(crate) fn from_credentials(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            signer: credentials.request_signer()?,
            subaccount_id: credentials.subaccount_id,
        })
    }
}

/// Resolve the session for a call, failing before any I/O when it is missing
pub(crate) fn session_for<'a>(
    session: Option<&'a Session>,
    call: &RpcCall,
) -> Result<Option<&'a Session>> {
    if !call.is_private() {
        return Ok(None);
    }
    session.map(Some).ok_or_else(|| {
        DeriveError::unauthorized(format!(
            "{} requires credentials; none configured",
            call.method
        ))
    })
}

/// Ensure the base URL ends with '/' so method paths join beneath it
pub(crate) fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut base = base_url.trim().trim_end_matches('/').to_string();
    base.push('/');
    Ok(Url::parse(&base)?)
}

/// Async HTTP client for Derive API
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct DeriveClient {
    http_client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl DeriveClient {
    /// Create a new client against production with default configuration
    pub fn new() -> Result<Self> {
        Self::for_environment(Environment::Prod)
    }

    pub fn for_environment(env: Environment) -> Result<Self> {
        Self::with_config(ClientConfig::default(), env)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, env: Environment) -> Result<Self> {
        Self::with_config_and_base_url(config, &EnvConfig::for_environment(env).base_url)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            session: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        self.session = Some(Session::from_credentials(credentials)?);
        Ok(())
    }

    pub fn with_credentials(mut self, credentials: &Credentials) -> Result<Self> {
        self.set_credentials(credentials)?;
        Ok(self)
    }

    /// Authenticate with an already built signer (e.g. a hardware or mock signer)
    pub fn set_signer(&mut self, signer: RequestSigner, subaccount_id: Option<u64>) {
        self.session = Some(Session {
            signer,
            subaccount_id,
        });
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for a JSON-RPC method
    fn method_url(&self, method: &str) -> Result<Url> {
        Ok(self.base_url.join(method)?)
    }
}

#[async_trait]
impl RpcTransport for DeriveClient {
    async fn request(&self, call: RpcCall) -> Result<Value> {
        let session = session_for(self.session.as_ref(), &call)?;
        let url = self.method_url(call.method)?;

        let mut request = self.http_client.post(url).json(&call.params);
        if let Some(session) = session {
            for (name, value) in session.signer.auth_headers()?.pairs() {
                request = request.header(name, value);
            }
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(
            method = call.method,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "derive rpc response"
        );

        rpc::parse_http_body(call.method, status, &body)
    }

    fn default_subaccount(&self) -> Option<u64> {
        self.session.as_ref().and_then(|session| session.subaccount_id)
    }

    fn wallet(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.signer.wallet())
    }
}
