/*
[INPUT]:  HTTP configuration (environment, base URL, timeouts, credentials)
[OUTPUT]: Blocking JSON-RPC calls with the same semantics as DeriveClient
[POS]:    HTTP layer - synchronous calling convention
[UPDATE]: When DeriveClient gains options that the blocking client must mirror
*/

use std::time::Instant;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::http::client::{Session, normalize_base_url, session_for};
use crate::http::rpc::{self, RpcCall};
use crate::http::{ClientConfig, Credentials, EnvConfig, RequestSigner, Result};
use crate::types::Environment;

/// Blocking HTTP client for Derive API
///
/// Backed by `reqwest::blocking`; do not call it from inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingDeriveClient {
    http_client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl BlockingDeriveClient {
    pub fn new() -> Result<Self> {
        Self::for_environment(Environment::Prod)
    }

    pub fn for_environment(env: Environment) -> Result<Self> {
        Self::with_config(ClientConfig::default(), env)
    }

    pub fn with_config(config: ClientConfig, env: Environment) -> Result<Self> {
        Self::with_config_and_base_url(config, &EnvConfig::for_environment(env).base_url)
    }

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

    pub fn set_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        self.session = Some(Session::from_credentials(credentials)?);
        Ok(())
    }

    pub fn with_credentials(mut self, credentials: &Credentials) -> Result<Self> {
        self.set_credentials(credentials)?;
        Ok(self)
    }

    pub fn set_signer(&mut self, signer: RequestSigner, subaccount_id: Option<u64>) {
        self.session = Some(Session {
            signer,
            subaccount_id,
        });
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn default_subaccount(&self) -> Option<u64> {
        self.session.as_ref().and_then(|session| session.subaccount_id)
    }

    pub fn wallet(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.signer.wallet())
    }

    /// Send a call and return the raw `result` payload
    pub fn request(&self, call: RpcCall) -> Result<Value> {
        let session = session_for(self.session.as_ref(), &call)?;
        let url = self.base_url.join(call.method)?;

        let mut request = self.http_client.post(url).json(&call.params);
        if let Some(session) = session {
            for (name, value) in session.signer.auth_headers()?.pairs() {
                request = request.header(name, value);
            }
        }

        let started = Instant::now();
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        debug!(
            method = call.method,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "derive rpc response (blocking)"
        );

        rpc::parse_http_body(call.method, status, &body)
    }
}
