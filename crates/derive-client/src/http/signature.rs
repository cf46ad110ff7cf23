/*
[INPUT]:  Wallet address, session signer, and current time
[OUTPUT]: Signed auth headers (X-Lyra*) and websocket login params
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use std::fmt;
use std::sync::Arc;

use chrono::Utc;

use crate::auth::WalletSigner;
use crate::http::Result;
use crate::types::LoginParams;

pub const HEADER_WALLET: &str = "X-LyraWallet";
pub const HEADER_TIMESTAMP: &str = "X-LyraTimestamp";
pub const HEADER_SIGNATURE: &str = "X-LyraSignature";

/// Headers attached to every private REST call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub wallet: String,
    pub timestamp: String,
    pub signature: String,
}

impl AuthHeaders {
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_WALLET, self.wallet.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// Signs the current timestamp on behalf of a Derive wallet
///
/// `wallet` is the smart-contract wallet; the signer holds the session key
/// registered against it.
#[derive(Clone)]
pub struct RequestSigner {
    wallet: String,
    signer: Arc<dyn WalletSigner>,
}

impl RequestSigner {
    /// Create a new request signer with the given session signer
    pub fn new(wallet: impl Into<String>, signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            wallet: wallet.into(),
            signer,
        }
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn session_address(&self) -> &str {
        self.signer.address()
    }

    /// Headers for a private REST call signed now
    pub fn auth_headers(&self) -> Result<AuthHeaders> {
        self.auth_headers_at(Utc::now().timestamp_millis())
    }

    /// Format: the decimal millisecond timestamp, EIP-191 signed
    pub fn auth_headers_at(&self, timestamp_ms: i64) -> Result<AuthHeaders> {
        let timestamp = timestamp_ms.to_string();
        let signature = self.signer.sign_message(&timestamp)?;
        Ok(AuthHeaders {
            wallet: self.wallet.clone(),
            timestamp,
            signature,
        })
    }

    /// Params for the websocket `public/login` call signed now
    pub fn login_params(&self) -> Result<LoginParams> {
        self.login_params_at(Utc::now().timestamp_millis())
    }

    pub fn login_params_at(&self, timestamp_ms: i64) -> Result<LoginParams> {
        let headers = self.auth_headers_at(timestamp_ms)?;
        Ok(LoginParams {
            wallet: headers.wallet,
            timestamp: headers.timestamp,
            signature: headers.signature,
        })
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("wallet", &self.wallet)
            .field("session_address", &self.signer.address())
            .finish()
    }
}
