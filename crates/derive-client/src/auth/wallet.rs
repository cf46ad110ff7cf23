/*
[INPUT]:  Message to sign and session key
[OUTPUT]: Signature string for authentication
[POS]:    Auth layer - signer abstraction
[UPDATE]: When adding new signer types or changing signature format
*/

use crate::http::Result;

/// Trait for session-key signing operations
///
/// Signing is synchronous so the same signer serves the async client, the
/// blocking client and the websocket login.
pub trait WalletSigner: Send + Sync {
    /// Checksummed address of the session key
    fn address(&self) -> &str;

    /// Sign a message and return a `0x`-prefixed hex signature
    fn sign_message(&self, message: &str) -> Result<String>;
}

/// Mock signer for testing
#[derive(Debug, Clone)]
pub struct MockWalletSigner {
    address: String,
    signature: String,
}

impl MockWalletSigner {
    /// Create a new mock signer with predetermined signature
    pub fn new(address: &str, signature: &str) -> Self {
        Self {
            address: address.to_string(),
            signature: signature.to_string(),
        }
    }
}

impl WalletSigner for MockWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    fn sign_message(&self, _message: &str) -> Result<String> {
        Ok(self.signature.clone())
    }
}
