/*
[INPUT]:  Session private key (hex string)
[OUTPUT]: EIP-191 signatures and the session key address
[POS]:    Auth layer - session key implementation
[UPDATE]: When signing logic or address formatting changes
*/

use std::fmt;
use std::str::FromStr;

use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::auth::WalletSigner;
use crate::http::{DeriveError, Result};

/// Signs with a session key registered against a Derive smart-contract wallet
#[derive(Clone)]
pub struct SessionSigner {
    signer: PrivateKeySigner,
    address: String,
}

impl SessionSigner {
    /// Create a signer from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.trim();
        let private_key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| DeriveError::Config(format!("Invalid session key: {e}")))?;

        Ok(Self::from_signer(signer))
    }

    pub(crate) fn from_signer(signer: PrivateKeySigner) -> Self {
        let address = signer.address().to_checksum(None);
        Self { signer, address }
    }

    /// Raw private key as `0x`-prefixed hex
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signer.to_bytes()))
    }
}

impl WalletSigner for SessionSigner {
    fn address(&self) -> &str {
        &self.address
    }

    fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self
            .signer
            .sign_message_sync(message.as_bytes())
            .map_err(|e| DeriveError::Signing(e.to_string()))?;

        // r || s || v
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

impl fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
