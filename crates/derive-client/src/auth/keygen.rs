/*
[INPUT]:  OS randomness
[OUTPUT]: Fresh session key pair (address + private key)
[POS]:    Auth layer - key generation for new session keys
[UPDATE]: When key format changes
*/

use alloy_signer_local::PrivateKeySigner;

use crate::auth::{SessionSigner, WalletSigner};

/// Freshly generated key, both halves as `0x`-prefixed hex
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub address: String,
    pub private_key: String,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Generate a random secp256k1 key pair
pub fn generate_key_pair() -> KeyPair {
    let signer = SessionSigner::from_signer(PrivateKeySigner::random());
    KeyPair {
        address: signer.address().to_string(),
        private_key: signer.private_key_hex(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_round_trips_to_address() {
        let pair = generate_key_pair();
        assert!(pair.address.starts_with("0x"));
        assert_eq!(pair.address.len(), 42);
        assert_eq!(pair.private_key.len(), 66);

        let signer = SessionSigner::new(&pair.private_key).unwrap();
        assert_eq!(signer.address(), pair.address);
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_key_pair(), generate_key_pair());
    }
}
