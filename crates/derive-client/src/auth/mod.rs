/*
[INPUT]:  Session key and wallet address
[OUTPUT]: Signatures, auth headers, login params, and fresh key pairs
[POS]:    Auth layer - handles Derive API authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod keygen;
pub mod session;
pub mod wallet;

pub use keygen::{KeyPair, generate_key_pair};
pub use session::SessionSigner;
pub use wallet::{MockWalletSigner, WalletSigner};
