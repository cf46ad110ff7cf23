/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Derive client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod ops;
pub mod registry;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{
    KeyPair,
    MockWalletSigner,
    SessionSigner,
    WalletSigner,
    generate_key_pair,
};

// Re-export commonly used types from http
pub use http::{
    AuthHeaders,
    BlockingDeriveClient,
    ClientConfig,
    Credentials,
    DeriveClient,
    DeriveError,
    EnvConfig,
    ErrorKind,
    RequestSigner,
    Result,
    RpcCall,
    RpcTransport,
};

// Re-export sub-clients
pub use ops::{
    Account, BlockingAccount, BlockingMarkets, BlockingTrades, BlockingTransactions, Markets,
    Trades, Transactions,
};

pub use registry::{DeriveAddresses, RegistryGaps, get_prod_derive_addresses};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{DeriveWebSocket, SubscriptionMessage, WsConfig};
