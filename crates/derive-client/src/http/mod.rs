/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: JSON-RPC results and typed API errors
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new transports or changing client behavior
*/

pub mod blocking;
pub mod client;
pub mod error;
pub mod rpc;
pub mod signature;

pub use error::{DeriveError, ErrorKind, Result};
pub use signature::{AuthHeaders, RequestSigner};

pub use blocking::BlockingDeriveClient;
pub use client::{ClientConfig, Credentials, DeriveClient, EnvConfig};
pub use rpc::{Access, RpcCall, RpcTransport};
