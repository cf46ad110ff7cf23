/*
[INPUT]:  WebSocket URL, session credentials, and subscription channels
[OUTPUT]: JSON-RPC responses and channel notifications
[POS]:    WebSocket layer - authenticated real-time connection
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::{DeriveWebSocket, WsConfig};
pub use message::{IncomingFrame, SubscriptionMessage};
