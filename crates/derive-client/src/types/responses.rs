/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: JSON-RPC envelopes and typed result structs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new results are added
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::{PaginationInfo, PrivateTrade, PublicTrade};
use super::validate::Validate;
use crate::http::{DeriveError, Result};

/// Raw JSON-RPC response, shared by REST and websocket transports
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcEnvelope {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// `Some(Value::Null)` when the server sent `"result": null`
    #[serde(default, deserialize_with = "present_value")]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl RpcEnvelope {
    /// Request id rendered as a string, whatever JSON type the server echoed
    pub fn id_key(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(id) => Some(id.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcErrorBody {
    /// `data` flattened to text; the exchange sends either a string or an object
    pub fn data_text(&self) -> Option<String> {
        match self.data.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTradeHistory {
    pub trades: Vec<PublicTrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl Validate for PublicTradeHistory {
    fn validate(&self) -> Result<()> {
        self.trades.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateTradeHistory {
    pub subaccount_id: u64,
    pub trades: Vec<PrivateTrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl Validate for PrivateTradeHistory {
    fn validate(&self) -> Result<()> {
        self.trades.validate()
    }
}

/// Result of `subscribe` / `unsubscribe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResult {
    pub status: BTreeMap<String, String>,
    #[serde(default)]
    pub current_subscriptions: Vec<String>,
}

impl Validate for SubscribeResult {
    fn validate(&self) -> Result<()> {
        match self.status.iter().find(|(_, status)| status.as_str() != "ok") {
            Some((channel, status)) => Err(DeriveError::Subscription {
                channel: channel.clone(),
                error: status.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Result of the websocket `public/login` call: the subaccount ids of the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginResult(pub Vec<u64>);

impl Validate for LoginResult {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
