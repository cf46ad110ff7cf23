/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request params with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new params are added
*/

use serde::{Deserialize, Serialize};

use super::enums::{InstrumentType, SettledTxStatus};

/// Params for `public/get_trade_history`
///
/// Unset fields are omitted from the request so the exchange applies its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicTradeHistoryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_type: Option<InstrumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub tx_status: SettledTxStatus,
}

/// Params for `private/get_trade_history`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivateTradeHistoryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
}

/// Params for `public/get_transaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionParams {
    pub transaction_id: String,
}

/// Params for calls that take no arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyParams {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyParams {
    pub currency: String,
}

/// Params for `public/get_instrument` and `public/get_ticker`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentNameParams {
    pub instrument_name: String,
}

/// Params for `public/get_instruments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentsParams {
    pub currency: String,
    pub instrument_type: InstrumentType,
    #[serde(default)]
    pub expired: bool,
}

/// Params for `public/get_all_instruments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllInstrumentsParams {
    pub instrument_type: InstrumentType,
    #[serde(default)]
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl AllInstrumentsParams {
    pub fn new(instrument_type: InstrumentType) -> Self {
        Self {
            instrument_type,
            expired: false,
            currency: None,
            page: None,
            page_size: None,
        }
    }
}

/// Params for wallet-scoped account calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletParams {
    pub wallet: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubaccountParams {
    pub subaccount_id: u64,
}

/// Params for the websocket `public/login` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    pub wallet: String,
    pub timestamp: String,
    pub signature: String,
}

/// Params for `subscribe` / `unsubscribe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub channels: Vec<String>,
}
