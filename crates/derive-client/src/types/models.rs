/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust records mirroring Derive JSON payloads
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new records are added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{DeriveTxStatus, Direction, LiquidityRole, SettledTxStatus};
use super::validate::{Validate, require_non_empty};
use crate::http::{DeriveError, Result};

/// A settled trade visible to every market participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTrade {
    pub direction: Direction,
    #[serde(with = "rust_decimal::serde::str")]
    pub expected_rebate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub index_price: Decimal,
    pub instrument_name: String,
    pub liquidity_role: LiquidityRole,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub realized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub realized_pnl_excl_fees: Decimal,
    pub subaccount_id: u64,
    pub timestamp: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub trade_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub trade_fee: Decimal,
    pub trade_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub trade_price: Decimal,
    pub tx_hash: String,
    pub tx_status: SettledTxStatus,
    pub wallet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
}

impl Validate for PublicTrade {
    fn validate(&self) -> Result<()> {
        require_non_empty("PublicTrade", "trade_id", &self.trade_id)?;
        require_non_empty("PublicTrade", "instrument_name", &self.instrument_name)
    }
}

/// A fill belonging to the authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateTrade {
    pub direction: Direction,
    #[serde(with = "rust_decimal::serde::str")]
    pub expected_rebate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub index_price: Decimal,
    pub instrument_name: String,
    pub is_transfer: bool,
    pub label: String,
    pub liquidity_role: LiquidityRole,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub realized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub realized_pnl_excl_fees: Decimal,
    pub subaccount_id: u64,
    pub timestamp: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub trade_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub trade_fee: Decimal,
    pub trade_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub trade_price: Decimal,
    pub transaction_id: String,
    pub tx_status: DeriveTxStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl Validate for PrivateTrade {
    fn validate(&self) -> Result<()> {
        require_non_empty("PrivateTrade", "trade_id", &self.trade_id)?;
        require_non_empty("PrivateTrade", "instrument_name", &self.instrument_name)?;
        require_non_empty("PrivateTrade", "transaction_id", &self.transaction_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub count: u64,
    pub num_pages: u64,
}

/// Asset movement carried by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataInner {
    pub asset: String,
    pub amount: String,
    pub decimals: u32,
}

/// Signed module action submitted on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    pub data: TransactionDataInner,
    pub nonce: u64,
    pub owner: String,
    pub expiry: i64,
    pub module: String,
    pub signer: String,
    pub asset_id: String,
    pub signature: String,
    pub asset_name: String,
    pub subaccount_id: u64,
    pub is_atomic_signing: bool,
}

impl Validate for TransactionData {
    fn validate(&self) -> Result<()> {
        require_non_empty("TransactionData", "signature", &self.signature)?;
        require_non_empty("TransactionData", "asset_id", &self.asset_id)?;
        if self.data.amount.parse::<Decimal>().is_err() {
            return Err(DeriveError::validation(format!(
                "TransactionData.data.amount is not a decimal: {:?}",
                self.data.amount
            )));
        }
        Ok(())
    }
}

/// Reason attached to a transaction the chain rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionErrorLog {
    pub error: String,
}

/// Result of `public/get_transaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub data: TransactionData,
    pub status: DeriveTxStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_log: Option<TransactionErrorLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl Validate for TransactionResult {
    fn validate(&self) -> Result<()> {
        self.data.validate()
    }
}
