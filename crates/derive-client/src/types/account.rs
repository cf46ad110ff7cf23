/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed account and subaccount records
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When account or subaccount schemas change
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    CancelReason, Direction, InstrumentType, MarginType, OrderStatus, OrderType, TimeInForce,
    TriggerPriceType, TriggerType,
};
use super::validate::{Validate, require_non_empty};
use crate::http::{DeriveError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountFeeInfo {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fee_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rfq_maker_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rfq_taker_discount: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub option_maker_fee: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub option_taker_fee: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub perp_maker_fee: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub perp_taker_fee: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub spot_maker_fee: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub spot_taker_fee: Option<Decimal>,
}

/// Result of `private/get_account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub wallet: String,
    pub subaccount_ids: Vec<u64>,
    pub cancel_on_disconnect: bool,
    pub is_rfq_maker: bool,
    pub fee_info: AccountFeeInfo,
    #[serde(default)]
    pub per_endpoint_tps: BTreeMap<String, serde_json::Value>,
    pub websocket_matching_tps: u32,
    pub websocket_non_matching_tps: u32,
    pub websocket_option_tps: u32,
    pub websocket_perp_tps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl Validate for AccountInfo {
    fn validate(&self) -> Result<()> {
        require_non_empty("AccountInfo", "wallet", &self.wallet)
    }
}

/// Result of `private/get_subaccounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubaccountIds {
    pub wallet: String,
    pub subaccount_ids: Vec<u64>,
}

impl Validate for SubaccountIds {
    fn validate(&self) -> Result<()> {
        require_non_empty("SubaccountIds", "wallet", &self.wallet)
    }
}

/// A session key registered for the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKey {
    pub public_session_key: String,
    pub label: String,
    pub scope: String,
    pub expiry_sec: i64,
    #[serde(default)]
    pub ip_whitelist: Vec<String>,
}

/// Result of `private/session_keys`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKeys {
    pub public_session_keys: Vec<SessionKey>,
}

impl Validate for SessionKeys {
    fn validate(&self) -> Result<()> {
        self.public_session_keys.iter().try_for_each(|key| {
            require_non_empty("SessionKey", "public_session_key", &key.public_session_key)
        })
    }
}

/// Asset balance held as collateral by a subaccount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collateral {
    pub asset_name: String,
    pub asset_type: InstrumentType,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub maintenance_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cumulative_interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pending_interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub realized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unrealized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_fees: Decimal,
    pub creation_timestamp: i64,
}

/// Open derivative position of a subaccount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub instrument_name: String,
    pub instrument_type: InstrumentType,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub index_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub maintenance_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub delta: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gamma: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub theta: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub vega: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cumulative_funding: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pending_funding: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_settlements: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub realized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unrealized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_fees: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub leverage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub liquidation_price: Option<Decimal>,
    pub creation_timestamp: i64,
}

/// Resting order as reported in a subaccount snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub order_id: String,
    pub subaccount_id: u64,
    pub instrument_name: String,
    pub direction: Direction,
    pub order_type: OrderType,
    pub order_status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(default)]
    pub cancel_reason: CancelReason,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub filled_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub limit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub order_fee: Decimal,
    pub label: String,
    pub mmp: bool,
    pub is_transfer: bool,
    pub nonce: u64,
    pub signer: String,
    pub signature: String,
    pub signature_expiry_sec: i64,
    pub creation_timestamp: i64,
    pub last_update_timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_order_id: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub trigger_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price_type: Option<TriggerPriceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_reject_message: Option<String>,
}

impl Validate for OpenOrder {
    fn validate(&self) -> Result<()> {
        require_non_empty("OpenOrder", "order_id", &self.order_id)?;
        if self.filled_amount > self.amount {
            return Err(DeriveError::validation(format!(
                "OpenOrder {} filled {} of {}",
                self.order_id, self.filled_amount, self.amount
            )));
        }
        Ok(())
    }
}

/// Result of `private/get_subaccount`: balances, positions and resting orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubaccountState {
    pub subaccount_id: u64,
    pub label: String,
    pub currency: String,
    pub margin_type: MarginType,
    pub is_under_liquidation: bool,
    #[serde(default)]
    pub collaterals: Vec<Collateral>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub open_orders: Vec<OpenOrder>,
    #[serde(with = "rust_decimal::serde::str")]
    pub subaccount_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub collaterals_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub positions_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub maintenance_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub collaterals_initial_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub collaterals_maintenance_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub positions_initial_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub positions_maintenance_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub open_orders_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub projected_margin_change: Decimal,
}

impl Validate for SubaccountState {
    fn validate(&self) -> Result<()> {
        self.open_orders.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_info_decodes() {
        let account: AccountInfo = serde_json::from_value(json!({
            "wallet": "0x8772185a1516f0d61fC1c2524926BfC69F95d698",
            "subaccount_ids": [30769, 31049],
            "cancel_on_disconnect": false,
            "is_rfq_maker": false,
            "fee_info": {
                "base_fee_discount": "0",
                "rfq_maker_discount": "0",
                "rfq_taker_discount": "0",
                "option_maker_fee": null,
                "perp_taker_fee": "0.0003"
            },
            "per_endpoint_tps": {"private/order": 5},
            "websocket_matching_tps": 5,
            "websocket_non_matching_tps": 20,
            "websocket_option_tps": 5,
            "websocket_perp_tps": 5
        }))
        .unwrap();
        assert_eq!(account.subaccount_ids, vec![30769, 31049]);
        assert_eq!(account.fee_info.perp_taker_fee, Some(Decimal::new(3, 4)));
        assert_eq!(account.fee_info.option_maker_fee, None);
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_overfilled_order_rejected() {
        let order: OpenOrder = serde_json::from_value(json!({
            "order_id": "b3c5-11",
            "subaccount_id": 30769,
            "instrument_name": "ETH-PERP",
            "direction": "buy",
            "order_type": "limit",
            "order_status": "open",
            "time_in_force": "gtc",
            "cancel_reason": "",
            "amount": "1",
            "filled_amount": "2",
            "limit_price": "2000",
            "average_price": "0",
            "max_fee": "10",
            "order_fee": "0",
            "label": "",
            "mmp": false,
            "is_transfer": false,
            "nonce": 1736380800000_u64,
            "signer": "0xabc",
            "signature": "0xdef",
            "signature_expiry_sec": 1736467200,
            "creation_timestamp": 1736380800000_i64,
            "last_update_timestamp": 1736380800000_i64
        }))
        .unwrap();
        assert_eq!(order.cancel_reason, CancelReason::None);
        assert!(order.validate().is_err());
    }
}
