/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed market data records (currencies, instruments, tickers)
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When market data schemas change
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{InstrumentType, MarginType, MarketType, OptionType};
use super::models::PaginationInfo;
use super::validate::{Validate, require_non_empty};
use crate::http::{DeriveError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Erc20Details {
    pub decimals: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_erc20_address: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub borrow_index: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub supply_index: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDetails {
    pub expiry: i64,
    pub index: String,
    pub option_type: OptionType,
    #[serde(with = "rust_decimal::serde::str")]
    pub strike: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub settlement_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpDetails {
    #[serde(with = "rust_decimal::serde::str")]
    pub aggregate_funding: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub funding_rate: Decimal,
    pub index: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_rate_per_hour: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_rate_per_hour: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub static_interest_rate: Decimal,
}

/// Static description of a listed instrument
///
/// Exactly one of the `*_details` blocks is set, matching `instrument_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentDetails {
    pub instrument_name: String,
    pub instrument_type: InstrumentType,
    pub is_active: bool,
    pub base_currency: String,
    pub quote_currency: String,
    pub base_asset_address: String,
    pub base_asset_sub_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub tick_size: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_step: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub maximum_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub maker_fee_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub taker_fee_rate: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub mark_price_fee_rate_cap: Option<Decimal>,
    pub scheduled_activation: i64,
    pub scheduled_deactivation: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc20_details: Option<Erc20Details>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_details: Option<OptionDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perp_details: Option<PerpDetails>,
}

impl Validate for InstrumentDetails {
    fn validate(&self) -> Result<()> {
        require_non_empty("InstrumentDetails", "instrument_name", &self.instrument_name)?;
        if self.tick_size <= Decimal::ZERO {
            return Err(DeriveError::validation(format!(
                "InstrumentDetails.tick_size must be positive for {}: {}",
                self.instrument_name, self.tick_size
            )));
        }
        if self.minimum_amount > self.maximum_amount {
            return Err(DeriveError::validation(format!(
                "InstrumentDetails amount bounds inverted for {}: {} > {}",
                self.instrument_name, self.minimum_amount, self.maximum_amount
            )));
        }
        Ok(())
    }
}

/// Result of `public/get_all_instruments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPage {
    pub instruments: Vec<InstrumentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl Validate for InstrumentPage {
    fn validate(&self) -> Result<()> {
        self.instruments.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenInterestStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub current_open_interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub interest_cap: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_currency: Option<String>,
}

/// Rolling 24h statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub contract_volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub num_trades: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub open_interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub percent_change: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub usd_change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPricing {
    #[serde(with = "rust_decimal::serde::str")]
    pub ask_iv: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bid_iv: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub delta: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_factor: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub forward_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gamma: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub iv: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rho: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub theta: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub vega: Decimal,
}

/// Result of `public/get_ticker`: the instrument plus its live book and prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(flatten)]
    pub instrument: InstrumentDetails,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_ask_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_ask_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_bid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_bid_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub five_percent_ask_depth: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub five_percent_bid_depth: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub index_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_price: Decimal,
    /// Keyed by margin type
    #[serde(default)]
    pub open_interest: BTreeMap<String, Vec<OpenInterestStats>>,
    pub stats: TradingStats,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_pricing: Option<OptionPricing>,
}

impl Validate for Ticker {
    fn validate(&self) -> Result<()> {
        self.instrument.validate()?;
        if self.min_price > self.max_price {
            return Err(DeriveError::validation(format!(
                "Ticker price band inverted for {}: {} > {}",
                self.instrument.instrument_name, self.min_price, self.max_price
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerContract {
    pub address: String,
    pub margin_type: MarginType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pm2CollateralDiscount {
    #[serde(with = "rust_decimal::serde::str")]
    pub im_discount: Decimal,
    pub manager_currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub mm_discount: Decimal,
}

/// On-chain asset contracts backing a currency's markets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolAssetAddresses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_erc20: Option<String>,
}

/// Result of `public/get_currency`, one entry of `public/get_all_currencies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDetails {
    pub currency: String,
    pub instrument_types: Vec<InstrumentType>,
    pub market_type: MarketType,
    #[serde(default)]
    pub managers: Vec<ManagerContract>,
    #[serde(default)]
    pub protocol_asset_addresses: ProtocolAssetAddresses,
    #[serde(default)]
    pub pm2_collateral_discounts: Vec<Pm2CollateralDiscount>,
    /// Manager address -> margin currency -> caps
    #[serde(default)]
    pub asset_cap_and_supply_per_manager: BTreeMap<String, BTreeMap<String, Vec<OpenInterestStats>>>,
    #[serde(with = "rust_decimal::serde::str")]
    pub spot_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub spot_price_24h: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub borrow_apy: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub supply_apy: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_borrow: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_supply: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub srm_im_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub srm_mm_discount: Decimal,
}

impl Validate for CurrencyDetails {
    fn validate(&self) -> Result<()> {
        require_non_empty("CurrencyDetails", "currency", &self.currency)
    }
}
