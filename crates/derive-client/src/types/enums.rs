/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new chains/currencies are listed
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityRole {
    Maker,
    Taker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentType {
    Erc20,
    Option,
    Perp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(rename = "C")]
    Call,
    #[serde(rename = "P")]
    Put,
}

/// Risk manager a subaccount or currency is margined under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginType {
    #[serde(rename = "PM")]
    Portfolio,
    #[serde(rename = "PM2")]
    Portfolio2,
    #[serde(rename = "SM")]
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketType {
    All,
    SrmBaseOnly,
    SrmOptionOnly,
    SrmPerpOnly,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
    Expired,
    Untriggered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    Gtc,
    PostOnly,
    Fok,
    Ioc,
}

/// Why an order left the book; `None` while it is still live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    #[default]
    #[serde(rename = "")]
    None,
    UserRequest,
    MmpTrigger,
    InsufficientMargin,
    SignedMaxFeeTooLow,
    CancelOnDisconnect,
    IocOrMarketPartialFill,
    SessionKeyDeregistered,
    SubaccountWithdrawn,
    Compliance,
    TriggerFailed,
    ValidationFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    Stoploss,
    Takeprofit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPriceType {
    Mark,
    Index,
}

/// Settlement status of a transaction on the Derive chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeriveTxStatus {
    Requested,
    Pending,
    Settled,
    Reverted,
    Ignored,
    TimedOut,
}

/// Final statuses reported in the public trade history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettledTxStatus {
    #[default]
    Settled,
    Reverted,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Prod,
    Test,
}

/// Blockchain networks Derive bridges to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
#[repr(u64)]
pub enum ChainId {
    Eth = 1,
    Optimism = 10,
    Derive = 957,
    Base = 8453,
    Mode = 34443,
    Arbitrum = 42161,
    Blast = 81457,
}

impl ChainId {
    pub const ALL: [ChainId; 7] = [
        ChainId::Eth,
        ChainId::Optimism,
        ChainId::Derive,
        ChainId::Base,
        ChainId::Mode,
        ChainId::Arbitrum,
        ChainId::Blast,
    ];

    pub fn id(self) -> u64 {
        self as u64
    }
}

impl From<ChainId> for u64 {
    fn from(chain: ChainId) -> Self {
        chain.id()
    }
}

impl TryFrom<u64> for ChainId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.id() == value)
            .ok_or_else(|| format!("unknown chain id {value}"))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainId::Eth => "ETH",
            ChainId::Optimism => "OPTIMISM",
            ChainId::Derive => "DERIVE",
            ChainId::Base => "BASE",
            ChainId::Mode => "MODE",
            ChainId::Arbitrum => "ARBITRUM",
            ChainId::Blast => "BLAST",
        };
        write!(f, "{name}({})", self.id())
    }
}

/// Depositable currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "weETH")]
    WeEth,
    #[serde(rename = "rswETH")]
    RswEth,
    #[serde(rename = "rsETH")]
    RsEth,
    #[serde(rename = "USDe")]
    USDe,
    #[serde(rename = "deUSD")]
    DeUsd,
    #[serde(rename = "PYUSD")]
    Pyusd,
    #[serde(rename = "sUSDe")]
    SUsde,
    #[serde(rename = "SolvBTC")]
    SolvBtc,
    #[serde(rename = "SolvBTCBBN")]
    SolvBtcBbn,
    #[serde(rename = "LBTC")]
    Lbtc,
    #[serde(rename = "OP")]
    Op,
    #[serde(rename = "DAI")]
    Dai,
    #[serde(rename = "sDAI")]
    SDai,
    #[serde(rename = "cbBTC")]
    CbBtc,
    #[serde(rename = "eBTC")]
    EBtc,
    #[serde(rename = "AAVE")]
    Aave,
    #[serde(rename = "OLAS")]
    Olas,
    #[serde(rename = "DRV")]
    Drv,
    #[serde(rename = "WBTC")]
    Wbtc,
    #[serde(rename = "WETH")]
    Weth,
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "wstETH")]
    WstEth,
    #[serde(rename = "USDC.e")]
    UsdcE,
    #[serde(rename = "SNX")]
    Snx,
}

impl Currency {
    pub const ALL: [Currency; 25] = [
        Currency::WeEth,
        Currency::RswEth,
        Currency::RsEth,
        Currency::USDe,
        Currency::DeUsd,
        Currency::Pyusd,
        Currency::SUsde,
        Currency::SolvBtc,
        Currency::SolvBtcBbn,
        Currency::Lbtc,
        Currency::Op,
        Currency::Dai,
        Currency::SDai,
        Currency::CbBtc,
        Currency::EBtc,
        Currency::Aave,
        Currency::Olas,
        Currency::Drv,
        Currency::Wbtc,
        Currency::Weth,
        Currency::Usdc,
        Currency::Usdt,
        Currency::WstEth,
        Currency::UsdcE,
        Currency::Snx,
    ];

    /// Ticker as listed by the exchange
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::WeEth => "weETH",
            Currency::RswEth => "rswETH",
            Currency::RsEth => "rsETH",
            Currency::USDe => "USDe",
            Currency::DeUsd => "deUSD",
            Currency::Pyusd => "PYUSD",
            Currency::SUsde => "sUSDe",
            Currency::SolvBtc => "SolvBTC",
            Currency::SolvBtcBbn => "SolvBTCBBN",
            Currency::Lbtc => "LBTC",
            Currency::Op => "OP",
            Currency::Dai => "DAI",
            Currency::SDai => "sDAI",
            Currency::CbBtc => "cbBTC",
            Currency::EBtc => "eBTC",
            Currency::Aave => "AAVE",
            Currency::Olas => "OLAS",
            Currency::Drv => "DRV",
            Currency::Wbtc => "WBTC",
            Currency::Weth => "WETH",
            Currency::Usdc => "USDC",
            Currency::Usdt => "USDT",
            Currency::WstEth => "wstETH",
            Currency::UsdcE => "USDC.e",
            Currency::Snx => "SNX",
        }
    }

    /// ERC20 decimals of the token
    pub fn decimals(self) -> u32 {
        match self {
            Currency::Pyusd | Currency::Usdc | Currency::Usdt | Currency::UsdcE => 6,
            Currency::Lbtc | Currency::CbBtc | Currency::EBtc | Currency::Wbtc => 8,
            _ => 18,
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.symbol() == s)
            .ok_or_else(|| format!("unknown currency {s}"))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
