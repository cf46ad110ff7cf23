/*
[INPUT]:  Typed records returned by the client
[OUTPUT]: JSON or plain-text table rendering for stdout
[POS]:    Presentation layer - command output
[UPDATE]: When adding commands or output columns
*/

use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use derive_client::{
    InstrumentDetails, PrivateTrade, PublicTrade, RegistryGaps, SubaccountState, Ticker,
    TransactionResult,
};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}

fn format_ms(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Sum of amount * price; `None` if it overflows
pub fn notional<'a>(fills: impl IntoIterator<Item = (&'a Decimal, &'a Decimal)>) -> Option<Decimal> {
    fills.into_iter().try_fold(Decimal::ZERO, |total, (amount, price)| {
        total.checked_add(amount.checked_mul(*price)?)
    })
}

fn checked_total(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}

fn or_na(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

pub fn render_public_trades(trades: &[PublicTrade], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(trades);
    }

    let mut out = String::new();
    for trade in trades {
        let _ = writeln!(
            out,
            "{}  {:<16} {:<4} {:>14} @ {:<14} {}",
            format_ms(trade.timestamp),
            trade.instrument_name,
            format!("{:?}", trade.direction).to_lowercase(),
            trade.trade_amount,
            trade.trade_price,
            trade.trade_id,
        );
    }
    let total = notional(trades.iter().map(|t| (&t.trade_amount, &t.trade_price)));
    let _ = write!(out, "{} trades, notional {}", trades.len(), or_na(total));
    Ok(out)
}

pub fn render_private_trades(trades: &[PrivateTrade], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(trades);
    }

    let mut out = String::new();
    for trade in trades {
        let _ = writeln!(
            out,
            "{}  {:<16} {:<4} {:>14} @ {:<14} fee {:<10} pnl {:<12} {:?}",
            format_ms(trade.timestamp),
            trade.instrument_name,
            format!("{:?}", trade.direction).to_lowercase(),
            trade.trade_amount,
            trade.trade_price,
            trade.trade_fee,
            trade.realized_pnl,
            trade.tx_status,
        );
    }
    let fees = checked_total(trades.iter().map(|t| t.trade_fee));
    let _ = write!(out, "{} trades, fees {}", trades.len(), or_na(fees));
    Ok(out)
}

pub fn render_transaction(tx: &TransactionResult, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(tx);
    }

    let mut out = String::new();
    let _ = writeln!(out, "status:      {:?}", tx.status);
    let _ = writeln!(out, "hash:        {}", tx.transaction_hash.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "subaccount:  {}", tx.data.subaccount_id);
    let _ = writeln!(out, "asset:       {} ({})", tx.data.asset_name, tx.data.asset_id);
    let _ = writeln!(out, "amount:      {}", tx.data.data.amount);
    let _ = write!(out, "signer:      {}", tx.data.signer);
    if let Some(log) = &tx.error_log {
        let _ = write!(out, "\nerror:       {}", log.error);
    }
    Ok(out)
}

pub fn render_ticker(ticker: &Ticker, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(ticker);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", ticker.instrument.instrument_name, format_ms(ticker.timestamp));
    let _ = writeln!(out, "bid:    {} x {}", ticker.best_bid_price, ticker.best_bid_amount);
    let _ = writeln!(out, "ask:    {} x {}", ticker.best_ask_price, ticker.best_ask_amount);
    let _ = writeln!(out, "mark:   {}  index {}", ticker.mark_price, ticker.index_price);
    let _ = write!(
        out,
        "24h:    {} trades, volume {}, change {}",
        ticker.stats.num_trades, ticker.stats.contract_volume, ticker.stats.percent_change
    );
    Ok(out)
}

pub fn render_instruments(instruments: &[InstrumentDetails], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(instruments);
    }

    let mut out = String::new();
    for instrument in instruments {
        let _ = writeln!(
            out,
            "{:<24} tick {:<10} step {:<10} min {:<10} {}",
            instrument.instrument_name,
            instrument.tick_size,
            instrument.amount_step,
            instrument.minimum_amount,
            if instrument.is_active { "active" } else { "inactive" },
        );
    }
    let _ = write!(out, "{} instruments", instruments.len());
    Ok(out)
}

pub fn render_subaccount(state: &SubaccountState, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(state);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "subaccount {} ({:?}, {})",
        state.subaccount_id, state.margin_type, state.currency
    );
    let _ = writeln!(out, "value:        {}", state.subaccount_value);
    let _ = writeln!(out, "initial mgn:  {}", state.initial_margin);
    let _ = writeln!(out, "maint. mgn:   {}", state.maintenance_margin);
    for collateral in &state.collaterals {
        let _ = writeln!(out, "  {:<10} {}", collateral.asset_name, collateral.amount);
    }
    for position in &state.positions {
        let _ = writeln!(
            out,
            "  {:<24} {:>12} @ {}",
            position.instrument_name, position.amount, position.average_price
        );
    }
    let _ = write!(
        out,
        "{} positions, {} open orders",
        state.positions.len(),
        state.open_orders.len()
    );
    if state.is_under_liquidation {
        out.push_str("
UNDER LIQUIDATION");
    }
    Ok(out)
}

pub fn render_registry_gaps(gaps: &RegistryGaps) -> String {
    if gaps.is_empty() {
        return "registry consistent: every chain and currency is known".to_string();
    }
    let mut out = String::from("registry entries missing from the enums:");
    for chain in &gaps.chains {
        let _ = write!(out, "\n  chain id {chain}");
    }
    for currency in &gaps.currencies {
        let _ = write!(out, "\n  currency {currency}");
    }
    out
}
