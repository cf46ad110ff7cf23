/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for derive-client tests

#![allow(dead_code)]

use derive_client::Credentials;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use wiremock::MockServer;

/// Well-known development key
pub const TEST_SESSION_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_SESSION_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const TEST_WALLET: &str = "0x8772185a1516f0d61fC1c2524926BfC69F95d698";
pub const TEST_SUBACCOUNT: u64 = 30769;
pub const TEST_TRANSACTION_ID: &str = "f589e847-c7a5-40c4-82d5-2d8cec9c93da";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_WALLET, TEST_SESSION_KEY).with_subaccount(TEST_SUBACCOUNT)
}

pub fn rpc_result(result: Value) -> Value {
    json!({"id": "1", "result": result})
}

pub fn rpc_error(code: i64, message: &str) -> Value {
    json!({"id": "1", "error": {"code": code, "message": message}})
}

pub fn public_trade_json(trade_id: &str) -> Value {
    json!({
        "direction": "buy",
        "expected_rebate": "0",
        "index_price": "3012.45",
        "instrument_name": "ETH-PERP",
        "liquidity_role": "taker",
        "mark_price": "3013.1",
        "realized_pnl": "0",
        "realized_pnl_excl_fees": "0",
        "subaccount_id": 1234,
        "timestamp": 1700000000000i64,
        "trade_amount": "0.5",
        "trade_fee": "0.75",
        "trade_id": trade_id,
        "trade_price": "3012.9",
        "tx_hash": "0x5f1c",
        "tx_status": "settled",
        "wallet": "0x1111111111111111111111111111111111111111"
    })
}

pub fn private_trade_json(trade_id: &str, subaccount_id: u64) -> Value {
    json!({
        "direction": "sell",
        "expected_rebate": "0.01",
        "index_price": "64000",
        "instrument_name": "BTC-PERP",
        "is_transfer": false,
        "label": "",
        "liquidity_role": "maker",
        "mark_price": "64010.5",
        "order_id": "o-1",
        "realized_pnl": "12.5",
        "realized_pnl_excl_fees": "13",
        "subaccount_id": subaccount_id,
        "timestamp": 1700000000500i64,
        "trade_amount": "0.01",
        "trade_fee": "0.5",
        "trade_id": trade_id,
        "trade_price": "64005",
        "transaction_id": TEST_TRANSACTION_ID,
        "tx_status": "settled",
        "tx_hash": "0x9a"
    })
}

pub fn transaction_json() -> Value {
    json!({
        "data": {
            "data": {
                "asset": "0x6879287835A86F50f784313dBEd5E5cCC5bb8481",
                "amount": "25.5",
                "decimals": 6
            },
            "nonce": 1700000000000123u64,
            "owner": TEST_WALLET,
            "expiry": 1700003600,
            "module": "0x9B3FE5E5a3bcEa5df4E08c41Ce89C4e3Ff01Ace3",
            "signer": TEST_SESSION_ADDRESS,
            "asset_id": "0x6879287835A86F50f784313dBEd5E5cCC5bb8481",
            "signature": "0x5b1e",
            "asset_name": "USDC",
            "subaccount_id": TEST_SUBACCOUNT,
            "is_atomic_signing": false
        },
        "status": "settled",
        "error_log": null,
        "transaction_hash": "0x77aa"
    })
}

pub fn instrument_json(instrument_name: &str) -> Value {
    json!({
        "instrument_name": instrument_name,
        "instrument_type": "perp",
        "is_active": true,
        "base_currency": "ETH",
        "quote_currency": "USDC",
        "base_asset_address": "0xAf65752C4643E25C02F693f9D4FE19cF23a095E3",
        "base_asset_sub_id": "0",
        "tick_size": "0.01",
        "amount_step": "0.01",
        "minimum_amount": "0.01",
        "maximum_amount": "10000",
        "base_fee": "0.1",
        "maker_fee_rate": "0.0001",
        "taker_fee_rate": "0.0003",
        "mark_price_fee_rate_cap": null,
        "scheduled_activation": 1701840228,
        "scheduled_deactivation": 9223372036854775807i64,
        "fifo_min_allocation": "0",
        "pro_rata_amount_step": "0.01",
        "pro_rata_fraction": "0",
        "erc20_details": null,
        "option_details": null,
        "perp_details": {
            "aggregate_funding": "123.4",
            "funding_rate": "0.0000125",
            "index": "ETH-USD",
            "max_rate_per_hour": "0.004",
            "min_rate_per_hour": "-0.004",
            "static_interest_rate": "0.0000125"
        }
    })
}

pub fn ticker_json(instrument_name: &str) -> Value {
    let mut ticker = instrument_json(instrument_name);
    let book = json!({
        "best_ask_amount": "1.5",
        "best_ask_price": "3013.1",
        "best_bid_amount": "2",
        "best_bid_price": "3012.9",
        "five_percent_ask_depth": "300",
        "five_percent_bid_depth": "310",
        "index_price": "3012.45",
        "mark_price": "3013",
        "max_price": "3100",
        "min_price": "2900",
        "open_interest": {
            "PM": [{"current_open_interest": "10", "interest_cap": "100", "manager_currency": "ETH"}]
        },
        "stats": {
            "contract_volume": "50",
            "high": "3050",
            "low": "2950",
            "num_trades": "42",
            "open_interest": "10",
            "percent_change": "0.01",
            "usd_change": "30"
        },
        "timestamp": 1736380800000i64,
        "option_pricing": null
    });
    if let (Some(target), Value::Object(fields)) = (ticker.as_object_mut(), book) {
        target.extend(fields);
    }
    ticker
}

pub fn currency_json(currency: &str) -> Value {
    json!({
        "currency": currency,
        "instrument_types": ["erc20", "perp", "option"],
        "market_type": "ALL",
        "managers": [{"address": "0x28c9ddF9A3B29c2E6a561c1BC520954e5A33de5D", "margin_type": "SM", "currency": null}],
        "protocol_asset_addresses": {"perp": "0xAf65752C4643E25C02F693f9D4FE19cF23a095E3", "option": null, "spot": null, "underlying_erc20": null},
        "pm2_collateral_discounts": [],
        "asset_cap_and_supply_per_manager": {},
        "spot_price": "3012.45",
        "spot_price_24h": "2990.1",
        "borrow_apy": "0",
        "supply_apy": "0",
        "total_borrow": "0",
        "total_supply": "0",
        "srm_im_discount": "0",
        "srm_mm_discount": "0"
    })
}

pub fn account_json(wallet: &str) -> Value {
    json!({
        "wallet": wallet,
        "subaccount_ids": [TEST_SUBACCOUNT],
        "cancel_on_disconnect": false,
        "is_rfq_maker": false,
        "fee_info": {
            "base_fee_discount": "0",
            "rfq_maker_discount": "0",
            "rfq_taker_discount": "0",
            "perp_maker_fee": "0.0001",
            "perp_taker_fee": "0.0003"
        },
        "per_endpoint_tps": {},
        "websocket_matching_tps": 5,
        "websocket_non_matching_tps": 20,
        "websocket_option_tps": 5,
        "websocket_perp_tps": 5,
        "referral_code": null
    })
}

pub fn subaccount_json(subaccount_id: u64) -> Value {
    json!({
        "subaccount_id": subaccount_id,
        "label": "main",
        "currency": "USDC",
        "margin_type": "SM",
        "is_under_liquidation": false,
        "collaterals": [{
            "asset_name": "USDC",
            "asset_type": "erc20",
            "currency": "USDC",
            "amount": "1000",
            "amount_step": "0",
            "average_price": "1",
            "average_price_excl_fees": "1",
            "mark_price": "1",
            "mark_value": "1000",
            "initial_margin": "0",
            "maintenance_margin": "0",
            "open_orders_margin": "0",
            "cumulative_interest": "0",
            "pending_interest": "0",
            "realized_pnl": "0",
            "realized_pnl_excl_fees": "0",
            "unrealized_pnl": "0",
            "unrealized_pnl_excl_fees": "0",
            "total_fees": "0",
            "delta": "1",
            "delta_currency": "USDC",
            "creation_timestamp": 1736380800000i64
        }],
        "positions": [],
        "open_orders": [],
        "subaccount_value": "1000",
        "collaterals_value": "1000",
        "positions_value": "0",
        "initial_margin": "1000",
        "maintenance_margin": "1000",
        "collaterals_initial_margin": "1000",
        "collaterals_maintenance_margin": "1000",
        "positions_initial_margin": "0",
        "positions_maintenance_margin": "0",
        "open_orders_margin": "0",
        "projected_margin_change": "0"
    })
}

/// How the in-process websocket server answers `public/login`
#[derive(Debug, Clone, Copy)]
pub enum LoginBehaviour {
    Accept,
    /// Accept the login, then drop the connection
    AcceptThenClose,
    Reject,
    Silent,
}

/// Start a single-connection JSON-RPC websocket server; returns its ws:// URL
pub async fn spawn_ws_server(behaviour: LoginBehaviour) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((tcp, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(tcp).await else {
            return;
        };

        while let Some(Ok(message)) = ws.next().await {
            let Message::Text(text) = message else {
                if matches!(message, Message::Close(_)) {
                    break;
                }
                continue;
            };
            let request: Value = serde_json::from_str(text.as_str()).unwrap();
            let id = request["id"].clone();
            let method = request["method"].as_str().unwrap_or_default().to_string();

            let replies = match method.as_str() {
                "public/login" => match behaviour {
                    LoginBehaviour::Accept | LoginBehaviour::AcceptThenClose => {
                        // unrelated frame before the login response
                        vec![
                            json!({"method": "heartbeat"}),
                            json!({"id": id, "result": [TEST_SUBACCOUNT]}),
                        ]
                    }
                    LoginBehaviour::Reject => vec![json!({
                        "id": id,
                        "error": {"code": 14014, "message": "Signature invalid for message or transaction"}
                    })],
                    LoginBehaviour::Silent => vec![],
                },
                "public/get_transaction" => {
                    if request["params"]["transaction_id"] == TEST_TRANSACTION_ID {
                        vec![json!({"id": id, "result": transaction_json()})]
                    } else {
                        vec![json!({"id": id, "error": {"code": -32602, "message": "Transaction not found"}})]
                    }
                }
                "private/get_trade_history" => {
                    let subaccount_id = request["params"]["subaccount_id"].as_u64().unwrap_or(0);
                    vec![json!({"id": id, "result": {
                        "subaccount_id": subaccount_id,
                        "trades": [private_trade_json("ws-t-1", subaccount_id)]
                    }})]
                }
                "private/get_account" => {
                    let wallet = request["params"]["wallet"].as_str().unwrap_or_default();
                    vec![json!({"id": id, "result": account_json(wallet)})]
                }
                "public/get_ticker" => {
                    let name = request["params"]["instrument_name"].as_str().unwrap_or_default();
                    vec![json!({"id": id, "result": ticker_json(name)})]
                }
                "subscribe" | "unsubscribe" => {
                    let channels: Vec<String> =
                        serde_json::from_value(request["params"]["channels"].clone()).unwrap();
                    let status: serde_json::Map<String, Value> = channels
                        .iter()
                        .map(|channel| {
                            let verdict = if channel.starts_with("BAD") { "invalid channel" } else { "ok" };
                            (channel.clone(), json!(verdict))
                        })
                        .collect();
                    let current = if method == "subscribe" { channels.clone() } else { vec![] };
                    let mut replies = vec![json!({"id": id, "result": {
                        "status": status,
                        "current_subscriptions": current
                    }})];
                    if method == "subscribe" {
                        for channel in &channels {
                            replies.push(json!({
                                "method": "subscription",
                                "params": {"channel": channel, "data": [public_trade_json("push-1")]}
                            }));
                        }
                    }
                    replies
                }
                _ => vec![json!({"id": id, "error": {"code": -32601, "message": "Method not found"}})],
            };

            for reply in replies {
                if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                    return;
                }
            }
            if method == "public/login" && matches!(behaviour, LoginBehaviour::AcceptThenClose) {
                let _ = ws.close(None).await;
                return;
            }
        }
    });

    format!("ws://{addr}")
}

/// An address nothing listens on
pub async fn unreachable_ws_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{addr}")
}
