/*
[INPUT]:  WebSocket test scenarios against an in-process server
[OUTPUT]: Test results for WebSocket client
[POS]:    Integration tests - WebSocket
[UPDATE]: When WebSocket client changes
*/

mod common;

use std::time::Duration;

use common::{
    LoginBehaviour, TEST_SUBACCOUNT, TEST_TRANSACTION_ID, TEST_WALLET, spawn_ws_server,
    test_credentials, unreachable_ws_url,
};
use derive_client::{
    Credentials, DeriveError, DeriveTxStatus, DeriveWebSocket, ErrorKind,
    PrivateTradeHistoryParams, WsConfig,
};
use tokio_test::assert_ok;

fn fast_config() -> WsConfig {
    WsConfig {
        login_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(5),
        ..WsConfig::default()
    }
}

#[tokio::test]
async fn test_connect_logs_in() {
    let url = spawn_ws_server(LoginBehaviour::Accept).await;
    let ws = assert_ok!(DeriveWebSocket::connect(&url, &test_credentials()).await);

    assert_eq!(ws.wallet(), TEST_WALLET);
    assert_eq!(ws.subaccount_ids(), &[TEST_SUBACCOUNT]);
}

#[tokio::test]
async fn test_connect_unreachable_endpoint_fails() {
    let url = unreachable_ws_url().await;
    let err = DeriveWebSocket::connect(&url, &test_credentials())
        .await
        .unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_connect_rejected_login_fails() {
    let url = spawn_ws_server(LoginBehaviour::Reject).await;
    let err = DeriveWebSocket::connect(&url, &test_credentials())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_connect_login_timeout() {
    let url = spawn_ws_server(LoginBehaviour::Silent).await;
    let err = DeriveWebSocket::connect_with_config(&url, &test_credentials(), fast_config())
        .await
        .unwrap_err();
    assert!(matches!(err, DeriveError::Timeout { .. }));
}

#[tokio::test]
async fn test_connect_with_bad_session_key_fails_before_io() {
    let url = unreachable_ws_url().await;
    let credentials = Credentials::new(TEST_WALLET, "0x1234");
    let err = DeriveWebSocket::connect(&url, &credentials).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_get_transaction_over_websocket() {
    let url = spawn_ws_server(LoginBehaviour::Accept).await;
    let ws = assert_ok!(DeriveWebSocket::connect_with_config(&url, &test_credentials(), fast_config()).await);

    let transaction = assert_ok!(ws.transactions().get(TEST_TRANSACTION_ID).await);
    assert_eq!(transaction.status, DeriveTxStatus::Settled);

    let err = ws.transactions().get("unknown").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_private_trades_default_to_login_subaccount() {
    let url = spawn_ws_server(LoginBehaviour::Accept).await;
    let credentials = Credentials::new(TEST_WALLET, common::TEST_SESSION_KEY);
    let ws = assert_ok!(DeriveWebSocket::connect_with_config(&url, &credentials, fast_config()).await);

    let trades = assert_ok!(
        ws.trades()
            .list_private(&PrivateTradeHistoryParams::default())
            .await
    );
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].subaccount_id, TEST_SUBACCOUNT);
}

#[tokio::test]
async fn test_subscribe_forwards_notifications() {
    let url = spawn_ws_server(LoginBehaviour::Accept).await;
    let mut ws = assert_ok!(DeriveWebSocket::connect_with_config(&url, &test_credentials(), fast_config()).await);
    let mut receiver = ws.take_receiver().expect("receiver available once");
    assert!(ws.take_receiver().is_none());

    let result = assert_ok!(ws.subscribe(&["ETH-PERP.trades"]).await);
    assert_eq!(result.status.get("ETH-PERP.trades").map(String::as_str), Some("ok"));
    assert_eq!(result.current_subscriptions, vec!["ETH-PERP.trades".to_string()]);

    let message = tokio::time::timeout(Duration::from_secs(5), receiver.recv())
        .await
        .expect("notification within timeout")
        .expect("channel open");
    assert_eq!(message.channel, "ETH-PERP.trades");
    assert!(message.data.is_array());

    let result = assert_ok!(ws.unsubscribe(&["ETH-PERP.trades"]).await);
    assert!(result.current_subscriptions.is_empty());
}

#[tokio::test]
async fn test_subscribe_rejected_channel() {
    let url = spawn_ws_server(LoginBehaviour::Accept).await;
    let ws = assert_ok!(DeriveWebSocket::connect_with_config(&url, &test_credentials(), fast_config()).await);

    let err = ws.subscribe(&["BAD.channel"]).await.unwrap_err();
    match err {
        DeriveError::Subscription { channel, .. } => assert_eq!(channel, "BAD.channel"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_close_ends_session() {
    let url = spawn_ws_server(LoginBehaviour::Accept).await;
    let ws = assert_ok!(DeriveWebSocket::connect_with_config(&url, &test_credentials(), fast_config()).await);
    assert_ok!(ws.close().await);
}

#[tokio::test]
async fn test_call_after_server_close_is_connection_closed() {
    let url = spawn_ws_server(LoginBehaviour::AcceptThenClose).await;
    let config = WsConfig {
        request_timeout: Duration::from_secs(30),
        ..fast_config()
    };
    let ws = assert_ok!(DeriveWebSocket::connect_with_config(&url, &test_credentials(), config).await);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        ws.transactions().get(TEST_TRANSACTION_ID),
    )
    .await
    .expect("call must fail fast once the connection is gone");
    assert!(
        matches!(outcome, Err(DeriveError::ConnectionClosed)),
        "unexpected outcome: {outcome:?}"
    );
}
