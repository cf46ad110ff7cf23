/*
[INPUT]:  WebSocket URL and session credentials
[OUTPUT]: Logged-in JSON-RPC connection, channel notifications via mpsc
[POS]:    WebSocket layer - real-time RPC and subscription handling
[UPDATE]: When adding new channels or changing connection logic
*/

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::http::rpc::{self, RpcCall, RpcTransport};
use crate::http::{Credentials, DeriveError, EnvConfig, RequestSigner, Result};
use crate::types::{ChannelParams, Environment, LoginResult, RpcEnvelope, SubscribeResult};
use crate::ws::message::{IncomingFrame, SubscriptionMessage, WsRequest};

pub const LOGIN_METHOD: &str = "public/login";
pub const SUBSCRIBE_METHOD: &str = "subscribe";
pub const UNSUBSCRIBE_METHOD: &str = "unsubscribe";

const MESSAGE_SAMPLE_LIMIT: usize = 3;
const SUBSCRIPTION_LOG_LIMIT: usize = 10;
const OTHER_LOG_LIMIT: usize = 3;
const PARSE_FAIL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static MESSAGE_SAMPLE_COUNT: AtomicUsize = AtomicUsize::new(0);
static SUBSCRIBE_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
static OTHER_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
static PARSE_FAIL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<RpcEnvelope>>>>;

/// WebSocket client configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Upper bound on connect-time login
    pub login_timeout: Duration,
    /// Upper bound on waiting for each JSON-RPC response
    pub request_timeout: Duration,
    pub channel_capacity: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            login_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            channel_capacity: 100,
        }
    }
}

/// Logged-in WebSocket client for Derive API
///
/// A value of this type always holds an authenticated connection: `connect`
/// returns only after `public/login` succeeded. Requests from concurrent
/// tasks share one pending map; ordering between them is up to the caller.
#[derive(Debug)]
pub struct DeriveWebSocket {
    outbound_tx: mpsc::Sender<WsMessage>,
    pending: PendingMap,
    message_rx: Option<mpsc::Receiver<SubscriptionMessage>>,
    wallet: String,
    subaccount_ids: Vec<u64>,
    default_subaccount: Option<u64>,
    config: WsConfig,
}

impl DeriveWebSocket {
    /// Connect to the websocket of an environment and log in
    pub async fn connect_env(env: Environment, credentials: &Credentials) -> Result<Self> {
        Self::connect(&EnvConfig::for_environment(env).ws_url, credentials).await
    }

    /// Connect to `url` and log in with the given credentials
    pub async fn connect(url: &str, credentials: &Credentials) -> Result<Self> {
        Self::connect_with_config(url, credentials, WsConfig::default()).await
    }

    pub async fn connect_with_config(
        url: &str,
        credentials: &Credentials,
        config: WsConfig,
    ) -> Result<Self> {
        let signer = credentials.request_signer()?;
        Self::connect_with_signer(url, &signer, credentials.subaccount_id, config).await
    }

    /// Connect and log in with an already built signer
    ///
    /// On any failure the socket is closed and no client is returned.
    pub async fn connect_with_signer(
        url: &str,
        signer: &RequestSigner,
        subaccount_id: Option<u64>,
        config: WsConfig,
    ) -> Result<Self> {
        let login_params = serde_json::to_value(signer.login_params()?)
            .map_err(|e| DeriveError::validation(format!("{LOGIN_METHOD}: {e}")))?;

        let (mut stream, _response) = connect_async(url).await?;
        debug!(url, "ws connected, logging in");

        let login = tokio::time::timeout(
            config.login_timeout,
            login_exchange(&mut stream, &login_params),
        )
        .await;

        let subaccount_ids = match login {
            Ok(Ok(result)) => result.0,
            Ok(Err(err)) => {
                let _ = stream.close(None).await;
                warn!(url, error = %err, "ws login failed");
                return Err(err);
            }
            Err(_) => {
                let _ = stream.close(None).await;
                warn!(url, "ws login timed out");
                return Err(DeriveError::Timeout {
                    method: LOGIN_METHOD.to_string(),
                    duration_ms: config.login_timeout.as_millis() as u64,
                });
            }
        };
        info!(
            wallet = signer.wallet(),
            subaccounts = subaccount_ids.len(),
            "ws login succeeded"
        );

        let (outbound_tx, outbound_rx) = mpsc::channel(config.channel_capacity);
        let (message_tx, message_rx) = mpsc::channel(config.channel_capacity);
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let (write, read) = stream.split();
        tokio::spawn(run_pump(
            write,
            read,
            outbound_rx,
            message_tx,
            pending.clone(),
        ));

        Ok(Self {
            outbound_tx,
            pending,
            message_rx: Some(message_rx),
            wallet: signer.wallet().to_string(),
            default_subaccount: subaccount_id.or_else(|| subaccount_ids.first().copied()),
            subaccount_ids,
            config,
        })
    }

    /// Get the notification receiver
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<SubscriptionMessage>> {
        self.message_rx.take()
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    /// Subaccount ids returned by the login call
    pub fn subaccount_ids(&self) -> &[u64] {
        &self.subaccount_ids
    }

    /// Send a JSON-RPC request and wait for the response with the same id
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = Uuid::new_v4().to_string();
        let frame = WsRequest {
            method,
            params: &params,
            id: &id,
        };
        let text = serde_json::to_string(&frame)
            .map_err(|e| DeriveError::validation(format!("{method}: {e}")))?;

        let (responder, response) = oneshot::channel();
        self.pending.lock().await.insert(id.clone(), responder);

        if self.outbound_tx.send(WsMessage::Text(text.into())).await.is_err() {
            self.pending.lock().await.remove(&id);
            return Err(DeriveError::ConnectionClosed);
        }

        let envelope = match tokio::time::timeout(self.config.request_timeout, response).await {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(_)) => return Err(DeriveError::ConnectionClosed),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                return Err(DeriveError::Timeout {
                    method: method.to_string(),
                    duration_ms: self.config.request_timeout.as_millis() as u64,
                });
            }
        };

        rpc::into_result(method, envelope)
    }

    /// Subscribe to channels such as `ETH-PERP.trades`
    pub async fn subscribe<S: AsRef<str>>(&self, channels: &[S]) -> Result<SubscribeResult> {
        self.channel_request(SUBSCRIBE_METHOD, channels).await
    }

    pub async fn unsubscribe<S: AsRef<str>>(&self, channels: &[S]) -> Result<SubscribeResult> {
        self.channel_request(UNSUBSCRIBE_METHOD, channels).await
    }

    async fn channel_request<S: AsRef<str>>(
        &self,
        method: &'static str,
        channels: &[S],
    ) -> Result<SubscribeResult> {
        let params = ChannelParams {
            channels: channels.iter().map(|c| c.as_ref().to_string()).collect(),
        };
        let value = serde_json::to_value(&params)
            .map_err(|e| DeriveError::validation(format!("{method}: {e}")))?;

        log_subscription_sent(method, &params.channels);
        let result = self.call(method, value).await?;
        rpc::decode_result(method, result)
    }

    /// Close the connection; pending requests fail with `ConnectionClosed`
    pub async fn close(self) -> Result<()> {
        self.outbound_tx
            .send(WsMessage::Close(None))
            .await
            .map_err(|_| DeriveError::ConnectionClosed)
    }
}

#[async_trait]
impl RpcTransport for DeriveWebSocket {
    async fn request(&self, call: RpcCall) -> Result<Value> {
        self.call(call.method, call.params).await
    }

    fn default_subaccount(&self) -> Option<u64> {
        self.default_subaccount
    }

    fn wallet(&self) -> Option<&str> {
        Some(&self.wallet)
    }
}

/// Send `public/login` on the raw stream and wait for its response
async fn login_exchange(stream: &mut WsStream, params: &Value) -> Result<LoginResult> {
    let id = Uuid::new_v4().to_string();
    let frame = WsRequest {
        method: LOGIN_METHOD,
        params,
        id: &id,
    };
    let text = serde_json::to_string(&frame)
        .map_err(|e| DeriveError::validation(format!("{LOGIN_METHOD}: {e}")))?;
    stream.send(WsMessage::Text(text.into())).await?;

    while let Some(message) = stream.next().await {
        let Some(text) = message_text(message?)? else {
            continue;
        };
        match IncomingFrame::parse(&text) {
            Ok(IncomingFrame::Response(envelope)) if envelope.id_key().as_deref() == Some(id.as_str()) => {
                let value = rpc::into_result(LOGIN_METHOD, envelope)?;
                return rpc::decode_result(LOGIN_METHOD, value);
            }
            Ok(_) => log_other_message_once(&text),
            Err(err) => log_parse_fail_once(&err, &text),
        }
    }

    Err(DeriveError::ConnectionClosed)
}

/// Text payload of a frame; `None` for control frames, error on close
fn message_text(message: WsMessage) -> Result<Option<String>> {
    match message {
        WsMessage::Text(text) => Ok(Some(text.to_string())),
        WsMessage::Binary(bytes) => Ok(String::from_utf8(bytes.to_vec()).ok()),
        WsMessage::Close(_) => Err(DeriveError::ConnectionClosed),
        _ => Ok(None),
    }
}

async fn run_pump(
    mut write: SplitSink<WsStream, WsMessage>,
    mut read: SplitStream<WsStream>,
    mut outbound_rx: mpsc::Receiver<WsMessage>,
    message_tx: mpsc::Sender<SubscriptionMessage>,
    pending: PendingMap,
) {
    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(message) => {
                        let closing = matches!(message, WsMessage::Close(_));
                        if write.send(message).await.is_err() || closing {
                            break;
                        }
                    }
                    None => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break;
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Close(_))) => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break;
                    }
                    Some(Ok(WsMessage::Ping(_))) | Some(Ok(WsMessage::Pong(_))) => {}
                    Some(Ok(message)) => {
                        if let Ok(Some(text)) = message_text(message) {
                            route_frame(&text, &pending, &message_tx).await;
                        }
                    }
                    Some(Err(err)) => {
                        debug!(error = %err, "ws read failed");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    // Refuse new requests first, then wake every waiting caller with ConnectionClosed
    outbound_rx.close();
    pending.lock().await.clear();
    debug!("ws pump stopped");
}

async fn route_frame(
    text: &str,
    pending: &PendingMap,
    message_tx: &mpsc::Sender<SubscriptionMessage>,
) {
    match IncomingFrame::parse(text) {
        Ok(IncomingFrame::Response(envelope)) => {
            let responder = match envelope.id_key() {
                Some(id) => pending.lock().await.remove(&id),
                None => None,
            };
            match responder {
                Some(responder) => {
                    let _ = responder.send(envelope);
                }
                None => log_other_message_once(text),
            }
        }
        Ok(IncomingFrame::Notification(message)) => {
            log_message_sample_once(&message);
            match message_tx.try_send(message) {
                Ok(()) | Err(mpsc::error::TrySendError::Closed(_)) => {}
                Err(mpsc::error::TrySendError::Full(message)) => {
                    warn!(channel = %message.channel, "ws notification dropped, receiver full");
                }
            }
        }
        Ok(IncomingFrame::Other) => log_other_message_once(text),
        Err(err) => log_parse_fail_once(&err, text),
    }
}

fn log_subscription_sent(action: &str, channels: &[String]) {
    let count = SUBSCRIBE_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= SUBSCRIPTION_LOG_LIMIT {
        return;
    }

    info!(
        sample_index = count + 1,
        sample_limit = SUBSCRIPTION_LOG_LIMIT,
        action,
        channels = %channels.join(","),
        "ws subscription sent"
    );
}

fn log_message_sample_once(message: &SubscriptionMessage) {
    let count = MESSAGE_SAMPLE_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= MESSAGE_SAMPLE_LIMIT {
        return;
    }

    info!(
        sample_index = count + 1,
        sample_limit = MESSAGE_SAMPLE_LIMIT,
        channel = %message.channel,
        "ws message sample"
    );
}

fn log_other_message_once(raw: &str) {
    let count = OTHER_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < OTHER_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = OTHER_LOG_LIMIT,
            bytes = raw.len(),
            "ws message unrouted"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = OTHER_LOG_LIMIT,
            bytes = raw.len(),
            message = %preview,
            "ws message unrouted"
        );
    }
}

fn log_parse_fail_once(err: &serde_json::Error, raw: &str) {
    let count = PARSE_FAIL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < PARSE_FAIL_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            "ws message parse failed"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            message = %preview,
            "ws message parse failed"
        );
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let value = "é".repeat(10);
        let out = truncate_for_log(&value, 5);
        assert!(out.ends_with("..."));
        assert_eq!(out, format!("{}...", "é".repeat(2)));
    }

    #[test]
    fn test_login_rejection_is_unauthorized() {
        let envelope: RpcEnvelope = serde_json::from_value(serde_json::json!({
            "id": "1",
            "error": {"code": 14014, "message": "Signature invalid for message or transaction"}
        }))
        .unwrap();
        let err = rpc::into_result(LOGIN_METHOD, envelope).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_default_ws_config() {
        let config = WsConfig::default();
        assert_eq!(config.login_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
