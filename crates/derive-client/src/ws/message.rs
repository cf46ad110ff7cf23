/*
[INPUT]:  Raw WebSocket text frames
[OUTPUT]: Outgoing JSON-RPC requests and classified incoming frames
[POS]:    WebSocket layer - message parsing and validation
[UPDATE]: When adding new message types or changing format
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RpcEnvelope;

/// Method name the exchange uses for channel pushes
pub const SUBSCRIPTION_METHOD: &str = "subscription";

/// Outgoing JSON-RPC request frame
#[derive(Debug, Clone, Serialize)]
pub struct WsRequest<'a> {
    pub method: &'a str,
    pub params: &'a Value,
    pub id: &'a str,
}

/// Channel push delivered to `take_receiver()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionMessage {
    pub channel: String,
    #[serde(default)]
    pub data: Value,
}

/// Incoming frame after classification
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingFrame {
    Response(RpcEnvelope),
    Notification(SubscriptionMessage),
    Other,
}

impl IncomingFrame {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;

        if value.get("method").and_then(Value::as_str) == Some(SUBSCRIPTION_METHOD) {
            let params = value.get("params").cloned().unwrap_or(Value::Null);
            return Ok(IncomingFrame::Notification(serde_json::from_value(params)?));
        }

        let has_id = value.get("id").is_some_and(|id| !id.is_null());
        if has_id && (value.get("result").is_some() || value.get("error").is_some()) {
            return Ok(IncomingFrame::Response(serde_json::from_value(value)?));
        }

        Ok(IncomingFrame::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let frame = IncomingFrame::parse(r#"{"id": "a1", "result": [1, 2]}"#).unwrap();
        match frame {
            IncomingFrame::Response(envelope) => {
                assert_eq!(envelope.id_key().as_deref(), Some("a1"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_notification() {
        let frame = IncomingFrame::parse(
            r#"{"method": "subscription", "params": {"channel": "ETH-PERP.trades", "data": [{"trade_id": "t"}]}}"#,
        )
        .unwrap();
        match frame {
            IncomingFrame::Notification(message) => {
                assert_eq!(message.channel, "ETH-PERP.trades");
                assert!(message.data.is_array());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_other_and_garbage() {
        assert_eq!(
            IncomingFrame::parse(r#"{"hello": "world"}"#).unwrap(),
            IncomingFrame::Other
        );
        assert!(IncomingFrame::parse("not json").is_err());
    }

    #[test]
    fn test_request_frame_shape() {
        let params = serde_json::json!({"channels": ["ETH-PERP.trades"]});
        let frame = WsRequest {
            method: "subscribe",
            params: &params,
            id: "id-1",
        };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            serde_json::json!({"method": "subscribe", "params": params, "id": "id-1"})
        );
    }
}
