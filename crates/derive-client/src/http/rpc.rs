/*
[INPUT]:  Method names, params, and raw JSON-RPC response bodies
[OUTPUT]: Transport-neutral calls and typed, validated results
[POS]:    HTTP layer - request building and response parsing shared by every transport
[UPDATE]: When the JSON-RPC envelope or error mapping changes
*/

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{DeriveError, Result};
use crate::types::{RpcEnvelope, RpcErrorBody, Validate};

/// Whether a call needs a signed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

/// A JSON-RPC call before it is bound to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    pub method: &'static str,
    pub params: Value,
    pub access: Access,
}

impl RpcCall {
    pub fn public<P: Serialize>(method: &'static str, params: &P) -> Result<Self> {
        Ok(Self {
            method,
            params: to_params(method, params)?,
            access: Access::Public,
        })
    }

    pub fn private<P: Serialize>(method: &'static str, params: &P) -> Result<Self> {
        Ok(Self {
            method,
            params: to_params(method, params)?,
            access: Access::Private,
        })
    }

    pub fn is_private(&self) -> bool {
        self.access == Access::Private
    }
}

/// Anything that can carry a JSON-RPC call to Derive and return its `result`
///
/// Implemented by the async HTTP client and the websocket client, so the
/// async sub-clients work over either.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn request(&self, call: RpcCall) -> Result<Value>;

    /// Subaccount used when a private call does not name one
    fn default_subaccount(&self) -> Option<u64> {
        None
    }

    /// Wallet the session authenticates as, if any
    fn wallet(&self) -> Option<&str> {
        None
    }
}

fn to_params<P: Serialize>(method: &str, params: &P) -> Result<Value> {
    serde_json::to_value(params)
        .map_err(|e| DeriveError::validation(format!("{method}: params not serializable: {e}")))
}

/// Interpret an HTTP response body as a JSON-RPC envelope
pub fn parse_http_body(method: &str, status: u16, body: &[u8]) -> Result<Value> {
    if status == 401 || status == 403 {
        return Err(DeriveError::unauthorized(format!(
            "{method}: HTTP {status}: {}",
            body_preview(body)
        )));
    }

    match serde_json::from_slice::<RpcEnvelope>(body) {
        Ok(envelope) => into_result(method, envelope),
        Err(_) if !(200..300).contains(&status) => Err(DeriveError::Status {
            status,
            body: body_preview(body),
        }),
        Err(e) => Err(DeriveError::validation(format!(
            "{method}: malformed JSON-RPC response: {e}"
        ))),
    }
}

/// Extract `result` or map `error` from a decoded envelope
pub fn into_result(method: &str, envelope: RpcEnvelope) -> Result<Value> {
    if let Some(error) = envelope.error {
        return Err(map_rpc_error(method, error));
    }
    envelope.result.ok_or_else(|| {
        DeriveError::validation(format!(
            "{method}: response carried neither result nor error"
        ))
    })
}

/// Exchange error codes that mean the session or its signature was refused
pub const AUTH_ERROR_CODES: &[i64] = &[14014];

const AUTH_PHRASES: &[&str] = &[
    "unauthorized",
    "not logged in",
    "authentication",
    "invalid signature",
    "signature invalid",
];

const NOT_FOUND_PHRASES: &[&str] = &["not found", "does not exist"];

/// Map an exchange error onto the error taxonomy
///
/// Every transport funnels JSON-RPC errors through here, so REST and the
/// websocket classify the same error the same way.
pub fn map_rpc_error(method: &str, error: RpcErrorBody) -> DeriveError {
    let data = error.data_text();
    let haystack = format!(
        "{} {}",
        error.message.to_lowercase(),
        data.as_deref().unwrap_or_default().to_lowercase()
    );

    if AUTH_ERROR_CODES.contains(&error.code)
        || AUTH_PHRASES.iter().any(|phrase| haystack.contains(phrase))
    {
        return DeriveError::unauthorized(format!(
            "{method}: {} (code {})",
            error.message, error.code
        ));
    }
    if NOT_FOUND_PHRASES.iter().any(|phrase| haystack.contains(phrase)) {
        return DeriveError::not_found(format!("{method}: {}", error.message));
    }

    DeriveError::Rpc {
        code: error.code,
        message: error.message,
        data,
    }
}

/// Deserialize a `result` payload into a record and run its invariant checks
pub fn decode_result<T>(method: &str, value: Value) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_json::from_value(value)
        .map_err(|e| DeriveError::validation(format!("{method}: {e}")))?;
    record.validate()?;
    Ok(record)
}

fn body_preview(body: &[u8]) -> String {
    const MAX: usize = 512;
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ErrorKind;
    use crate::types::PublicTradeHistory;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(401)]
    #[case(403)]
    fn test_auth_status_is_unauthorized(#[case] status: u16) {
        let err = parse_http_body("private/get_trade_history", status, b"denied").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_non_json_error_status() {
        let err = parse_http_body("public/get_transaction", 502, b"<html>bad gateway</html>")
            .unwrap_err();
        match err {
            DeriveError::Status { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("bad gateway"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_rpc_error_on_400_is_mapped() {
        let body = json!({
            "id": "1",
            "error": {"code": -32602, "message": "Invalid params", "data": "page_size"}
        });
        let err = parse_http_body("public/get_trade_history", 400, body.to_string().as_bytes())
            .unwrap_err();
        match err {
            DeriveError::Rpc { code, data, .. } => {
                assert_eq!(code, -32602);
                assert_eq!(data.as_deref(), Some("page_size"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[rstest]
    #[case("Transaction not found", ErrorKind::NotFound)]
    #[case("Transaction does not exist", ErrorKind::NotFound)]
    #[case("Not logged in", ErrorKind::Unauthorized)]
    #[case("Authentication failed", ErrorKind::Unauthorized)]
    #[case("Signature invalid for message or transaction", ErrorKind::Unauthorized)]
    #[case("Rate limit exceeded", ErrorKind::Api)]
    fn test_rpc_error_classification(#[case] message: &str, #[case] kind: ErrorKind) {
        let error = RpcErrorBody {
            code: 11000,
            message: message.to_string(),
            data: None,
        };
        assert_eq!(map_rpc_error("public/get_transaction", error).kind(), kind);
    }

    #[test]
    fn test_auth_error_code_is_unauthorized() {
        let error = RpcErrorBody {
            code: 14014,
            message: "Rejected".to_string(),
            data: None,
        };
        let err = map_rpc_error("private/get_trade_history", error);
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("14014"));
    }

    #[test]
    fn test_empty_envelope_is_validation_error() {
        let err = parse_http_body("public/get_transaction", 200, b"{}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_result_is_extracted() {
        let body = json!({"id": "1", "result": {"trades": []}});
        let value = parse_http_body("public/get_trade_history", 200, body.to_string().as_bytes())
            .unwrap();
        let history: PublicTradeHistory =
            decode_result("public/get_trade_history", value).unwrap();
        assert!(history.trades.is_empty());
    }

    #[test]
    fn test_decode_wrong_shape_is_validation_error() {
        let err = decode_result::<PublicTradeHistory>(
            "public/get_trade_history",
            json!({"trades": "nope"}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("public/get_trade_history"));
    }

    #[test]
    fn test_private_call_access() {
        let call = RpcCall::private("private/get_trade_history", &json!({})).unwrap();
        assert!(call.is_private());
        let call = RpcCall::public("public/get_transaction", &json!({})).unwrap();
        assert!(!call.is_private());
    }
}
