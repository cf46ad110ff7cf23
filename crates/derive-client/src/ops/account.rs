/*
[INPUT]:  Authenticated JSON-RPC transport
[OUTPUT]: Account, subaccount and session key snapshots
[POS]:    Ops layer - read-only account sub-client
[UPDATE]: When account endpoints change
*/

use crate::http::rpc::{self, RpcCall, RpcTransport};
use crate::http::{BlockingDeriveClient, DeriveError, Result};
use crate::types::{
    AccountInfo, SessionKeys, SubaccountIds, SubaccountParams, SubaccountState, WalletParams,
};

pub const GET_ACCOUNT: &str = "private/get_account";
pub const GET_SUBACCOUNTS: &str = "private/get_subaccounts";
pub const GET_SUBACCOUNT: &str = "private/get_subaccount";
pub const GET_ALL_PORTFOLIOS: &str = "private/get_all_portfolios";
pub const SESSION_KEYS: &str = "private/session_keys";

/// Wallet-scoped call; fails before any I/O when no session is configured
fn wallet_call(method: &'static str, wallet: Option<&str>) -> Result<RpcCall> {
    let wallet = wallet.ok_or_else(|| {
        DeriveError::unauthorized(format!("{method} requires credentials; none configured"))
    })?;
    RpcCall::private(
        method,
        &WalletParams {
            wallet: wallet.to_string(),
        },
    )
}

/// Explicit id first, then the session default
fn subaccount_call(subaccount_id: Option<u64>, default_subaccount: Option<u64>) -> Result<RpcCall> {
    let subaccount_id = subaccount_id.or(default_subaccount).ok_or_else(|| {
        DeriveError::validation(format!(
            "{GET_SUBACCOUNT}: no subaccount_id given and no default subaccount configured"
        ))
    })?;
    RpcCall::private(GET_SUBACCOUNT, &SubaccountParams { subaccount_id })
}

/// Read-only account queries over any async transport (HTTP or websocket)
#[derive(Debug)]
pub struct Account<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: RpcTransport + ?Sized> Account<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    async fn wallet_request(&self, method: &'static str) -> Result<serde_json::Value> {
        let call = wallet_call(method, self.transport.wallet())?;
        self.transport.request(call).await
    }

    /// Account settings, fee tier and rate limits of the session wallet
    pub async fn get(&self) -> Result<AccountInfo> {
        let value = self.wallet_request(GET_ACCOUNT).await?;
        rpc::decode_result(GET_ACCOUNT, value)
    }

    pub async fn get_subaccounts(&self) -> Result<SubaccountIds> {
        let value = self.wallet_request(GET_SUBACCOUNTS).await?;
        rpc::decode_result(GET_SUBACCOUNTS, value)
    }

    /// Snapshot of one subaccount; `None` uses the session default
    pub async fn get_subaccount(&self, subaccount_id: Option<u64>) -> Result<SubaccountState> {
        let call = subaccount_call(subaccount_id, self.transport.default_subaccount())?;
        let value = self.transport.request(call).await?;
        rpc::decode_result(GET_SUBACCOUNT, value)
    }

    /// Snapshots of every subaccount of the wallet
    pub async fn get_all_portfolios(&self) -> Result<Vec<SubaccountState>> {
        let value = self.wallet_request(GET_ALL_PORTFOLIOS).await?;
        rpc::decode_result(GET_ALL_PORTFOLIOS, value)
    }

    pub async fn session_keys(&self) -> Result<SessionKeys> {
        let value = self.wallet_request(SESSION_KEYS).await?;
        rpc::decode_result(SESSION_KEYS, value)
    }
}

/// Read-only account queries over the blocking HTTP client
#[derive(Debug)]
pub struct BlockingAccount<'a> {
    client: &'a BlockingDeriveClient,
}

impl<'a> BlockingAccount<'a> {
    pub fn new(client: &'a BlockingDeriveClient) -> Self {
        Self { client }
    }

    fn wallet_request(&self, method: &'static str) -> Result<serde_json::Value> {
        self.client.request(wallet_call(method, self.client.wallet())?)
    }

    pub fn get(&self) -> Result<AccountInfo> {
        rpc::decode_result(GET_ACCOUNT, self.wallet_request(GET_ACCOUNT)?)
    }

    pub fn get_subaccounts(&self) -> Result<SubaccountIds> {
        rpc::decode_result(GET_SUBACCOUNTS, self.wallet_request(GET_SUBACCOUNTS)?)
    }

    pub fn get_subaccount(&self, subaccount_id: Option<u64>) -> Result<SubaccountState> {
        let call = subaccount_call(subaccount_id, self.client.default_subaccount())?;
        rpc::decode_result(GET_SUBACCOUNT, self.client.request(call)?)
    }

    pub fn get_all_portfolios(&self) -> Result<Vec<SubaccountState>> {
        rpc::decode_result(GET_ALL_PORTFOLIOS, self.wallet_request(GET_ALL_PORTFOLIOS)?)
    }

    pub fn session_keys(&self) -> Result<SessionKeys> {
        rpc::decode_result(SESSION_KEYS, self.wallet_request(SESSION_KEYS)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wallet_call_without_session_is_unauthorized() {
        let err = wallet_call(GET_ACCOUNT, None).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_wallet_call_params() {
        let call = wallet_call(GET_SUBACCOUNTS, Some("0xabc")).unwrap();
        assert!(call.is_private());
        assert_eq!(call.params, json!({"wallet": "0xabc"}));
    }

    #[test]
    fn test_subaccount_call_falls_back_to_default() {
        let call = subaccount_call(None, Some(30769)).unwrap();
        assert_eq!(call.params, json!({"subaccount_id": 30769}));
        let call = subaccount_call(Some(5), Some(30769)).unwrap();
        assert_eq!(call.params, json!({"subaccount_id": 5}));
    }

    #[test]
    fn test_subaccount_call_without_any_id() {
        let err = subaccount_call(None, None).unwrap_err();
        assert!(matches!(err, DeriveError::Validation { .. }));
    }
}
