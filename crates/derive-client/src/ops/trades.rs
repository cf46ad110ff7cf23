/*
[INPUT]:  Trade history filters and a JSON-RPC transport
[OUTPUT]: Public and private trade records
[POS]:    Ops layer - trade history sub-client
[UPDATE]: When trade history endpoints or filters change
*/

use serde_json::Value;

use crate::http::rpc::{self, RpcCall, RpcTransport};
use crate::http::{BlockingDeriveClient, Result};
use crate::types::{
    PrivateTrade, PrivateTradeHistory, PrivateTradeHistoryParams, PublicTrade,
    PublicTradeHistory, PublicTradeHistoryParams,
};

pub const PUBLIC_TRADE_HISTORY: &str = "public/get_trade_history";
pub const PRIVATE_TRADE_HISTORY: &str = "private/get_trade_history";

pub(crate) fn public_history_call(params: &PublicTradeHistoryParams) -> Result<RpcCall> {
    RpcCall::public(PUBLIC_TRADE_HISTORY, params)
}

/// Fills `subaccount_id` from the session when the caller left it unset
pub(crate) fn private_history_call(
    params: &PrivateTradeHistoryParams,
    default_subaccount: Option<u64>,
) -> Result<RpcCall> {
    if params.subaccount_id.is_none() && default_subaccount.is_some() {
        let params = PrivateTradeHistoryParams {
            subaccount_id: default_subaccount,
            ..params.clone()
        };
        return RpcCall::private(PRIVATE_TRADE_HISTORY, &params);
    }
    RpcCall::private(PRIVATE_TRADE_HISTORY, params)
}

fn decode_public(value: Value) -> Result<PublicTradeHistory> {
    rpc::decode_result(PUBLIC_TRADE_HISTORY, value)
}

fn decode_private(value: Value) -> Result<PrivateTradeHistory> {
    rpc::decode_result(PRIVATE_TRADE_HISTORY, value)
}

/// Trade history over any async transport (HTTP or websocket)
#[derive(Debug)]
pub struct Trades<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: RpcTransport + ?Sized> Trades<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// One page of settled public trades, with pagination info
    pub async fn public_history(
        &self,
        params: &PublicTradeHistoryParams,
    ) -> Result<PublicTradeHistory> {
        let value = self.transport.request(public_history_call(params)?).await?;
        decode_public(value)
    }

    /// Settled public trades; empty when none match
    pub async fn list_public(&self, params: &PublicTradeHistoryParams) -> Result<Vec<PublicTrade>> {
        Ok(self.public_history(params).await?.trades)
    }

    pub async fn private_history(
        &self,
        params: &PrivateTradeHistoryParams,
    ) -> Result<PrivateTradeHistory> {
        let call = private_history_call(params, self.transport.default_subaccount())?;
        let value = self.transport.request(call).await?;
        decode_private(value)
    }

    /// Trades of the authenticated account; empty when none match
    pub async fn list_private(
        &self,
        params: &PrivateTradeHistoryParams,
    ) -> Result<Vec<PrivateTrade>> {
        Ok(self.private_history(params).await?.trades)
    }
}

/// Trade history over the blocking HTTP client
#[derive(Debug)]
pub struct BlockingTrades<'a> {
    client: &'a BlockingDeriveClient,
}

impl<'a> BlockingTrades<'a> {
    pub fn new(client: &'a BlockingDeriveClient) -> Self {
        Self { client }
    }

    pub fn public_history(&self, params: &PublicTradeHistoryParams) -> Result<PublicTradeHistory> {
        decode_public(self.client.request(public_history_call(params)?)?)
    }

    pub fn list_public(&self, params: &PublicTradeHistoryParams) -> Result<Vec<PublicTrade>> {
        Ok(self.public_history(params)?.trades)
    }

    pub fn private_history(
        &self,
        params: &PrivateTradeHistoryParams,
    ) -> Result<PrivateTradeHistory> {
        let call = private_history_call(params, self.client.default_subaccount())?;
        decode_private(self.client.request(call)?)
    }

    pub fn list_private(&self, params: &PrivateTradeHistoryParams) -> Result<Vec<PrivateTrade>> {
        Ok(self.private_history(params)?.trades)
    }
}
