/*
[INPUT]:  Transaction id and a JSON-RPC transport
[OUTPUT]: Transaction status records
[POS]:    Ops layer - transaction lookup sub-client
[UPDATE]: When the transaction endpoint changes
*/

use serde_json::Value;

use crate::http::rpc::{self, RpcCall, RpcTransport};
use crate::http::{BlockingDeriveClient, DeriveError, Result};
use crate::types::{GetTransactionParams, TransactionResult};

pub const GET_TRANSACTION: &str = "public/get_transaction";

pub(crate) fn transaction_call(transaction_id: &str) -> Result<RpcCall> {
    if transaction_id.trim().is_empty() {
        return Err(DeriveError::validation("transaction_id must not be empty"));
    }
    RpcCall::public(
        GET_TRANSACTION,
        &GetTransactionParams {
            transaction_id: transaction_id.to_string(),
        },
    )
}

/// A `null` result means the exchange knows no such transaction
fn decode_transaction(transaction_id: &str, value: Value) -> Result<TransactionResult> {
    if value.is_null() {
        return Err(DeriveError::not_found(format!(
            "{GET_TRANSACTION}: transaction {transaction_id}"
        )));
    }
    rpc::decode_result(GET_TRANSACTION, value)
}

/// Transaction lookups over any async transport (HTTP or websocket)
#[derive(Debug)]
pub struct Transactions<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: RpcTransport + ?Sized> Transactions<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetch one transaction; unknown ids fail with `DeriveError::NotFound`
    pub async fn get(&self, transaction_id: &str) -> Result<TransactionResult> {
        let value = self.transport.request(transaction_call(transaction_id)?).await?;
        decode_transaction(transaction_id, value)
    }
}

/// Transaction lookups over the blocking HTTP client
#[derive(Debug)]
pub struct BlockingTransactions<'a> {
    client: &'a BlockingDeriveClient,
}

impl<'a> BlockingTransactions<'a> {
    pub fn new(client: &'a BlockingDeriveClient) -> Self {
        Self { client }
    }

    pub fn get(&self, transaction_id: &str) -> Result<TransactionResult> {
        let value = self.client.request(transaction_call(transaction_id)?)?;
        decode_transaction(transaction_id, value)
    }
}
