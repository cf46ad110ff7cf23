/*
[INPUT]:  Base clients (async HTTP, blocking HTTP, websocket)
[OUTPUT]: Resource sub-clients bound to a client
[POS]:    Ops layer - typed operations over the shared JSON-RPC core
[UPDATE]: When adding new resources
*/

pub mod account;
pub mod markets;
pub mod trades;
pub mod transactions;

pub use account::{Account, BlockingAccount};
pub use markets::{BlockingMarkets, Markets};
pub use trades::{BlockingTrades, Trades};
pub use transactions::{BlockingTransactions, Transactions};

use crate::http::{BlockingDeriveClient, DeriveClient};
use crate::ws::DeriveWebSocket;

impl DeriveClient {
    pub fn account(&self) -> Account<'_, Self> {
        Account::new(self)
    }

    pub fn markets(&self) -> Markets<'_, Self> {
        Markets::new(self)
    }

    pub fn trades(&self) -> Trades<'_, Self> {
        Trades::new(self)
    }

    pub fn transactions(&self) -> Transactions<'_, Self> {
        Transactions::new(self)
    }
}

impl DeriveWebSocket {
    pub fn account(&self) -> Account<'_, Self> {
        Account::new(self)
    }

    pub fn markets(&self) -> Markets<'_, Self> {
        Markets::new(self)
    }

    pub fn trades(&self) -> Trades<'_, Self> {
        Trades::new(self)
    }

    pub fn transactions(&self) -> Transactions<'_, Self> {
        Transactions::new(self)
    }
}

impl BlockingDeriveClient {
    pub fn account(&self) -> BlockingAccount<'_> {
        BlockingAccount::new(self)
    }

    pub fn markets(&self) -> BlockingMarkets<'_> {
        BlockingMarkets::new(self)
    }

    pub fn trades(&self) -> BlockingTrades<'_> {
        BlockingTrades::new(self)
    }

    pub fn transactions(&self) -> BlockingTransactions<'_> {
        BlockingTransactions::new(self)
    }
}
