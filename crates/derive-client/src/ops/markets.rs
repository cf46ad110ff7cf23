/*
[INPUT]:  Currency and instrument names and a JSON-RPC transport
[OUTPUT]: Currency, instrument and ticker records
[POS]:    Ops layer - public market data sub-client
[UPDATE]: When market data endpoints change
*/

use serde_json::Value;
use tracing::debug;

use crate::http::rpc::{self, RpcCall, RpcTransport};
use crate::http::{BlockingDeriveClient, Result};
use crate::types::{
    AllInstrumentsParams, CurrencyDetails, CurrencyParams, EmptyParams, InstrumentDetails,
    InstrumentNameParams, InstrumentPage, InstrumentType, InstrumentsParams, Ticker,
};

pub const GET_CURRENCY: &str = "public/get_currency";
pub const GET_ALL_CURRENCIES: &str = "public/get_all_currencies";
pub const GET_INSTRUMENT: &str = "public/get_instrument";
pub const GET_INSTRUMENTS: &str = "public/get_instruments";
pub const GET_ALL_INSTRUMENTS: &str = "public/get_all_instruments";
pub const GET_TICKER: &str = "public/get_ticker";

/// Page size used when walking every page of `public/get_all_instruments`
pub const INSTRUMENT_PAGE_SIZE: u32 = 100;

fn currency_call(currency: &str) -> Result<RpcCall> {
    RpcCall::public(
        GET_CURRENCY,
        &CurrencyParams {
            currency: currency.to_string(),
        },
    )
}

fn instrument_call(method: &'static str, instrument_name: &str) -> Result<RpcCall> {
    RpcCall::public(
        method,
        &InstrumentNameParams {
            instrument_name: instrument_name.to_string(),
        },
    )
}

fn instruments_call(currency: &str, instrument_type: InstrumentType, expired: bool) -> Result<RpcCall> {
    RpcCall::public(
        GET_INSTRUMENTS,
        &InstrumentsParams {
            currency: currency.to_string(),
            instrument_type,
            expired,
        },
    )
}

/// Next page to request, or `None` once the last page has been read
fn next_page(current: u32, page: &InstrumentPage) -> Option<u32> {
    let num_pages = page.pagination.as_ref()?.num_pages;
    if page.instruments.is_empty() || u64::from(current) >= num_pages {
        return None;
    }
    current.checked_add(1)
}

fn page_params(instrument_type: InstrumentType, expired: bool, page: u32) -> AllInstrumentsParams {
    AllInstrumentsParams {
        expired,
        page: Some(page),
        page_size: Some(INSTRUMENT_PAGE_SIZE),
        ..AllInstrumentsParams::new(instrument_type)
    }
}

/// Public market data over any async transport (HTTP or websocket)
#[derive(Debug)]
pub struct Markets<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: RpcTransport + ?Sized> Markets<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn get_currency(&self, currency: &str) -> Result<CurrencyDetails> {
        let value = self.transport.request(currency_call(currency)?).await?;
        rpc::decode_result(GET_CURRENCY, value)
    }

    pub async fn get_all_currencies(&self) -> Result<Vec<CurrencyDetails>> {
        let call = RpcCall::public(GET_ALL_CURRENCIES, &EmptyParams {})?;
        let value = self.transport.request(call).await?;
        rpc::decode_result(GET_ALL_CURRENCIES, value)
    }

    pub async fn get_instrument(&self, instrument_name: &str) -> Result<InstrumentDetails> {
        let call = instrument_call(GET_INSTRUMENT, instrument_name)?;
        let value = self.transport.request(call).await?;
        rpc::decode_result(GET_INSTRUMENT, value)
    }

    /// Instruments of one type listed for a currency
    pub async fn get_instruments(
        &self,
        currency: &str,
        instrument_type: InstrumentType,
        expired: bool,
    ) -> Result<Vec<InstrumentDetails>> {
        let call = instruments_call(currency, instrument_type, expired)?;
        let value = self.transport.request(call).await?;
        rpc::decode_result(GET_INSTRUMENTS, value)
    }

    /// One page of instruments across currencies
    pub async fn get_all_instruments(&self, params: &AllInstrumentsParams) -> Result<InstrumentPage> {
        let call = RpcCall::public(GET_ALL_INSTRUMENTS, params)?;
        let value = self.transport.request(call).await?;
        rpc::decode_result(GET_ALL_INSTRUMENTS, value)
    }

    /// Every instrument of a type, walking all pages
    pub async fn fetch_instruments(
        &self,
        instrument_type: InstrumentType,
        expired: bool,
    ) -> Result<Vec<InstrumentDetails>> {
        let mut instruments = Vec::new();
        let mut page = 1;
        loop {
            let result = self
                .get_all_instruments(&page_params(instrument_type, expired, page))
                .await?;
            let next = next_page(page, &result);
            instruments.extend(result.instruments);
            match next {
                Some(following) => page = following,
                None => break,
            }
        }
        debug!(?instrument_type, count = instruments.len(), "fetched instruments");
        Ok(instruments)
    }

    pub async fn get_ticker(&self, instrument_name: &str) -> Result<Ticker> {
        let call = instrument_call(GET_TICKER, instrument_name)?;
        let value = self.transport.request(call).await?;
        rpc::decode_result(GET_TICKER, value)
    }

    /// Ticker of every instrument `get_instruments` lists, one request each
    pub async fn get_all_tickers(
        &self,
        currency: &str,
        instrument_type: InstrumentType,
        expired: bool,
    ) -> Result<Vec<Ticker>> {
        let instruments = self.get_instruments(currency, instrument_type, expired).await?;
        let mut tickers = Vec::with_capacity(instruments.len());
        for instrument in &instruments {
            tickers.push(self.get_ticker(&instrument.instrument_name).await?);
        }
        Ok(tickers)
    }
}

/// Public market data over the blocking HTTP client
#[derive(Debug)]
pub struct BlockingMarkets<'a> {
    client: &'a BlockingDeriveClient,
}

impl<'a> BlockingMarkets<'a> {
    pub fn new(client: &'a BlockingDeriveClient) -> Self {
        Self { client }
    }

    fn call(&self, call: RpcCall) -> Result<Value> {
        self.client.request(call)
    }

    pub fn get_currency(&self, currency: &str) -> Result<CurrencyDetails> {
        rpc::decode_result(GET_CURRENCY, self.call(currency_call(currency)?)?)
    }

    pub fn get_all_currencies(&self) -> Result<Vec<CurrencyDetails>> {
        let call = RpcCall::public(GET_ALL_CURRENCIES, &EmptyParams {})?;
        rpc::decode_result(GET_ALL_CURRENCIES, self.call(call)?)
    }

    pub fn get_instrument(&self, instrument_name: &str) -> Result<InstrumentDetails> {
        let call = instrument_call(GET_INSTRUMENT, instrument_name)?;
        rpc::decode_result(GET_INSTRUMENT, self.call(call)?)
    }

    pub fn get_instruments(
        &self,
        currency: &str,
        instrument_type: InstrumentType,
        expired: bool,
    ) -> Result<Vec<InstrumentDetails>> {
        let call = instruments_call(currency, instrument_type, expired)?;
        rpc::decode_result(GET_INSTRUMENTS, self.call(call)?)
    }

    pub fn get_all_instruments(&self, params: &AllInstrumentsParams) -> Result<InstrumentPage> {
        let call = RpcCall::public(GET_ALL_INSTRUMENTS, params)?;
        rpc::decode_result(GET_ALL_INSTRUMENTS, self.call(call)?)
    }

    pub fn fetch_instruments(
        &self,
        instrument_type: InstrumentType,
        expired: bool,
    ) -> Result<Vec<InstrumentDetails>> {
        let mut instruments = Vec::new();
        let mut page = 1;
        loop {
            let result = self.get_all_instruments(&page_params(instrument_type, expired, page))?;
            let next = next_page(page, &result);
            instruments.extend(result.instruments);
            match next {
                Some(following) => page = following,
                None => break,
            }
        }
        Ok(instruments)
    }

    pub fn get_ticker(&self, instrument_name: &str) -> Result<Ticker> {
        let call = instrument_call(GET_TICKER, instrument_name)?;
        rpc::decode_result(GET_TICKER, self.call(call)?)
    }

    pub fn get_all_tickers(
        &self,
        currency: &str,
        instrument_type: InstrumentType,
        expired: bool,
    ) -> Result<Vec<Ticker>> {
        self.get_instruments(currency, instrument_type, expired)?
            .iter()
            .map(|instrument| self.get_ticker(&instrument.instrument_name))
            .collect()
    }
}
