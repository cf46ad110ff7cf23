/*
[INPUT]:  Parsed commands and CLI configuration
[OUTPUT]: Typed results fetched from Derive, rendered for stdout
[POS]:    Command layer - wires configuration to client calls
[UPDATE]: When adding commands
*/

use anyhow::{Context, Result, bail};
use derive_client::{
    DeriveClient, DeriveWebSocket, InstrumentDetails, InstrumentType, PrivateTrade,
    PrivateTradeHistoryParams, PublicTrade, PublicTradeHistoryParams, RegistryGaps,
    SubaccountState, Ticker, TransactionResult, WsConfig, get_prod_derive_addresses,
};
use tracing::info;

use crate::cli::{
    AccountCommand, Command, MarketsCommand, PrivateTradesArgs, PublicTradesArgs,
    RegistryCommand, TradesCommand, TransactionCommand,
};
use crate::config::CliConfig;
use crate::output::{self, OutputFormat};

fn http_client(config: &CliConfig) -> Result<DeriveClient> {
    let endpoints = config.endpoints();
    DeriveClient::with_config_and_base_url(config.client_config(), &endpoints.base_url)
        .context("create HTTP client")
}

pub async fn trades_public(config: &CliConfig, args: &PublicTradesArgs) -> Result<Vec<PublicTrade>> {
    let client = http_client(config)?;
    let params = PublicTradeHistoryParams::from(args);
    client
        .trades()
        .list_public(&params)
        .await
        .context("fetch public trade history")
}

pub async fn trades_private(
    config: &CliConfig,
    args: &PrivateTradesArgs,
) -> Result<Vec<PrivateTrade>> {
    let credentials = config.credentials()?;
    let params = PrivateTradeHistoryParams::from(args);

    if args.ws {
        let ws_url = config.endpoints().ws_url;
        let ws_config = WsConfig {
            request_timeout: config.client_config().timeout,
            ..WsConfig::default()
        };
        let ws = DeriveWebSocket::connect_with_config(&ws_url, &credentials, ws_config)
            .await
            .context("connect and log in over websocket")?;
        info!(subaccounts = ?ws.subaccount_ids(), "websocket session ready");
        let trades = ws
            .trades()
            .list_private(&params)
            .await
            .context("fetch private trade history");
        let _ = ws.close().await;
        return trades;
    }

    let client = http_client(config)?
        .with_credentials(&credentials)
        .context("load credentials")?;
    client
        .trades()
        .list_private(&params)
        .await
        .context("fetch private trade history")
}

pub async fn transaction_get(config: &CliConfig, transaction_id: &str) -> Result<TransactionResult> {
    http_client(config)?
        .transactions()
        .get(transaction_id)
        .await
        .with_context(|| format!("fetch transaction {transaction_id}"))
}

pub async fn markets_ticker(config: &CliConfig, instrument: &str) -> Result<Ticker> {
    http_client(config)?
        .markets()
        .get_ticker(instrument)
        .await
        .with_context(|| format!("fetch ticker for {instrument}"))
}

pub async fn markets_instruments(
    config: &CliConfig,
    currency: &str,
    instrument_type: InstrumentType,
    expired: bool,
) -> Result<Vec<InstrumentDetails>> {
    http_client(config)?
        .markets()
        .get_instruments(currency, instrument_type, expired)
        .await
        .with_context(|| format!("fetch {currency} instruments"))
}

pub async fn account_subaccount(config: &CliConfig, id: Option<u64>) -> Result<SubaccountState> {
    let credentials = config.credentials()?;
    let client = http_client(config)?
        .with_credentials(&credentials)
        .context("load credentials")?;
    client
        .account()
        .get_subaccount(id)
        .await
        .context("fetch subaccount")
}

pub fn registry_check() -> Result<RegistryGaps> {
    let registry = get_prod_derive_addresses().context("load production address registry")?;
    Ok(registry.missing_enum_members())
}

/// Run a command and return what should be printed
pub async fn run(command: &Command, config: &CliConfig, format: OutputFormat) -> Result<String> {
    match command {
        Command::Trades {
            command: TradesCommand::Public(args),
        } => {
            let trades = trades_public(config, args).await?;
            output::render_public_trades(&trades, format)
        }
        Command::Trades {
            command: TradesCommand::Private(args),
        } => {
            let trades = trades_private(config, args).await?;
            output::render_private_trades(&trades, format)
        }
        Command::Transaction {
            command: TransactionCommand::Get { transaction_id },
        } => {
            let tx = transaction_get(config, transaction_id).await?;
            output::render_transaction(&tx, format)
        }
        Command::Markets {
            command: MarketsCommand::Ticker { instrument },
        } => {
            let ticker = markets_ticker(config, instrument).await?;
            output::render_ticker(&ticker, format)
        }
        Command::Markets {
            command:
                MarketsCommand::Instruments {
                    currency,
                    kind,
                    expired,
                },
        } => {
            let instruments = markets_instruments(config, currency, (*kind).into(), *expired).await?;
            output::render_instruments(&instruments, format)
        }
        Command::Account {
            command: AccountCommand::Subaccount { id },
        } => {
            let state = account_subaccount(config, *id).await?;
            output::render_subaccount(&state, format)
        }
        Command::Registry {
            command: RegistryCommand::Check,
        } => {
            let gaps = registry_check()?;
            let text = output::render_registry_gaps(&gaps);
            if !gaps.is_empty() {
                bail!(text);
            }
            Ok(text)
        }
    }
}
