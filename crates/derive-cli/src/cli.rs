/*
[INPUT]:  Command line arguments
[OUTPUT]: Parsed commands and request params
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding commands or flags
*/

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use derive_client::{
    Environment, InstrumentType, PrivateTradeHistoryParams, PublicTradeHistoryParams,
};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "derive-cli", version, about = "Derive exchange command line client")]
pub struct Cli {
    /// Config file (TOML/YAML/JSON); defaults to <config dir>/derive/config.toml
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
    /// Overrides the configured environment
    #[arg(long = "env", value_enum, global = true)]
    pub env: Option<EnvArg>,
    #[arg(long = "format", value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvArg {
    Prod,
    Test,
}

impl From<EnvArg> for Environment {
    fn from(env: EnvArg) -> Self {
        match env {
            EnvArg::Prod => Environment::Prod,
            EnvArg::Test => Environment::Test,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trade history
    Trades {
        #[command(subcommand)]
        command: TradesCommand,
    },
    /// Transaction lookups
    Transaction {
        #[command(subcommand)]
        command: TransactionCommand,
    },
    /// Currencies, instruments and tickers
    Markets {
        #[command(subcommand)]
        command: MarketsCommand,
    },
    /// Read-only views of the configured account
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Address registry checks
    Registry {
        #[command(subcommand)]
        command: RegistryCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TradesCommand {
    /// Settled trades visible to everyone
    Public(PublicTradesArgs),
    /// Trades of the configured account
    Private(PrivateTradesArgs),
}

#[derive(Subcommand, Debug)]
pub enum TransactionCommand {
    Get { transaction_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstrumentKind {
    Erc20,
    Option,
    Perp,
}

impl From<InstrumentKind> for InstrumentType {
    fn from(kind: InstrumentKind) -> Self {
        match kind {
            InstrumentKind::Erc20 => InstrumentType::Erc20,
            InstrumentKind::Option => InstrumentType::Option,
            InstrumentKind::Perp => InstrumentType::Perp,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum MarketsCommand {
    /// Live book and prices of one instrument
    Ticker { instrument: String },
    /// Instruments listed for a currency
    Instruments {
        #[arg(long)]
        currency: String,
        #[arg(long = "type", value_enum, default_value = "perp")]
        kind: InstrumentKind,
        #[arg(long)]
        expired: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Balances, positions and margin of a subaccount
    Subaccount {
        /// Defaults to the configured subaccount
        #[arg(long)]
        id: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Verify every registry chain and currency is known to the client
    Check,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PublicTradesArgs {
    #[arg(long)]
    pub instrument: Option<String>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub trade_id: Option<String>,
    #[arg(long)]
    pub tx_hash: Option<String>,
    #[arg(long)]
    pub subaccount: Option<u64>,
    /// Start of the window, ms since epoch
    #[arg(long = "from")]
    pub from_timestamp: Option<u64>,
    /// End of the window, ms since epoch
    #[arg(long = "to")]
    pub to_timestamp: Option<u64>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl From<&PublicTradesArgs> for PublicTradeHistoryParams {
    fn from(args: &PublicTradesArgs) -> Self {
        Self {
            currency: args.currency.clone(),
            from_timestamp: args.from_timestamp,
            instrument_name: args.instrument.clone(),
            page: args.page,
            page_size: args.page_size,
            subaccount_id: args.subaccount,
            to_timestamp: args.to_timestamp,
            trade_id: args.trade_id.clone(),
            tx_hash: args.tx_hash.clone(),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PrivateTradesArgs {
    #[arg(long)]
    pub instrument: Option<String>,
    #[arg(long)]
    pub order_id: Option<String>,
    #[arg(long)]
    pub subaccount: Option<u64>,
    #[arg(long = "from")]
    pub from_timestamp: Option<u64>,
    #[arg(long = "to")]
    pub to_timestamp: Option<u64>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Query over a logged-in websocket instead of signed REST
    #[arg(long)]
    pub ws: bool,
}

impl From<&PrivateTradesArgs> for PrivateTradeHistoryParams {
    fn from(args: &PrivateTradesArgs) -> Self {
        Self {
            from_timestamp: args.from_timestamp,
            instrument_name: args.instrument.clone(),
            order_id: args.order_id.clone(),
            page: args.page,
            page_size: args.page_size,
            subaccount_id: args.subaccount,
            to_timestamp: args.to_timestamp,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trades_public() {
        let cli = Cli::try_parse_from([
            "derive-cli",
            "--env",
            "test",
            "trades",
            "public",
            "--instrument",
            "ETH-PERP",
            "--page-size",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.env, Some(EnvArg::Test));
        let Command::Trades {
            command: TradesCommand::Public(args),
        } = cli.command
        else {
            panic!("wrong command");
        };
        let params = PublicTradeHistoryParams::from(&args);
        assert_eq!(params.instrument_name.as_deref(), Some("ETH-PERP"));
        assert_eq!(params.page_size, Some(5));
    }

    #[test]
    fn test_parse_transaction_get() {
        let cli = Cli::try_parse_from([
            "derive-cli",
            "transaction",
            "get",
            "f589e847-c7a5-40c4-82d5-2d8cec9c93da",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Transaction {
                command: TransactionCommand::Get { .. }
            }
        ));
    }

    #[test]
    fn test_parse_markets_instruments() {
        let cli = Cli::try_parse_from([
            "derive-cli",
            "markets",
            "instruments",
            "--currency",
            "BTC",
            "--type",
            "option",
        ])
        .unwrap();
        let Command::Markets {
            command: MarketsCommand::Instruments { currency, kind, expired },
        } = cli.command
        else {
            panic!("wrong command");
        };
        assert_eq!(currency, "BTC");
        assert_eq!(InstrumentType::from(kind), InstrumentType::Option);
        assert!(!expired);
    }

    #[test]
    fn test_parse_account_subaccount() {
        let cli = Cli::try_parse_from(["derive-cli", "account", "subaccount", "--id", "31049"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Account {
                command: AccountCommand::Subaccount { id: Some(31049) }
            }
        ));
    }

    #[test]
    fn test_parse_registry_check() {
        let cli = Cli::try_parse_from(["derive-cli", "registry", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Registry {
                command: RegistryCommand::Check
            }
        ));
    }
}
