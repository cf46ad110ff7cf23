/*
[INPUT]:  CLI arguments, configuration file, DERIVE_* environment
[OUTPUT]: Query results printed to stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use derive_cli::{Cli, CliConfig, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let mut config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(env) = args.env {
        config.environment = env.into();
    }
    info!(
        environment = ?config.environment,
        base_url = %config.endpoints().base_url,
        "configuration loaded"
    );

    let rendered = commands::run(&args.command, &config, args.format).await?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
