use std::error::Error;

use clap::Parser;
use quote_client::{AlphaVantageClient, ClientConfig, cli::commands::Cli};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_path(path)?,
        None => ClientConfig::from_env()?,
    };
    let client = AlphaVantageClient::new(&config)?;

    let (spec, params) = cli.command.into_request();
    let series = client.fetch(spec, &params).await?;

    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}
