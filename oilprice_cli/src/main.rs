mod report;

use anyhow::{Context, Result};
use clap::Parser;
use oilprice_lib::{Config, OilDataError, Pipeline};

/// Collects today's Korean fuel prices and publishes the updated table.
///
/// Takes no arguments. Reads ACCESS_TOKEN, OPINET_API_KEY and optionally
/// EXIMBANK_API_KEY from the environment or a `.env` file.
#[derive(Parser)]
#[command(name = "oilprice", version)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oilprice=info".parse()?),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::debug!("{:?}", config);
    let pipeline = Pipeline::from_config(&config)?;

    match pipeline.run().await {
        Ok(summary) => {
            report::print_summary(&summary);
            Ok(())
        }
        Err(e) => match exit_status(&e) {
            Some(code) => {
                tracing::error!("{}", e);
                std::process::exit(code);
            }
            None => Err(e.into()),
        },
    }
}

/// Status for failures that end the process directly; `None` hands the error
/// back to `main`.
fn exit_status(err: &OilDataError) -> Option<i32> {
    match err {
        OilDataError::Publish(_) => Some(1),
        _ => None,
    }
}
