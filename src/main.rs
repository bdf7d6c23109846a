mod config;
mod dashboard;
mod datasources;
mod metrics;
mod tokens;

use std::sync::Arc;

use anyhow::Result;
use log::info;
use reqwest::Client;

use config::Config;
use dashboard::Dashboard;
use datasources::{Aggregator, StakingYieldsApi};
use tokens::TOKENS;

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::from_env()?;
    info!("Using yield API at {}", config.api_url);

    let client = Arc::new(
        Client::builder()
            .user_agent(concat!("lst-yields ", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?,
    );
    let source = Arc::new(StakingYieldsApi::new(client, config.api_url));
    let aggregator = Arc::new(Aggregator::new(source));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let res = runtime.block_on(Dashboard::new(aggregator, TOKENS).run());
    // stdin reads sit on a blocking thread that never returns on its own
    runtime.shutdown_background();
    res
}
