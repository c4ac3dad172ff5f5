use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dax_harvester::scheduler::start_scheduler;
use dax_harvester::{Config, Harvester, PgTweetStore};
use twitter_client::TwitterClient;

#[derive(Parser)]
#[command(name = "dax-harvester", about = "Harvest #DAX tweets into Postgres")]
struct Args {
    /// Run a single harvest and exit instead of waiting on the schedule.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dax_harvester=info,twitter_client=info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::from_env()?;
    config.log_redacted();

    let client = TwitterClient::with_timeout(config.twitter.clone(), config.request_timeout)?;
    let store = PgTweetStore::connect_lazy(&config.database_url)?;
    let harvester = Arc::new(Harvester::new(client, store));

    if args.once {
        let stats = harvester.run().await;
        info!("Single run finished. {stats}");
        return Ok(());
    }

    let mut scheduler = start_scheduler(harvester, &config.schedule).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested, stopping scheduler");
    scheduler.shutdown().await?;

    Ok(())
}
