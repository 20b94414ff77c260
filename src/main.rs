use clap::Parser;
use tracing_subscriber::EnvFilter;
use urlshrt::config::{self, Args};
use urlshrt::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load(Args::parse())?;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    config.print_summary();

    server::run(config).await
}
