use clap::Parser;

use skiff::config::{Args, Config};
use skiff::routing;
use skiff::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args)?;
    let router = routing::default_router();

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
