use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routing::Router;

/// Binds the configured address and serves until the process is killed.
/// A failed bind is fatal; nothing else is.
pub async fn run(cfg: &Config, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);
    info!("Serving files from {}", cfg.root_dir.display());

    serve(listener, router, cfg.root_dir.clone()).await
}

/// Accept loop over an already-bound listener. Every accepted connection
/// gets its own task; a connection failure - panic included - ends that
/// task and nothing else.
pub async fn serve(listener: TcpListener, router: Router, root: PathBuf) -> anyhow::Result<()> {
    let router = Arc::new(router);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        let root = root.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, root);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
