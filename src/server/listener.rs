use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::fs::FileHandler;
use crate::http::connection::Connection;
use crate::server::pool::WorkerPool;

/// Binds `server.listen_addr` and serves until accept fails.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, cfg).await
}

/// Hands every accepted connection to the worker pool.
///
/// An accept error ends the loop and is returned; errors inside a
/// connection are logged by its worker and go no further.
pub async fn serve(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    let handler = Arc::new(FileHandler::from_config(&cfg)?);
    let pool = WorkerPool::new(cfg.server.workers)?;
    let ready_timeout = cfg.ready_timeout();

    info!(
        root = %handler.resolver().root().display(),
        workers = pool.capacity(),
        "Serving files"
    );

    loop {
        let (socket, peer) = listener.accept().await?;
        info!(%peer, "Accepted connection");

        let handler = Arc::clone(&handler);
        pool.execute(async move {
            let mut conn = Connection::new(socket, handler, ready_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!(%peer, error = %e, "Connection error");
            }
        })?;
    }
}
