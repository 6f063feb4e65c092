use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::{Config, Limits};
use crate::files::FileStore;
use crate::http::connection::Connection;
use crate::router::Router;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!(
        addr = %cfg.listen_addr,
        directory = %cfg.directory.display(),
        "Listening"
    );

    let router = Router::new(FileStore::new(cfg.directory.clone()));
    serve(listener, Arc::new(router), cfg.limits).await
}

/// Accepts connections forever, one task per connection.
///
/// A failed accept is logged and the loop carries on.
pub async fn serve(listener: TcpListener, router: Arc<Router>, limits: Limits) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!(%peer, "Accepted connection");

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, limits);
            if let Err(e) = conn.run().await {
                error!(%peer, "Connection error: {:#}", e);
            }
        });
    }
}
