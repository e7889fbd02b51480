//! Survey API server lifecycle.
//!
//! bind → serve the router → stop on the shutdown future. `serve`
//! blocks until shutdown; `start` spawns a background task and returns
//! a handle with a shutdown channel.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::api::router::survey_api_router;
use crate::store::KvStore;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Handle to a server started with [`start`].
pub struct SurveyApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl SurveyApiServer {
    /// Shut down the server gracefully and wait for it to stop.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Survey API server shutdown signal sent");
        }
        if let Err(e) = (&mut self.task).await {
            tracing::error!("Survey API server task failed: {e}");
        }
    }
}

async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr()?;
    Ok((listener, local))
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    store: Option<Arc<dyn KvStore>>,
    development: bool,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let (listener, addr) = bind(addr).await?;
    let app = survey_api_router(store, development);

    tracing::info!(%addr, "Survey API server started");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Survey API server stopped");
    Ok(())
}

/// Start the server in a background task.
pub async fn start(
    addr: SocketAddr,
    store: Option<Arc<dyn KvStore>>,
    development: bool,
) -> Result<SurveyApiServer, ServerError> {
    let (listener, addr) = bind(addr).await?;
    let app = survey_api_router(store, development);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Survey API server received shutdown signal");
        };

        tracing::info!(%addr, "Survey API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Survey API server error: {e}");
        }

        tracing::info!("Survey API server stopped");
    });

    Ok(SurveyApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Resolves on Ctrl-C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl-C received, shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn server_binds_to_ephemeral_port() {
        let server = start(loopback(), None, false).await.unwrap();
        assert_ne!(server.addr.port(), 0);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn server_answers_health_over_tcp() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let server = start(loopback(), Some(store), false).await.unwrap();

        let mut stream = tokio::net::TcpStream::connect(server.addr).await.unwrap();
        stream
            .write_all(b"GET /api/health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200"));
        assert!(raw.contains("\"store_configured\":true"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let server = start(loopback(), None, false).await.unwrap();
        let err = start(server.addr, None, false).await.err().unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn serve_stops_when_shutdown_resolves() {
        serve(loopback(), None, false, async {}).await.unwrap();
    }
}
