//! HTTP server implementation using Axum

use axum::Router;
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::shutdown::ShutdownController;

/// Axum-backed HTTP server with graceful shutdown.
///
/// # Example
///
/// ```ignore
/// use server::{HttpServer, ServerConfig};
///
/// let server = HttpServer::new(ServerConfig::new("127.0.0.1", 3000), router);
/// server.run_with_ctrl_c().await?;
/// ```
#[derive(Clone)]
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    running: Arc<AtomicBool>,
    bound_addr: Arc<RwLock<Option<SocketAddr>>>,
}

impl HttpServer {
    /// Create a new HTTP server serving `router`.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router,
            running: Arc::new(AtomicBool::new(false)),
            bound_addr: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The bound address, if running.
    pub fn address(&self) -> Option<SocketAddr> {
        *self.bound_addr.read()
    }

    /// Whether the server is currently accepting connections.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run the server until `shutdown` is cancelled, then drain gracefully.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let addr = self.config.bind_addr()?;

        info!(%addr, "Starting HTTP server");

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::bind(addr.to_string(), e))?;

        let local_addr = listener.local_addr().map_err(ServerError::Io)?;
        *self.bound_addr.write() = Some(local_addr);

        info!(%local_addr, "HTTP server listening");
        self.running.store(true, Ordering::SeqCst);

        let result = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                info!("HTTP server received shutdown signal");
            })
            .await;

        self.running.store(false, Ordering::SeqCst);
        *self.bound_addr.write() = None;

        match result {
            Ok(()) => {
                info!("HTTP server shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!(%e, "HTTP server error");
                Err(ServerError::Io(e))
            }
        }
    }

    /// Spawn the server on a new task, returning its handle and the token
    /// that shuts it down.
    pub fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Run the server until Ctrl+C triggers graceful shutdown.
    pub async fn run_with_ctrl_c(self) -> Result<()> {
        let shutdown = ShutdownController::with_ctrl_c();
        self.run(shutdown.token()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::time::Duration;

    #[tokio::test]
    async fn http_server_binds_and_shuts_down() {
        let router = Router::new().route("/", get(|| async { "ok" }));
        // Ephemeral port
        let server = HttpServer::new(ServerConfig::new("127.0.0.1", 0), router);
        let probe = server.clone();
        let (handle, token) = server.spawn();

        // Give the server time to bind
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(probe.is_running());
        assert!(probe.address().is_some());

        token.cancel();
        let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(result.is_ok());
        assert!(!probe.is_running());
    }

    #[tokio::test]
    async fn run_fails_on_unparseable_address() {
        let router = Router::new();
        let server = HttpServer::new(ServerConfig::new("not a host", 3000), router);

        let err = server.run(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress(_)));
    }
}
