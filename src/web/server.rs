//! Serves an `axum::Router` on a loopback port.
//!
//! The server lives only as long as the demo that started it: bind to port
//! 0, hand the address to a client, then call [`RunningServer::shutdown`].

use std::io;
use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind listener: {0}")]
    Bind(#[source] io::Error),
    #[error("server failed: {0}")]
    Serve(#[source] io::Error),
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub struct RunningServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<io::Result<()>>,
}

impl RunningServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Stops accepting connections, lets in-flight requests finish, and
    /// waits for the server task to end.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        // The server may already be gone; nothing to signal then.
        let _ = self.shutdown.send(());
        self.task.await?.map_err(ServerError::Serve)?;
        debug!(addr = %self.addr, "server stopped");
        Ok(())
    }
}

/// Binds `127.0.0.1:0` and serves `router` until shut down.
pub async fn spawn(router: Router) -> Result<RunningServer, ServerError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .map_err(ServerError::Bind)?;
    let addr = listener.local_addr().map_err(ServerError::Bind)?;
    let (shutdown, stop) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop.await;
            })
            .await
    });

    debug!(%addr, "server listening");
    Ok(RunningServer {
        addr,
        shutdown,
        task,
    })
}
