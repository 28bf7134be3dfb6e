//! Served HTTP API
//!
//! Proxy endpoints forwarding to the hosted video-index API plus the
//! session view endpoints over the resolved curriculum.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::client::DirectoryClient;
use crate::library::LibrarySession;

pub mod handlers;
pub mod models;
pub mod server;

pub use server::{start_http_server, AppState};

/// The session type served by this API: a library session driven by the
/// production directory client.
pub type AppSession = LibrarySession<Arc<DirectoryClient>>;

/// API server handle for running the HTTP surface
pub struct ApiServer {
    state: AppState,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(client: Arc<DirectoryClient>, session: Arc<AppSession>, port: u16) -> Self {
        Self {
            state: AppState { client, session },
            port,
        }
    }

    /// Start the API server in the background
    pub fn start_background(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.start().await })
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on port {}", self.port);
        server::start_http_server(self.state, self.port).await
    }
}
