//! HTTP API for the vault.
//!
//! ```text
//! <api_prefix>/
//! ├── POST /unlock
//! ├── POST /save
//! ├── POST /update
//! ├── POST /delete
//! ├── POST /get/{key}
//! └── GET  /status
//! ```

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::errors::{VaultError, Result};
use crate::vault::VaultStore;

pub mod error;
pub mod handlers;
pub mod types;

pub use error::{ApiError, ApiResult};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single store for the configured vault file.
    pub store: Arc<VaultStore>,
    /// Prefix the routes are mounted under, reported by `/status`.
    pub endpoint: String,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<VaultStore>, endpoint: impl Into<String>) -> Self {
        Self {
            store,
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(VaultStore::from_settings(settings)),
            settings.api_prefix.clone(),
        )
    }
}

/// Build the vault routes without a prefix.
pub fn vault_routes(state: AppState) -> Router {
    Router::new()
        .route("/unlock", post(handlers::unlock))
        .route("/save", post(handlers::save))
        .route("/update", post(handlers::update))
        .route("/delete", post(handlers::delete))
        .route("/get/{key}", post(handlers::get))
        .route("/status", get(handlers::status))
        .with_state(state)
}

/// Build the full application router: routes nested under the
/// configured prefix, with request tracing and a body size limit.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let prefix = state.endpoint.trim_end_matches('/').to_string();
    let routes = vault_routes(state);

    // axum refuses to nest at the root.
    let app = if prefix.is_empty() {
        Router::new().merge(routes)
    } else {
        Router::new().nest(&prefix, routes)
    };

    app.layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Bind to `settings.bind_addr` and serve until Ctrl-C.
pub async fn serve(settings: &Settings) -> Result<()> {
    let state = AppState::from_settings(settings);
    tracing::info!(
        vault = %state.store.vault_path().display(),
        salt = %state.store.salt_path().display(),
        "vault storage configured"
    );

    let app = router(state, settings.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .map_err(|e| VaultError::ServerError(format!("bind {}: {e}", settings.bind_addr)))?;

    tracing::info!(
        "Serving vault API on http://{}{}",
        settings.bind_addr,
        settings.api_prefix
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| VaultError::ServerError(e.to_string()))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
