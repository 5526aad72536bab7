//! HTTP front end: a small axum server exposing the question-answering
//! pipeline.
//!
//! Routes:
//! - `GET  /`       embedded chat page
//! - `POST /ask`    retrieve + generate, always status 200
//! - `GET  /health` model backend reachability

use std::{env, error::Error, sync::Arc};

pub mod core;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::routes::{ask::ask_route::ask, health_route::health, home_route::home};

/// Starts the HTTP server and blocks until Ctrl+C.
///
/// The bind address comes from `API_ADDRESS` (default `127.0.0.1:8080`).
pub async fn start(state: AppState) -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".into());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    info!(target: "api", address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Builds the application router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/ask", post(ask))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(target: "api", error = %e, "failed to listen for shutdown signal");
    }
}
