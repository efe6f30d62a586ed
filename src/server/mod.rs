//! HTTP layer: the symptom form, symptom search and a small JSON API.
//!
//! | Route | Method | Response |
//! |---|---|---|
//! | `/` | GET | form listing every symptom |
//! | `/` | POST | form plus the prediction for the submitted `symptoms` |
//! | `/search?query=` | GET | JSON array of matching symptom names |
//! | `/api/symptoms` | GET | JSON array of the whole catalog |
//! | `/api/predict` | POST | JSON prediction for `{"symptoms": [...]}` |
//! | `/static/app.js` | GET | autocomplete script |
//! | `/health` | GET | `ok` |

pub mod handlers;
pub mod pages;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::Result;
use crate::service::SymptomService;

/// Build the application router around a trained service.
pub fn router(service: Arc<SymptomService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api = Router::new()
        .route("/search", get(handlers::search))
        .route("/api/symptoms", get(handlers::symptoms))
        .route("/api/predict", post(handlers::predict))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/static/app.js", get(handlers::app_js))
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve until Ctrl-C.
pub async fn serve(service: Arc<SymptomService>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        tie_break = %service.tie_break(),
        symptoms = service.catalog().len(),
        "sympredict listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => warn!(error = %e, "cannot listen for Ctrl-C, shutting down"),
    }
}
