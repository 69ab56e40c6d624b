//! HTTP surface: `POST /predict` and `GET /health`.

pub mod routes;

use crate::core::service::PredictionService;
use crate::utils::error::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
}

pub fn router(service: PredictionService) -> Router {
    Router::new()
        .route("/predict", post(routes::predict))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

pub async fn serve(listener: TcpListener, service: PredictionService) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(
            "🚀 house-price-serve v{} listening on {}",
            env!("CARGO_PKG_VERSION"),
            addr
        );
    }

    axum::serve(listener, router(service)).await?;
    Ok(())
}
