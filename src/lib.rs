pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod srs;
pub mod state;

use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the HTTP router
pub fn app(state: AppState) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/review", post(handlers::review))
    .route("/api/preview", post(handlers::preview))
    .route("/api/replay", post(handlers::replay))
    .route("/api/due", post(handlers::due))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
