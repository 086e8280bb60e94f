use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use flashcard_srs::error::LogOnError;
use flashcard_srs::{app, config, state::AppState};

#[tokio::main]
async fn main() {
  // Load .env file if present, so LOG_FILTER from it applies from the start
  let _ = dotenvy::dotenv();

  // Logging goes up before config is read so config warnings are not lost;
  // the filter is swapped for the configured one afterwards
  let startup_filter = config::startup_log_filter(|key| std::env::var(key).ok());
  let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new(startup_filter));
  tracing_subscriber::registry()
    .with(filter_layer)
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = config::load();
  filter_handle
    .reload(EnvFilter::new(&config.log_filter))
    .log_warn("Failed to apply configured log filter");

  let bind_addr = config.server.bind_addr();
  let router = app(AppState::new(config));

  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Review scheduler listening on http://{}", bind_addr);

  axum::serve(listener, router)
    .await
    .expect("Server failed to start");
}
