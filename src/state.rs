//! Shared application state.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::AppConfig;

/// Source of "now" for handlers that are not given an explicit review time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    clock: Clock,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(Utc::now))
    }

    /// State with a fixed or scripted clock (used by tests)
    pub fn with_clock(config: AppConfig, clock: Clock) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
