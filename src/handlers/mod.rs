pub mod review;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ScheduleError;

pub use review::{due, preview, replay, review};

pub async fn health() -> &'static str {
  "ok"
}

impl IntoResponse for ScheduleError {
  fn into_response(self) -> Response {
    tracing::warn!("Rejected review request: {}", self);
    (
      StatusCode::UNPROCESSABLE_ENTITY,
      Json(serde_json::json!({ "error": self.to_string() })),
    )
      .into_response()
  }
}

/// Human-readable label for an interval, as shown on answer buttons
pub fn format_interval(days: u32) -> String {
  if days == 0 {
    "now".to_string()
  } else if days < 30 {
    format!("{} day{}", days, if days == 1 { "" } else { "s" })
  } else if days < 365 {
    let months = (f64::from(days) / 30.0).round() as u32;
    format!("{} month{}", months, if months == 1 { "" } else { "s" })
  } else {
    let years = f64::from(days) / 365.0;
    let rounded = (years * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
      let whole = rounded as u64;
      format!("{} year{}", whole, if whole == 1 { "" } else { "s" })
    } else {
      format!("{:.1} years", rounded)
    }
  }
}
