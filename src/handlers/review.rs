//! Review scheduling endpoints.
//!
//! All endpoints are stateless: the caller sends the stored card state and
//! gets the computed state back; persisting it is the caller's job.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::domain::{CardMemoryState, ReviewCard, ReviewRating, StoredCardState};
use crate::error::ScheduleError;
use crate::srs;
use crate::state::AppState;

use super::format_interval;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
  pub state: StoredCardState,
  pub rating: String,
  /// Review time; the server clock is used when absent
  pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
  pub state: CardMemoryState,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
  pub state: StoredCardState,
  pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewEntry {
  pub state: CardMemoryState,
  pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
  pub again: PreviewEntry,
  pub hard: PreviewEntry,
  pub good: PreviewEntry,
  pub easy: PreviewEntry,
}

#[derive(Debug, Deserialize)]
pub struct ReplayRequest {
  pub ratings: Vec<String>,
  pub start: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplayResponse {
  pub state: CardMemoryState,
  pub reviews: usize,
}

#[derive(Debug, Deserialize)]
pub struct DueCardInput {
  pub card_id: i64,
  pub state: StoredCardState,
  pub next_review_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct DueRequest {
  pub cards: Vec<DueCardInput>,
  pub now: Option<DateTime<Utc>>,
  pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueResponse {
  pub card_ids: Vec<i64>,
  pub total_due: usize,
}

/// Apply one rating to a card.
///
/// POST /api/review
pub async fn review(
  State(app): State<AppState>,
  Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ScheduleError> {
  let rating: ReviewRating = request.rating.parse()?;
  let now = request.now.unwrap_or_else(|| app.now());
  // The previous due date plays no part in the computation
  let current = request.state.into_memory_state(now)?;

  let state = srs::compute_next_state(&current, rating, now);
  Ok(Json(ReviewResponse { state }))
}

/// Outcome of every rating, for labelling the answer buttons.
///
/// POST /api/preview
pub async fn preview(
  State(app): State<AppState>,
  Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ScheduleError> {
  let now = request.now.unwrap_or_else(|| app.now());
  let current = request.state.into_memory_state(now)?;

  let [again, hard, good, easy] = srs::preview_next_states(&current, now).map(|(_, state)| {
    PreviewEntry {
      label: format_interval(state.interval_days),
      state,
    }
  });

  Ok(Json(PreviewResponse {
    again,
    hard,
    good,
    easy,
  }))
}

/// Rebuild a card's state from its rating history.
///
/// POST /api/replay
pub async fn replay(Json(request): Json<ReplayRequest>) -> Result<Json<ReplayResponse>, ScheduleError> {
  let ratings = request
    .ratings
    .iter()
    .map(|raw| raw.parse::<ReviewRating>())
    .collect::<Result<Vec<_>, _>>()?;

  let reviews = ratings.len();
  let state = srs::replay_reviews(ratings, request.start);
  Ok(Json(ReplayResponse { state, reviews }))
}

/// Ids of the cards due now, in review order.
///
/// POST /api/due
pub async fn due(
  State(app): State<AppState>,
  Json(request): Json<DueRequest>,
) -> Result<Json<DueResponse>, ScheduleError> {
  let now = request.now.unwrap_or_else(|| app.now());
  let limit = request
    .limit
    .unwrap_or(config::DEFAULT_DUE_LIMIT)
    .min(config::MAX_DUE_LIMIT);

  let cards = request
    .cards
    .into_iter()
    .map(|input| {
      Ok(ReviewCard {
        card_id: input.card_id,
        state: input.state.into_memory_state(input.next_review_date)?,
      })
    })
    .collect::<Result<Vec<_>, ScheduleError>>()?;

  let total_due = cards.iter().filter(|c| c.state.is_due(now)).count();
  let card_ids = srs::due_cards(&cards, now, limit)
    .into_iter()
    .map(|c| c.card_id)
    .collect();

  Ok(Json(DueResponse { card_ids, total_due }))
}
