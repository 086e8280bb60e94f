use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidStateError;

/// Easiness factor given to a card that has never been reviewed
pub const DEFAULT_EASINESS_FACTOR: f64 = 2.5;

/// Easiness factor floor, enforced after every update
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// SM-2 scheduling state attached to a flashcard.
///
/// All four fields are replaced together on each review; `next_review_date`
/// is always derived from `interval_days` and the review time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardMemoryState {
  pub repetition_number: u32,
  pub easiness_factor: f64,
  pub interval_days: u32,
  pub next_review_date: DateTime<Utc>,
}

impl CardMemoryState {
  /// Fresh card, due immediately
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      repetition_number: 0,
      easiness_factor: DEFAULT_EASINESS_FACTOR,
      interval_days: 0,
      next_review_date: now,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review_date <= now
  }
}

/// Card state as it is persisted: plain signed columns, not yet checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredCardState {
  pub repetition_number: i64,
  pub easiness_factor: f64,
  pub interval_days: i64,
}

impl StoredCardState {
  /// Validate and attach a due date.
  ///
  /// Negative or oversized counts and a non-finite easiness factor are
  /// rejected. An easiness factor below the floor is passed through untouched.
  pub fn into_memory_state(
    self,
    next_review_date: DateTime<Utc>,
  ) -> Result<CardMemoryState, InvalidStateError> {
    if self.repetition_number < 0 {
      return Err(InvalidStateError::NegativeRepetitions(self.repetition_number));
    }
    if self.interval_days < 0 {
      return Err(InvalidStateError::NegativeInterval(self.interval_days));
    }
    if !self.easiness_factor.is_finite() {
      return Err(InvalidStateError::NonFiniteEasiness(self.easiness_factor));
    }
    let repetition_number = u32::try_from(self.repetition_number)
      .map_err(|_| InvalidStateError::RepetitionsOutOfRange(self.repetition_number))?;
    let interval_days = u32::try_from(self.interval_days)
      .map_err(|_| InvalidStateError::IntervalOutOfRange(self.interval_days))?;

    Ok(CardMemoryState {
      repetition_number,
      easiness_factor: self.easiness_factor,
      interval_days,
      next_review_date,
    })
  }
}

impl Default for StoredCardState {
  fn default() -> Self {
    Self {
      repetition_number: 0,
      easiness_factor: DEFAULT_EASINESS_FACTOR,
      interval_days: 0,
    }
  }
}

/// A card identified by id together with its scheduling state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewCard {
  pub card_id: i64,
  pub state: CardMemoryState,
}
