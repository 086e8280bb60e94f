use chrono::{DateTime, Duration, Utc};

use crate::domain::{CardMemoryState, ReviewRating, MIN_EASINESS_FACTOR};

/// Change in easiness factor for a numeric grade on the 0-5 scale.
///
/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
pub fn ease_delta(grade: u8) -> f64 {
  let q = f64::from(grade.min(5));
  0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)
}

/// Compute the state after reviewing a card at `now`.
///
/// Lapses reset the repetition count and schedule the card for tomorrow.
/// Successful reviews step through 1 day, 6 days, then the previous interval
/// times the updated easiness factor, rounded half away from zero.
/// The easiness factor is updated on every review and never drops below 1.3.
pub fn compute_next_state(
  state: &CardMemoryState,
  rating: ReviewRating,
  now: DateTime<Utc>,
) -> CardMemoryState {
  let grade = rating.grade();
  let easiness_factor = (state.easiness_factor + ease_delta(grade)).max(MIN_EASINESS_FACTOR);

  let (interval_days, repetition_number) = if rating.is_lapse() {
    (1, 0)
  } else {
    let repetitions = state.repetition_number.saturating_add(1);
    let interval = match repetitions {
      1 => 1,
      2 => 6,
      // float -> int casts saturate, so huge intervals pin at u32::MAX
      _ => (f64::from(state.interval_days) * easiness_factor).round() as u32,
    };
    (interval, repetitions)
  };

  let next_review_date = add_days(now, interval_days);

  tracing::debug!(
    rating = rating.as_str(),
    repetition_number,
    easiness_factor,
    interval_days,
    "Scheduled review"
  );

  CardMemoryState {
    repetition_number,
    easiness_factor,
    interval_days,
    next_review_date,
  }
}

/// Next state for each rating, in `ReviewRating::ALL` order
pub fn preview_next_states(
  state: &CardMemoryState,
  now: DateTime<Utc>,
) -> [(ReviewRating, CardMemoryState); 4] {
  ReviewRating::ALL.map(|rating| (rating, compute_next_state(state, rating, now)))
}

/// Rebuild a card's state from its rating history.
///
/// Starts from a fresh card at `start`; every later review is taken on the
/// day the previous one made the card due.
pub fn replay_reviews<I>(ratings: I, start: DateTime<Utc>) -> CardMemoryState
where
  I: IntoIterator<Item = ReviewRating>,
{
  ratings
    .into_iter()
    .fold(CardMemoryState::new(start), |state, rating| {
      compute_next_state(&state, rating, state.next_review_date)
    })
}

/// `now + days`, saturating at the latest representable date
fn add_days(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
  Duration::try_days(i64::from(days))
    .and_then(|delta| now.checked_add_signed(delta))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
