//! Due-card selection.
//!
//! Picks the cards that are due at a given moment and orders them so the
//! most overdue come first; among equally overdue cards the harder ones
//! (lower easiness factor) are shown first.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::domain::ReviewCard;

/// Due cards in review order, at most `limit` of them.
///
/// The sort is stable, so cards that tie on both keys keep their input order.
pub fn due_cards(cards: &[ReviewCard], now: DateTime<Utc>, limit: usize) -> Vec<&ReviewCard> {
  let mut due: Vec<&ReviewCard> = cards.iter().filter(|c| c.state.is_due(now)).collect();

  due.sort_by(|a, b| {
    a.state
      .next_review_date
      .cmp(&b.state.next_review_date)
      .then_with(|| {
        a.state
          .easiness_factor
          .partial_cmp(&b.state.easiness_factor)
          .unwrap_or(Ordering::Equal)
      })
  });
  due.truncate(limit);

  tracing::debug!("{} of {} cards due", due.len(), cards.len());
  due
}
