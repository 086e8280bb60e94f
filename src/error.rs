//! Error types for scheduling input.
//!
//! The scheduler itself is total; these errors only come from turning
//! untrusted input (stored records, request bodies) into domain values.

/// A stored card record that cannot be turned into a memory state.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidStateError {
  NegativeRepetitions(i64),
  NegativeInterval(i64),
  RepetitionsOutOfRange(i64),
  IntervalOutOfRange(i64),
  NonFiniteEasiness(f64),
}

impl std::fmt::Display for InvalidStateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::NegativeRepetitions(v) => write!(f, "repetition_number must be >= 0, got {}", v),
      Self::NegativeInterval(v) => write!(f, "interval_days must be >= 0, got {}", v),
      Self::RepetitionsOutOfRange(v) => write!(f, "repetition_number out of range: {}", v),
      Self::IntervalOutOfRange(v) => write!(f, "interval_days out of range: {}", v),
      Self::NonFiniteEasiness(v) => write!(f, "easiness_factor must be finite, got {}", v),
    }
  }
}

impl std::error::Error for InvalidStateError {}

/// A rating string outside `again | hard | good | easy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingParseError(pub String);

impl std::fmt::Display for RatingParseError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "Unknown rating '{}' (expected again, hard, good or easy)",
      self.0
    )
  }
}

impl std::error::Error for RatingParseError {}

/// Anything that stops a review from being scheduled.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
  UnknownRating(String),
  InvalidState(InvalidStateError),
}

impl std::fmt::Display for ScheduleError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::UnknownRating(raw) => write!(f, "{}", RatingParseError(raw.clone())),
      Self::InvalidState(e) => write!(f, "Invalid card state: {}", e),
    }
  }
}

impl std::error::Error for ScheduleError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::UnknownRating(_) => None,
      Self::InvalidState(e) => Some(e),
    }
  }
}

impl From<InvalidStateError> for ScheduleError {
  fn from(e: InvalidStateError) -> Self {
    Self::InvalidState(e)
  }
}

impl From<RatingParseError> for ScheduleError {
  fn from(e: RatingParseError) -> Self {
    Self::UnknownRating(e.0)
  }
}

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }

  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    self.log_warn(context).unwrap_or_default()
  }
}
