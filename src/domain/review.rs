use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RatingParseError;

/// Self-reported recall quality for a single review.
///
/// Maps onto the SM-2 0-5 grade scale as again=1, hard=3, good=4, easy=5.
/// Grade 2 is never produced; it is folded into `Again`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewRating {
  Again,
  Hard,
  Good,
  Easy,
}

impl ReviewRating {
  pub const ALL: [ReviewRating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

  /// Numeric SM-2 grade (0-5 scale)
  pub fn grade(&self) -> u8 {
    match self {
      Self::Again => 1,
      Self::Hard => 3,
      Self::Good => 4,
      Self::Easy => 5,
    }
  }

  /// Grades below 3 are lapses and restart the learning cycle
  pub fn is_lapse(&self) -> bool {
    self.grade() < 3
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    }
  }
}

impl FromStr for ReviewRating {
  type Err = RatingParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "again" => Ok(Self::Again),
      "hard" => Ok(Self::Hard),
      "good" => Ok(Self::Good),
      "easy" => Ok(Self::Easy),
      other => Err(RatingParseError(other.to_string())),
    }
  }
}

impl std::fmt::Display for ReviewRating {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
