pub mod card;
pub mod review;

pub use card::{
  CardMemoryState, ReviewCard, StoredCardState, DEFAULT_EASINESS_FACTOR, MIN_EASINESS_FACTOR,
};
pub use review::ReviewRating;
