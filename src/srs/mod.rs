pub mod queue;
pub mod sm2;

pub use queue::due_cards;
pub use sm2::{compute_next_state, ease_delta, preview_next_states, replay_reviews};
