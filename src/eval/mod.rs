//! State evaluation used by the turn planner.

pub mod score;

pub use score::{danger, score_player_cards, score_state};
