//! Game rules shared by every kind of state.
//!
//! - `GameView`: read access to a table position, implemented by both
//!   `GameState` and `ObservedState`
//! - `SearchState`: draw-free transitions the search engine expands
//! - `legal_moves` / `LegalMoves`: the move enumerator and coalescing

pub mod enumerator;
pub mod view;

pub use enumerator::{legal_moves, LegalMoves, MoveBucket};
pub use view::{is_valid_play, GameResult, GameView, SearchState};
