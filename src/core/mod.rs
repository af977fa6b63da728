//! Core engine types: players, RNG, configuration, errors, moves and the two
//! state types.
//!
//! `GameState` is the authoritative table; `ObservedState` is what one seat
//! is allowed to know about it. Both implement `rules::GameView`.

pub mod action;
pub mod config;
pub mod error;
pub mod observed;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, Move, MoveKind};
pub use config::{
    ConfigError, GameConfig, MAX_PLAY_PILE, NUM_DISCARD_PILES, NUM_PLAY_PILES, PLAY_PILE_RESERVE,
};
pub use error::{GameError, IllegalMove};
pub use observed::ObservedState;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, GameStateBuilder};
