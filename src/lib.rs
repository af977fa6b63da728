//! # goalpile
//!
//! Engine and search agents for a goal-pile card game in the spite and
//! malice family: each player races to empty a face-down goal pile by
//! building shared ascending play piles (ace to queen, kings and jokers
//! wild) from their hand, their own discard piles and the goal pile itself.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every move returns a new state and leaves the
//!    old one untouched. Piles are `im` persistent vectors, so a search
//!    frontier can hold thousands of diverging positions cheaply.
//!
//! 2. **Explicit randomness**: dealing and drawing take a seedable
//!    `GameRng`. Identical seeds replay identical games.
//!
//! 3. **Search never cheats**: the search engine only expands
//!    `ObservedState`, which carries public information plus the viewer's
//!    own hand. Cards drawn out of sight become unknown, never guessed.
//!
//! ## Modules
//!
//! - `cards`: card values, ranks, deck construction
//! - `core`: players, RNG, configuration, errors, moves, `GameState`, `ObservedState`
//! - `rules`: the `GameView`/`SearchState` capability traits and the move enumerator
//! - `search`: reachability, best-first and best-of-N turn search
//! - `eval`: hand-authored state scoring
//! - `agents`: the agent contract, random and search agents, the game runner

pub mod agents;
pub mod cards;
pub mod core;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, ConfigError, GameConfig, GameError, GameRng, GameRngState, GameState,
    GameStateBuilder, IllegalMove, Move, MoveKind, ObservedState, PlayerId, PlayerMap,
};

pub use crate::cards::{make_decks, Card, Suit};

pub use crate::rules::{legal_moves, GameResult, GameView, LegalMoves, SearchState};

pub use crate::search::{SearchConfig, SearchStats, Searcher, TurnPlan, TurnTiebreak};

pub use crate::eval::{score_player_cards, score_state};

pub use crate::agents::{Agent, GameRunner, RandomAgent, RunOutcome, RunnerConfig, SearchAgent};
