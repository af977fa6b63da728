//! State-space search over a single turn.
//!
//! ## Overview
//!
//! The search engine answers three questions for the player to move, using
//! only what that player can see (`ObservedState`):
//!
//! - can I force a play of my goal card this turn? (`find_goal_path`)
//! - can I force an empty hand, and so a fresh draw? (`find_empty_hand_path`)
//! - failing both, which complete turn leaves me best placed? (`do_generic_moves`)
//!
//! Nodes live in a flat arena (`SearchTree`); visited states are
//! deduplicated by structural equality. Move coalescing (`SearchConfig::coalesce`)
//! collapses interchangeable moves before a node is expanded.
//!
//! ## Usage
//!
//! ```rust
//! use goalpile::core::{GameConfig, GameRng, GameState};
//! use goalpile::search::{SearchConfig, Searcher};
//!
//! let mut rng = GameRng::new(7);
//! let state = GameState::new(GameConfig::default(), &mut rng).unwrap();
//! let view = state.observe();
//!
//! let mut searcher = Searcher::new(SearchConfig::default());
//! if let Some(path) = searcher.find_goal_path(&view) {
//!     println!("goal card in {} moves", path.len());
//! }
//! let plan = searcher.do_generic_moves(&view);
//! assert!(plan.is_some());
//! println!("{:?}", searcher.stats());
//! ```

pub mod config;
pub mod heuristic;
pub mod searcher;
pub mod stats;
pub mod tree;

pub use config::{SearchConfig, TurnTiebreak};
pub use heuristic::{goal_distance, goal_predecessors_available, ranks_needed, RankCounts};
pub use searcher::{hand_emptied, played_goal, Searcher, TurnPlan};
pub use stats::SearchStats;
pub use tree::{NodeId, SearchNode, SearchTree};
