//! Agents and the game driver.
//!
//! - `Agent`: picks a move for one seat from that seat's `ObservedState`
//! - `RandomAgent`: uniform over legal moves
//! - `SearchAgent`: tiered search (goal card, empty hand, best turn, random)
//! - `GameRunner`: deals, loops observe/choose/apply, reports the result
//!
//! ```rust
//! use goalpile::agents::{Agent, GameRunner, RandomAgent, RunnerConfig, SearchAgent};
//! use goalpile::core::GameConfig;
//!
//! let mut agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(SearchAgent::default()),
//!     Box::new(RandomAgent::new()),
//! ];
//! let runner = GameRunner::new(RunnerConfig::new().with_max_moves(50));
//! let outcome = runner.play(GameConfig::default(), &mut agents, 42).unwrap();
//!
//! for record in &outcome.history {
//!     println!("{} => {}", record.player, record.description);
//! }
//! println!("{:?} after {} moves", outcome.result, outcome.moves);
//! ```

pub mod agent;
pub mod runner;
pub mod search_agent;

pub use agent::{random_legal_move, Agent, RandomAgent};
pub use runner::{GameRunner, RunError, RunOutcome, RunnerConfig};
pub use search_agent::{PlanTier, SearchAgent};
