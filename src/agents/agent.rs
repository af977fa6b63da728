//! The agent contract and the uniform random agent.

use crate::core::{GameRng, Move, ObservedState};
use crate::rules::GameView;

/// Something that picks moves for one seat.
///
/// Called once per move while it is that seat's turn, with the seat's own
/// view of the table. Must return a move legal under `view`, or `None` if
/// there is none.
pub trait Agent {
    /// Display name for logs and results.
    fn name(&self) -> &str;

    fn choose_move(&mut self, view: &ObservedState, rng: &mut GameRng) -> Option<Move>;
}

/// Picks uniformly among all legal moves.
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, view: &ObservedState, rng: &mut GameRng) -> Option<Move> {
        random_legal_move(view, rng)
    }
}

/// A uniformly chosen legal move, or `None` if there are none.
pub fn random_legal_move(view: &ObservedState, rng: &mut GameRng) -> Option<Move> {
    let moves: Vec<Move> = view.legal_moves().iter().copied().collect();
    rng.choose(&moves).copied()
}
