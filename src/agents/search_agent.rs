//! Tiered search agent.
//!
//! On each decision the agent first follows any plan it is still holding.
//! Otherwise it searches, in order, for:
//!
//! 1. a forced play of its goal card this turn
//! 2. a forced empty hand (a free refill)
//! 3. the best-scoring complete turn (`do_generic_moves`)
//! 4. any legal move, uniformly at random
//!
//! A plan is dropped as soon as its next move is no longer legal, which
//! happens when a hidden refill or a revealed goal card changes the table
//! in ways the plan could not foresee.

use std::collections::VecDeque;

use crate::core::{GameRng, Move, ObservedState};
use crate::rules::GameView;
use crate::search::{SearchConfig, SearchStats, Searcher};

use super::agent::{random_legal_move, Agent};

/// Which search tier produced the current plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanTier {
    Goal,
    EmptyHand,
    Generic,
    Random,
}

/// Agent that plans its turn with the search engine.
#[derive(Clone, Debug)]
pub struct SearchAgent {
    searcher: Searcher,
    plan: VecDeque<Move>,
    tier: Option<PlanTier>,
}

impl Default for SearchAgent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl SearchAgent {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
            plan: VecDeque::new(),
            tier: None,
        }
    }

    /// Tier of the most recent decision.
    #[must_use]
    pub fn tier(&self) -> Option<PlanTier> {
        self.tier
    }

    /// Moves still queued from the current plan.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.plan.len()
    }

    /// Statistics of the last search run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        self.searcher.stats()
    }

    fn follow(&mut self, moves: Vec<Move>, tier: PlanTier) -> Option<Move> {
        self.plan = moves.into();
        self.tier = Some(tier);
        self.plan.pop_front()
    }

    fn replan(&mut self, view: &ObservedState, rng: &mut GameRng) -> Option<Move> {
        if let Some(path) = self.searcher.find_goal_path(view) {
            return self.follow(path, PlanTier::Goal);
        }
        if let Some(path) = self.searcher.find_empty_hand_path(view) {
            return self.follow(path, PlanTier::EmptyHand);
        }
        if let Some(plan) = self.searcher.do_generic_moves(view) {
            return self.follow(plan.moves, PlanTier::Generic);
        }
        self.tier = Some(PlanTier::Random);
        random_legal_move(view, rng)
    }
}

impl Agent for SearchAgent {
    fn name(&self) -> &str {
        "search"
    }

    fn choose_move(&mut self, view: &ObservedState, rng: &mut GameRng) -> Option<Move> {
        let legal = view.legal_moves();
        if legal.is_empty() {
            self.plan.clear();
            return None;
        }

        if let Some(next) = self.plan.pop_front() {
            if legal.contains(&next) {
                return Some(next);
            }
            self.plan.clear();
        }

        self.replan(view, rng)
    }
}
