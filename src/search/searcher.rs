//! Search over one player's turn.
//!
//! All searches expand only goal, hand and discard plays: an end-turn move
//! hands control to another player and leaves the search's scope. States
//! are deduplicated by structural equality, so cycles cannot cause
//! nontermination, and the goal predicate is never tested on the root.
//!
//! | procedure | frontier | used for |
//! |---|---|---|
//! | `find_path` | LIFO stack | any predicate, uninformed |
//! | `find_path_best_first` | min-heap on `g + h` | goal card plays |
//! | `do_generic_moves` | LIFO stack | best full-turn plan by score |
//!
//! "No path" is an ordinary `None`, never an error.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use rustc_hash::FxHashSet;

use crate::core::{Move, MoveKind, ObservedState};
use crate::eval::score_state;
use crate::rules::{GameView, LegalMoves, SearchState};

use super::config::SearchConfig;
use super::heuristic::{goal_distance, goal_predecessors_available};
use super::stats::SearchStats;
use super::tree::{NodeId, SearchTree};

/// The state was reached by playing a goal card.
pub fn played_goal<S: GameView + ?Sized>(state: &S) -> bool {
    matches!(state.last_move(), Some(Move::PlayFromGoal { .. }))
}

/// The state was reached by playing the last card of the mover's hand. An
/// observed hand that was refilled out of sight counts as emptied.
pub fn hand_emptied<S: GameView + ?Sized>(state: &S) -> bool {
    matches!(state.last_move(), Some(Move::PlayFromHand { .. }))
        && state.current_hand().map_or(true, |hand| hand.is_empty())
}

/// A complete turn chosen by the planner.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnPlan {
    /// Moves in play order. The last one ends the turn unless it wins.
    pub moves: Vec<Move>,

    /// Score of the resulting state.
    pub score: f64,
}

/// Search context: configuration plus statistics of the last search.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent search call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Depth-first reachability search for a state satisfying `goal`.
    ///
    /// Returns the moves leading there, or `None` once the frontier (or the
    /// node budget) is exhausted.
    pub fn find_path<S, P>(&mut self, start: &S, goal: P) -> Option<Vec<Move>>
    where
        S: SearchState,
        P: Fn(&S) -> bool,
    {
        let started = Instant::now();
        self.stats.reset();

        let mut tree = SearchTree::new(start.clone());
        let mut visited: FxHashSet<S> = FxHashSet::default();
        visited.insert(start.clone());
        let mut stack = vec![tree.root()];

        let mut found = None;
        while let Some(id) = stack.pop() {
            if id != tree.root() && goal(tree.state(id)) {
                found = Some(tree.path(id));
                break;
            }
            if self.over_budget(tree.len()) {
                break;
            }
            for child in self.expand(&mut tree, &mut visited, id) {
                stack.push(child);
            }
        }

        self.finish(&visited, started);
        found
    }

    /// Best-first search ordered by moves so far plus `h`.
    ///
    /// Same state space and result as `find_path`; with a good `h` it pops
    /// far fewer nodes when many interchangeable orderings exist.
    pub fn find_path_best_first<S, P, H>(&mut self, start: &S, goal: P, h: H) -> Option<Vec<Move>>
    where
        S: SearchState,
        P: Fn(&S) -> bool,
        H: Fn(&S) -> usize,
    {
        let started = Instant::now();
        self.stats.reset();

        let mut tree = SearchTree::new(start.clone());
        let mut visited: FxHashSet<S> = FxHashSet::default();
        visited.insert(start.clone());

        // (f, insertion order, node): ties pop in insertion order
        let mut heap = BinaryHeap::new();
        let mut sequence: u64 = 0;
        heap.push(Reverse((h(start), sequence, tree.root())));

        let mut found = None;
        while let Some(Reverse((_, _, id))) = heap.pop() {
            if id != tree.root() && goal(tree.state(id)) {
                found = Some(tree.path(id));
                break;
            }
            if self.over_budget(tree.len()) {
                break;
            }
            for child in self.expand(&mut tree, &mut visited, id) {
                let node = tree.get(child);
                let f = node.depth as usize + h(&node.state);
                sequence += 1;
                heap.push(Reverse((f, sequence, child)));
            }
        }

        self.finish(&visited, started);
        found
    }

    /// Moves that play the current player's goal card this turn, whatever
    /// cards the player has not yet been shown.
    pub fn find_goal_path<S: SearchState>(&mut self, start: &S) -> Option<Vec<Move>> {
        if !goal_predecessors_available(start) {
            self.stats.reset();
            return None;
        }
        self.find_path_best_first(start, played_goal, goal_distance)
    }

    /// Moves that empty the current player's hand this turn.
    pub fn find_empty_hand_path<S: SearchState>(&mut self, start: &S) -> Option<Vec<Move>> {
        self.find_path(start, hand_emptied)
    }

    /// Best full-turn plan by the standard state score, from the viewer's
    /// perspective.
    pub fn do_generic_moves(&mut self, start: &ObservedState) -> Option<TurnPlan> {
        let config = self.config.clone();
        let player = start.viewer();
        self.do_generic_moves_by(start, |state| score_state(state, player, &config))
    }

    /// Best-of-N turn planner with a caller-supplied score.
    ///
    /// Walks play sequences depth-first. Every end-turn move (and every
    /// winning play) completes a candidate plan; the highest score wins,
    /// ties going by the configured `TurnTiebreak`. After `max_candidates`
    /// candidates the best so far is returned.
    pub fn do_generic_moves_by<S, F>(&mut self, start: &S, mut score: F) -> Option<TurnPlan>
    where
        S: SearchState,
        F: FnMut(&S) -> f64,
    {
        let started = Instant::now();
        self.stats.reset();

        let mut tree = SearchTree::new(start.clone());
        let mut visited: FxHashSet<S> = FxHashSet::default();
        visited.insert(start.clone());
        let mut stack = vec![tree.root()];
        let mut best: Option<TurnPlan> = None;

        'search: while let Some(id) = stack.pop() {
            let state = tree.state(id).clone();
            let moves = self.moves_for(&state);

            for mv in moves.get(MoveKind::EndTurn) {
                if self.stats.candidates_scored as usize >= self.config.max_candidates {
                    break 'search;
                }
                let Ok(child) = state.apply_move(mv) else {
                    continue;
                };
                let mut plan = tree.path(id);
                plan.push(*mv);
                self.offer(&mut best, plan, score(&child));
            }

            if self.over_budget(tree.len()) {
                break;
            }
            for child in self.expand(&mut tree, &mut visited, id) {
                if tree.state(child).winner().is_some() {
                    if self.stats.candidates_scored as usize >= self.config.max_candidates {
                        break 'search;
                    }
                    let plan = tree.path(child);
                    let value = score(tree.state(child));
                    self.offer(&mut best, plan, value);
                } else {
                    stack.push(child);
                }
            }
        }

        self.finish(&visited, started);
        best
    }

    // === Internals ===

    fn moves_for<S: GameView>(&self, state: &S) -> LegalMoves {
        let moves = state.legal_moves();
        if self.config.coalesce {
            moves.coalesce(state)
        } else {
            moves
        }
    }

    /// Admit every unvisited play child of `id`, returning the new nodes.
    fn expand<S: SearchState>(
        &mut self,
        tree: &mut SearchTree<S>,
        visited: &mut FxHashSet<S>,
        id: NodeId,
    ) -> Vec<NodeId> {
        self.stats.nodes_expanded += 1;
        let state = tree.state(id).clone();
        let moves = self.moves_for(&state);

        let mut children = Vec::new();
        for mv in moves.plays() {
            let Ok(child) = state.apply_move(mv) else {
                continue;
            };
            if visited.contains(&child) {
                continue;
            }
            visited.insert(child.clone());
            let child_id = tree.alloc(child, id);
            self.stats.max_depth = self.stats.max_depth.max(tree.get(child_id).depth);
            children.push(child_id);
        }
        children
    }

    fn offer(&mut self, best: &mut Option<TurnPlan>, moves: Vec<Move>, score: f64) {
        self.stats.candidates_scored += 1;
        let better = match best {
            None => true,
            Some(current) => {
                score > current.score
                    || (score == current.score
                        && self.config.tiebreak.prefers(moves.len(), current.moves.len()))
            }
        };
        if better {
            *best = Some(TurnPlan { moves, score });
        }
    }

    fn over_budget(&mut self, nodes: usize) -> bool {
        let exhausted = self.config.node_budget.map_or(false, |budget| nodes >= budget);
        if exhausted {
            self.stats.budget_exhausted = true;
        }
        exhausted
    }

    fn finish<S>(&mut self, visited: &FxHashSet<S>, started: Instant) {
        self.stats.states_visited = visited.len() as u32;
        self.stats.time_us = started.elapsed().as_micros() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, JOKER};
    use crate::core::{GameConfig, GameRng, GameState, GameStateBuilder, PlayerId};
    use crate::search::TurnTiebreak;

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::of_rank(r)).collect()
    }

    fn build(builder: GameStateBuilder) -> GameState {
        builder.build(&mut GameRng::new(17)).unwrap()
    }

    fn replay(start: &ObservedState, path: &[Move]) -> ObservedState {
        path.iter().fold(start.clone(), |state, mv| state.apply_move(mv).unwrap())
    }

    #[test]
    fn test_goal_path_through_hand() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[8, 3]))
                .hand(PlayerId(0), cards(&[1, 2, 3, 9])),
        );
        let view = state.observe();
        let mut searcher = Searcher::default();

        let path = searcher.find_goal_path(&view).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last().map(Move::kind), Some(MoveKind::FromGoal));
        assert!(played_goal(&replay(&view, &path)));
        assert!(searcher.stats().nodes_expanded > 0);
    }

    #[test]
    fn test_goal_path_skipped_when_predecessor_missing() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[5]))
                .hand(PlayerId(0), cards(&[1, 2, 9, 10])),
        );
        let mut searcher = Searcher::default();

        assert_eq!(searcher.find_goal_path(&state.observe()), None);
        assert_eq!(searcher.stats().nodes_expanded, 0);
    }

    #[test]
    fn test_wild_goal_plays_immediately() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[4, JOKER])),
        );
        let path = Searcher::default().find_goal_path(&state.observe()).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].kind(), MoveKind::FromGoal);
    }

    #[test]
    fn test_dfs_and_best_first_agree() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[6]))
                .hand(PlayerId(0), cards(&[1, 2, 4, 5]))
                .discard_pile(PlayerId(0), 0, cards(&[3])),
        );
        let view = state.observe();
        let mut searcher = Searcher::default();

        let dfs = searcher.find_path(&view, played_goal).unwrap();
        let astar = searcher.find_path_best_first(&view, played_goal, goal_distance).unwrap();
        assert!(played_goal(&replay(&view, &dfs)));
        assert!(played_goal(&replay(&view, &astar)));
        assert_eq!(astar.len(), 6);
    }

    #[test]
    fn test_empty_hand_path() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[11]))
                .hand(PlayerId(0), cards(&[1, 2, 3, 4])),
        );
        let view = state.observe();
        let path = Searcher::default().find_empty_hand_path(&view).unwrap();

        assert_eq!(path.len(), 4);
        let end = replay(&view, &path);
        assert!(end.hand(PlayerId(0)).is_none());
        assert_eq!(end.hand_size(PlayerId(0)), 4);
    }

    #[test]
    fn test_no_path_is_none() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[11]))
                .hand(PlayerId(0), cards(&[3, 5, 7, 9])),
        );
        let mut searcher = Searcher::default();
        assert_eq!(searcher.find_empty_hand_path(&state.observe()), None);
        assert_eq!(searcher.stats().states_visited, 1);
    }

    #[test]
    fn test_node_budget_stops_search() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[11]))
                .hand(PlayerId(0), cards(&[1, 2, 3, 4])),
        );
        let mut searcher = Searcher::new(SearchConfig::default().with_node_budget(Some(2)));

        assert_eq!(searcher.find_empty_hand_path(&state.observe()), None);
        assert!(searcher.stats().budget_exhausted);
    }

    #[test]
    fn test_turn_planner_ends_turn() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[11]))
                .hand(PlayerId(0), cards(&[1, 2, 7, 9])),
        );
        let view = state.observe();
        let mut searcher = Searcher::default();

        let plan = searcher.do_generic_moves(&view).unwrap();
        assert!(plan.moves.last().map_or(false, Move::ends_turn));
        assert!((0.0..=1.0).contains(&plan.score));
        assert!(searcher.stats().candidates_scored as usize <= 100);

        let end = replay(&view, &plan.moves);
        assert_eq!(end.current_player(), PlayerId(1));
    }

    #[test]
    fn test_turn_planner_respects_cap() {
        let state = build(
            GameStateBuilder::new(GameConfig::default()).hand(PlayerId(0), cards(&[1, 2, 3, 9])),
        );
        let mut searcher = Searcher::new(SearchConfig::default().with_max_candidates(3));

        let plan = searcher.do_generic_moves_by(&state.observe(), |_| 0.5).unwrap();
        assert_eq!(searcher.stats().candidates_scored, 3);
        assert_eq!(plan.moves.len(), 1);
    }

    #[test]
    fn test_tiebreak_prefers_longer() {
        let state = build(
            GameStateBuilder::new(GameConfig::default())
                .goal_pile(PlayerId(0), cards(&[11]))
                .hand(PlayerId(0), cards(&[1, 2, 3, 9])),
        );
        let view = state.observe();
        let config = SearchConfig::default()
            .with_max_candidates(10_000)
            .with_tiebreak(TurnTiebreak::PreferLonger);
        let plan = Searcher::new(config).do_generic_moves_by(&view, |_| 0.5).unwrap();

        // ace, two, three, then discard the nine
        assert_eq!(plan.moves.len(), 4);
    }
}
