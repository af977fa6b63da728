//! Search engine tests.
//!
//! Searches run on the current player's `ObservedState`; every plan they
//! return must replay legally on the real `GameState`.

use goalpile::cards::Card;
use goalpile::core::{
    GameConfig, GameRng, GameState, GameStateBuilder, Move, MoveKind, ObservedState, PlayerId,
};
use goalpile::rules::{GameView, SearchState};
use goalpile::search::{
    goal_distance, hand_emptied, played_goal, SearchConfig, Searcher, TurnTiebreak,
};
use proptest::prelude::*;

fn cards(ranks: &[u8]) -> Vec<Card> {
    ranks.iter().map(|&r| Card::of_rank(r)).collect()
}

fn unbounded() -> SearchConfig {
    SearchConfig::default().with_node_budget(None)
}

/// Deal from `seed` and play `steps` random legal moves.
fn midgame(seed: u64, steps: &[usize]) -> (GameState, GameRng) {
    let mut rng = GameRng::new(seed);
    let mut state = GameState::new(GameConfig::default(), &mut rng).unwrap();
    for &pick in steps {
        let moves: Vec<Move> = state.legal_moves().iter().copied().collect();
        if moves.is_empty() {
            break;
        }
        state = state.apply(&moves[pick % moves.len()], &mut rng).unwrap();
    }
    (state, rng)
}

/// Apply `path` to the real game, failing the test on any rejected move.
fn replay(state: &GameState, path: &[Move], rng: &mut GameRng) -> GameState {
    path.iter().fold(state.clone(), |current, mv| {
        current
            .apply(mv, rng)
            .unwrap_or_else(|err| panic!("planned move {} rejected: {}", mv, err))
    })
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_goal_path_through_discards_and_hand() {
    let mut rng = GameRng::new(12);
    let state = GameStateBuilder::new(GameConfig::default())
        .goal_pile(PlayerId(0), cards(&[9, 4]))
        .hand(PlayerId(0), cards(&[1, 3, 8, 10]))
        .discard_pile(PlayerId(0), 2, cards(&[2]))
        .build(&mut rng)
        .unwrap();

    let mut searcher = Searcher::new(unbounded());
    let path = searcher.find_goal_path(&state.observe()).unwrap();
    assert_eq!(path.len(), 4);
    assert!(matches!(path[1], Move::PlayFromDiscard { discard_pile: 2, .. }));
    assert_eq!(path[3].kind(), MoveKind::FromGoal);

    let after = replay(&state, &path, &mut rng);
    assert_eq!(after.goal_card(PlayerId(0)), Some(Card::of_rank(9)));
    assert_eq!(after.goal_remaining(PlayerId(0)), 0);
}

#[test]
fn test_goal_on_existing_pile() {
    let state = GameStateBuilder::new(GameConfig::default())
        .goal_pile(PlayerId(0), cards(&[6]))
        .play_pile(3, cards(&[1, 2, 3, 4, 5]))
        .hand(PlayerId(0), cards(&[9, 9, 10, 11]))
        .build(&mut GameRng::new(12))
        .unwrap();

    let mut searcher = Searcher::default();
    let path = searcher.find_goal_path(&state.observe()).unwrap();
    assert_eq!(path, vec![Move::PlayFromGoal { play_pile: 3 }]);
    assert_eq!(searcher.stats().nodes_expanded, 1);
}

#[test]
fn test_unreachable_goal_is_none() {
    let state = GameStateBuilder::new(GameConfig::default())
        .goal_pile(PlayerId(0), cards(&[7]))
        .hand(PlayerId(0), cards(&[1, 2, 3, 12]))
        .build(&mut GameRng::new(12))
        .unwrap();
    let view = state.observe();

    let mut searcher = Searcher::new(unbounded());
    assert_eq!(searcher.find_goal_path(&view), None);
    assert_eq!(searcher.find_path(&view, played_goal), None);
    assert!(!searcher.stats().budget_exhausted);
}

#[test]
fn test_empty_hand_path() {
    let state = GameStateBuilder::new(GameConfig::default())
        .goal_pile(PlayerId(0), cards(&[12]))
        .hand(PlayerId(0), cards(&[1, 2, 3, 13]))
        .build(&mut GameRng::new(12))
        .unwrap();
    let view = state.observe();

    let path = Searcher::new(unbounded()).find_empty_hand_path(&view).unwrap();
    assert_eq!(path.len(), 4);
    assert!(path.iter().all(|mv| mv.kind() == MoveKind::FromHand));

    let end = path.iter().try_fold(view, |v, mv| v.apply_move(mv)).unwrap();
    assert!(hand_emptied(&end));
}

#[test]
fn test_planner_ends_the_turn() {
    let state = GameStateBuilder::new(GameConfig::default())
        .goal_pile(PlayerId(0), cards(&[11]))
        .hand(PlayerId(0), cards(&[1, 5, 6, 7]))
        .build(&mut GameRng::new(12))
        .unwrap();

    let plan = Searcher::default().do_generic_moves(&state.observe()).unwrap();
    assert_eq!(plan.moves.last().map(Move::kind), Some(MoveKind::EndTurn));
    assert!((0.0..=1.0).contains(&plan.score));
}

#[test]
fn test_tiebreak_controls_plan_length() {
    let state = GameStateBuilder::new(GameConfig::default())
        .goal_pile(PlayerId(0), cards(&[11]))
        .hand(PlayerId(0), cards(&[1, 5, 6, 7]))
        .build(&mut GameRng::new(12))
        .unwrap();
    let view = state.observe();
    let flat = |_: &ObservedState| 0.5;

    let longer = Searcher::new(unbounded().with_tiebreak(TurnTiebreak::PreferLonger))
        .do_generic_moves_by(&view, flat)
        .unwrap();
    let shorter = Searcher::new(unbounded().with_tiebreak(TurnTiebreak::PreferShorter))
        .do_generic_moves_by(&view, flat)
        .unwrap();
    assert_eq!(shorter.moves.len(), 1);
    assert_eq!(longer.moves.len(), 2);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_coalescing_preserves_reachability(seed in any::<u64>(), steps in prop::collection::vec(any::<usize>(), 0..24)) {
        let (state, _) = midgame(seed, &steps);
        prop_assume!(state.winner().is_none());
        let view = state.observe();

        let mut merged = Searcher::new(unbounded());
        let mut full = Searcher::new(unbounded().with_coalesce(false));
        prop_assert_eq!(
            merged.find_path(&view, played_goal).is_some(),
            full.find_path(&view, played_goal).is_some()
        );
        prop_assert_eq!(
            merged.find_path(&view, hand_emptied).is_some(),
            full.find_path(&view, hand_emptied).is_some()
        );
    }

    #[test]
    fn prop_best_first_agrees_with_dfs(seed in any::<u64>(), steps in prop::collection::vec(any::<usize>(), 0..40)) {
        let (state, _) = midgame(seed, &steps);
        prop_assume!(state.winner().is_none());
        let view = state.observe();

        let mut searcher = Searcher::new(unbounded());
        let dfs = searcher.find_path(&view, played_goal);
        let astar = searcher.find_path_best_first(&view, played_goal, goal_distance);
        prop_assert_eq!(dfs.is_some(), astar.is_some());
        prop_assert!(searcher.stats().nodes_expanded <= searcher.stats().states_visited);
    }

    #[test]
    fn prop_goal_paths_replay_on_real_game(seed in any::<u64>(), steps in prop::collection::vec(any::<usize>(), 0..40)) {
        let (state, mut rng) = midgame(seed, &steps);
        prop_assume!(state.winner().is_none());
        let player = state.current_player();

        if let Some(path) = Searcher::default().find_goal_path(&state.observe()) {
            prop_assert_eq!(path.last().map(Move::kind), Some(MoveKind::FromGoal));
            let after = replay(&state, &path, &mut rng);
            let before_remaining = state.goal_remaining(player);
            if before_remaining == 0 {
                prop_assert_eq!(after.winner(), Some(player));
            } else {
                prop_assert_eq!(after.goal_remaining(player), before_remaining - 1);
            }
        }
    }

    #[test]
    fn prop_turn_plans_replay_on_real_game(seed in any::<u64>(), steps in prop::collection::vec(any::<usize>(), 0..40)) {
        let (state, mut rng) = midgame(seed, &steps);
        prop_assume!(state.winner().is_none());
        let player = state.current_player();

        let mut searcher = Searcher::default();
        let plan = searcher.do_generic_moves(&state.observe());
        prop_assert!(searcher.stats().candidates_scored as usize <= searcher.config().max_candidates);

        if let Some(plan) = plan {
            let after = replay(&state, &plan.moves, &mut rng);
            prop_assert!(after.winner() == Some(player) || after.current_player() != player);
            prop_assert!(plan.moves[..plan.moves.len() - 1].iter().all(|mv| !mv.ends_turn()));
        }
    }
}
