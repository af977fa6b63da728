//! Hand-authored state scoring.
//!
//! `score_player_cards` measures how ready a player's playable cards are to
//! build toward their goal card. `danger` asks whether an opponent, handed a
//! couple of wild cards, could reach their goal card. `score_state` combines
//! the two: own readiness plus, for each opponent, the absence of danger,
//! averaged. Lower opponent danger always scores higher.

use crate::cards::Card;
use crate::core::{ObservedState, PlayerId, MAX_PLAY_PILE, NUM_DISCARD_PILES};
use crate::rules::GameView;
use crate::search::{RankCounts, SearchConfig, Searcher};

/// Readiness of `player`'s hand and discard tops, in `[0, 1]`.
///
/// Walks down from the rank just below the goal card, wrapping from ace to
/// queen, through every other rank. Each rank present (or covered by a
/// spare wild) earns the current weight; each rank missing halves it. The
/// sum is normalized by the most cards a player could hold in view.
///
/// A wild goal card, an unrevealed goal card and a won game all score 1.
pub fn score_player_cards<V: GameView + ?Sized>(view: &V, player: PlayerId) -> f64 {
    if view.winner() == Some(player) {
        return 1.0;
    }
    let Some(goal) = view.goal_card(player) else {
        return 1.0;
    };
    if goal.is_wild() {
        return 1.0;
    }

    let mut available = RankCounts::playable(view, player);
    let mut weight = 1.0;
    let mut total = 0.0;
    let mut rank = goal.rank();
    for _ in 1..MAX_PLAY_PILE {
        rank = if rank <= 1 { MAX_PLAY_PILE as u8 } else { rank - 1 };
        if available.take(rank) {
            total += weight;
        } else {
            weight /= 2.0;
        }
    }

    let capacity = (view.config().hand_size + NUM_DISCARD_PILES) as f64;
    (total / capacity).clamp(0.0, 1.0)
}

/// 1.0 if `opponent`, holding `config.danger_wilds` wild cards, could force
/// a play of their goal card; otherwise 0.0.
pub fn danger(view: &ObservedState, opponent: PlayerId, config: &SearchConfig) -> f64 {
    if view.winner() == Some(opponent) {
        return 1.0;
    }
    if view.winner().is_some() {
        return 0.0;
    }
    let granted = vec![Card::joker(); config.danger_wilds];
    let hypothetical = view.hypothetical(opponent, granted);
    let mut searcher = Searcher::new(config.for_danger_search());
    if searcher.find_goal_path(&hypothetical).is_some() {
        1.0
    } else {
        0.0
    }
}

/// Value of `view` for `player`, in `[0, 1]`.
pub fn score_state(view: &ObservedState, player: PlayerId, config: &SearchConfig) -> f64 {
    let own = score_player_cards(view, player);
    let opponents: Vec<PlayerId> = PlayerId::all(view.player_count())
        .filter(|&p| p != player)
        .collect();
    let safety: f64 = opponents
        .iter()
        .map(|&opponent| 1.0 - danger(view, opponent, config))
        .sum();
    (own + safety) / (1 + opponents.len()) as f64
}
