//! Goal-card heuristics for the current player.
//!
//! `goal_distance` is the A* estimate: the fewest plays before the goal card
//! could land on some play pile, taking the cheapest pile. `goal_predecessors_available`
//! is the cheap filter run before a goal search: every rank between some
//! pile's top and the goal card must be coverable by a playable card right
//! now (hand or discard tops, wilds standing in for missing ranks).

use crate::cards::{Card, JOKER};
use crate::core::{PlayerId, MAX_PLAY_PILE, NUM_DISCARD_PILES};
use crate::rules::GameView;

/// Playable non-wild cards counted by rank, plus the number of wilds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankCounts {
    counts: [u8; JOKER as usize + 1],
    wilds: u8,
}

impl RankCounts {
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut out = Self::default();
        for card in cards {
            if card.is_wild() {
                out.wilds += 1;
            } else {
                out.counts[card.rank() as usize] += 1;
            }
        }
        out
    }

    /// Cards `player` could play right now: their visible hand and their
    /// discard-pile tops.
    pub fn playable<V: GameView + ?Sized>(view: &V, player: PlayerId) -> Self {
        let mut cards: Vec<Card> = view
            .hand(player)
            .map(|hand| hand.iter().copied().collect())
            .unwrap_or_default();
        cards.extend((0..NUM_DISCARD_PILES).filter_map(|pile| view.discard_top(player, pile)));
        Self::from_cards(cards.iter())
    }

    /// Use one card of `rank`, falling back to a wild. False if neither is
    /// left.
    pub fn take(&mut self, rank: u8) -> bool {
        let slot = &mut self.counts[rank as usize];
        if *slot > 0 {
            *slot -= 1;
            true
        } else if self.wilds > 0 {
            self.wilds -= 1;
            true
        } else {
            false
        }
    }
}

/// Ranks that must be played on a pile of `pile_len` cards before a card of
/// `goal_rank` fits, in play order. Wraps through a cleared pile when the
/// goal rank is already below the top.
pub fn ranks_needed(pile_len: usize, goal_rank: u8) -> impl Iterator<Item = u8> {
    let goal = goal_rank as usize;
    let (upper, wrap) = if goal > pile_len { (goal, 0) } else { (MAX_PLAY_PILE + 1, goal) };
    (pile_len + 1..upper).chain(1..wrap).map(|r| r as u8)
}

/// Admissible estimate of the plays needed to play the current player's
/// goal card. Zero when there is no known goal card.
pub fn goal_distance<V: GameView + ?Sized>(view: &V) -> usize {
    let Some(goal) = view.goal_card(view.current_player()) else {
        return 0;
    };
    if goal.is_wild() {
        return 1;
    }
    let g = goal.rank() as usize;
    view.play_pile_lengths()
        .iter()
        .map(|&len| {
            if g == len + 1 {
                1
            } else if g > len + 1 {
                g - len
            } else {
                MAX_PLAY_PILE - len + g
            }
        })
        .min()
        .unwrap_or(0)
}

/// Whether some play pile could be built up to the goal card using only the
/// cards playable right now. A false result means no goal search can
/// succeed this turn.
pub fn goal_predecessors_available<V: GameView + ?Sized>(view: &V) -> bool {
    let player = view.current_player();
    let Some(goal) = view.goal_card(player) else {
        return false;
    };
    if goal.is_wild() {
        return true;
    }
    let available = RankCounts::playable(view, player);
    view.play_pile_lengths().iter().any(|&len| {
        let mut counts = available.clone();
        ranks_needed(len, goal.rank()).all(|rank| counts.take(rank))
    })
}
