//! Legal move enumeration and move coalescing.
//!
//! `legal_moves` lists every legal move exactly once, bucketed by kind.
//! `LegalMoves::coalesce` then keeps one representative per equivalence key
//! so the search engine branches over strategically distinct choices only:
//!
//! | kind | key |
//! |---|---|
//! | goal play | card rank, destination pile length |
//! | hand play | card rank, destination pile length |
//! | discard play | source discard pile, destination pile length |
//! | end turn | card rank, destination discard pile |
//!
//! Two play piles of equal length are interchangeable, so collapsing them
//! changes which path a search reports, never whether one exists.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{Move, MoveKind, NUM_DISCARD_PILES, NUM_PLAY_PILES};

use super::view::GameView;

/// One bucket of moves. Sixteen covers a four-card hand against four piles
/// without spilling to the heap.
pub type MoveBucket = SmallVec<[Move; 16]>;

/// Legal moves grouped by `MoveKind`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    buckets: [MoveBucket; 4],
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum CoalesceKey {
    Goal { rank: u8, pile_len: usize },
    Hand { rank: u8, pile_len: usize },
    Discard { source: usize, pile_len: usize },
    EndTurn { rank: u8, discard_pile: usize },
}

fn bucket_index(kind: MoveKind) -> usize {
    match kind {
        MoveKind::FromGoal => 0,
        MoveKind::FromHand => 1,
        MoveKind::FromDiscard => 2,
        MoveKind::EndTurn => 3,
    }
}

impl LegalMoves {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a move to its bucket unless an equal move is already there.
    pub fn push(&mut self, mv: Move) {
        let bucket = &mut self.buckets[bucket_index(mv.kind())];
        if !bucket.contains(&mv) {
            bucket.push(mv);
        }
    }

    /// Moves of one kind.
    #[must_use]
    pub fn get(&self, kind: MoveKind) -> &[Move] {
        &self.buckets[bucket_index(kind)]
    }

    /// All moves, bucket by bucket in `MoveKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.buckets.iter().flat_map(|b| b.iter())
    }

    /// Moves that keep the turn: goal, hand and discard plays.
    pub fn plays(&self) -> impl Iterator<Item = &Move> {
        self.buckets[..3].iter().flat_map(|b| b.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.is_empty())
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.get(mv.kind()).contains(mv)
    }

    /// Keep the first move of each equivalence class.
    #[must_use]
    pub fn coalesce<V: GameView + ?Sized>(&self, view: &V) -> LegalMoves {
        let lengths = view.play_pile_lengths();
        let goal_rank = view.goal_card(view.current_player()).map(|c| c.rank());
        let mut seen: FxHashSet<CoalesceKey> = FxHashSet::default();
        let mut out = LegalMoves::new();

        for mv in self.iter() {
            let key = match *mv {
                Move::PlayFromGoal { play_pile } => CoalesceKey::Goal {
                    rank: goal_rank.unwrap_or(0),
                    pile_len: lengths[play_pile],
                },
                Move::PlayFromHand { card, play_pile } => CoalesceKey::Hand {
                    rank: card.rank(),
                    pile_len: lengths[play_pile],
                },
                Move::PlayFromDiscard { discard_pile, play_pile } => CoalesceKey::Discard {
                    source: discard_pile,
                    pile_len: lengths[play_pile],
                },
                Move::EndTurn { card, discard_pile } => CoalesceKey::EndTurn {
                    rank: card.rank(),
                    discard_pile,
                },
            };
            if seen.insert(key) {
                out.push(*mv);
            }
        }

        out
    }
}

/// Enumerate every legal move for the view's current player.
///
/// Nothing is legal once the game has a winner, or in an observed view
/// whose viewer is not the player to move. Moves that need cards the view
/// cannot see (a hand refilled out of sight, an unrevealed goal card) are
/// simply absent.
pub fn legal_moves<V: GameView + ?Sized>(view: &V) -> LegalMoves {
    let mut moves = LegalMoves::new();
    if !view.can_move() {
        return moves;
    }

    let player = view.current_player();

    if let Some(goal) = view.goal_card(player) {
        for play_pile in 0..NUM_PLAY_PILES {
            if view.is_valid_play(goal, play_pile) {
                moves.push(Move::PlayFromGoal { play_pile });
            }
        }
    }

    if let Some(hand) = view.current_hand() {
        for &card in hand {
            for play_pile in 0..NUM_PLAY_PILES {
                if view.is_valid_play(card, play_pile) {
                    moves.push(Move::PlayFromHand { card, play_pile });
                }
            }
            for discard_pile in 0..NUM_DISCARD_PILES {
                moves.push(Move::EndTurn { card, discard_pile });
            }
        }
    }

    for discard_pile in 0..NUM_DISCARD_PILES {
        let Some(top) = view.discard_top(player, discard_pile) else {
            continue;
        };
        for play_pile in 0..NUM_PLAY_PILES {
            if view.is_valid_play(top, play_pile) {
                moves.push(Move::PlayFromDiscard { discard_pile, play_pile });
            }
        }
    }

    moves
}
