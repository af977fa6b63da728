//! Capability traits shared by the full game state and the observed view.
//!
//! The enumerator, the move describer and the scoring code only need to
//! read a state, so they are written against `GameView`. The search engine
//! additionally needs a draw-free transition and structural identity, which
//! is `SearchState`. Only `ObservedState` implements `SearchState`: a search
//! can never see cards its viewer has not been shown.

use std::hash::Hash;

use im::Vector;

use crate::cards::Card;
use crate::core::{GameConfig, GameError, Move, PlayerId, NUM_DISCARD_PILES, NUM_PLAY_PILES};

use super::enumerator::{legal_moves, LegalMoves};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// A player emptied their goal pile.
    Winner(PlayerId),
    /// Play stopped without a winner (move cap, or a player with no legal
    /// move because the draw pile ran dry).
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Whether `card` may be placed on a play pile currently holding
/// `pile_len` cards. Wild cards always fit; otherwise the rank must be the
/// next one in the run, which for an empty pile means an ace.
#[inline]
#[must_use]
pub fn is_valid_play(card: Card, pile_len: usize) -> bool {
    card.is_wild() || card.rank() as usize == pile_len + 1
}

/// Read access to a table position.
pub trait GameView {
    fn config(&self) -> &GameConfig;

    /// The seat to move.
    fn current_player(&self) -> PlayerId;

    fn winner(&self) -> Option<PlayerId>;

    /// The move that produced this state, if any.
    fn last_move(&self) -> Option<&Move>;

    /// A player's hand, when this view is allowed to see it.
    fn hand(&self, player: PlayerId) -> Option<&Vector<Card>>;

    /// A player's exposed goal card. `None` once the pile is exhausted, or
    /// when the next card has not been revealed to this view.
    fn goal_card(&self, player: PlayerId) -> Option<Card>;

    /// Face-down cards remaining under a player's goal card.
    fn goal_remaining(&self, player: PlayerId) -> usize;

    fn discard_piles(&self, player: PlayerId) -> &[Vector<Card>; NUM_DISCARD_PILES];

    fn play_piles(&self) -> &[Vector<Card>; NUM_PLAY_PILES];

    /// Whether the current player can move in this view. False once the
    /// game is won.
    fn can_move(&self) -> bool {
        self.winner().is_none()
    }

    /// The current player's hand, if visible.
    fn current_hand(&self) -> Option<&Vector<Card>> {
        self.hand(self.current_player())
    }

    fn discard_top(&self, player: PlayerId, pile: usize) -> Option<Card> {
        self.discard_piles(player).get(pile).and_then(|p| p.back()).copied()
    }

    /// Whether `card` may go on the play pile at `play_pile`. Out-of-range
    /// piles accept nothing.
    fn is_valid_play(&self, card: Card, play_pile: usize) -> bool {
        self.play_piles()
            .get(play_pile)
            .map_or(false, |pile| is_valid_play(card, pile.len()))
    }

    /// Lengths of the play piles.
    fn play_pile_lengths(&self) -> [usize; NUM_PLAY_PILES] {
        let piles = self.play_piles();
        std::array::from_fn(|i| piles[i].len())
    }

    /// Every legal move for the current player.
    fn legal_moves(&self) -> LegalMoves {
        legal_moves(self)
    }
}

/// A view the search engine can expand.
///
/// Transitions are pure and never draw: they return a new state and leave
/// `self` untouched. Equality and hashing must cover everything observable
/// so the visited set never merges distinct positions.
pub trait SearchState: GameView + Clone + Eq + Hash {
    /// The seat whose knowledge this state encodes.
    fn viewer(&self) -> PlayerId;

    /// Apply a move for the current player.
    fn apply_move(&self, mv: &Move) -> Result<Self, GameError>;
}
