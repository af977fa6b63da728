//! Transition errors.
//!
//! Every move either produces a new state or one of these. None of them are
//! transient: retrying the same move on the same state fails the same way.
//! "No path found" from the search engine is not an error.

use super::player::PlayerId;
use crate::cards::Card;

/// Why a move was rejected by the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// The card is not in the mover's hand.
    CardNotInHand(Card),
    /// The card cannot extend the target play pile.
    InvalidPlay { card: Card, play_pile: usize },
    /// The named discard pile has no cards.
    EmptyDiscardPile(usize),
    /// The mover has no exposed goal card.
    NoGoalCard,
    /// A pile index past the end of the table.
    PileOutOfRange(usize),
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::CardNotInHand(card) => write!(f, "{} is not in hand", card),
            IllegalMove::InvalidPlay { card, play_pile } => {
                write!(f, "{} cannot be played on pile {}", card, play_pile)
            }
            IllegalMove::EmptyDiscardPile(pile) => write!(f, "Discard pile {} is empty", pile),
            IllegalMove::NoGoalCard => write!(f, "No goal card to play"),
            IllegalMove::PileOutOfRange(pile) => write!(f, "Pile {} does not exist", pile),
        }
    }
}

/// Errors returned by state transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The move breaks the rules. Only enumerator-produced moves should be
    /// applied, so this signals a caller bug.
    IllegalMove(IllegalMove),
    /// The game already has a winner.
    GameOver { winner: PlayerId },
    /// An observed state was asked to move for a seat other than its viewer.
    NotYourTurn { viewer: PlayerId, current: PlayerId },
    /// The move depends on cards the viewer has not seen.
    UnknownInformation(&'static str),
}

impl From<IllegalMove> for GameError {
    fn from(reason: IllegalMove) -> Self {
        GameError::IllegalMove(reason)
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::IllegalMove(reason) => write!(f, "Illegal move: {}", reason),
            GameError::GameOver { winner } => write!(f, "Game is over, {} won", winner),
            GameError::NotYourTurn { viewer, current } => {
                write!(f, "{} cannot move during the turn of {}", viewer, current)
            }
            GameError::UnknownInformation(what) => write!(f, "Unknown information: {}", what),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_illegal_move() {
        let err: GameError = IllegalMove::EmptyDiscardPile(2).into();
        assert_eq!(err, GameError::IllegalMove(IllegalMove::EmptyDiscardPile(2)));
        assert_eq!(err.to_string(), "Illegal move: Discard pile 2 is empty");
    }

    #[test]
    fn test_display() {
        let err = GameError::NotYourTurn { viewer: PlayerId::new(1), current: PlayerId::new(0) };
        assert_eq!(err.to_string(), "Player 1 cannot move during the turn of Player 0");

        let err = GameError::IllegalMove(IllegalMove::InvalidPlay {
            card: Card::of_rank(5),
            play_pile: 3,
        });
        assert_eq!(err.to_string(), "Illegal move: 5 cannot be played on pile 3");
    }
}
