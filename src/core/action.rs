//! Moves: a closed set of four kinds with typed arguments.
//!
//! Pile arguments are table indices: play piles `0..NUM_PLAY_PILES`, discard
//! piles `0..NUM_DISCARD_PILES` (always the mover's own). A `Move` never
//! names its player; it applies to whoever is current in the state it is
//! applied to.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::Card;
use crate::rules::GameView;

/// Move kinds, in the order buckets are reported by the enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveKind {
    FromGoal,
    FromHand,
    FromDiscard,
    EndTurn,
}

impl MoveKind {
    pub const ALL: [MoveKind; 4] = [
        MoveKind::FromGoal,
        MoveKind::FromHand,
        MoveKind::FromDiscard,
        MoveKind::EndTurn,
    ];

    /// Menu text for this kind of move.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MoveKind::FromGoal => "Play your goal card",
            MoveKind::FromHand => "Play from your hand",
            MoveKind::FromDiscard => "Play from a discard pile",
            MoveKind::EndTurn => "End your turn (discard)",
        }
    }
}

/// A single move by the current player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Play the exposed goal card onto a play pile.
    PlayFromGoal { play_pile: usize },
    /// Play a card from hand onto a play pile.
    PlayFromHand { card: Card, play_pile: usize },
    /// Play the top card of one of the mover's discard piles.
    PlayFromDiscard { discard_pile: usize, play_pile: usize },
    /// Discard a card from hand and pass the turn.
    EndTurn { card: Card, discard_pile: usize },
}

impl Move {
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::PlayFromGoal { .. } => MoveKind::FromGoal,
            Move::PlayFromHand { .. } => MoveKind::FromHand,
            Move::PlayFromDiscard { .. } => MoveKind::FromDiscard,
            Move::EndTurn { .. } => MoveKind::EndTurn,
        }
    }

    /// True only for `EndTurn`, which hands control to the next player.
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(self, Move::EndTurn { .. })
    }

    /// Human-readable description relative to the state the move is about
    /// to be applied to. Display only; never consulted by the rules.
    pub fn describe<V: GameView + ?Sized>(&self, view: &V) -> String {
        let player = view.current_player();

        let (card, source, play_pile) = match *self {
            Move::EndTurn { card, discard_pile } => {
                let onto = view
                    .discard_top(player, discard_pile)
                    .map_or_else(|| "nothing".to_string(), |top| top.to_string());
                return format!(
                    "End turn by discarding {} onto {} on discard pile {}",
                    card, onto, discard_pile
                );
            }
            Move::PlayFromHand { card, play_pile } => {
                (Some(card), "from hand".to_string(), play_pile)
            }
            Move::PlayFromDiscard { discard_pile, play_pile } => (
                view.discard_top(player, discard_pile),
                format!("from discard pile {}", discard_pile),
                play_pile,
            ),
            Move::PlayFromGoal { play_pile } => {
                (view.goal_card(player), "from your goal pile".to_string(), play_pile)
            }
        };

        let card = card.map_or_else(|| "an unknown card".to_string(), |c| c.to_string());
        let onto = match view.play_piles().get(play_pile).and_then(|pile| pile.back()) {
            Some(top) => format!("the {} on pile {}", top, play_pile),
            None => "an empty space".to_string(),
        };

        format!("Play {} {} onto {}", card, source, onto)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::PlayFromGoal { play_pile } => write!(f, "goal -> play {}", play_pile),
            Move::PlayFromHand { card, play_pile } => write!(f, "{} -> play {}", card, play_pile),
            Move::PlayFromDiscard { discard_pile, play_pile } => {
                write!(f, "discard {} -> play {}", discard_pile, play_pile)
            }
            Move::EndTurn { card, discard_pile } => {
                write!(f, "{} -> discard {} (end turn)", card, discard_pile)
            }
        }
    }
}

/// A move as it was applied during a game, for history and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who made the move.
    pub player: PlayerId,

    pub action: Move,

    /// `Move::describe` text, captured before the move was applied.
    pub description: String,

    /// Turn number when the move was made (starts at 1).
    pub turn: u32,

    /// Position of the move within its turn.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Move, description: String, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            description,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let card = Card::of_rank(4);
        assert_eq!(Move::PlayFromGoal { play_pile: 0 }.kind(), MoveKind::FromGoal);
        assert_eq!(Move::PlayFromHand { card, play_pile: 1 }.kind(), MoveKind::FromHand);
        assert_eq!(
            Move::PlayFromDiscard { discard_pile: 0, play_pile: 1 }.kind(),
            MoveKind::FromDiscard
        );
        let end = Move::EndTurn { card, discard_pile: 3 };
        assert_eq!(end.kind(), MoveKind::EndTurn);
        assert!(end.ends_turn());
        assert!(!Move::PlayFromGoal { play_pile: 2 }.ends_turn());
    }

    #[test]
    fn test_labels() {
        assert_eq!(MoveKind::FromGoal.label(), "Play your goal card");
        assert_eq!(MoveKind::EndTurn.label(), "End your turn (discard)");
    }

    #[test]
    fn test_serialization() {
        let mv = Move::EndTurn { card: Card::of_rank(9), discard_pile: 2 };
        let record = ActionRecord::new(PlayerId::new(1), mv, "discard".to_string(), 3, 0);

        let json = serde_json::to_string(&record).unwrap();
        let restored: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }
}
