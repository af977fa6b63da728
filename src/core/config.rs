//! Game parameters and table constants.
//!
//! A `GameConfig` is fixed for a game's lifetime. `validate` checks that the
//! card pool can actually support the requested table before any card is
//! dealt.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Card, CARDS_PER_DECK};

/// Shared play piles on the table.
pub const NUM_PLAY_PILES: usize = 4;

/// Private discard piles per player.
pub const NUM_DISCARD_PILES: usize = 4;

/// A play pile holding this many cards is cleared back into the draw pile.
pub const MAX_PLAY_PILE: usize = 12;

/// Cards held back from dealing so every play pile can be completed.
pub const PLAY_PILE_RESERVE: usize = (MAX_PLAY_PILE + 1) * NUM_PLAY_PILES;

/// Table parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-255).
    pub num_players: usize,

    /// Number of 54-card decks in the pool.
    pub num_decks: usize,

    /// Cards dealt to each goal pile, including the exposed goal card.
    pub goal_size: usize,

    /// Cards a hand is refilled up to.
    pub hand_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            num_decks: 2,
            goal_size: 13,
            hand_size: 4,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(mut self, num_players: usize) -> Self {
        self.num_players = num_players;
        self
    }

    pub fn with_decks(mut self, num_decks: usize) -> Self {
        self.num_decks = num_decks;
        self
    }

    pub fn with_goal_size(mut self, goal_size: usize) -> Self {
        self.goal_size = goal_size;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Total cards in the pool.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.num_decks * CARDS_PER_DECK
    }

    /// Cards the table needs: every goal pile and hand dealt, plus the
    /// play-pile reserve.
    #[must_use]
    pub fn required_cards(&self) -> usize {
        self.num_players * (self.goal_size + self.hand_size) + PLAY_PILE_RESERVE
    }

    /// Check the parameters before dealing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players < 2 {
            return Err(ConfigError::TooFewPlayers(self.num_players));
        }
        if self.num_players > 255 {
            return Err(ConfigError::TooManyPlayers(self.num_players));
        }
        if self.num_decks == 0 {
            return Err(ConfigError::NoDecks);
        }
        if self.goal_size == 0 {
            return Err(ConfigError::ZeroGoalSize);
        }
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }

        let available = self.total_cards();
        let required = self.required_cards();
        if available < required {
            return Err(ConfigError::TooFewCards { available, required });
        }

        Ok(())
    }
}

/// Errors raised while setting up a game. Nothing is dealt when one occurs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer than two seats.
    TooFewPlayers(usize),
    /// More seats than `PlayerId` can address.
    TooManyPlayers(usize),
    NoDecks,
    ZeroGoalSize,
    ZeroHandSize,
    /// The pool cannot cover goal piles, hands and the play-pile reserve.
    TooFewCards { available: usize, required: usize },
    /// A rigged layout asked for more copies of a card than the pool holds.
    CardUnavailable(Card),
    /// A rigged play pile is not an ascending run shorter than a full pile.
    InvalidPlayPile(usize),
    /// A rigged layout names a pile index past the table.
    PileOutOfRange(usize),
    /// A rigged goal pile has no cards.
    EmptyGoalPile(PlayerId),
    /// A rigged layout names a seat outside the table.
    PlayerOutOfRange(PlayerId),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::TooFewPlayers(n) => write!(f, "Too few players: {} (need at least 2)", n),
            ConfigError::TooManyPlayers(n) => write!(f, "Too many players: {} (at most 255)", n),
            ConfigError::NoDecks => write!(f, "At least one deck is required"),
            ConfigError::ZeroGoalSize => write!(f, "Goal size must be at least 1"),
            ConfigError::ZeroHandSize => write!(f, "Hand size must be at least 1"),
            ConfigError::TooFewCards { available, required } => {
                write!(f, "Too few cards: {} available, {} required", available, required)
            }
            ConfigError::CardUnavailable(card) => {
                write!(f, "No {} left in the pool for this layout", card)
            }
            ConfigError::InvalidPlayPile(pile) => {
                write!(f, "Play pile {} is not a valid ascending run", pile)
            }
            ConfigError::PileOutOfRange(pile) => write!(f, "Pile {} does not exist", pile),
            ConfigError::EmptyGoalPile(player) => write!(f, "{} has an empty goal pile", player),
            ConfigError::PlayerOutOfRange(player) => write!(f, "{} is not at the table", player),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.required_cards(), 2 * 17 + 52);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_single_deck_two_players_is_infeasible() {
        let config = GameConfig::default().with_decks(1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooFewCards { available: 54, required: 86 })
        );
    }

    #[test]
    fn test_one_deck_never_fits_two_players() {
        let config = GameConfig::default().with_decks(1).with_goal_size(0).with_hand_size(1);
        assert_eq!(config.validate(), Err(ConfigError::ZeroGoalSize));

        let config = GameConfig::default().with_decks(1).with_goal_size(1).with_hand_size(1);
        assert_eq!(config.validate(), Err(ConfigError::TooFewCards { available: 54, required: 56 }));
    }

    #[test]
    fn test_parameter_errors() {
        assert_eq!(
            GameConfig::default().with_players(1).validate(),
            Err(ConfigError::TooFewPlayers(1))
        );
        assert_eq!(
            GameConfig::default().with_players(300).validate(),
            Err(ConfigError::TooManyPlayers(300))
        );
        assert_eq!(GameConfig::default().with_decks(0).validate(), Err(ConfigError::NoDecks));
        assert_eq!(
            GameConfig::default().with_hand_size(0).validate(),
            Err(ConfigError::ZeroHandSize)
        );
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::TooFewCards { available: 54, required: 86 };
        assert_eq!(err.to_string(), "Too few cards: 54 available, 86 required");
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_players(3).with_decks(3);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
