//! Playing card value type.
//!
//! Cards are plain values: two cards of the same rank are interchangeable
//! for every game rule, so equality, ordering and hashing look at the rank
//! only. The suit is carried for display.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Rank of an ace, the only card that may start an empty play pile.
pub const ACE: u8 = 1;
/// Rank of a jack.
pub const JACK: u8 = 11;
/// Rank of a queen, the last card of a complete play pile.
pub const QUEEN: u8 = 12;
/// Rank of a king (wild).
pub const KING: u8 = 13;
/// Rank of a joker (wild).
pub const JOKER: u8 = 14;

/// Card suit. Jokers have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Hearts,
    Clubs,
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// A playing card.
///
/// ```
/// use goalpile::cards::{Card, Suit, KING};
///
/// let king = Card::new(KING, Some(Suit::Spades));
/// assert!(king.is_wild());
/// assert_eq!(Card::new(3, Some(Suit::Hearts)), Card::new(3, None));
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Option<Suit>,
}

impl Card {
    /// Create a card. Ranks run 1 (ace) through 14 (joker).
    #[must_use]
    pub const fn new(rank: u8, suit: Option<Suit>) -> Self {
        assert!(rank >= ACE && rank <= JOKER, "Card rank must be 1-14");
        Self { rank, suit }
    }

    /// Create a suitless card of the given rank.
    #[must_use]
    pub const fn of_rank(rank: u8) -> Self {
        Self::new(rank, None)
    }

    /// Create a joker.
    #[must_use]
    pub const fn joker() -> Self {
        Self::new(JOKER, None)
    }

    /// Card rank (1-14).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Card suit, `None` for jokers and suitless test cards.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        self.suit
    }

    /// Kings and jokers can stand in for any rank.
    #[inline]
    #[must_use]
    pub const fn is_wild(self) -> bool {
        self.rank == KING || self.rank == JOKER
    }

    fn rank_name(self) -> &'static str {
        const NAMES: [&str; 14] = [
            "Ace", "2", "3", "4", "5", "6", "7", "8", "9", "10", "Jack", "Queen", "King", "Joker",
        ];
        NAMES[(self.rank - 1) as usize]
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.suit {
            Some(suit) if self.rank != JOKER => write!(f, "{} of {}", self.rank_name(), suit),
            _ => f.write_str(self.rank_name()),
        }
    }
}
