//! Multi-deck construction.

use im::Vector;

use super::card::{Card, Suit, JOKER, KING};

/// Cards in one deck: 13 ranks in four suits plus two jokers.
pub const CARDS_PER_DECK: usize = 54;

/// Jokers in one deck.
pub const JOKERS_PER_DECK: usize = 2;

/// Build `num_decks` complete decks in a fixed order.
///
/// Order is irrelevant to the game: every draw picks a uniformly random
/// card, so no shuffle happens here.
#[must_use]
pub fn make_decks(num_decks: usize) -> Vector<Card> {
    let mut cards = Vector::new();
    for _ in 0..num_decks {
        for rank in 1..=KING {
            for suit in Suit::ALL {
                cards.push_back(Card::new(rank, Some(suit)));
            }
        }
        for _ in 0..JOKERS_PER_DECK {
            cards.push_back(Card::new(JOKER, None));
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_deck() {
        let deck = make_decks(1);
        assert_eq!(deck.len(), CARDS_PER_DECK);
        assert_eq!(deck.iter().filter(|c| c.rank() == JOKER).count(), JOKERS_PER_DECK);
        assert_eq!(deck.iter().filter(|c| c.is_wild()).count(), 6);
        assert_eq!(deck.iter().filter(|c| c.rank() == 1).count(), 4);
    }

    #[test]
    fn test_multiple_decks() {
        assert_eq!(make_decks(3).len(), 3 * CARDS_PER_DECK);
        assert!(make_decks(0).is_empty());
    }
}
