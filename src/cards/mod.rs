//! Card values and deck construction.
//!
//! A `Card` is an immutable value. Cards carry no identity: duplicates from
//! different decks are interchangeable, and the rules only ever look at rank.

pub mod card;
pub mod deck;

pub use card::{Card, Suit, ACE, JACK, JOKER, KING, QUEEN};
pub use deck::{make_decks, CARDS_PER_DECK, JOKERS_PER_DECK};
