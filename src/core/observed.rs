//! One player's view of the table.
//!
//! An `ObservedState` holds everything public (goal cards, pile sizes,
//! discard and play piles, hand sizes) plus the viewer's own hand, and never
//! anything else. It supports the same four moves as `GameState`, but its
//! transitions never draw: a card the viewer would not get to see becomes
//! unknown instead.
//!
//! - an emptied hand is refilled out of sight: the hand becomes unknown and
//!   only its size is tracked
//! - a goal play that reveals the next goal card leaves the goal card
//!   unknown, so a second goal play fails with `UnknownInformation`
//! - `end_turn` adjusts the next player's hand size and the draw pile size
//!
//! This is the state the search engine expands, so equality and hashing
//! cover every observable field. `last_move` is path metadata and is
//! excluded.

use std::hash::{Hash, Hasher};

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::Move;
use super::config::{GameConfig, MAX_PLAY_PILE, NUM_DISCARD_PILES, NUM_PLAY_PILES};
use super::error::{GameError, IllegalMove};
use super::player::{PlayerId, PlayerMap};
use super::state::GameState;
use crate::cards::Card;
use crate::rules::{is_valid_play, GameView, SearchState};

/// Partial-information state for a single viewer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObservedState {
    config: GameConfig,
    viewer: PlayerId,
    current_player: PlayerId,
    winner: Option<PlayerId>,
    last_move: Option<Move>,

    /// The viewer's hand. `None` after an unseen refill.
    hand: Option<Vector<Card>>,

    /// Every player's hand size (public).
    hand_sizes: PlayerMap<usize>,

    /// Exposed goal cards. `None` for a winner or an unrevealed card.
    goal_cards: PlayerMap<Option<Card>>,

    /// Face-down goal cards under each exposed one.
    goal_remaining: PlayerMap<usize>,

    discard_piles: PlayerMap<[Vector<Card>; NUM_DISCARD_PILES]>,
    play_piles: [Vector<Card>; NUM_PLAY_PILES],
    draw_pile_size: usize,
}

impl ObservedState {
    /// Project a full state onto what `viewer` can see.
    #[must_use]
    pub fn new(state: &GameState, viewer: PlayerId) -> Self {
        let player_count = state.player_count();
        Self {
            config: *state.config(),
            viewer,
            current_player: state.current_player(),
            winner: state.winner(),
            last_move: state.last_move().copied(),
            hand: state.hand(viewer).cloned(),
            hand_sizes: PlayerMap::new(player_count, |p| state.hand(p).map_or(0, Vector::len)),
            goal_cards: PlayerMap::new(player_count, |p| state.goal_card(p)),
            goal_remaining: PlayerMap::new(player_count, |p| state.goal_remaining(p)),
            discard_piles: PlayerMap::new(player_count, |p| state.discard_piles(p).clone()),
            play_piles: state.play_piles().clone(),
            draw_pile_size: state.draw_pile().len(),
        }
    }

    /// The view `player` would have if it were their turn holding `hand`.
    ///
    /// Used to ask what an opponent could do with cards we grant them, e.g.
    /// "could they reach their goal card holding two wilds".
    #[must_use]
    pub fn hypothetical(&self, player: PlayerId, hand: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = hand.into_iter().collect();
        cards.sort();
        let mut view = self.clone();
        view.viewer = player;
        view.current_player = player;
        view.last_move = None;
        view.hand_sizes[player] = cards.len();
        view.hand = Some(cards.into_iter().collect());
        view
    }

    #[must_use]
    pub fn viewer(&self) -> PlayerId {
        self.viewer
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.num_players
    }

    /// A player's hand size. Public for every seat.
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.hand_sizes[player]
    }

    #[must_use]
    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile_size
    }

    /// Whether it is the viewer's turn in a running game.
    #[must_use]
    pub fn is_viewer_turn(&self) -> bool {
        self.winner.is_none() && self.viewer == self.current_player
    }

    // === Transitions ===

    pub fn play_from_hand(&self, card: Card, play_pile: usize) -> Result<Self, GameError> {
        self.ensure_can_move()?;
        let hand = self.known_hand()?;
        let index = hand.index_of(&card).ok_or(IllegalMove::CardNotInHand(card))?;
        check_play(&self.play_piles, card, play_pile)?;

        let mut next = self.successor(Move::PlayFromHand { card, play_pile });
        let viewer = self.viewer;
        let mut hand = hand.clone();
        let played = hand.remove(index);
        next.hand_sizes[viewer] = hand.len();
        next.hand = Some(hand);
        next.place_on_play_pile(play_pile, played);

        if next.hand_sizes[viewer] == 0 {
            let drawn = next.draw_unseen(viewer);
            if drawn > 0 {
                next.hand = None;
            }
        }
        Ok(next)
    }

    pub fn play_from_discard(&self, discard_pile: usize, play_pile: usize) -> Result<Self, GameError> {
        self.ensure_can_move()?;
        let viewer = self.viewer;
        let card = self.discard_piles[viewer]
            .get(discard_pile)
            .ok_or(IllegalMove::PileOutOfRange(discard_pile))?
            .back()
            .copied()
            .ok_or(IllegalMove::EmptyDiscardPile(discard_pile))?;
        check_play(&self.play_piles, card, play_pile)?;

        let mut next = self.successor(Move::PlayFromDiscard { discard_pile, play_pile });
        next.discard_piles[viewer][discard_pile].pop_back();
        next.place_on_play_pile(play_pile, card);
        Ok(next)
    }

    pub fn play_from_goal(&self, play_pile: usize) -> Result<Self, GameError> {
        self.ensure_can_move()?;
        let viewer = self.viewer;
        let card = self.goal_cards[viewer]
            .ok_or(GameError::UnknownInformation("the next goal card has not been revealed"))?;
        check_play(&self.play_piles, card, play_pile)?;

        let mut next = self.successor(Move::PlayFromGoal { play_pile });
        next.play_piles[play_pile].push_back(card);
        next.goal_cards[viewer] = None;
        if self.goal_remaining[viewer] > 0 {
            next.goal_remaining[viewer] -= 1;
            next.clear_if_full(play_pile);
        } else {
            next.winner = Some(viewer);
        }
        Ok(next)
    }

    pub fn end_turn(&self, card: Card, discard_pile: usize) -> Result<Self, GameError> {
        self.ensure_can_move()?;
        let hand = self.known_hand()?;
        let index = hand.index_of(&card).ok_or(IllegalMove::CardNotInHand(card))?;
        if discard_pile >= NUM_DISCARD_PILES {
            return Err(IllegalMove::PileOutOfRange(discard_pile).into());
        }

        let mut next = self.successor(Move::EndTurn { card, discard_pile });
        let viewer = self.viewer;
        let mut hand = hand.clone();
        let discarded = hand.remove(index);
        next.hand_sizes[viewer] = hand.len();
        next.hand = Some(hand);
        next.discard_piles[viewer][discard_pile].push_back(discarded);
        next.current_player = viewer.next(self.player_count());
        next.draw_unseen(next.current_player);
        Ok(next)
    }

    // === Helpers ===

    fn ensure_can_move(&self) -> Result<(), GameError> {
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }
        if self.viewer != self.current_player {
            return Err(GameError::NotYourTurn {
                viewer: self.viewer,
                current: self.current_player,
            });
        }
        Ok(())
    }

    fn known_hand(&self) -> Result<&Vector<Card>, GameError> {
        self.hand
            .as_ref()
            .ok_or(GameError::UnknownInformation("the hand was refilled out of sight"))
    }

    fn successor(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.last_move = Some(mv);
        next
    }

    fn place_on_play_pile(&mut self, play_pile: usize, card: Card) {
        self.play_piles[play_pile].push_back(card);
        self.clear_if_full(play_pile);
    }

    fn clear_if_full(&mut self, play_pile: usize) {
        let len = self.play_piles[play_pile].len();
        if len >= MAX_PLAY_PILE {
            self.play_piles[play_pile].clear();
            self.draw_pile_size += len;
        }
    }

    /// Draw up a hand without seeing the cards. Returns how many were drawn.
    fn draw_unseen(&mut self, player: PlayerId) -> usize {
        let needed = self.config.hand_size.saturating_sub(self.hand_sizes[player]);
        let drawn = needed.min(self.draw_pile_size);
        self.hand_sizes[player] += drawn;
        self.draw_pile_size -= drawn;
        drawn
    }

    #[allow(clippy::type_complexity)]
    fn identity(
        &self,
    ) -> (
        &GameConfig,
        PlayerId,
        PlayerId,
        Option<PlayerId>,
        &Option<Vector<Card>>,
        &PlayerMap<usize>,
        &PlayerMap<Option<Card>>,
        &PlayerMap<usize>,
        &PlayerMap<[Vector<Card>; NUM_DISCARD_PILES]>,
        &[Vector<Card>; NUM_PLAY_PILES],
        usize,
    ) {
        (
            &self.config,
            self.viewer,
            self.current_player,
            self.winner,
            &self.hand,
            &self.hand_sizes,
            &self.goal_cards,
            &self.goal_remaining,
            &self.discard_piles,
            &self.play_piles,
            self.draw_pile_size,
        )
    }
}

fn check_play(
    piles: &[Vector<Card>; NUM_PLAY_PILES],
    card: Card,
    play_pile: usize,
) -> Result<(), IllegalMove> {
    let pile = piles.get(play_pile).ok_or(IllegalMove::PileOutOfRange(play_pile))?;
    if is_valid_play(card, pile.len()) {
        Ok(())
    } else {
        Err(IllegalMove::InvalidPlay { card, play_pile })
    }
}

impl PartialEq for ObservedState {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ObservedState {}

impl Hash for ObservedState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl GameView for ObservedState {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn current_player(&self) -> PlayerId {
        self.current_player
    }

    fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    fn hand(&self, player: PlayerId) -> Option<&Vector<Card>> {
        if player == self.viewer {
            self.hand.as_ref()
        } else {
            None
        }
    }

    fn goal_card(&self, player: PlayerId) -> Option<Card> {
        self.goal_cards[player]
    }

    fn goal_remaining(&self, player: PlayerId) -> usize {
        self.goal_remaining[player]
    }

    fn can_move(&self) -> bool {
        self.is_viewer_turn()
    }

    fn discard_piles(&self, player: PlayerId) -> &[Vector<Card>; NUM_DISCARD_PILES] {
        &self.discard_piles[player]
    }

    fn play_piles(&self) -> &[Vector<Card>; NUM_PLAY_PILES] {
        &self.play_piles
    }
}

impl SearchState for ObservedState {
    fn viewer(&self) -> PlayerId {
        self.viewer
    }

    fn apply_move(&self, mv: &Move) -> Result<Self, GameError> {
        match *mv {
            Move::PlayFromGoal { play_pile } => self.play_from_goal(play_pile),
            Move::PlayFromHand { card, play_pile } => self.play_from_hand(card, play_pile),
            Move::PlayFromDiscard { discard_pile, play_pile } => {
                self.play_from_discard(discard_pile, play_pile)
            }
            Move::EndTurn { card, discard_pile } => self.end_turn(card, discard_pile),
        }
    }
}
