//! Authoritative game state and its transition function.
//!
//! ## GameState
//!
//! Everything on the table, including every hand and the draw pile. A
//! `GameState` is never mutated after it is built: each transition clones
//! it (O(1) thanks to `im` persistent vectors) and edits the copy, so a
//! search frontier can hold many diverging positions at once.
//!
//! Transitions that draw cards (`play_from_hand` when the hand empties,
//! `end_turn`) take the game's `GameRng` explicitly.
//!
//! ## GameStateBuilder
//!
//! Deals a new game from a shuffled multi-deck pool. Any part of the layout
//! can be rigged first (hands, goal piles, discard and play piles); rigged
//! cards are taken out of the pool so the card total is always
//! `num_decks * 54`.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::Move;
use super::config::{ConfigError, GameConfig, MAX_PLAY_PILE, NUM_DISCARD_PILES, NUM_PLAY_PILES};
use super::error::{GameError, IllegalMove};
use super::observed::ObservedState;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{make_decks, Card};
use crate::rules::{is_valid_play, GameView};

/// Full game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,

    /// Face-down goal cards under each exposed goal card (top = back).
    goal_piles: PlayerMap<Vector<Card>>,

    /// Exposed goal card per player. `None` only for the winner.
    goal_cards: PlayerMap<Option<Card>>,

    /// Hands, kept sorted by rank so card order never matters.
    hands: PlayerMap<Vector<Card>>,

    /// Four private discard piles per player (top = back).
    discard_piles: PlayerMap<[Vector<Card>; NUM_DISCARD_PILES]>,

    /// Shared play piles, each an ascending run shorter than `MAX_PLAY_PILE`.
    play_piles: [Vector<Card>; NUM_PLAY_PILES],

    /// Undealt cards. Order is irrelevant: draws pick uniformly at random.
    draw_pile: Vector<Card>,

    current_player: PlayerId,

    winner: Option<PlayerId>,

    last_move: Option<Move>,

    /// Turn number (starts at 1).
    turn_number: u32,
}

impl GameState {
    /// Deal a new game.
    pub fn new(config: GameConfig, rng: &mut GameRng) -> Result<Self, ConfigError> {
        GameStateBuilder::new(config).build(rng)
    }

    // === Accessors ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.num_players
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    /// Face-down goal cards for a player, excluding the exposed one.
    #[must_use]
    pub fn goal_pile(&self, player: PlayerId) -> &Vector<Card> {
        &self.goal_piles[player]
    }

    /// Cards across every hand, pile and the draw pile.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let per_player: usize = PlayerId::all(self.player_count())
            .map(|p| {
                self.goal_piles[p].len()
                    + usize::from(self.goal_cards[p].is_some())
                    + self.hands[p].len()
                    + self.discard_piles[p].iter().map(Vector::len).sum::<usize>()
            })
            .sum();
        per_player + self.play_piles.iter().map(Vector::len).sum::<usize>() + self.draw_pile.len()
    }

    /// The current player's view of this state.
    #[must_use]
    pub fn observe(&self) -> ObservedState {
        ObservedState::new(self, self.current_player)
    }

    /// Any player's view of this state.
    #[must_use]
    pub fn observe_as(&self, viewer: PlayerId) -> ObservedState {
        ObservedState::new(self, viewer)
    }

    // === Transitions ===

    /// Apply any move.
    pub fn apply(&self, mv: &Move, rng: &mut GameRng) -> Result<Self, GameError> {
        match *mv {
            Move::PlayFromGoal { play_pile } => self.play_from_goal(play_pile),
            Move::PlayFromHand { card, play_pile } => self.play_from_hand(card, play_pile, rng),
            Move::PlayFromDiscard { discard_pile, play_pile } => {
                self.play_from_discard(discard_pile, play_pile)
            }
            Move::EndTurn { card, discard_pile } => self.end_turn(card, discard_pile, rng),
        }
    }

    /// Play a card from the current player's hand. An emptied hand is
    /// refilled immediately.
    pub fn play_from_hand(
        &self,
        card: Card,
        play_pile: usize,
        rng: &mut GameRng,
    ) -> Result<Self, GameError> {
        self.ensure_running()?;
        let player = self.current_player;
        let index = self.hands[player]
            .index_of(&card)
            .ok_or(IllegalMove::CardNotInHand(card))?;
        check_play(&self.play_piles, card, play_pile)?;

        let mut next = self.successor(Move::PlayFromHand { card, play_pile });
        let played = next.hands[player].remove(index);
        next.place_on_play_pile(play_pile, played);
        if next.hands[player].is_empty() {
            next.draw_up(player, rng);
        }
        Ok(next)
    }

    /// Play the top card of one of the current player's discard piles.
    pub fn play_from_discard(&self, discard_pile: usize, play_pile: usize) -> Result<Self, GameError> {
        self.ensure_running()?;
        let player = self.current_player;
        let card = self.discard_piles[player]
            .get(discard_pile)
            .ok_or(IllegalMove::PileOutOfRange(discard_pile))?
            .back()
            .copied()
            .ok_or(IllegalMove::EmptyDiscardPile(discard_pile))?;
        check_play(&self.play_piles, card, play_pile)?;

        let mut next = self.successor(Move::PlayFromDiscard { discard_pile, play_pile });
        next.discard_piles[player][discard_pile].pop_back();
        next.place_on_play_pile(play_pile, card);
        Ok(next)
    }

    /// Play the current player's exposed goal card. Playing the last one
    /// wins the game.
    pub fn play_from_goal(&self, play_pile: usize) -> Result<Self, GameError> {
        self.ensure_running()?;
        let player = self.current_player;
        let card = self.goal_cards[player].ok_or(IllegalMove::NoGoalCard)?;
        check_play(&self.play_piles, card, play_pile)?;

        let mut next = self.successor(Move::PlayFromGoal { play_pile });
        next.play_piles[play_pile].push_back(card);
        match next.goal_piles[player].pop_back() {
            Some(revealed) => {
                next.goal_cards[player] = Some(revealed);
                next.clear_if_full(play_pile);
            }
            None => {
                next.goal_cards[player] = None;
                next.winner = Some(player);
            }
        }
        Ok(next)
    }

    /// Discard a card and pass the turn. The next player draws up to a
    /// full hand.
    pub fn end_turn(&self, card: Card, discard_pile: usize, rng: &mut GameRng) -> Result<Self, GameError> {
        self.ensure_running()?;
        let player = self.current_player;
        let index = self.hands[player]
            .index_of(&card)
            .ok_or(IllegalMove::CardNotInHand(card))?;
        if discard_pile >= NUM_DISCARD_PILES {
            return Err(IllegalMove::PileOutOfRange(discard_pile).into());
        }

        let mut next = self.successor(Move::EndTurn { card, discard_pile });
        let discarded = next.hands[player].remove(index);
        next.discard_piles[player][discard_pile].push_back(discarded);
        next.current_player = player.next(self.player_count());
        next.turn_number += 1;
        next.draw_up(next.current_player, rng);
        Ok(next)
    }

    // === Helpers ===

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.winner {
            Some(winner) => Err(GameError::GameOver { winner }),
            None => Ok(()),
        }
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

    /// A completed play pile goes back into the draw pile in the same
    /// transition that completed it.
    fn clear_if_full(&mut self, play_pile: usize) {
        if self.play_piles[play_pile].len() >= MAX_PLAY_PILE {
            let full = std::mem::take(&mut self.play_piles[play_pile]);
            self.draw_pile.append(full);
        }
    }

    /// Draw random cards until the hand is full or the draw pile is empty.
    fn draw_up(&mut self, player: PlayerId, rng: &mut GameRng) {
        while self.hands[player].len() < self.config.hand_size && !self.draw_pile.is_empty() {
            let card = self.draw_pile.remove(rng.gen_index(self.draw_pile.len()));
            self.hands[player].insert_ord(card);
        }
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

impl GameView for GameState {
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
        Some(&self.hands[player])
    }

    fn goal_card(&self, player: PlayerId) -> Option<Card> {
        self.goal_cards[player]
    }

    fn goal_remaining(&self, player: PlayerId) -> usize {
        self.goal_piles[player].len()
    }

    fn discard_piles(&self, player: PlayerId) -> &[Vector<Card>; NUM_DISCARD_PILES] {
        &self.discard_piles[player]
    }

    fn play_piles(&self) -> &[Vector<Card>; NUM_PLAY_PILES] {
        &self.play_piles
    }
}

/// Deals a game, optionally from a rigged layout.
///
/// ```
/// use goalpile::cards::Card;
/// use goalpile::core::{GameConfig, GameRng, GameStateBuilder, PlayerId};
/// use goalpile::rules::GameView;
///
/// let mut rng = GameRng::new(1);
/// let state = GameStateBuilder::new(GameConfig::default())
///     .hand(PlayerId(0), [1, 2, 3, 9].map(Card::of_rank))
///     .goal_pile(PlayerId(0), [Card::of_rank(3)])
///     .build(&mut rng)
///     .unwrap();
///
/// assert_eq!(state.goal_card(PlayerId(0)), Some(Card::of_rank(3)));
/// assert_eq!(state.total_cards(), 108);
/// ```
#[derive(Clone, Debug)]
pub struct GameStateBuilder {
    config: GameConfig,
    goal_piles: FxHashMap<PlayerId, Vec<Card>>,
    hands: FxHashMap<PlayerId, Vec<Card>>,
    discard_piles: FxHashMap<(PlayerId, usize), Vec<Card>>,
    play_piles: FxHashMap<usize, Vec<Card>>,
    current_player: PlayerId,
}

impl GameStateBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            goal_piles: FxHashMap::default(),
            hands: FxHashMap::default(),
            discard_piles: FxHashMap::default(),
            play_piles: FxHashMap::default(),
            current_player: PlayerId::new(0),
        }
    }

    /// Rig a goal pile, bottom first. The last card is the exposed goal card.
    pub fn goal_pile(mut self, player: PlayerId, cards: impl IntoIterator<Item = Card>) -> Self {
        self.goal_piles.insert(player, cards.into_iter().collect());
        self
    }

    /// Rig a hand. Any size is accepted.
    pub fn hand(mut self, player: PlayerId, cards: impl IntoIterator<Item = Card>) -> Self {
        self.hands.insert(player, cards.into_iter().collect());
        self
    }

    /// Rig a discard pile, bottom first.
    pub fn discard_pile(
        mut self,
        player: PlayerId,
        pile: usize,
        cards: impl IntoIterator<Item = Card>,
    ) -> Self {
        self.discard_piles.insert((player, pile), cards.into_iter().collect());
        self
    }

    /// Rig a play pile, bottom first. It must be a valid ascending run.
    pub fn play_pile(mut self, pile: usize, cards: impl IntoIterator<Item = Card>) -> Self {
        self.play_piles.insert(pile, cards.into_iter().collect());
        self
    }

    /// Seat to move first.
    pub fn current_player(mut self, player: PlayerId) -> Self {
        self.current_player = player;
        self
    }

    /// Validate, take rigged cards out of the pool, then deal the rest.
    pub fn build(self, rng: &mut GameRng) -> Result<GameState, ConfigError> {
        let config = self.config;
        config.validate()?;
        let player_count = config.num_players;

        let seats = self
            .goal_piles
            .keys()
            .chain(self.hands.keys())
            .chain(self.discard_piles.keys().map(|(p, _)| p))
            .chain(std::iter::once(&self.current_player));
        for &player in seats {
            if player.index() >= player_count {
                return Err(ConfigError::PlayerOutOfRange(player));
            }
        }
        if let Some(&(_, pile)) = self.discard_piles.keys().find(|(_, i)| *i >= NUM_DISCARD_PILES) {
            return Err(ConfigError::PileOutOfRange(pile));
        }
        for (&pile, cards) in &self.play_piles {
            if pile >= NUM_PLAY_PILES {
                return Err(ConfigError::PileOutOfRange(pile));
            }
            let ascending = cards.iter().enumerate().all(|(i, &c)| is_valid_play(c, i));
            if cards.len() >= MAX_PLAY_PILE || !ascending {
                return Err(ConfigError::InvalidPlayPile(pile));
            }
        }
        if let Some((&player, _)) = self.goal_piles.iter().find(|(_, cards)| cards.is_empty()) {
            return Err(ConfigError::EmptyGoalPile(player));
        }

        let mut pool: Vec<Card> = make_decks(config.num_decks).into_iter().collect();
        let rigged = self
            .play_piles
            .values()
            .chain(self.discard_piles.values())
            .chain(self.goal_piles.values())
            .chain(self.hands.values());
        for cards in rigged {
            for &card in cards {
                take_from_pool(&mut pool, card)?;
            }
        }
        rng.shuffle(&mut pool);

        let mut goal_piles = PlayerMap::new(player_count, |_| Vector::new());
        let mut goal_cards = PlayerMap::with_value(player_count, None);
        for player in PlayerId::all(player_count) {
            let mut pile: Vector<Card> = match self.goal_piles.get(&player) {
                Some(cards) => cards.iter().copied().collect(),
                None => deal(&mut pool, config.goal_size, &config)?,
            };
            goal_cards[player] = pile.pop_back();
            goal_piles[player] = pile;
        }

        let mut hands = PlayerMap::new(player_count, |_| Vector::new());
        for player in PlayerId::all(player_count) {
            let mut cards: Vec<Card> = match self.hands.get(&player) {
                Some(cards) => cards.clone(),
                None => deal(&mut pool, config.hand_size, &config)?.into_iter().collect(),
            };
            cards.sort();
            hands[player] = cards.into_iter().collect();
        }

        let discard_piles = PlayerMap::new(player_count, |player| {
            std::array::from_fn(|pile| {
                self.discard_piles
                    .get(&(player, pile))
                    .map(|cards| cards.iter().copied().collect())
                    .unwrap_or_default()
            })
        });
        let play_piles = std::array::from_fn(|pile| {
            self.play_piles
                .get(&pile)
                .map(|cards| cards.iter().copied().collect())
                .unwrap_or_default()
        });

        Ok(GameState {
            config,
            goal_piles,
            goal_cards,
            hands,
            discard_piles,
            play_piles,
            draw_pile: pool.into_iter().collect(),
            current_player: self.current_player,
            winner: None,
            last_move: None,
            turn_number: 1,
        })
    }
}

fn take_from_pool(pool: &mut Vec<Card>, card: Card) -> Result<(), ConfigError> {
    let index = pool
        .iter()
        .position(|&c| c == card && (card.suit().is_none() || c.suit() == card.suit()))
        .or_else(|| pool.iter().position(|&c| c == card))
        .ok_or(ConfigError::CardUnavailable(card))?;
    pool.swap_remove(index);
    Ok(())
}

fn deal(pool: &mut Vec<Card>, count: usize, config: &GameConfig) -> Result<Vector<Card>, ConfigError> {
    if pool.len() < count {
        return Err(ConfigError::TooFewCards {
            available: config.total_cards(),
            required: config.required_cards(),
        });
    }
    Ok(pool.split_off(pool.len() - count).into_iter().collect())
}
