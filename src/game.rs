use crate::cards::Card;
use crate::config::{GameConfig, WinnerPick, DECK_SIZE, HAND_SIZE, REFILL_THRESHOLD, SLOT_COUNT};
use crate::deck::Deck;
use crate::scoring::{
    battle_score, battle_winner, card_value, final_outcome, BattleScore, MatchOutcome,
};
use crate::side::{PlayerSide, Seat};
use crate::snapshot::{SideView, Snapshot};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;

/// Round state machine. Every action matches on the current phase and is
/// rejected unless the phase allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// Both sides fill their three slots from hand.
    Placing,
    /// Alternating reveals and swaps, Player 1 first.
    RevealSwap,
    /// All six slots revealed; the winner picks one card for their stack.
    BattleResolved { winner: Seat },
    /// Equal battle scores; each side picks one of its own played cards.
    DrawTiebreak { picks: [Option<Card>; 2] },
    /// The deck can no longer refill both hands.
    GameEnded { outcome: MatchOutcome },
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Placing => "placing",
            Phase::RevealSwap => "reveal/swap",
            Phase::BattleResolved { .. } => "winner selection",
            Phase::DrawTiebreak { .. } => "tiebreak",
            Phase::GameEnded { .. } => "game over",
        }
    }
}

/// Battle scores of the round in progress, available once all slots are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleResult {
    pub scores: [BattleScore; 2],
    /// `None` when the scores tie.
    pub winner: Option<Seat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    Place,
    Reveal,
    Swap,
    Take,
    TiebreakPick,
    RoundWin,
    RoundDraw,
    TiebreakWin,
    TiebreakSplit,
    GameOver,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::Place => "Place",
            HistoryVerb::Reveal => "Reveal",
            HistoryVerb::Swap => "Swap",
            HistoryVerb::Take => "Take",
            HistoryVerb::TiebreakPick => "Tiebreak pick",
            HistoryVerb::RoundWin => "Wins battle",
            HistoryVerb::RoundDraw => "Battle drawn",
            HistoryVerb::TiebreakWin => "Wins tiebreak",
            HistoryVerb::TiebreakSplit => "Tiebreak split",
            HistoryVerb::GameOver => "Game over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub round: u32,
    pub seat: Option<Seat>,
    pub verb: HistoryVerb,
    /// Face-down placements and swaps are recorded without the card.
    pub card: Option<Card>,
}

/// Reasons an action is rejected. A rejected action leaves the game untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: &'static str },
    #[error("not your turn: {0} must act next")]
    NotYourTurn(Seat),
    #[error("Player 1 must reveal the first card")]
    FirstRevealByPlayerOne,
    #[error("a card must be revealed before swapping")]
    NoRevealYet,
    #[error("slot {} is already revealed", .0 + 1)]
    AlreadyRevealed(usize),
    #[error("all slots are already filled")]
    SlotsFull,
    #[error("all six slots must be filled first")]
    SlotsIncomplete,
    #[error("no slot {}", .0 + 1)]
    InvalidSlot(usize),
    #[error("no card at hand position {}", .0 + 1)]
    NoCardAtIndex(usize),
    #[error("Dragon cards cannot be selected; they are shuffled back into the deck")]
    DragonNotSelectable,
    #[error("only {0} may select a card this round")]
    NotRoundWinner(Seat),
    #[error("{0} is not one of your played cards")]
    NotOwnCard(Card),
    #[error("{0} is not on the table")]
    CardNotInPlay(Card),
}

impl ActionError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::WrongPhase { .. } => "wrong_phase",
            ActionError::NotYourTurn(_) => "not_your_turn",
            ActionError::FirstRevealByPlayerOne => "first_reveal_by_player_one",
            ActionError::NoRevealYet => "no_reveal_yet",
            ActionError::AlreadyRevealed(_) => "already_revealed",
            ActionError::SlotsFull => "slots_full",
            ActionError::SlotsIncomplete => "slots_incomplete",
            ActionError::InvalidSlot(_) => "invalid_slot",
            ActionError::NoCardAtIndex(_) => "no_card_at_index",
            ActionError::DragonNotSelectable => "dragon_not_selectable",
            ActionError::NotRoundWinner(_) => "not_round_winner",
            ActionError::NotOwnCard(_) => "not_own_card",
            ActionError::CardNotInPlay(_) => "card_not_in_play",
        }
    }
}

/// Whose reveal-or-swap it is, given the phase and the last revealer.
pub(crate) fn reveal_turn_for(phase: Phase, last_revealer: Option<Seat>) -> Option<Seat> {
    match phase {
        Phase::RevealSwap => Some(last_revealer.map(Seat::other).unwrap_or(Seat::One)),
        _ => None,
    }
}

/// The round-resolution engine. Owns the deck, both sides and the phase.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: GameConfig,
    rng: ChaCha8Rng,
    pub(crate) deck: Deck,
    pub(crate) sides: [PlayerSide; 2],
    pub(crate) phase: Phase,
    pub(crate) last_revealer: Option<Seat>,
    pub(crate) round: u32,
    pub(crate) battle: Option<BattleResult>,
    message: String,
    history: Vec<HistoryEntry>,
}

impl Game {
    /// Start a game from a freshly shuffled 54-card set.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = Self::rng_for(config);
        let mut deck = Deck::canonical();
        deck.shuffle_with(&mut rng);
        Self::from_parts(config, rng, deck)
    }

    /// Start a game dealing from `deck` as given: Player 1 receives the first
    /// nine cards, Player 2 the next nine. `deck` should be a full game set,
    /// e.g. from [`Deck::stacked`].
    pub fn with_deck(config: GameConfig, deck: Deck) -> Self {
        Self::from_parts(config, Self::rng_for(config), deck)
    }

    fn rng_for(config: GameConfig) -> ChaCha8Rng {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn from_parts(config: GameConfig, rng: ChaCha8Rng, deck: Deck) -> Self {
        let mut game = Self {
            config,
            rng,
            deck: Deck::canonical(),
            sides: [PlayerSide::default(), PlayerSide::default()],
            phase: Phase::Placing,
            last_revealer: None,
            round: 1,
            battle: None,
            message: String::new(),
            history: Vec::new(),
        };
        game.deal(deck);
        game
    }

    fn deal(&mut self, mut deck: Deck) {
        let one = deck.draw_n(HAND_SIZE);
        let two = deck.draw_n(HAND_SIZE);
        self.sides = [PlayerSide::with_hand(one), PlayerSide::with_hand(two)];
        self.deck = deck;
        self.phase = Phase::Placing;
        self.last_revealer = None;
        self.round = 1;
        self.battle = None;
        self.history.clear();
        self.message = "New game started. Place 3 cards to begin the round.".to_string();
        debug!("dealt new game, {} cards left in deck", self.deck.len());
    }

    /// Discard everything and deal a new game. Legal in every phase.
    pub fn reset_game(&mut self) {
        let mut deck = Deck::canonical();
        deck.shuffle_with(&mut self.rng);
        self.deal(deck);
    }

    /// Returns the configuration the game was created with
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current round number, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns the latest status message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns one side's state
    pub fn side(&self, seat: Seat) -> &PlayerSide {
        &self.sides[seat.index()]
    }

    /// Returns the draw pile
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the side that made the most recent reveal this round
    pub fn last_revealer(&self) -> Option<Seat> {
        self.last_revealer
    }

    /// Returns the battle scores once every slot is revealed
    pub fn battle(&self) -> Option<BattleResult> {
        self.battle
    }

    /// Side whose reveal-or-swap is next, while in [`Phase::RevealSwap`].
    pub fn reveal_turn(&self) -> Option<Seat> {
        reveal_turn_for(self.phase, self.last_revealer)
    }

    /// Every card the engine currently owns: deck, hands, slots and stacks.
    pub fn census(&self) -> Vec<Card> {
        let mut all = Vec::with_capacity(DECK_SIZE);
        all.extend_from_slice(self.deck.cards());
        for side in &self.sides {
            all.extend_from_slice(&side.hand);
            all.extend(side.slots.iter().flatten());
            all.extend_from_slice(&side.stack);
        }
        all
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            sides: [SideView::from(&self.sides[0]), SideView::from(&self.sides[1])],
            deck_len: self.deck.len(),
            message: self.message.clone(),
            last_revealer: self.last_revealer,
            battle: self.battle,
            winner_pick: self.config.winner_pick,
        }
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        let start = len.saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        if n == 0 || self.history.is_empty() {
            return Vec::new();
        }
        let len = self.history.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn reject(&self, err: ActionError) -> Result<(), ActionError> {
        debug!("rejected [{}] in {}: {err}", err.code(), self.phase.label());
        Err(err)
    }

    fn record(&mut self, seat: Option<Seat>, verb: HistoryVerb, card: Option<Card>) {
        self.history.push(HistoryEntry { round: self.round, seat, verb, card });
    }

    /// Move the card at `hand_index` into the side's first empty slot.
    ///
    /// Legal while placing, and during reveal/swap for a side that has just
    /// swapped a slot empty.
    pub fn play_card(&mut self, seat: Seat, hand_index: usize) -> Result<(), ActionError> {
        if !matches!(self.phase, Phase::Placing | Phase::RevealSwap) {
            return self.reject(ActionError::WrongPhase {
                action: "playing a card",
                phase: self.phase.label(),
            });
        }
        let side = &self.sides[seat.index()];
        let Some(slot) = side.first_empty_slot() else {
            return self.reject(ActionError::SlotsFull);
        };
        if hand_index >= side.hand.len() {
            return self.reject(ActionError::NoCardAtIndex(hand_index));
        }

        let side = &mut self.sides[seat.index()];
        let card = side.hand.remove(hand_index);
        side.slots[slot] = Some(card);
        side.face_down[slot] = true;
        self.record(Some(seat), HistoryVerb::Place, None);
        debug!("{seat} placed {card} in slot {slot}");

        let all_placed = self.sides.iter().all(PlayerSide::slots_full);
        self.message = match (self.phase, all_placed) {
            (Phase::Placing, true) => {
                self.phase = Phase::RevealSwap;
                "All 6 cards placed. Player 1, reveal a card to start.".to_string()
            }
            (Phase::RevealSwap, true) => {
                let next = self.reveal_turn().unwrap_or(Seat::One);
                format!("{seat} placed a new card. {next}'s turn to reveal or swap.")
            }
            _ => format!("{seat} placed a card in slot {}.", slot + 1),
        };
        Ok(())
    }

    /// Shared preconditions of reveal and swap.
    fn ensure_reveal_swap(&self, action: &'static str, slot: usize) -> Result<(), ActionError> {
        if self.phase != Phase::RevealSwap {
            return self.reject(ActionError::WrongPhase { action, phase: self.phase.label() });
        }
        if slot >= SLOT_COUNT {
            return self.reject(ActionError::InvalidSlot(slot));
        }
        if !self.sides.iter().all(PlayerSide::slots_full) {
            return self.reject(ActionError::SlotsIncomplete);
        }
        Ok(())
    }

    /// Turn a face-down slot face-up. Player 1 reveals first; afterwards the
    /// side that revealed last must wait for the other side.
    pub fn reveal(&mut self, seat: Seat, slot: usize) -> Result<(), ActionError> {
        self.ensure_reveal_swap("revealing a card", slot)?;
        match self.last_revealer {
            None if seat == Seat::Two => return self.reject(ActionError::FirstRevealByPlayerOne),
            Some(last) if last == seat => {
                return self.reject(ActionError::NotYourTurn(seat.other()));
            }
            _ => {}
        }
        if !self.sides[seat.index()].face_down[slot] {
            return self.reject(ActionError::AlreadyRevealed(slot));
        }

        let side = &mut self.sides[seat.index()];
        side.face_down[slot] = false;
        let card = side.slots[slot];
        self.last_revealer = Some(seat);
        self.record(Some(seat), HistoryVerb::Reveal, card);
        debug!("{seat} revealed slot {slot}");

        if self.sides.iter().all(PlayerSide::all_revealed) {
            self.resolve_battle();
        } else {
            self.message = format!("Card revealed. {}'s turn to reveal or swap.", seat.other());
        }
        Ok(())
    }

    /// Return a still face-down slot card to hand, leaving the slot empty.
    pub fn swap(&mut self, seat: Seat, slot: usize) -> Result<(), ActionError> {
        self.ensure_reveal_swap("swapping a card", slot)?;
        match self.last_revealer {
            None => return self.reject(ActionError::NoRevealYet),
            Some(last) if last == seat => {
                return self.reject(ActionError::NotYourTurn(seat.other()));
            }
            _ => {}
        }
        if !self.sides[seat.index()].face_down[slot] {
            return self.reject(ActionError::AlreadyRevealed(slot));
        }

        let side = &mut self.sides[seat.index()];
        if let Some(card) = side.slots[slot].take() {
            side.hand.push(card);
        }
        side.swaps += 1;
        self.record(Some(seat), HistoryVerb::Swap, None);
        debug!("{seat} swapped slot {slot} back to hand");
        self.message = format!("{seat} swapped a card back to hand. Choose a new card.");
        Ok(())
    }

    fn resolve_battle(&mut self) {
        let scores = [battle_score(&self.sides[0].slots), battle_score(&self.sides[1].slots)];
        let winner = battle_winner(scores[0], scores[1]);
        self.battle = Some(BattleResult { scores, winner });
        let (one, two) = (scores[0].total(), scores[1].total());
        match winner {
            Some(w) => {
                self.phase = Phase::BattleResolved { winner: w };
                self.record(Some(w), HistoryVerb::RoundWin, None);
                self.message = format!(
                    "All cards revealed ({one} to {two}). {w} wins the battle and selects a card."
                );
                info!("round {} battle: {one} to {two}, {w} wins", self.round);
            }
            None => {
                self.phase = Phase::DrawTiebreak { picks: [None, None] };
                self.record(None, HistoryVerb::RoundDraw, None);
                self.message = format!(
                    "Draw at {one}! Both players must select one card to break the tie."
                );
                info!("round {} battle drawn at {one}", self.round);
            }
        }
    }

    /// The round winner moves one non-Dragon played card into their stack.
    /// Everything else on the table returns to the deck.
    pub fn select_winning_card(&mut self, seat: Seat, card: Card) -> Result<(), ActionError> {
        let Phase::BattleResolved { winner } = self.phase else {
            return self.reject(ActionError::WrongPhase {
                action: "selecting a winning card",
                phase: self.phase.label(),
            });
        };
        if seat != winner {
            return self.reject(ActionError::NotRoundWinner(winner));
        }
        if card.is_dragon() {
            return self.reject(ActionError::DragonNotSelectable);
        }
        let owner = Seat::ALL.into_iter().find(|s| self.sides[s.index()].slot_of(card).is_some());
        let Some(owner) = owner else {
            return self.reject(ActionError::CardNotInPlay(card));
        };
        if self.config.winner_pick == WinnerPick::OwnSlots && owner != seat {
            return self.reject(ActionError::NotOwnCard(card));
        }

        self.take_from_slot(owner, card);
        self.sides[seat.index()].stack.push(card);
        self.record(Some(seat), HistoryVerb::Take, Some(card));
        info!("round {}: {seat} takes {card}", self.round);
        self.finish_round(format!("{seat} takes {card}."));
        Ok(())
    }

    /// Each side nominates one of its own non-Dragon played cards; once both
    /// have, the higher value takes both cards.
    pub fn select_tiebreak_card(&mut self, seat: Seat, card: Card) -> Result<(), ActionError> {
        let Phase::DrawTiebreak { mut picks } = self.phase else {
            return self.reject(ActionError::WrongPhase {
                action: "selecting a tiebreak card",
                phase: self.phase.label(),
            });
        };
        if card.is_dragon() {
            return self.reject(ActionError::DragonNotSelectable);
        }
        if self.sides[seat.index()].slot_of(card).is_none() {
            if self.sides[seat.other().index()].slot_of(card).is_some() {
                return self.reject(ActionError::NotOwnCard(card));
            }
            return self.reject(ActionError::CardNotInPlay(card));
        }

        picks[seat.index()] = Some(card);
        self.record(Some(seat), HistoryVerb::TiebreakPick, None);
        debug!("{seat} picked a tiebreak card");
        if let [Some(one), Some(two)] = picks {
            self.resolve_tiebreak(one, two);
        } else {
            self.phase = Phase::DrawTiebreak { picks };
            self.message =
                format!("{seat} selected a tiebreak card. {}, select yours!", seat.other());
        }
        Ok(())
    }

    fn resolve_tiebreak(&mut self, one: Card, two: Card) {
        self.take_from_slot(Seat::One, one);
        self.take_from_slot(Seat::Two, two);
        let lead = match card_value(one).cmp(&card_value(two)) {
            Ordering::Greater => {
                self.sides[Seat::One.index()].stack.extend([one, two]);
                self.record(Some(Seat::One), HistoryVerb::TiebreakWin, Some(one));
                format!("{} wins the tiebreak, {one} over {two}.", Seat::One)
            }
            Ordering::Less => {
                self.sides[Seat::Two.index()].stack.extend([one, two]);
                self.record(Some(Seat::Two), HistoryVerb::TiebreakWin, Some(two));
                format!("{} wins the tiebreak, {two} over {one}.", Seat::Two)
            }
            Ordering::Equal => {
                self.sides[Seat::One.index()].stack.push(one);
                self.sides[Seat::Two.index()].stack.push(two);
                self.record(None, HistoryVerb::TiebreakSplit, None);
                "Full draw! Both players keep their own card.".to_string()
            }
        };
        info!("round {} tiebreak: {one} vs {two}", self.round);
        self.finish_round(lead);
    }

    fn take_from_slot(&mut self, seat: Seat, card: Card) {
        let side = &mut self.sides[seat.index()];
        if let Some(i) = side.slot_of(card) {
            side.slots[i] = None;
        }
    }

    /// Round reset: leftover played cards (Dragons included) go back into the
    /// deck, then hands refill to nine, Player 1 first. Ends the game instead
    /// when the deck cannot refill both hands.
    fn finish_round(&mut self, lead: String) {
        let mut leftovers = Vec::with_capacity(2 * SLOT_COUNT);
        for side in &mut self.sides {
            leftovers.extend(side.clear_slots());
        }
        self.deck.merge_back(leftovers, &mut self.rng);
        self.last_revealer = None;

        if !self.deck.can_supply(REFILL_THRESHOLD) {
            let outcome = final_outcome(&self.sides[0].stack, &self.sides[1].stack);
            self.phase = Phase::GameEnded { outcome };
            self.record(outcome.winner, HistoryVerb::GameOver, None);
            let (one, two) = (outcome.scores[0].best(), outcome.scores[1].best());
            let verdict = match outcome.winner {
                Some(w) => format!("{w} wins"),
                None => "It's a draw".to_string(),
            };
            self.message = format!("{lead} Game over! {verdict} ({one} to {two}).");
            info!("game over after {} rounds: {verdict} ({one} to {two})", self.round);
            return;
        }

        for side in &mut self.sides {
            let need = HAND_SIZE.saturating_sub(side.hand.len());
            side.hand.extend(self.deck.draw_n(need));
        }
        self.round += 1;
        self.battle = None;
        self.phase = Phase::Placing;
        self.message =
            format!("{lead} Hands refilled. Place 3 cards to start round {}.", self.round);
        debug_assert_eq!(self.census().len(), DECK_SIZE);
    }
}
