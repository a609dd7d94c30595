// Minimal game engine API boundary. This trait exposes the round actions and
// the legal-move queries so frontends and opponent drivers can run a game
// without depending on engine internals. It is implemented for `Game`.

use crate::cards::Card;
use crate::game::{ActionError, Game, Phase};
use crate::side::Seat;
use crate::snapshot::Snapshot;

pub trait GameEngine {
    // Game lifecycle
    fn reset_game(&mut self);

    // Round actions
    fn play_card(&mut self, seat: Seat, hand_index: usize) -> Result<(), ActionError>;
    fn reveal(&mut self, seat: Seat, slot: usize) -> Result<(), ActionError>;
    fn swap(&mut self, seat: Seat, slot: usize) -> Result<(), ActionError>;
    fn select_winning_card(&mut self, seat: Seat, card: Card) -> Result<(), ActionError>;
    fn select_tiebreak_card(&mut self, seat: Seat, card: Card) -> Result<(), ActionError>;

    // Queries
    fn snapshot(&self) -> Snapshot;
    fn phase(&self) -> Phase;
    fn message(&self) -> &str;
    fn deck_len(&self) -> usize;
    fn empty_slots(&self, seat: Seat) -> Vec<usize>;
    fn face_down_slots(&self, seat: Seat) -> Vec<usize>;
    fn reveal_turn(&self) -> Option<Seat>;
    fn is_battle_resolved(&self) -> bool;
}

impl GameEngine for Game {
    fn reset_game(&mut self) {
        self.reset_game();
    }

    fn play_card(&mut self, seat: Seat, hand_index: usize) -> Result<(), ActionError> {
        self.play_card(seat, hand_index)
    }
    fn reveal(&mut self, seat: Seat, slot: usize) -> Result<(), ActionError> {
        self.reveal(seat, slot)
    }
    fn swap(&mut self, seat: Seat, slot: usize) -> Result<(), ActionError> {
        self.swap(seat, slot)
    }
    fn select_winning_card(&mut self, seat: Seat, card: Card) -> Result<(), ActionError> {
        self.select_winning_card(seat, card)
    }
    fn select_tiebreak_card(&mut self, seat: Seat, card: Card) -> Result<(), ActionError> {
        self.select_tiebreak_card(seat, card)
    }

    fn snapshot(&self) -> Snapshot {
        self.snapshot()
    }
    fn phase(&self) -> Phase {
        self.phase
    }
    fn message(&self) -> &str {
        self.message()
    }
    fn deck_len(&self) -> usize {
        self.deck.len()
    }
    fn empty_slots(&self, seat: Seat) -> Vec<usize> {
        let slots = self.sides[seat.index()].slots();
        (0..slots.len()).filter(|&i| slots[i].is_none()).collect()
    }
    fn face_down_slots(&self, seat: Seat) -> Vec<usize> {
        let side = &self.sides[seat.index()];
        (0..side.slots().len())
            .filter(|&i| side.slots()[i].is_some() && side.face_down()[i])
            .collect()
    }
    fn reveal_turn(&self) -> Option<Seat> {
        self.reveal_turn()
    }
    fn is_battle_resolved(&self) -> bool {
        matches!(self.phase, Phase::BattleResolved { .. } | Phase::DrawTiebreak { .. })
    }
}
