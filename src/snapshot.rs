//! Read-only views of engine state for frontends and opponent drivers.

use crate::cards::Card;
use crate::config::{WinnerPick, SLOT_COUNT};
use crate::game::{reveal_turn_for, BattleResult, Phase};
use crate::scoring::MatchOutcome;
use crate::side::{PlayerSide, Seat};

/// Owned copy of one side's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideView {
    pub hand: Vec<Card>,
    pub slots: [Option<Card>; SLOT_COUNT],
    /// `true` while the slot is still face-down and may be swapped.
    pub face_down: [bool; SLOT_COUNT],
    pub stack: Vec<Card>,
    /// Swaps taken this round.
    pub swaps: u32,
}

impl From<&PlayerSide> for SideView {
    fn from(side: &PlayerSide) -> Self {
        Self {
            hand: side.hand().to_vec(),
            slots: *side.slots(),
            face_down: *side.face_down(),
            stack: side.stack().to_vec(),
            swaps: side.swaps(),
        }
    }
}

impl SideView {
    /// Indices of slots with no card.
    pub fn empty_slots(&self) -> Vec<usize> {
        (0..SLOT_COUNT).filter(|&i| self.slots[i].is_none()).collect()
    }

    /// Indices of occupied slots that are still face-down.
    pub fn face_down_slots(&self) -> Vec<usize> {
        (0..SLOT_COUNT).filter(|&i| self.slots[i].is_some() && self.face_down[i]).collect()
    }

    /// Occupied slots' non-Dragon cards.
    pub fn selectable_cards(&self) -> Vec<Card> {
        self.slots.iter().flatten().filter(|c| !c.is_dragon()).copied().collect()
    }
}

/// Immutable picture of the whole game after the latest action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Snapshot {
    pub phase: Phase,
    pub round: u32,
    pub sides: [SideView; 2],
    pub deck_len: usize,
    pub message: String,
    pub last_revealer: Option<Seat>,
    pub battle: Option<BattleResult>,
    pub winner_pick: WinnerPick,
}

impl Snapshot {
    pub fn side(&self, seat: Seat) -> &SideView {
        &self.sides[seat.index()]
    }

    pub fn empty_slots(&self, seat: Seat) -> Vec<usize> {
        self.side(seat).empty_slots()
    }

    pub fn face_down_slots(&self, seat: Seat) -> Vec<usize> {
        self.side(seat).face_down_slots()
    }

    /// Side whose reveal-or-swap is next; `None` outside reveal/swap.
    pub fn reveal_turn(&self) -> Option<Seat> {
        reveal_turn_for(self.phase, self.last_revealer)
    }

    /// Whether every slot has been revealed and the round awaits a selection.
    pub fn is_battle_resolved(&self) -> bool {
        matches!(self.phase, Phase::BattleResolved { .. } | Phase::DrawTiebreak { .. })
    }

    pub fn all_slots_filled(&self) -> bool {
        self.sides.iter().all(|s| s.slots.iter().all(Option::is_some))
    }

    pub fn final_outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            Phase::GameEnded { outcome } => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;

    #[test]
    fn fresh_game_snapshot() {
        let g = Game::new(GameConfig::default().with_seed(5));
        let snap = g.snapshot();
        assert_eq!(snap.phase, Phase::Placing);
        assert_eq!(snap.round, 1);
        assert_eq!(snap.deck_len, 36);
        assert_eq!(snap.empty_slots(Seat::One), vec![0, 1, 2]);
        assert!(snap.face_down_slots(Seat::Two).is_empty());
        assert_eq!(snap.reveal_turn(), None);
        assert!(!snap.is_battle_resolved());
        assert!(!snap.all_slots_filled());
        assert_eq!(snap.final_outcome(), None);
    }

    #[test]
    fn seeded_games_deal_identically() {
        let a = Game::new(GameConfig::default().with_seed(99)).snapshot();
        let b = Game::new(GameConfig::default().with_seed(99)).snapshot();
        assert_eq!(a, b);
    }
}
