//! Rule constants and per-game configuration.

/// Cards in the full game set: 52 ranked cards plus two Dragons.
pub const DECK_SIZE: usize = 54;
/// Hand size each side is refilled to between rounds.
pub const HAND_SIZE: usize = 9;
/// Played slots per side.
pub const SLOT_COUNT: usize = 3;
/// Cards the deck must hold at round reset to refill both hands.
pub const REFILL_THRESHOLD: usize = 2 * SLOT_COUNT;

/// Which played cards the round winner may move into their stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum WinnerPick {
    /// Any non-Dragon card in either side's slots.
    #[default]
    AnySlot,
    /// Only non-Dragon cards in the winner's own slots.
    OwnSlots,
}

impl WinnerPick {
    pub fn label(self) -> &'static str {
        match self {
            WinnerPick::AnySlot => "Any slot",
            WinnerPick::OwnSlots => "Own slots",
        }
    }
}

/// Configuration for a [`Game`](crate::game::Game).
///
/// ```
/// use dragon_dance::config::{GameConfig, WinnerPick};
///
/// let cfg = GameConfig::default().with_seed(7).with_winner_pick(WinnerPick::OwnSlots);
/// assert_eq!(cfg.seed, Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct GameConfig {
    /// Seed for the engine's shuffle RNG; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub winner_pick: WinnerPick,
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_winner_pick(mut self, winner_pick: WinnerPick) -> Self {
        self.winner_pick = winner_pick;
        self
    }
}
