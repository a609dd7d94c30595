use crate::side::Seat;
use crate::snapshot::Snapshot;
use rand::{rngs::StdRng, seq::IndexedRandom, RngCore, SeedableRng};

use super::{Move, OpponentPolicy};

/// Configuration for the default opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct PolicyProfile {
    /// Swaps the policy will take per round; `None` lifts the cap.
    pub swap_cap: Option<u32>,
    pub rng_seed: Option<u64>,
}

impl PolicyProfile {
    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_swap_cap(mut self, cap: Option<u32>) -> Self {
        self.swap_cap = cap;
        self
    }
}

impl Default for PolicyProfile {
    fn default() -> Self {
        Self { swap_cap: Some(2), rng_seed: None }
    }
}

/// Picks uniformly among the legal moves, skipping swaps once the cap is hit.
#[derive(Debug)]
pub struct RandomPolicy {
    profile: PolicyProfile,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(profile: PolicyProfile) -> Self {
        let rng = match profile.rng_seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { profile, rng }
    }

    pub fn profile(&self) -> PolicyProfile {
        self.profile
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(PolicyProfile::default())
    }
}

impl OpponentPolicy for RandomPolicy {
    fn choose(&mut self, view: &Snapshot, seat: Seat, legal: &[Move]) -> Option<Move> {
        let capped = self.profile.swap_cap.is_some_and(|cap| view.side(seat).swaps >= cap);
        let options: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|mv| !(capped && matches!(mv, Move::Swap { .. })))
            .collect();
        options.choose(&mut self.rng).copied()
    }
}
