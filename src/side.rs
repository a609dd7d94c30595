use crate::cards::Card;
use crate::config::SLOT_COUNT;
use std::fmt;

/// One of the two sides at the table. `One` is the human seat and always
/// makes the first reveal of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::One, Seat::Two];

    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => f.write_str("Player 1"),
            Seat::Two => f.write_str("Player 2"),
        }
    }
}

/// Everything one side holds: hand, played slots, reveal flags and stack.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct PlayerSide {
    pub(crate) hand: Vec<Card>,
    pub(crate) slots: [Option<Card>; SLOT_COUNT],
    /// `true` while the slot is still face-down and may be swapped.
    pub(crate) face_down: [bool; SLOT_COUNT],
    pub(crate) stack: Vec<Card>,
    pub(crate) swaps: u32,
}

impl PlayerSide {
    pub(crate) fn with_hand(hand: Vec<Card>) -> Self {
        Self { hand, face_down: [true; SLOT_COUNT], ..Self::default() }
    }

    /// Returns the cards in hand, in draw order
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Returns the played slots
    pub fn slots(&self) -> &[Option<Card>; SLOT_COUNT] {
        &self.slots
    }

    /// Returns the per-slot face-down flags
    pub fn face_down(&self) -> &[bool; SLOT_COUNT] {
        &self.face_down
    }

    /// Returns the won cards
    pub fn stack(&self) -> &[Card] {
        &self.stack
    }

    /// Returns the number of swaps taken this round
    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub(crate) fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub(crate) fn slots_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub(crate) fn all_revealed(&self) -> bool {
        self.face_down.iter().all(|open| !open)
    }

    pub(crate) fn slot_of(&self, card: Card) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(card))
    }

    /// Empty the slots and turn every slot face-down again.
    pub(crate) fn clear_slots(&mut self) -> Vec<Card> {
        self.face_down = [true; SLOT_COUNT];
        self.swaps = 0;
        self.slots.iter_mut().filter_map(Option::take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn seats_alternate() {
        assert_eq!(Seat::One.other(), Seat::Two);
        assert_eq!(Seat::Two.other().index(), 0);
        assert_eq!(Seat::Two.to_string(), "Player 2");
    }

    #[test]
    fn clear_slots_returns_cards_and_resets_flags() {
        let cards = parse_cards("2h 3h 4h").unwrap();
        let mut side = PlayerSide::with_hand(Vec::new());
        side.slots = [Some(cards[0]), None, Some(cards[2])];
        side.face_down = [false, true, false];
        side.swaps = 2;
        assert_eq!(side.first_empty_slot(), Some(1));
        assert!(!side.slots_full());

        let cleared = side.clear_slots();
        assert_eq!(cleared, vec![cards[0], cards[2]]);
        assert_eq!(side.slots, [None, None, None]);
        assert_eq!(side.face_down, [true; SLOT_COUNT]);
        assert_eq!(side.swaps, 0);
    }
}
