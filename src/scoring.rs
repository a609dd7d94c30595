//! Pure scoring functions: card values, battle scores and final stack scores.

use crate::cards::{Card, Color};
use crate::side::Seat;
use std::cmp::Ordering;

/// Numeric value of a card: numerals at face value, J=11, Q=12, K=13, A=14,
/// Dragons 0.
pub fn card_value(card: Card) -> u32 {
    card.rank().map(|r| u32::from(r.value())).unwrap_or(0)
}

/// Per-color battle totals for one side's slots, after Dragon doubling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BattleScore {
    pub red: u32,
    pub black: u32,
}

impl BattleScore {
    pub fn total(self) -> u32 {
        self.red + self.black
    }
}

/// Score a set of played slots.
///
/// Non-Dragon values are summed per color. A Dragon adds nothing itself but
/// doubles the total of its own color.
///
/// ```
/// use dragon_dance::cards::parse_cards;
/// use dragon_dance::scoring::battle_score;
///
/// let slots: Vec<_> = parse_cards("5h 7s RD").unwrap().into_iter().map(Some).collect();
/// let score = battle_score(&slots);
/// assert_eq!((score.red, score.black, score.total()), (10, 7, 17));
/// ```
pub fn battle_score(slots: &[Option<Card>]) -> BattleScore {
    let mut score = BattleScore::default();
    let mut doubled = [false; 2];
    for card in slots.iter().flatten() {
        match (card.dragon_kind(), card.color()) {
            (Some(Color::Red), _) => doubled[0] = true,
            (Some(Color::Black), _) => doubled[1] = true,
            (None, Color::Red) => score.red += card_value(*card),
            (None, Color::Black) => score.black += card_value(*card),
        }
    }
    if doubled[0] {
        score.red *= 2;
    }
    if doubled[1] {
        score.black *= 2;
    }
    score
}

/// Compare two battle scores; `None` on an exact tie.
pub fn battle_winner(one: BattleScore, two: BattleScore) -> Option<Seat> {
    match one.total().cmp(&two.total()) {
        Ordering::Greater => Some(Seat::One),
        Ordering::Less => Some(Seat::Two),
        Ordering::Equal => None,
    }
}

/// Per-color sums of a scoring stack. Dragons are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorTotals {
    pub red: u32,
    pub black: u32,
}

impl ColorTotals {
    /// A side's final score: the better of its two colors.
    pub fn best(self) -> u32 {
        self.red.max(self.black)
    }
}

pub fn color_totals(stack: &[Card]) -> ColorTotals {
    stack.iter().filter(|c| !c.is_dragon()).fold(ColorTotals::default(), |mut acc, c| {
        match c.color() {
            Color::Red => acc.red += card_value(*c),
            Color::Black => acc.black += card_value(*c),
        }
        acc
    })
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// `None` when both sides finish on the same score.
    pub winner: Option<Seat>,
    pub scores: [ColorTotals; 2],
}

pub fn final_outcome(one: &[Card], two: &[Card]) -> MatchOutcome {
    let scores = [color_totals(one), color_totals(two)];
    let winner = match scores[0].best().cmp(&scores[1].best()) {
        Ordering::Greater => Some(Seat::One),
        Ordering::Less => Some(Seat::Two),
        Ordering::Equal => None,
    };
    MatchOutcome { winner, scores }
}
