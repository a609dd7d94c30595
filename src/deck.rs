use crate::cards::{Card, Color, Rank, Suit};
use crate::config::DECK_SIZE;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("duplicate card in deck: {0}")]
    Duplicate(Card),
}

/// Ordered draw pile; the front is the next card to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The full 54-card game set in canonical order: 52 ranked cards, then
    /// the Red and Black Dragons.
    ///
    /// ```
    /// use dragon_dance::deck::Deck;
    ///
    /// let deck = Deck::canonical();
    /// assert_eq!(deck.len(), 54);
    /// ```
    pub fn canonical() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        cards.push(Card::dragon(Color::Red));
        cards.push(Card::dragon(Color::Black));
        Self { cards }
    }

    /// A full game set with `top` at the front, in that order, followed by
    /// the remaining cards in canonical order. Used to stage deterministic deals.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(top.len());
        for &c in top {
            if !seen.insert(c) {
                return Err(DeckError::Duplicate(c));
            }
        }
        let mut cards = top.to_vec();
        cards.extend(Self::canonical().cards.into_iter().filter(|c| !seen.contains(c)));
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Uniform Fisher-Yates shuffle driven by the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the front of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Draw up to `n` cards from the front; fewer when the deck runs short.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Append `cards` and reshuffle the whole deck.
    pub fn merge_back<R: Rng + ?Sized>(
        &mut self,
        cards: impl IntoIterator<Item = Card>,
        rng: &mut R,
    ) {
        self.cards.extend(cards);
        self.shuffle_with(rng);
    }

    pub fn can_supply(&self, n: usize) -> bool {
        self.cards.len() >= n
    }
}
