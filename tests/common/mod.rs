#![allow(dead_code)]

use dragon_dance::cards::{parse_cards, Card};
use dragon_dance::config::{GameConfig, HAND_SIZE, SLOT_COUNT};
use dragon_dance::deck::Deck;
use dragon_dance::game::Game;
use dragon_dance::side::Seat;

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

pub fn card(s: &str) -> Card {
    s.parse().unwrap()
}

/// Deal `one` to Player 1 and `two` to Player 2, each padded to a full hand
/// with unused cards. Placing hand index 0 three times plays the named cards
/// in order.
pub fn staged_with(config: GameConfig, one: &str, two: &str) -> Game {
    let (one, two) = (cards(one), cards(two));
    let named: Vec<Card> = one.iter().chain(two.iter()).copied().collect();
    let mut filler = Deck::canonical().cards().to_vec().into_iter().filter(|c| !named.contains(c));
    let mut pad = |mut hand: Vec<Card>| {
        while hand.len() < HAND_SIZE {
            hand.extend(filler.next());
        }
        hand
    };
    let top: Vec<Card> = pad(one).into_iter().chain(pad(two)).collect();
    Game::with_deck(config, Deck::stacked(&top).unwrap())
}

pub fn staged(one: &str, two: &str) -> Game {
    staged_with(GameConfig::default().with_seed(7), one, two)
}

pub fn place_all(g: &mut Game) {
    for _ in 0..SLOT_COUNT {
        g.play_card(Seat::One, 0).unwrap();
        g.play_card(Seat::Two, 0).unwrap();
    }
}

/// Reveal every slot, Player 1 first, alternating.
pub fn reveal_all(g: &mut Game) {
    for slot in 0..SLOT_COUNT {
        g.reveal(Seat::One, slot).unwrap();
        g.reveal(Seat::Two, slot).unwrap();
    }
}

/// Every card appears exactly once across the engine.
pub fn assert_census(g: &Game) {
    let mut ids: Vec<u8> = g.census().iter().map(|c| c.id().get()).collect();
    ids.sort_unstable();
    let expected: Vec<u8> = (0..54).collect();
    assert_eq!(ids, expected, "card census broken");
}
