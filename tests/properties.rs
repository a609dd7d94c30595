mod common;

use common::assert_census;
use dragon_dance::agents::{apply_move, legal_moves};
use dragon_dance::cards::{Card, Color};
use dragon_dance::config::GameConfig;
use dragon_dance::deck::Deck;
use dragon_dance::game::Game;
use dragon_dance::scoring::{battle_score, card_value, color_totals};
use dragon_dance::side::Seat;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Place(usize),
    Reveal(usize),
    Swap(usize),
    Take(usize),
    Tiebreak(usize),
    Legal(usize),
}

fn any_step() -> impl Strategy<Value = (bool, Step)> {
    let step = prop_oneof![
        1 => (0usize..12).prop_map(Step::Place),
        1 => (0usize..4).prop_map(Step::Reveal),
        1 => (0usize..4).prop_map(Step::Swap),
        1 => (0usize..54).prop_map(Step::Take),
        1 => (0usize..54).prop_map(Step::Tiebreak),
        // weight legal moves so games actually progress
        4 => any::<usize>().prop_map(Step::Legal),
    ];
    (any::<bool>(), step)
}

fn canonical_card(i: usize) -> Card {
    Deck::canonical().cards()[i]
}

/// Apply one step. `Ok(false)` when the engine rejected it; an error when a
/// move from `legal_moves` was rejected.
fn run_step(g: &mut Game, seat: Seat, step: Step) -> Result<bool, String> {
    let res = match step {
        Step::Place(i) => g.play_card(seat, i),
        Step::Reveal(i) => g.reveal(seat, i),
        Step::Swap(i) => g.swap(seat, i),
        Step::Take(i) => g.select_winning_card(seat, canonical_card(i)),
        Step::Tiebreak(i) => g.select_tiebreak_card(seat, canonical_card(i)),
        Step::Legal(i) => {
            let moves = legal_moves(&g.snapshot(), seat);
            if moves.is_empty() {
                return Ok(false);
            }
            let mv = moves[i % moves.len()];
            return apply_move(g, seat, mv)
                .map(|_| true)
                .map_err(|e| format!("legal move {mv:?} rejected: {e}"));
        }
    };
    Ok(res.is_ok())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_actions_keep_the_census(
        seed in any::<u64>(),
        steps in prop::collection::vec(any_step(), 1..300),
    ) {
        let mut g = Game::new(GameConfig::default().with_seed(seed));
        for (second, step) in steps {
            let seat = if second { Seat::Two } else { Seat::One };
            let before = g.snapshot();
            let len = g.history_len();
            let outcome = run_step(&mut g, seat, step);
            let accepted = match outcome {
                Ok(accepted) => accepted,
                Err(msg) => return Err(TestCaseError::fail(msg)),
            };
            if !accepted {
                prop_assert_eq!(&g.snapshot(), &before, "rejected {:?} changed the game", step);
                prop_assert_eq!(g.history_len(), len);
            }
            assert_census(&g);
        }
    }

    #[test]
    fn prop_battle_score_doubles_per_color(
        cards in prop::sample::subsequence(Deck::canonical().cards().to_vec(), 3),
    ) {
        let slots: Vec<Option<Card>> = cards.iter().copied().map(Some).collect();
        let score = battle_score(&slots);
        for (color, got) in [(Color::Red, score.red), (Color::Black, score.black)] {
            let base: u32 = cards
                .iter()
                .filter(|c| !c.is_dragon() && c.color() == color)
                .map(|c| card_value(*c))
                .sum();
            let doubled = cards.iter().any(|c| c.dragon_kind() == Some(color));
            prop_assert_eq!(got, if doubled { base * 2 } else { base });
        }
    }

    #[test]
    fn prop_final_totals_ignore_dragons(
        cards in prop::sample::subsequence(Deck::canonical().cards().to_vec(), 0..20),
    ) {
        let totals = color_totals(&cards);
        let plain: Vec<Card> = cards.iter().copied().filter(|c| !c.is_dragon()).collect();
        prop_assert_eq!(totals, color_totals(&plain));
        let sum: u32 = plain.iter().map(|c| card_value(*c)).sum();
        prop_assert_eq!(totals.red + totals.black, sum);
        prop_assert!(totals.best() * 2 >= sum);
    }
}
