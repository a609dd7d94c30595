mod common;

use common::{assert_census, card, place_all, reveal_all, staged, staged_with};
use dragon_dance::cards::Card;
use dragon_dance::config::{GameConfig, WinnerPick, HAND_SIZE};
use dragon_dance::game::Phase;
use dragon_dance::side::Seat;

#[test]
fn higher_total_wins_and_takes_an_opponent_card() {
    // 10h+Jh+9h = 30 against 5c+6c+9c = 20
    let mut g = staged("10h Jh 9h", "5c 6c 9c");
    place_all(&mut g);
    reveal_all(&mut g);

    let snap = g.snapshot();
    assert_eq!(snap.phase, Phase::BattleResolved { winner: Seat::One });
    assert!(snap.is_battle_resolved());
    let battle = snap.battle.unwrap();
    assert_eq!(battle.scores[0].total(), 30);
    assert_eq!(battle.scores[1].total(), 20);
    assert_eq!(battle.winner, Some(Seat::One));

    let err = g.select_winning_card(Seat::Two, card("9c")).unwrap_err();
    assert_eq!(err.code(), "not_round_winner");
    g.select_winning_card(Seat::One, card("9c")).unwrap();

    assert_eq!(g.side(Seat::One).stack(), &[card("9c")]);
    assert!(g.side(Seat::Two).stack().is_empty());
    assert_eq!(g.phase(), Phase::Placing);
    assert_eq!(g.round(), 2);
    assert_eq!(g.battle(), None);
    for seat in Seat::ALL {
        assert_eq!(g.side(seat).hand().len(), HAND_SIZE);
        assert!(g.side(seat).slots().iter().all(Option::is_none));
        assert_eq!(g.side(seat).face_down(), &[true; 3]);
    }
    assert_census(&g);
}

#[test]
fn dragons_double_and_return_to_the_deck() {
    // red (10 + 11) doubled = 42 against 20
    let mut g = staged("10h Jh RD", "5c 6c 9c");
    place_all(&mut g);
    reveal_all(&mut g);
    assert_eq!(g.battle().unwrap().scores[0].total(), 42);

    let before = g.snapshot();
    let err = g.select_winning_card(Seat::One, Card::RED_DRAGON).unwrap_err();
    assert_eq!(err.code(), "dragon_not_selectable");
    assert_eq!(g.snapshot(), before);

    g.select_winning_card(Seat::One, card("Jh")).unwrap();
    assert_eq!(g.side(Seat::One).stack(), &[card("Jh")]);
    let in_hands = Seat::ALL.iter().any(|&s| g.side(s).hand().contains(&Card::RED_DRAGON));
    assert!(g.deck().cards().contains(&Card::RED_DRAGON) || in_hands);
    assert_census(&g);
}

#[test]
fn selecting_a_card_not_on_the_table_is_rejected() {
    let mut g = staged("10h Jh 9h", "5c 6c 9c");
    place_all(&mut g);
    reveal_all(&mut g);
    let err = g.select_winning_card(Seat::One, card("As")).unwrap_err();
    assert_eq!(err.code(), "card_not_in_play");
}

#[test]
fn own_slots_rule_limits_the_pick() {
    let config = GameConfig::default().with_seed(3).with_winner_pick(WinnerPick::OwnSlots);
    let mut g = staged_with(config, "5c 6c 9c", "10h Jh 9h");
    place_all(&mut g);
    reveal_all(&mut g);
    assert_eq!(g.phase(), Phase::BattleResolved { winner: Seat::Two });
    assert_eq!(g.snapshot().winner_pick, WinnerPick::OwnSlots);

    let err = g.select_winning_card(Seat::Two, card("9c")).unwrap_err();
    assert_eq!(err.code(), "not_own_card");
    g.select_winning_card(Seat::Two, card("Jh")).unwrap();
    assert_eq!(g.side(Seat::Two).stack(), &[card("Jh")]);
}
