mod common;

use common::{card, place_all, reveal_all, staged};
use dragon_dance::game::HistoryVerb;
use dragon_dance::side::Seat;

#[test]
fn history_records_actions_and_outcomes() {
    let mut g = staged("10h Jh 9h", "5c 6c 9c");
    place_all(&mut g);
    assert_eq!(g.history_len(), 6);
    let placed = g.history_recent(1);
    assert_eq!(placed[0].verb, HistoryVerb::Place);
    assert_eq!(placed[0].seat, Some(Seat::Two));
    assert_eq!(placed[0].card, None, "placements stay hidden");

    reveal_all(&mut g);
    let recent = g.history_recent(2);
    assert_eq!(recent[0].verb, HistoryVerb::Reveal);
    assert_eq!(recent[0].card, Some(card("9c")));
    assert_eq!(recent[1].verb, HistoryVerb::RoundWin);
    assert_eq!(recent[1].seat, Some(Seat::One));

    g.select_winning_card(Seat::One, card("Jh")).unwrap();
    let last = g.history_recent(1);
    assert_eq!(last[0].verb, HistoryVerb::Take);
    assert_eq!(last[0].card, Some(card("Jh")));
    assert_eq!(last[0].round, 1);
}

#[test]
fn rejected_actions_are_not_recorded() {
    let mut g = staged("", "");
    let _ = g.reveal(Seat::One, 0);
    let _ = g.play_card(Seat::One, 40);
    assert_eq!(g.history_len(), 0);
}

#[test]
fn history_offset_pages_from_the_end() {
    let mut g = staged("", "");
    place_all(&mut g);
    reveal_all(&mut g);
    let total = g.history_len();
    assert_eq!(total, 13);

    let page = g.history_recent_offset(5, 0);
    assert_eq!(page, g.history_recent(5));
    let older = g.history_recent_offset(5, 5);
    assert_eq!(older.len(), 5);
    assert!(older.iter().take(3).all(|e| e.verb == HistoryVerb::Place));

    // offsets past the start clamp to the oldest page
    let oldest = g.history_recent_offset(5, 100);
    assert_eq!(oldest.len(), 5);
    assert!(oldest.iter().all(|e| e.verb == HistoryVerb::Place));
    assert!(g.history_recent_offset(0, 0).is_empty());
}
