mod common;

use common::assert_census;
use dragon_dance::agents::{AgentTable, PolicyProfile, RandomPolicy};
use dragon_dance::config::{GameConfig, WinnerPick};
use dragon_dance::game::{Game, Phase};
use dragon_dance::side::Seat;

fn table(seed: u64, swap_cap: Option<u32>) -> AgentTable {
    let mut table = AgentTable::new();
    for seat in Seat::ALL {
        let profile = PolicyProfile::default()
            .with_seed(seed.wrapping_mul(31) + seat.index() as u64)
            .with_swap_cap(swap_cap);
        table.set_agent(seat, Some(Box::new(RandomPolicy::new(profile))));
    }
    table
}

/// Play one seeded game to the end, checking the card census after every move.
fn simulate(seed: u64, config: GameConfig, swap_cap: Option<u32>) -> Game {
    let mut g = Game::new(config.with_seed(seed));
    let mut agents = table(seed, swap_cap);
    let mut steps = 0;
    while agents.on_turn(&mut g).unwrap() {
        steps += 1;
        assert_census(&g);
        for seat in Seat::ALL {
            assert!(
                g.side(seat).stack().iter().all(|c| !c.is_dragon()),
                "seed {seed}: a Dragon reached a stack"
            );
        }
        assert!(steps < 50_000, "seed {seed}: game did not terminate");
    }
    g
}

#[test]
fn seeded_games_all_terminate_with_a_consistent_census() {
    let mut rounds = 0;
    for seed in 0..40 {
        let pick = if seed % 2 == 0 { WinnerPick::AnySlot } else { WinnerPick::OwnSlots };
        let cap = match seed % 3 {
            0 => None,
            1 => Some(0),
            _ => Some(2),
        };
        let g = simulate(seed, GameConfig::default().with_winner_pick(pick), cap);
        assert!(matches!(g.phase(), Phase::GameEnded { .. }), "seed {seed}: {:?}", g.phase());
        assert!(g.round() <= 37, "seed {seed}: {} rounds", g.round());
        rounds += g.round();
    }
    assert!(rounds >= 1000, "only {rounds} rounds simulated");
}

#[test]
fn same_seed_replays_the_same_game() {
    let a = simulate(5, GameConfig::default(), Some(2));
    let b = simulate(5, GameConfig::default(), Some(2));
    assert_eq!(a.round(), b.round());
    assert_eq!(a.phase(), b.phase());
    assert_eq!(a.history_len(), b.history_len());
    assert_eq!(a.side(Seat::One).stack(), b.side(Seat::One).stack());
}

#[test]
fn swap_cap_holds_for_a_whole_game() {
    for seed in 0..10 {
        let mut g = Game::new(GameConfig::default().with_seed(seed));
        let mut agents = table(seed, Some(1));
        let mut most = [0u32; 2];
        while agents.on_turn(&mut g).unwrap() {
            for seat in Seat::ALL {
                most[seat.index()] = most[seat.index()].max(g.side(seat).swaps());
            }
        }
        assert!(most.iter().all(|&n| n <= 1), "seed {seed}: {most:?}");
    }
}
