use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dragon_dance::agents::{AgentTable, PolicyProfile, RandomPolicy};
use dragon_dance::cards::parse_cards;
use dragon_dance::config::GameConfig;
use dragon_dance::game::{Game, Phase};
use dragon_dance::scoring::{battle_score, final_outcome};
use dragon_dance::side::Seat;

fn bench_battle_score(c: &mut Criterion) {
    let plain: Vec<_> = parse_cards("Ah Ks 9d").unwrap().into_iter().map(Some).collect();
    let dragons: Vec<_> = parse_cards("Ah RD BD").unwrap().into_iter().map(Some).collect();

    let mut g = c.benchmark_group("battle_score");
    g.bench_with_input(BenchmarkId::new("plain", "Ah,Ks,9d"), &plain, |b, input| {
        b.iter(|| battle_score(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("dragons", "Ah,RD,BD"), &dragons, |b, input| {
        b.iter(|| battle_score(black_box(input)))
    });
    g.finish();
}

fn bench_final_outcome(c: &mut Criterion) {
    let one = parse_cards("Ah Kh Qd 10s 9c 2h").unwrap();
    let two = parse_cards("As Ks Qc Jd 3h").unwrap();
    c.bench_function("final_outcome", |b| {
        b.iter(|| final_outcome(black_box(&one), black_box(&two)))
    });
}

fn play_out(seed: u64) -> u32 {
    let mut game = Game::new(GameConfig::default().with_seed(seed));
    let mut table = AgentTable::new();
    for (i, seat) in Seat::ALL.into_iter().enumerate() {
        let profile = PolicyProfile::default().with_seed(seed + i as u64);
        table.set_agent(seat, Some(Box::new(RandomPolicy::new(profile))));
    }
    while !matches!(game.phase(), Phase::GameEnded { .. }) {
        if !table.on_turn(&mut game).unwrap_or(false) {
            break;
        }
    }
    game.round()
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("random_vs_random_game", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            play_out(black_box(seed))
        })
    });
}

criterion_group!(benches, bench_battle_score, bench_final_outcome, bench_full_game);
criterion_main!(benches);
