use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sapper_core::*;

const TIERS: [(&str, GameSettings); 4] = [
    ("beginner", GameSettings::beginner()),
    ("intermediate", GameSettings::intermediate()),
    ("expert", GameSettings::expert()),
    ("dense", GameSettings::new_unchecked(30, 30, 800)),
];

fn bench_first_open(c: &mut Criterion) {
    let clock = FixedClock(Duration::from_secs(1));
    let mut group = c.benchmark_group("first_open");
    for (name, settings) in TIERS {
        let game = Game::new(settings);
        let center = Position::new(settings.rows / 2, settings.columns / 2);
        group.bench_with_input(BenchmarkId::from_parameter(name), &game, |b, game| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| black_box(game.open(center, &mut rng, &clock)));
        });
    }
    group.finish();
}

fn bench_empty_flood(c: &mut Criterion) {
    let clock = FixedClock(Duration::from_secs(1));
    let game = Game::create(200, 200, 0);
    c.bench_function("flood_200x200_empty", |b| {
        let mut rng = SmallRng::seed_from_u64(0);
        b.iter(|| black_box(game.open(Position::new(0, 0), &mut rng, &clock)));
    });
}

criterion_group!(benches, bench_first_open, bench_empty_flood);
criterion_main!(benches);
