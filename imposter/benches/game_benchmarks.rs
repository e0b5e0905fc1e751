use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use imposter::{
    GameSettings, GameStateManagement, ImposterState,
    deck::find_preset,
    entities::Card,
    functional::{assign_imposters, select_card},
};
use rand::{SeedableRng, rngs::StdRng};

/// Helper to create a game that has just been dealt
fn setup_game_with_players(n_players: usize) -> ImposterState {
    let deck = find_preset("Places").map(|p| p.cards).unwrap_or_default();
    let mut game = ImposterState::with_seed(n_players as u64);
    game.start_game(n_players, &deck, &GameSettings::default())
        .unwrap();
    game
}

/// Pool of `n` cards, every other one hinted
fn card_pool(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| {
            let name = format!("card{i}");
            let hint = (i % 2 == 0).then(|| format!("hint{i}"));
            Card::new(&name, hint.as_deref())
        })
        .collect()
}

/// Benchmark card selection with different pool sizes
fn bench_select_card(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_card");
    let mut rng = StdRng::seed_from_u64(1);

    for size in [10, 100, 1000].iter() {
        let pool = card_pool(*size);
        let last = pool[0].clone();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}_cards")),
            &pool,
            |b, pool| {
                b.iter(|| select_card(pool, Some(&last), true, &mut rng));
            },
        );
    }

    group.finish();
}

/// Benchmark imposter assignment in both modes
fn bench_assign_imposters(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_imposters");
    let mut rng = StdRng::seed_from_u64(2);

    for n_players in [4, 12].iter() {
        group.bench_with_input(
            BenchmarkId::new("classic", n_players),
            n_players,
            |b, &n| b.iter(|| assign_imposters(n, false, &mut rng)),
        );
        group.bench_with_input(
            BenchmarkId::new("wild", n_players),
            n_players,
            |b, &n| b.iter(|| assign_imposters(n, true, &mut rng)),
        );
    }

    group.finish();
}

/// Benchmark a whole countdown from reveal to the next player
fn bench_reveal_countdown(c: &mut Criterion) {
    c.bench_function("reveal_countdown", |b| {
        b.iter_batched(
            || setup_game_with_players(4),
            |mut game| {
                game.reveal_role();
                while let Some(token) = game.active_timer() {
                    game.tick(token);
                }
                game
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark event draining (common operation)
fn bench_drain_events(c: &mut Criterion) {
    c.bench_function("drain_events", |b| {
        b.iter_batched(
            || setup_game_with_players(5),
            |mut g| {
                g.drain_events();
                g
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    selection,
    bench_select_card,
    bench_assign_imposters,
);

criterion_group!(game_operations, bench_reveal_countdown, bench_drain_events);

criterion_main!(selection, game_operations);
