use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use games_tictactoe::TicTacToe;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_moves");

    group.bench_function("make_move_center", |b| {
        let base_state = TicTacToe::new();
        b.iter_batched(
            || base_state,
            |state| state.make_move(4),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("legal_moves_empty_board", |b| {
        let state = TicTacToe::new();
        b.iter(|| state.legal_moves());
    });

    group.bench_function("legal_moves_mask", |b| {
        let state = TicTacToe::new().make_move(4).make_move(0);
        b.iter(|| state.legal_moves_mask());
    });

    group.finish();
}

fn bench_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_playout");

    group.bench_function("random_full_game", |b| {
        b.iter_batched(
            || ChaCha20Rng::seed_from_u64(42),
            |mut rng| {
                let mut state = TicTacToe::new();
                while !state.is_done() {
                    let legal = state.legal_moves();
                    let action = legal[rng.gen_range(0..legal.len())];
                    state = state.make_move(action);
                }
                state
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_moves, bench_playout);
criterion_main!(benches);
