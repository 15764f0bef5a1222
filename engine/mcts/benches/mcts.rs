//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full searches with varying simulation caps
//! - Search from different game phases (opening, midgame, near-terminal)
//! - Tree operations (expansion, child selection, backpropagation, relocation)
//! - Raw rollout throughput per game

use std::f64::consts::SQRT_2;
use std::time::Duration;

use agent_core::{min_max_weights, GameState};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_connect4::Connect4;
use games_tictactoe::TicTacToe;
use mcts::{
    max_first, selection_order, uct_score, MctsAgent, MctsConfig, RandomRollout, RolloutPolicy,
    SearchTree, TimeBudget,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Generous wall clock so the simulation cap is what ends the search.
const BUDGET: Duration = Duration::from_secs(60);

fn bench_config(sims: u64) -> MctsConfig {
    MctsConfig::default().with_seed(42).with_max_simulations(sims)
}

/// Board state after a fixed sequence of moves.
fn tictactoe_after(moves: &[u8]) -> TicTacToe {
    moves.iter().fold(TicTacToe::new(), |s, m| s.apply(m))
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_simulations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_simulations");

    for sims in [50, 100, 200, 400, 800, 1600] {
        group.throughput(Throughput::Elements(sims));
        group.bench_with_input(BenchmarkId::new("tictactoe", sims), &sims, |b, &sims| {
            b.iter(|| {
                let mut agent: MctsAgent<TicTacToe> = MctsAgent::new(bench_config(sims));
                agent.set_up(2, 0);
                black_box(agent.compute_next_action(&TicTacToe::new(), BUDGET).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_search_connect4(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_connect4");

    // Deeper games and longer rollouts than tictactoe
    for sims in [50, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(sims));
        group.bench_with_input(BenchmarkId::new("opening", sims), &sims, |b, &sims| {
            b.iter(|| {
                let mut agent: MctsAgent<Connect4> = MctsAgent::new(bench_config(sims));
                agent.set_up(2, 0);
                black_box(agent.compute_next_action(&Connect4::new(), BUDGET).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let sims = 200;

    // Opening position (all 9 moves available)
    group.bench_function("opening", |b| {
        let state = TicTacToe::new();
        b.iter(|| {
            let mut agent: MctsAgent<TicTacToe> = MctsAgent::new(bench_config(sims));
            agent.set_up(2, 0);
            black_box(agent.compute_next_action(&state, BUDGET).unwrap())
        });
    });

    // Midgame position (5 moves left)
    group.bench_function("midgame", |b| {
        let state = tictactoe_after(&[4, 0, 2, 6]);
        b.iter(|| {
            let mut agent: MctsAgent<TicTacToe> = MctsAgent::new(bench_config(sims));
            agent.set_up(2, 0);
            black_box(agent.compute_next_action(&state, BUDGET).unwrap())
        });
    });

    // Near-terminal position: X at 0 and 1 can win at 2
    group.bench_function("near_terminal", |b| {
        let state = tictactoe_after(&[0, 3, 1, 4]);
        b.iter(|| {
            let mut agent: MctsAgent<TicTacToe> = MctsAgent::new(bench_config(sims));
            agent.set_up(2, 0);
            black_box(agent.compute_next_action(&state, BUDGET).unwrap())
        });
    });

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    // Node allocation through repeated expansion
    group.bench_function("expand_100_nodes", |b| {
        b.iter(|| {
            let mut tree: SearchTree<TicTacToe> = SearchTree::new();
            tree.reset_root(TicTacToe::new());

            let mut frontier = vec![tree.root()];
            let mut added = 0;
            'outer: loop {
                let mut next = Vec::new();
                for &id in &frontier {
                    let state = tree.state(id).clone();
                    for action in state.possible_actions() {
                        let child = tree.add_child(id, action, state.apply(&action));
                        next.push(child);
                        added += 1;
                        if added >= 100 {
                            break 'outer;
                        }
                    }
                }
                frontier = next;
            }

            black_box(tree.len())
        });
    });

    // UCT comparison across nine siblings
    group.bench_function("select_child", |b| {
        let mut tree: SearchTree<TicTacToe> = SearchTree::new();
        tree.reset_root(TicTacToe::new());
        let root = tree.root();

        let state = TicTacToe::new();
        for action in state.possible_actions() {
            let child = tree.add_child(root, action, state.apply(&action));
            let node = tree.get_mut(child);
            node.plays = (u32::from(action) + 1) * 10;
            node.wins = (u32::from(action) + 1) * 4;
        }
        tree.get_mut(root).plays = 450;

        let weights = min_max_weights(2, 0);
        b.iter(|| {
            black_box(max_first(tree.children(root).iter().copied(), |&x, &y| {
                selection_order(&tree, x, y, SQRT_2, &weights)
            }))
        });
    });

    // Counter updates walking a depth-5 path back to the root
    group.bench_function("backpropagate_depth_5", |b| {
        let mut tree: SearchTree<TicTacToe> = SearchTree::new();
        tree.reset_root(TicTacToe::new());

        let mut leaf = tree.root();
        for action in [4u8, 0, 2, 6, 8] {
            let state = tree.state(leaf).clone();
            leaf = tree.add_child(leaf, action, state.apply(&action));
        }

        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                let mut current = tree.parent(leaf);
                while current.is_some() {
                    let node = tree.get_mut(current);
                    node.record_play(true);
                    current = node.parent;
                }
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Root relocation compacting a searched tree onto one child
    group.bench_function("relocate_root", |b| {
        let mut agent: MctsAgent<TicTacToe> = MctsAgent::new(bench_config(400));
        agent.set_up(2, 0);
        agent.compute_next_action(&TicTacToe::new(), BUDGET).unwrap();

        let tree = agent.tree();
        let target = tree.children(tree.root())[0];

        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                tree.relocate_root_to(target);
                black_box(tree.len())
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// =============================================================================
// Rollout Benchmarks
// =============================================================================

fn bench_rollouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_rollouts");

    group.bench_function("tictactoe_full_game", |b| {
        let policy = RandomRollout::default();
        let budget = TimeBudget::new(BUDGET);
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let state = TicTacToe::new();

        b.iter(|| black_box(policy.rollout(&state, &mut rng, &budget)));
    });

    group.bench_function("connect4_full_game", |b| {
        let policy = RandomRollout::default();
        let budget = TimeBudget::new(BUDGET);
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let state = Connect4::new();

        b.iter(|| black_box(policy.rollout(&state, &mut rng, &budget)));
    });

    group.bench_function("uct_score", |b| {
        b.iter(|| black_box(uct_score(black_box(70), black_box(100), black_box(450), SQRT_2)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_simulations,
    bench_search_connect4,
    bench_game_phases,
    bench_tree_operations,
    bench_rollouts,
);

criterion_main!(benches);
