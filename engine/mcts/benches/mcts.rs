//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying simulation counts
//! - Search from different game phases (opening, midgame, near-terminal)
//! - Chance-heavy search (Pig)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use game_core::Game;
use games_pig::Pig;
use games_tictactoe::TicTacToe;
use mcts::{MctsBot, MctsConfig, RandomRolloutEvaluator};

fn tictactoe_bot(sims: u32) -> MctsBot<TicTacToe, RandomRolloutEvaluator> {
    let config = MctsConfig::default()
        .with_simulations(sims)
        .with_seed(42)
        .with_solve(false);
    let evaluator = RandomRolloutEvaluator::new(1, 42);
    MctsBot::new(TicTacToe::new(), evaluator, config).unwrap()
}

/// State after playing a fixed sequence of moves.
fn play_moves(moves: &[u8]) -> games_tictactoe::State {
    let game = TicTacToe::new();
    let mut state = game.initial_state();
    for &m in moves {
        game.apply_action(&mut state, m);
    }
    state
}

fn bench_search_simulations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_simulations");

    for sims in [50, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(u64::from(sims)));
        group.bench_with_input(BenchmarkId::new("rollout", sims), &sims, |b, &sims| {
            let mut bot = tictactoe_bot(sims);
            let state = TicTacToe::new().initial_state();
            b.iter(|| black_box(bot.search(&state).unwrap()));
        });
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let sims = 200;

    group.bench_function("opening", |b| {
        let mut bot = tictactoe_bot(sims);
        let state = TicTacToe::new().initial_state();
        b.iter(|| black_box(bot.search(&state).unwrap()));
    });

    group.bench_function("midgame", |b| {
        let mut bot = tictactoe_bot(sims);
        let state = play_moves(&[4, 0, 2, 6]);
        b.iter(|| black_box(bot.search(&state).unwrap()));
    });

    group.bench_function("near_terminal", |b| {
        let mut bot = tictactoe_bot(sims);
        let state = play_moves(&[0, 3, 1, 4]);
        b.iter(|| black_box(bot.search(&state).unwrap()));
    });

    group.finish();
}

fn bench_chance_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_chance");

    group.bench_function("pig_200_sims", |b| {
        let game = Pig::with_goal(25);
        let config = MctsConfig::default()
            .with_simulations(200)
            .with_seed(42)
            .with_solve(false);
        let evaluator = RandomRolloutEvaluator::new(1, 42);
        let mut bot = MctsBot::new(game, evaluator, config).unwrap();
        let state = Pig::with_goal(25).initial_state();
        b.iter(|| black_box(bot.search(&state).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_simulations,
    bench_game_phases,
    bench_chance_nodes,
);

criterion_main!(benches);
