//! Playout benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! The random playout is the inner loop of the whole search, so its
//! throughput bounds how many simulations a turn slice can afford.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mcts::playout;
use mcts::rng::set_seed;
use reversi_rules::{ClassicBoard, Color, State};

/// The standard four-stone opening position at step 4.
fn opening_state() -> State {
    let mut state = State::new();
    state.force_put_classic(15, Color::White);
    state.force_put_classic(20, Color::White);
    state.force_put_classic(14, Color::Black);
    state.force_put_classic(21, Color::Black);
    state
}

/// A mid-game position: a dozen classical stones plus pending edges.
fn midgame_state() -> State {
    let mut state = opening_state();
    for (p, color) in [
        (8, Color::White),
        (9, Color::Black),
        (13, Color::White),
        (16, Color::Black),
        (19, Color::White),
        (22, Color::Black),
        (26, Color::White),
        (27, Color::Black),
    ] {
        state.force_put_classic(p, color);
    }
    state.put_quantum(0, 7, Color::White);
    state.put_quantum(7, 2, Color::Black);
    state.put_quantum(30, 35, Color::White);
    state
}

fn bench_playout_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout_phases");

    group.bench_function("opening", |b| {
        set_seed(42);
        let state = opening_state();
        b.iter(|| black_box(playout(&state)));
    });

    group.bench_function("midgame_with_edges", |b| {
        set_seed(42);
        let state = midgame_state();
        b.iter(|| black_box(playout(&state)));
    });

    group.finish();
}

fn bench_board_put(c: &mut Criterion) {
    c.bench_function("board_put_with_flips", |b| {
        let mut template = ClassicBoard::new();
        template.force_put(15, Color::White);
        template.force_put(20, Color::White);
        template.force_put(14, Color::Black);
        template.force_put(21, Color::Black);

        b.iter(|| {
            let mut board = template;
            board.put(16, Color::White);
            board.put(22, Color::Black);
            black_box(board)
        });
    });
}

criterion_group!(benches, bench_playout_phases, bench_board_put);
criterion_main!(benches);
