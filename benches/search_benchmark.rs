use adaptive_chess_engine::{AdaptiveEngine, HyperbolicConfig, HyperbolicEngine};
use chess::Board;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::str::FromStr;

const MIDGAME_FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_evaluation(c: &mut Criterion) {
    let board = Board::from_str(MIDGAME_FEN).unwrap();

    let adaptive = AdaptiveEngine::with_seed(1);
    c.bench_function("adaptive_evaluate_midgame", |b| {
        b.iter(|| black_box(adaptive.evaluate_board(black_box(&board))))
    });

    let hyperbolic = HyperbolicEngine::with_seed(HyperbolicConfig::default(), 1);
    c.bench_function("hyperbolic_evaluate_midgame", |b| {
        b.iter(|| black_box(hyperbolic.evaluate_board(black_box(&board))))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = Board::from_str(MIDGAME_FEN).unwrap();

    c.bench_function("adaptive_search_depth_2", |b| {
        b.iter(|| {
            let mut engine = AdaptiveEngine::with_seed(7);
            black_box(engine.search_move(black_box(&board), 2, 9.0))
        })
    });

    c.bench_function("hyperbolic_choose_move", |b| {
        b.iter(|| {
            let mut engine = HyperbolicEngine::with_seed(HyperbolicConfig::default(), 7);
            black_box(engine.choose_move(black_box(&board)))
        })
    });
}

criterion_group!(benches, bench_evaluation, bench_search);
criterion_main!(benches);
