use criterion::{criterion_group, criterion_main, Criterion, black_box};
use searchkit::board::{BoardState, Player};
use searchkit::search::eval::{Evaluator, RowWeights};
use searchkit::search::{alphabeta, minimax};

fn bench_search(c: &mut Criterion) {
    let b = BoardState::startpos(Player::Star);
    let eval = Evaluator::new(RowWeights([1, 2, 3, 4, 5, 6, 7, 8]), Player::Star);
    c.bench_function("minimax_depth_5_startpos", |ben| {
        ben.iter(|| {
            let r = minimax::search(black_box(&b), &eval, 5);
            black_box(r.nodes)
        })
    });
    c.bench_function("alphabeta_depth_5_startpos", |ben| {
        ben.iter(|| {
            let r = alphabeta::search(black_box(&b), &eval, 5);
            black_box(r.nodes)
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
