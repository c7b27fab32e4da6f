use criterion::{black_box, criterion_group, criterion_main, Criterion};
use revtris_core::{Board, Piece};
use revtris_eval::EvalWeights;
use revtris_search::{rank_moves, select_move, Difficulty};

fn midgame_board() -> Board {
    let mut rows = vec!["..........".to_string(); 12];
    rows.extend(
        [
            "...#......",
            "..###...#.",
            ".####..##.",
            "#####.###.",
            "######.##.",
            "##.######.",
            "#########.",
            "####.####.",
        ]
        .iter()
        .map(|r| r.to_string()),
    );
    Board::from_rows(&rows).expect("valid fixture")
}

fn bench_rank(c: &mut Criterion) {
    let board = midgame_board();
    let weights = EvalWeights::default();

    for piece in Piece::ALL {
        let shape = piece.shape();
        c.bench_function(&format!("rank_{piece}"), |b| {
            b.iter(|| rank_moves(black_box(&board), black_box(&shape), black_box(&weights)))
        });
    }
}

fn bench_select(c: &mut Criterion) {
    let board = midgame_board();
    let shape = Piece::T.shape();

    for difficulty in Difficulty::ALL {
        let profile = difficulty.profile();
        c.bench_function(&format!("select_t_{difficulty}"), |b| {
            b.iter(|| select_move(black_box(&board), black_box(&shape), black_box(&profile)))
        });
    }
}

criterion_group!(benches, bench_rank, bench_select);
criterion_main!(benches);
