use criterion::{black_box, criterion_group, criterion_main, Criterion};
use revtris_core::{Board, Piece};
use revtris_engine::{drop_row, enumerate_placements};

fn ragged_board() -> Board {
    Board::from_rows(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "...#......",
        "..###...#.",
        ".####..##.",
        "#####.###.",
        "######.##.",
        "#########.",
        "#########.",
    ])
    .expect("valid fixture")
}

fn bench_enumerate_placements(c: &mut Criterion) {
    let empty = Board::standard();
    let ragged = ragged_board();

    for piece in Piece::ALL {
        c.bench_function(&format!("enumerate_empty_{piece}"), |b| {
            b.iter(|| enumerate_placements(black_box(&empty), black_box(piece.rotations())))
        });
        c.bench_function(&format!("enumerate_ragged_{piece}"), |b| {
            b.iter(|| enumerate_placements(black_box(&ragged), black_box(piece.rotations())))
        });
    }
}

fn bench_drop_row(c: &mut Criterion) {
    let board = ragged_board();
    let shape = Piece::T.shape();

    c.bench_function("drop_row_t", |b| {
        b.iter(|| drop_row(black_box(&board), black_box(&shape), black_box(3)))
    });
}

criterion_group!(benches, bench_enumerate_placements, bench_drop_row);
criterion_main!(benches);
