use proptest::prelude::*;
use revtris_core::{Board, Cell, Piece, Shape};
use revtris_engine::{can_place, collides, drop_row, enumerate_placements, DropError};

fn board_from_bits(width: usize, height: usize, bits: &[bool]) -> Board {
    let mut board = Board::new(width, height).expect("non-zero dimensions");
    for (i, &filled) in bits.iter().enumerate().take(width * height) {
        if filled {
            board.set(i % width, i / width, Cell::Garbage);
        }
    }
    board
}

/// Stack one more garbage cell on top of a column, if there is room.
fn raise_column(board: &mut Board, x: usize) -> bool {
    let top = board.column_top(x).unwrap_or(board.height());
    if top == 0 {
        return false;
    }
    board.set(x, top - 1, Cell::Garbage);
    true
}

/// Reference gravity: enter fully above the board and fall one row at a
/// time. Rows above the board are free, the floor and walls are solid.
fn stepwise_fall(board: &Board, shape: &Shape, x: usize) -> Option<usize> {
    let blocked = |y: isize| {
        shape.cells().any(|(dx, dy)| {
            let row = y + dy as isize;
            row >= board.height() as isize || (row >= 0 && board.is_filled(x + dx, row as usize))
        })
    };
    let mut y = -(shape.height() as isize);
    while !blocked(y + 1) {
        y += 1;
    }
    (y >= 0).then_some(y as usize)
}

fn arb_board() -> impl Strategy<Value = Board> {
    (4usize..=10, 4usize..=20).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::bool::weighted(0.25), w * h)
            .prop_map(move |bits| board_from_bits(w, h, &bits))
    })
}

fn arb_piece() -> impl Strategy<Value = Piece> {
    (0usize..7).prop_map(|i| Piece::ALL[i])
}

mod enumeration {
    use super::*;

    #[test]
    fn test_o_piece_on_empty_board_rests_on_row_18() {
        let board = Board::standard();
        let placements = enumerate_placements(&board, Piece::O.rotations());
        assert_eq!(placements.len(), 9);
        for x in 0..=8 {
            assert_eq!(drop_row(&board, &Piece::O.shape(), x), Ok(18));
        }
        assert!(placements.iter().all(|p| p.y == 18 && p.rotation == 0));
    }

    #[test]
    fn test_top_row_blocked_everywhere_yields_nothing() {
        let mut rows = vec!["..........".to_string(); 20];
        rows[1] = "##########".to_string();
        let board = Board::from_rows(&rows).unwrap();
        // a single free row above the stack: nothing taller than one row fits
        for piece in Piece::ALL {
            let placements = enumerate_placements(&board, piece.rotations());
            if piece == Piece::I {
                assert_eq!(placements.len(), 7);
                assert!(placements.iter().all(|p| p.y == 0 && p.rotation == 0));
            } else {
                assert!(placements.is_empty(), "{piece}");
            }
        }
    }
}

proptest! {
    #[test]
    fn every_enumerated_placement_is_legal_and_resting(board in arb_board(), piece in arb_piece()) {
        let table = piece.rotations();
        for placement in &enumerate_placements(&board, table) {
            let shape = table.get(placement.rotation).expect("rotation from table");
            prop_assert!(can_place(&board, shape, placement.x, placement.y));
            prop_assert!(collides(&board, shape, placement.x, placement.y + 1));
        }
    }

    #[test]
    fn drop_row_matches_stepwise_fall(board in arb_board(), piece in arb_piece()) {
        for (_, shape) in piece.rotations().iter() {
            if shape.width() > board.width() {
                continue;
            }
            for x in 0..=board.width() - shape.width() {
                prop_assert_eq!(drop_row(&board, shape, x).ok(), stepwise_fall(&board, shape, x));
            }
        }
    }

    #[test]
    fn enumeration_is_non_empty_when_any_column_is_reachable(
        board in arb_board(),
        piece in arb_piece(),
    ) {
        let table = piece.rotations();
        let reachable = table.iter().any(|(_, shape)| {
            shape.width() <= board.width()
                && (0..=board.width() - shape.width())
                    .any(|x| stepwise_fall(&board, shape, x).is_some())
        });
        prop_assert_eq!(reachable, !enumerate_placements(&board, table).is_empty());
    }

    #[test]
    fn raising_a_column_never_lowers_the_resting_row(
        board in arb_board(),
        piece in arb_piece(),
        rotation in 0u8..4,
        x_seed in any::<usize>(),
        column_seed in any::<usize>(),
    ) {
        let table = piece.rotations();
        let shape = piece.shape().rotate(rotation as u32);
        prop_assume!(shape.width() <= board.width());
        let x = x_seed % (board.width() - shape.width() + 1);
        let column = x + column_seed % shape.width();

        let before = drop_row(&board, &shape, x);
        let mut raised = board.clone();
        prop_assume!(raise_column(&mut raised, column));
        let after = drop_row(&raised, &shape, x);

        match (before, after) {
            (Ok(old), Ok(new)) => prop_assert!(new <= old),
            (Err(DropError::Blocked), after) => prop_assert_eq!(after, Err(DropError::Blocked)),
            (Ok(_), Err(err)) => prop_assert_eq!(err, DropError::Blocked),
            (Err(err), _) => prop_assert!(false, "unexpected {err}"),
        }
        // the table's own copy of this rotation, when distinct, agrees
        if let Some(state) = table.get(rotation) {
            prop_assert_eq!(drop_row(&board, state, x), before);
        }
    }
}
