use revtris_wasm::*;
use serde::Serialize;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_board_new() {
    let board = JsBoard::new(10, 20).unwrap();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.get(0, 0), ".");
    assert_eq!(board.get(10, 0), "");
}

#[wasm_bindgen_test]
fn test_board_rejects_zero_size() {
    assert!(JsBoard::new(0, 20).is_err());
}

#[wasm_bindgen_test]
fn test_set_get_and_clear() {
    let mut board = JsBoard::new(4, 4).unwrap();
    for x in 0..4 {
        board.set(x, 3, "T").unwrap();
    }
    board.set(1, 2, "#").unwrap();
    assert_eq!(board.get(0, 3), "T");
    assert!(board.set(9, 9, "T").is_err());
    assert!(board.set(0, 0, "X").is_err());

    assert_eq!(board.clear_lines(), 1);
    assert_eq!(board.to_rows(), vec!["....", "....", "....", ".#.."]);
}

#[wasm_bindgen_test]
fn test_from_rows_roundtrip() {
    let rows: Vec<String> = vec!["....".into(), ".I..".into(), "#OO#".into()];
    let board = JsBoard::from_rows(rows.clone()).unwrap();
    assert_eq!(board.to_rows(), rows);
    assert!(JsBoard::from_rows(vec!["..".into(), "...".into()]).is_err());
}

#[wasm_bindgen_test]
fn test_select_move_on_empty_board() {
    let board = JsBoard::new(10, 20).unwrap();
    let chosen = select_move(&board, "O", "hard").unwrap();
    let placement: JsPlacement = serde_wasm_bindgen::from_value(chosen).unwrap();
    assert_eq!(placement.rotation, 0);
    assert_eq!(placement.x, 0);
    assert_eq!(placement.y, 18);
}

#[wasm_bindgen_test]
fn test_select_move_full_board_is_null() {
    let rows: Vec<String> = (0..20).map(|_| "##########".to_string()).collect();
    let board = JsBoard::from_rows(rows).unwrap();
    assert!(select_move(&board, "T", "easy").unwrap().is_null());
}

#[wasm_bindgen_test]
fn test_select_move_rejects_bad_input() {
    let board = JsBoard::new(10, 20).unwrap();
    assert!(select_move(&board, "Q", "hard").is_err());
    assert!(select_move(&board, "T", "nightmare").is_err());
}

#[wasm_bindgen_test]
fn test_select_move_with_profile_object() {
    let board = JsBoard::new(10, 20).unwrap();
    let profile = serde_json::json!({
        "name": "spiteful",
        "policy": { "kind": "worst_k", "k": 1 }
    });
    let profile = profile
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap();
    let chosen = select_move_with_profile(&board, "I", profile).unwrap();
    assert!(!chosen.is_null());
}

#[wasm_bindgen_test]
fn test_rotate_piece_matrix() {
    let value = rotate_piece("T", 1).unwrap();
    let matrix: Vec<Vec<u8>> = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(matrix, vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    assert!(rotate_piece("", 1).is_err());
}

#[wasm_bindgen_test]
fn test_evaluate_board() {
    let board = JsBoard::new(10, 20).unwrap();
    assert_eq!(evaluate_board(&board, "normal").unwrap(), 0.0);

    let rows: Vec<String> = (0..20)
        .map(|y| if y < 18 { ".........." } else { "#........." })
        .map(String::from)
        .collect();
    let stacked = JsBoard::from_rows(rows).unwrap();
    assert!(evaluate_board(&stacked, "hard").unwrap() < 0.0);
}

#[wasm_bindgen_test]
fn test_game_session() {
    let mut game = JsGame::new("hard", 10, 20).unwrap();
    let turn: serde_json::Value =
        serde_wasm_bindgen::from_value(game.send_piece("T").unwrap()).unwrap();
    assert_eq!(turn["kind"], "placed");
    assert_eq!(game.score(), 10);
    assert_eq!(game.pieces_sent(), 1);
    assert!(!game.is_over());
    assert_eq!(game.board().to_rows().len(), 20);

    game.set_difficulty("easy").unwrap();
    assert_eq!(game.difficulty(), "easy");
    assert!(game.set_difficulty("nope").is_err());

    game.reset();
    assert_eq!(game.score(), 0);
    assert_eq!(game.max_height(), 0);
}

#[wasm_bindgen_test]
fn test_piece_color() {
    assert_eq!(piece_color("L").unwrap(), "#f0a000");
}
