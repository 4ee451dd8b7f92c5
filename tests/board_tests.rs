//! Board tests - grid storage, line access and move availability

use tui_2048::core::Board;
use tui_2048::types::{Direction, Pos, Tile, TileId, BOARD_SIZE, CELL_COUNT};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.size(), BOARD_SIZE);

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            assert!(board.is_empty_at(row, col), "Cell ({}, {}) should be empty", row, col);
            assert_eq!(board.get(row, col), Some(None));
        }
    }
    assert_eq!(board.empty_cells().len(), CELL_COUNT);
    assert!(!board.is_full());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(BOARD_SIZE, 0), None);
    assert_eq!(board.get(0, BOARD_SIZE), None);
    assert!(!board.is_empty_at(BOARD_SIZE, 0));
}

#[test]
fn test_place_and_take() {
    let mut board = Board::new();
    let tile = Tile::new(TileId(3), 16, Pos::new(1, 2));

    assert!(board.place(tile));
    assert_eq!(board.tile_at(Pos::new(1, 2)), Some(tile));
    assert!(!board.is_empty_at(1, 2));

    assert_eq!(board.take(1, 2), Some(tile));
    assert!(board.is_empty_at(1, 2));
    assert_eq!(board.take(1, 2), None);
}

#[test]
fn test_empty_cells_in_row_major_order() {
    let board = Board::from_values([[2, 0, 4, 8], [16, 32, 64, 128], [2, 4, 8, 16], [32, 64, 0, 2]]);
    let empty: Vec<Pos> = board.empty_cells().into_iter().collect();
    assert_eq!(empty, vec![Pos::new(0, 1), Pos::new(3, 2)]);
}

#[test]
fn test_can_move_with_empty_cell() {
    let board = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
    assert!(board.can_move());
}

#[test]
fn test_can_move_with_horizontal_pair() {
    let board = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]);
    assert!(board.is_full());
    assert!(board.can_move());
}

#[test]
fn test_can_move_with_vertical_pair() {
    let board = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [4, 2, 4, 8]]);
    assert!(board.can_move());
}

#[test]
fn test_cannot_move_when_full_without_pairs() {
    let board = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    assert!(board.is_full());
    assert!(!board.can_move());
}

#[test]
fn test_line_and_write_line_keep_positions_consistent() {
    let mut board = Board::from_values([[0, 0, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0], [0, 4, 0, 0]]);

    let column = board.line(Direction::Down, 1);
    assert_eq!(column[0].unwrap().value, 4);
    assert_eq!(column[2].unwrap().value, 2);

    let mut packed = [None; BOARD_SIZE];
    packed[0] = column[0];
    packed[1] = column[2];
    board.write_line(Direction::Down, 1, &packed);

    assert!(board.positions_consistent());
    assert_eq!(board.values()[3][1], 4);
    assert_eq!(board.values()[2][1], 2);
    assert_eq!(board.tile_at(Pos::new(2, 1)).unwrap().pos, Pos::new(2, 1));
}

#[test]
fn test_same_layout_compares_ids_and_values() {
    let a = Board::from_values([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    let mut b = a;
    assert!(a.same_layout(&b));

    // Same value, different identity.
    b.place(Tile::new(TileId(9), 2, Pos::new(0, 0)));
    assert!(!a.same_layout(&b));

    // Same identity, different value.
    let mut c = a;
    c.place(Tile::new(TileId(0), 4, Pos::new(0, 0)));
    assert!(!a.same_layout(&c));
}

#[test]
fn test_value_helpers() {
    let board = Board::from_values([[2, 0, 0, 0], [0, 1024, 0, 0], [0, 0, 4, 0], [0, 0, 0, 0]]);
    assert_eq!(board.max_value(), 1024);
    assert_eq!(board.value_sum(), 1030);
    assert_eq!(board.tile_count(), 3);

    let mut board = board;
    board.clear();
    assert_eq!(board.tile_count(), 0);
    assert_eq!(board.max_value(), 0);
}
