//! Collapse tests - the single-line slide and merge rule

use tui_2048::core::{collapse_line, Board, Line};
use tui_2048::types::{Direction, Pos, Tile, TileId, BOARD_SIZE};

fn line(values: [u32; BOARD_SIZE]) -> Line {
    let mut out = [None; BOARD_SIZE];
    for (i, &v) in values.iter().enumerate() {
        if v != 0 {
            out[i] = Some(Tile::new(TileId(i as u32), v, Pos::new(0, i as u8)));
        }
    }
    out
}

fn collapse(values: [u32; BOARD_SIZE]) -> [u32; BOARD_SIZE] {
    collapse_line(&line(values)).cells.map(|c| c.map_or(0, |t| t.value))
}

#[test]
fn single_pass_merge_rule() {
    assert_eq!(collapse([2, 2, 2, 0]), [4, 2, 0, 0]);
    assert_eq!(collapse([2, 2, 2, 2]), [4, 4, 0, 0]);
    assert_eq!(collapse([4, 2, 2, 0]), [4, 4, 0, 0]);
    assert_eq!(collapse([8, 4, 4, 8]), [8, 8, 8, 0]);
}

#[test]
fn compaction_toward_the_target_end() {
    assert_eq!(collapse([0, 2, 0, 2]), [4, 0, 0, 0]);
    assert_eq!(collapse([0, 0, 0, 2]), [2, 0, 0, 0]);
    assert_eq!(collapse([0, 4, 0, 8]), [4, 8, 0, 0]);
    assert_eq!(collapse([2, 4, 8, 16]), [2, 4, 8, 16]);
}

#[test]
fn same_line_collapsed_both_ways() {
    // Row [_, 2, _, 2] moved left and right.
    let board = Board::from_values([[0, 2, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

    let mut left = board;
    let out = collapse_line(&board.line(Direction::Left, 0));
    left.write_line(Direction::Left, 0, &out.cells);
    assert_eq!(left.values()[0], [4, 0, 0, 0]);

    let mut right = board;
    let out = collapse_line(&board.line(Direction::Right, 0));
    right.write_line(Direction::Right, 0, &out.cells);
    assert_eq!(right.values()[0], [0, 0, 0, 4]);
}

#[test]
fn each_tile_merges_at_most_once() {
    let out = collapse_line(&line([2, 2, 2, 2]));
    let mut ids: Vec<u32> = out
        .merges
        .iter()
        .flat_map(|m| [m.survivor.id.0, m.consumed.id.0])
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert_eq!(out.merges[0].survivor.id, TileId(0));
    assert_eq!(out.merges[1].survivor.id, TileId(2));
}

#[test]
fn merged_value_is_the_score_gain() {
    assert_eq!(collapse_line(&line([2, 2, 8, 8])).merged_value(), 20);
    assert_eq!(collapse_line(&line([2, 4, 8, 16])).merged_value(), 0);
}
