//! Collapse module - the per-line slide and merge rule
//!
//! A line arrives ordered from its target end (index 0 is where tiles
//! gather). Tiles are compacted toward index 0 and equal neighbours merge
//! pairwise, scanning from the target end:
//!
//! ```text
//! [2, 2, 2, _] -> [4, 2, _, _]   one merge, the third 2 only slides
//! [_, 2, _, 2] -> [4, _, _, _]
//! [2, 2, 4, 4] -> [4, 8, _, _]
//! [4, 4, 8, _] -> [8, 8, _, _]   a merge result never merges again
//! ```
//!
//! The tile nearer the target end survives a merge (same id, doubled value);
//! the other one is consumed. Positions stored in the returned tiles are the
//! ones they had before the move; the board restamps them when the line is
//! written back.

use arrayvec::ArrayVec;

use crate::board::Line;
use crate::types::{Tile, BOARD_SIZE};

/// Maximum merges within one line.
pub const MAX_LINE_MERGES: usize = BOARD_SIZE / 2;

/// One merge inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMerge {
    /// Surviving tile, value already doubled
    pub survivor: Tile,
    /// Tile that disappears into the survivor
    pub consumed: Tile,
    /// Offset (from the target end) the survivor ends up at
    pub offset: usize,
}

/// Result of collapsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapsed {
    pub cells: Line,
    pub merges: ArrayVec<LineMerge, MAX_LINE_MERGES>,
}

impl Collapsed {
    /// True if the survivor at `offset` came out of a merge.
    pub fn merged_at(&self, offset: usize) -> bool {
        self.merges.iter().any(|m| m.offset == offset)
    }

    /// Sum of the values produced by merges.
    pub fn merged_value(&self) -> u32 {
        self.merges.iter().map(|m| m.survivor.value).sum()
    }
}

/// Collapse a line toward index 0.
pub fn collapse_line(line: &Line) -> Collapsed {
    let compact: ArrayVec<Tile, BOARD_SIZE> = line.iter().flatten().copied().collect();

    let mut cells: Line = [None; BOARD_SIZE];
    let mut merges = ArrayVec::new();
    let mut write = 0;
    let mut read = 0;

    while read < compact.len() {
        let current = compact[read];
        match compact.get(read + 1) {
            Some(next) if next.value == current.value => {
                let survivor = current.doubled();
                cells[write] = Some(survivor);
                merges.push(LineMerge {
                    survivor,
                    consumed: *next,
                    offset: write,
                });
                read += 2;
            }
            _ => {
                cells[write] = Some(current);
                read += 1;
            }
        }
        write += 1;
    }

    Collapsed { cells, merges }
}
