//! Board module - manages the tile grid
//!
//! The board is a 4x4 grid where each cell is empty or holds one [`Tile`].
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col), row 0 is the top, col 0 is the left edge.

use arrayvec::ArrayVec;

use crate::types::{Cell, Direction, Pos, Tile, TileId, BOARD_SIZE, CELL_COUNT};

/// One line of the board, ordered from the target end of a move.
pub type Line = [Cell; BOARD_SIZE];

/// The game board - 4x4 cells using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Build a board from tile values (0 = empty).
    ///
    /// Ids are handed out in row-major order starting at 0.
    pub fn from_values(values: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        let mut next_id = 0;
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let pos = Pos::new(row as u8, col as u8);
                board.place(Tile::new(TileId(next_id), value, pos));
                next_id += 1;
            }
        }
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        Some(row * BOARD_SIZE + col)
    }

    /// Get board edge length
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Tile at a position, if any.
    pub fn tile_at(&self, pos: Pos) -> Cell {
        self.get(pos.row as usize, pos.col as usize).flatten()
    }

    /// Store a tile at its recorded position, replacing whatever was there.
    ///
    /// Returns false if the tile's position is out of bounds.
    pub fn place(&mut self, tile: Tile) -> bool {
        match Self::index(tile.pos.row as usize, tile.pos.col as usize) {
            Some(idx) => {
                self.cells[idx] = Some(tile);
                true
            }
            None => false,
        }
    }

    /// Empty the cell at (row, col)
    /// Returns the removed tile
    pub fn take(&mut self, row: usize, col: usize) -> Cell {
        Self::index(row, col).and_then(|idx| self.cells[idx].take())
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Positions of all empty cells in row-major order
    pub fn empty_cells(&self) -> ArrayVec<Pos, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| Pos::from_index(idx))
            .collect()
    }

    /// Check if every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// True if some move could still change the board.
    ///
    /// Either a cell is empty or a right/down neighbour shares a value.
    pub fn can_move(&self) -> bool {
        if !self.is_full() {
            return true;
        }

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let Some(tile) = self.cells[row * BOARD_SIZE + col] else {
                    continue;
                };
                let right = self.get(row, col + 1).flatten();
                let down = self.get(row + 1, col).flatten();
                if right.map_or(false, |t| t.value == tile.value)
                    || down.map_or(false, |t| t.value == tile.value)
                {
                    return true;
                }
            }
        }

        false
    }

    /// Largest tile value, 0 on an empty board
    pub fn max_value(&self) -> u32 {
        self.tiles().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn value_sum(&self) -> u32 {
        self.tiles().map(|t| t.value).sum()
    }

    /// Highest id present on the board
    pub fn max_id(&self) -> Option<TileId> {
        self.tiles().map(|t| t.id).max()
    }

    /// Iterate over all tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Number of tiles on the board
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Read line `line` of a move, ordered from the direction's target end
    pub fn line(&self, direction: Direction, line: usize) -> Line {
        let mut out = [None; BOARD_SIZE];
        for (offset, slot) in out.iter_mut().enumerate() {
            *slot = self.tile_at(direction.line_pos(line, offset));
        }
        out
    }

    /// Write a collapsed line back, stamping each tile with its new cell
    pub fn write_line(&mut self, direction: Direction, line: usize, cells: &Line) {
        for (offset, cell) in cells.iter().enumerate() {
            let pos = direction.line_pos(line, offset);
            self.cells[pos.index()] = cell.map(|tile| tile.at(pos));
        }
    }

    /// True when both boards hold the same (id, value) in every cell.
    ///
    /// This is the change test for a move: slides change ids per cell,
    /// merges change values, and a blocked move changes neither.
    pub fn same_layout(&self, other: &Board) -> bool {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .all(|(a, b)| match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.id == b.id && a.value == b.value,
                _ => false,
            })
    }

    /// Check the position invariant: every tile records the cell it sits in
    pub fn positions_consistent(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(idx, cell)| cell.map_or(true, |t| t.pos.index() == idx))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy tile values into a 2D grid (0 = empty)
    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        let mut out = [[0; BOARD_SIZE]; BOARD_SIZE];
        for tile in self.tiles() {
            out[tile.pos.row as usize][tile.pos.col as usize] = tile.value;
        }
        out
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
