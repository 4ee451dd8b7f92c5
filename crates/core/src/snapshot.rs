//! Read-only values handed to the presentation shell.
//!
//! Everything here is plain `Copy`/`Clone` data computed by the engine. The
//! shell may hold on to these across frames (e.g. to animate) without any
//! risk of the engine changing them.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{
    Cell, Direction, GameState, Pos, Tile, TileId, BOARD_SIZE, CELL_COUNT, MAX_MERGES,
};

/// Frozen copy of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardSnapshot {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .flatten()
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().flat_map(|row| row.iter().flatten().copied())
    }

    /// Look a tile up by identity.
    pub fn find(&self, id: TileId) -> Option<Tile> {
        self.tiles().find(|t| t.id == id)
    }

    /// Tile values (0 = empty).
    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        self.cells
            .map(|row| row.map(|cell| cell.map_or(0, |t| t.value)))
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let mut out = Self::empty();
        for tile in board.tiles() {
            out.cells[tile.pos.row as usize][tile.pos.col as usize] = Some(tile);
        }
        out
    }
}

/// A merge produced by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEvent {
    /// Id of the surviving tile
    pub tile_id: TileId,
    /// Value after doubling
    pub value: u32,
    /// Cell the survivor ends up in
    pub pos: Pos,
}

/// A tile placed by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnEvent {
    pub tile_id: TileId,
    pub value: u32,
    pub pos: Pos,
}

impl From<Tile> for SpawnEvent {
    fn from(tile: Tile) -> Self {
        Self {
            tile_id: tile.id,
            value: tile.value,
            pos: tile.pos,
        }
    }
}

/// What happened to one pre-move tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFate {
    /// Kept its identity and value, possibly at a new cell
    Slid,
    /// Survived a merge: same identity, doubled value
    Merged,
    /// Destroyed by a merge; `to` is the cell it merged into
    Consumed,
}

/// Movement of one pre-move tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMotion {
    pub id: TileId,
    /// Value before the move
    pub value: u32,
    pub from: Pos,
    pub to: Pos,
    pub fate: TileFate,
}

impl TileMotion {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Outcome of one move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub direction: Direction,
    /// False for blocked moves and moves outside `InProgress`
    pub changed: bool,
    /// Grid after the move (and after the spawn, if any)
    pub grid: BoardSnapshot,
    pub merges: ArrayVec<MergeEvent, MAX_MERGES>,
    /// One entry per tile that was on the board before the move
    pub motions: ArrayVec<TileMotion, CELL_COUNT>,
    pub spawned: Option<SpawnEvent>,
    /// Points gained (sum of merged values)
    pub score_delta: u32,
    pub state: GameState,
}

impl MoveResult {
    /// A move that did nothing.
    pub fn unchanged(direction: Direction, grid: BoardSnapshot, state: GameState) -> Self {
        Self {
            direction,
            changed: false,
            grid,
            merges: ArrayVec::new(),
            motions: ArrayVec::new(),
            spawned: None,
            score_delta: 0,
            state,
        }
    }

    fn ids_with(&self, fate: TileFate) -> impl Iterator<Item = TileId> + '_ {
        self.motions
            .iter()
            .filter(move |m| m.fate == fate)
            .map(|m| m.id)
    }

    /// Tiles whose identity and value survived (possibly relocated).
    pub fn relocated_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids_with(TileFate::Slid)
    }

    /// Tiles that survived a merge with doubled value.
    pub fn merged_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids_with(TileFate::Merged)
    }

    /// Tiles destroyed by merges.
    pub fn consumed_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids_with(TileFate::Consumed)
    }
}

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub state: GameState,
    pub score: u32,
    pub moves: u32,
    pub max_tile: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state.accepts_moves()
    }
}
