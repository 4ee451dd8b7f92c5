//! Game module - the board engine
//!
//! This module ties together the board, the collapse rule and the RNG. It
//! owns the only mutable game data (grid, id counter, state, score) and
//! exposes it through value snapshots.

use arrayvec::ArrayVec;
use log::{debug, trace, warn};

use crate::board::Board;
use crate::collapse::collapse_line;
use crate::rng::SimpleRng;
use crate::snapshot::{
    BoardSnapshot, GameSnapshot, MergeEvent, MoveResult, SpawnEvent, TileFate, TileMotion,
};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    rng: SimpleRng,
    /// Seed the game was created with.
    seed: u32,
    /// Next id handed to a spawned tile (never reused within a game).
    next_id: u32,
    state: GameState,
    score: u32,
    /// Number of committed (board-changing) moves.
    moves: u32,
}

impl Game {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            rng: SimpleRng::new(seed),
            seed,
            next_id: 0,
            state: GameState::NotStarted,
            score: 0,
            moves: 0,
        }
    }

    /// Resume from a prepared board, already in progress.
    ///
    /// Freshly spawned tiles get ids above every id on `board`.
    pub fn from_board(seed: u32, board: Board) -> Self {
        let next_id = board.max_id().map_or(0, |id| id.0 + 1);
        Self {
            board,
            next_id,
            state: GameState::InProgress,
            ..Self::new(seed)
        }
    }

    /// Clear the grid and go back to `NotStarted`.
    ///
    /// The RNG keeps its position so the next game plays out differently.
    pub fn reset(&mut self) {
        debug!(
            "reset: state={} score={} moves={}",
            self.state.as_str(),
            self.score,
            self.moves
        );
        self.board.clear();
        self.next_id = 0;
        self.state = GameState::NotStarted;
        self.score = 0;
        self.moves = 0;
    }

    /// Place the opening tiles.
    ///
    /// Returns false (and does nothing) unless the game is `NotStarted`.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::NotStarted {
            return false;
        }
        for _ in 0..INITIAL_TILES {
            self.spawn_random_tile();
        }
        self.state = GameState::InProgress;
        debug!("start: {} tiles placed", self.board.tile_count());
        true
    }

    /// Put a 2 (or, one time in ten, a 4) on a random empty cell.
    ///
    /// Returns `None` when the board is full.
    pub fn spawn_random_tile(&mut self) -> Option<SpawnEvent> {
        let empty = self.board.empty_cells();
        let pos = *self.rng.choose(&empty)?;
        let value = if self
            .rng
            .chance(SPAWN_FOUR_NUMERATOR, SPAWN_FOUR_DENOMINATOR)
        {
            4
        } else {
            2
        };

        let tile = Tile::new(TileId(self.next_id), value, pos);
        self.next_id += 1;
        let placed = self.board.place(tile);
        debug_assert!(placed, "spawn position {:?} off the board", pos);
        Some(SpawnEvent::from(tile))
    }

    /// Slide every line toward `direction`, merge, spawn and re-evaluate the state.
    ///
    /// Moves outside `InProgress` and moves that change nothing report
    /// `changed = false` and leave the game untouched.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        if !self.state.accepts_moves() {
            return MoveResult::unchanged(direction, self.board_snapshot(), self.state);
        }

        let mut next = Board::new();
        let mut merges = ArrayVec::new();
        let mut motions = ArrayVec::new();
        let mut score_delta = 0;

        for line in 0..BOARD_SIZE {
            let collapsed = collapse_line(&self.board.line(direction, line));

            for (offset, cell) in collapsed.cells.iter().enumerate() {
                let Some(tile) = cell else {
                    continue;
                };
                let to = direction.line_pos(line, offset);
                let (fate, before) = if collapsed.merged_at(offset) {
                    (TileFate::Merged, tile.value / 2)
                } else {
                    (TileFate::Slid, tile.value)
                };
                motions.push(TileMotion {
                    id: tile.id,
                    value: before,
                    from: tile.pos,
                    to,
                    fate,
                });
            }

            for merge in &collapsed.merges {
                let to = direction.line_pos(line, merge.offset);
                motions.push(TileMotion {
                    id: merge.consumed.id,
                    value: merge.consumed.value,
                    from: merge.consumed.pos,
                    to,
                    fate: TileFate::Consumed,
                });
                merges.push(MergeEvent {
                    tile_id: merge.survivor.id,
                    value: merge.survivor.value,
                    pos: to,
                });
            }

            score_delta += collapsed.merged_value();
            next.write_line(direction, line, &collapsed.cells);
        }

        if next.same_layout(&self.board) {
            return MoveResult::unchanged(direction, self.board_snapshot(), self.state);
        }

        self.board = next;
        self.score += score_delta;
        self.moves += 1;

        let spawned = self.spawn_random_tile();
        if spawned.is_none() {
            warn!("move {} changed the board but left no empty cell", direction);
        }

        let state = self.check_status();
        trace!(
            "move {}: merges={} spawned={:?} score={} state={}",
            direction,
            merges.len(),
            spawned,
            self.score,
            state.as_str()
        );

        MoveResult {
            direction,
            changed: true,
            grid: self.board_snapshot(),
            merges,
            motions,
            spawned,
            score_delta,
            state,
        }
    }

    /// Parse a direction name and apply it.
    ///
    /// Unknown names are rejected without touching the game.
    pub fn try_move(&mut self, direction: &str) -> Result<MoveResult, EngineError> {
        let direction: Direction = direction.parse()?;
        Ok(self.apply_move(direction))
    }

    /// Apply a shell action.
    ///
    /// Only moves produce a [`MoveResult`].
    pub fn apply_action(&mut self, action: GameAction) -> Option<MoveResult> {
        match action {
            GameAction::Move(direction) => Some(self.apply_move(direction)),
            GameAction::Start => {
                self.start();
                None
            }
            GameAction::Restart => {
                self.reset();
                self.start();
                None
            }
        }
    }

    /// Re-evaluate win/loss from scratch.
    ///
    /// A winning tile takes priority over a locked board. Outside
    /// `InProgress` the current state is returned unchanged.
    pub fn check_status(&mut self) -> GameState {
        if self.state != GameState::InProgress {
            return self.state;
        }

        if self.board.max_value() >= WIN_VALUE {
            self.state = GameState::Won;
        } else if !self.board.can_move() {
            self.state = GameState::Lost;
        }

        if self.state != GameState::InProgress {
            debug!(
                "game over: state={} score={} moves={}",
                self.state.as_str(),
                self.score,
                self.moves
            );
        }
        self.state
    }

    /// True if any move could still change the board.
    pub fn can_move(&self) -> bool {
        self.board.can_move()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(&self.board)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board_snapshot();
        out.state = self.state;
        out.score = self.score;
        out.moves = self.moves;
        out.max_tile = self.board.max_value();
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
