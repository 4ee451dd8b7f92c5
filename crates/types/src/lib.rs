//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (board engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Size**: 4x4 cells, rows and columns indexed 0-3
//! - **Win tile**: 2048
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and only matter to the presentation shell:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `MERGE_FLASH_MS` | 300 | Highlight duration for merge results |
//! | `SPAWN_FLASH_MS` | 150 | Highlight duration for a spawned tile |
//! | `MESSAGE_MS` | 700 | Lifetime of a floating merge message |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GameState, BOARD_SIZE};
//!
//! let dir: Direction = "left".parse().unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!(dir.is_horizontal());
//! assert!("sideways".parse::<Direction>().is_err());
//!
//! assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
//! assert!(!GameState::NotStarted.is_terminal());
//! assert_eq!(BOARD_SIZE, 4);
//! ```

use std::fmt;
use std::str::FromStr;

/// Board edge length in cells.
pub const BOARD_SIZE: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A tile of at least this value wins the game.
pub const WIN_VALUE: u32 = 2048;

/// Number of tiles placed by `start`.
pub const INITIAL_TILES: usize = 2;

/// Spawned tiles are a 4 with probability NUMERATOR / DENOMINATOR, otherwise a 2.
pub const SPAWN_FOUR_NUMERATOR: u32 = 1;

/// See [`SPAWN_FOUR_NUMERATOR`].
pub const SPAWN_FOUR_DENOMINATOR: u32 = 10;

/// Upper bound on merges in a single move (every line merges at most twice).
pub const MAX_MERGES: usize = CELL_COUNT / 2;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Highlight duration for a merge-result tile.
pub const MERGE_FLASH_MS: u32 = 300;

/// Highlight duration for a freshly spawned tile.
pub const SPAWN_FLASH_MS: u32 = 150;

/// Lifetime of a floating merge message.
pub const MESSAGE_MS: u32 = 700;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_constants_are_consistent() {
        assert_eq!(CELL_COUNT, 16);
        assert_eq!(MAX_MERGES, 8);
        assert!(WIN_VALUE.is_power_of_two());
        assert!(SPAWN_FOUR_NUMERATOR < SPAWN_FOUR_DENOMINATOR);
    }

    #[test]
    fn direction_parsing_accepts_names_and_letters() {
        assert_eq!("Left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("R".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" down ".parse::<Direction>().unwrap(), Direction::Down);

        let err = "north".parse::<Direction>().unwrap_err();
        assert_eq!(err, EngineError::InvalidDirection("north".to_string()));
    }

    #[test]
    fn direction_codes_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir as u8), Ok(dir));
        }
        assert_eq!(
            Direction::try_from(9u8),
            Err(EngineError::InvalidDirectionCode(9))
        );
    }

    #[test]
    fn target_end_orientation() {
        assert!(!Direction::Left.toward_far_end());
        assert!(!Direction::Up.toward_far_end());
        assert!(Direction::Right.toward_far_end());
        assert!(Direction::Down.toward_far_end());
    }

    #[test]
    fn terminal_states() {
        assert!(GameState::Won.is_terminal());
        assert!(GameState::Lost.is_terminal());
        assert!(!GameState::InProgress.is_terminal());
        assert!(GameState::InProgress.accepts_moves());
        assert!(!GameState::Won.accepts_moves());
    }
}

/// Errors surfaced by the board engine.
///
/// Nothing in the engine is fatal; these only reject malformed caller input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("invalid direction code: {0}")]
    InvalidDirectionCode(u8),
}

/// The four slide directions.
///
/// Left/Up slide toward index 0 of a line, Right/Down toward index N-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Rows are the lines for horizontal moves, columns for vertical ones.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when tiles gather at index N-1 of each line.
    pub fn toward_far_end(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Board position of the `offset`-th cell (counted from the target end) of line `line`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, Pos};
    ///
    /// assert_eq!(Direction::Left.line_pos(1, 0), Pos::new(1, 0));
    /// assert_eq!(Direction::Right.line_pos(1, 0), Pos::new(1, 3));
    /// assert_eq!(Direction::Up.line_pos(2, 1), Pos::new(1, 2));
    /// assert_eq!(Direction::Down.line_pos(2, 1), Pos::new(2, 2));
    /// ```
    pub fn line_pos(&self, line: usize, offset: usize) -> Pos {
        let last = BOARD_SIZE - 1;
        let (row, col) = match self {
            Direction::Left => (line, offset),
            Direction::Right => (line, last - offset),
            Direction::Up => (offset, line),
            Direction::Down => (last - offset, line),
        };
        Pos::new(row as u8, col as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts full names or single letters (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Up),
            3 => Ok(Direction::Down),
            _ => Err(EngineError::InvalidDirectionCode(code)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }

    /// Moves are only applied while a game is running.
    pub fn accepts_moves(&self) -> bool {
        *self == GameState::InProgress
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::NotStarted => "not_started",
            GameState::InProgress => "in_progress",
            GameState::Won => "won",
            GameState::Lost => "lost",
        }
    }
}

/// Actions the shell feeds into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward one edge
    Move(Direction),
    /// Place the two opening tiles (only from `NotStarted`)
    Start,
    /// Reset and immediately start a new game
    Restart,
}

impl GameAction {
    /// Parse an action name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("start"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("Down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            other => other.parse().ok().map(GameAction::Move),
        }
    }
}

/// Logical grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major flat index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8)
    }
}

/// Identity of one tile, unique within a game and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A numbered tile.
///
/// Tiles are immutable values: a move produces new `Tile` values at new
/// positions rather than editing the old ones, so a snapshot handed to the
/// shell never changes underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub pos: Pos,
}

impl Tile {
    pub fn new(id: TileId, value: u32, pos: Pos) -> Self {
        Self { id, value, pos }
    }

    /// Same tile at another cell.
    pub fn at(self, pos: Pos) -> Self {
        Self { pos, ..self }
    }

    /// Same tile with its value doubled (the survivor of a merge).
    pub fn doubled(self) -> Self {
        Self {
            value: self.value * 2,
            ..self
        }
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(Tile)`: Cell holding the given tile
pub type Cell = Option<Tile>;
