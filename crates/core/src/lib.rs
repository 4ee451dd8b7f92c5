//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the 2048 board engine: grid state, tile identity, the
//! slide/merge rule, spawning and terminal-state detection.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule, integration tests in `tests/`
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation moves (`arrayvec` for bounded lists)
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid of tiles, line access, move availability
//! - [`collapse`]: Slide-and-merge rule for one line
//! - [`game`]: The engine: start/reset, moves, spawning, win/loss
//! - [`rng`]: Seeded LCG used for spawn cells and values
//! - [`snapshot`]: Read-only values handed to the shell (`MoveResult`, `GameSnapshot`)
//!
//! # Game Rules
//!
//! - Every move slides all tiles toward one edge; equal neighbours merge once per move
//! - A move that changes nothing is ignored (no spawn)
//! - After each real move a 2 (90%) or 4 (10%) appears on a random empty cell
//! - A tile of 2048 or more wins; a full board without equal neighbours loses
//!
//! # Example
//!
//! ```
//! use tui_2048_core::Game;
//! use tui_2048_types::{Direction, GameState};
//!
//! let mut game = Game::new(12345);
//! game.start();
//! assert_eq!(game.state(), GameState::InProgress);
//!
//! let result = game.apply_move(Direction::Left);
//! if result.changed {
//!     assert!(result.spawned.is_some());
//! }
//! ```

pub mod board;
pub mod collapse;
pub mod game;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Line};
pub use collapse::{collapse_line, Collapsed, LineMerge};
pub use game::Game;
pub use rng::SimpleRng;
pub use snapshot::{
    BoardSnapshot, GameSnapshot, MergeEvent, MoveResult, SpawnEvent, TileFate, TileMotion,
};
