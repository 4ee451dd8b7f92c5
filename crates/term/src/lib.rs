//! Terminal presentation shell.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a simple framebuffer that is then flushed to a terminal backend, and keeps
//! the short-lived animation state (flashes, merge messages) the engine does
//! not know about.
//!
//! Goals:
//! - Keep `core` deterministic and free of presentation state
//! - Treat engine output as read-only snapshots
//! - Allow precise control over tile size and aspect ratio

pub mod fb;
pub mod feedback;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use feedback::{Feedback, FloatingMessage, Highlight, MERGE_MESSAGES};
pub use game_view::{tile_colors, AnchorY, GameView, Viewport, MAX_CELL_SIZE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
