//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`]. One key press is
//! one action; 2048 has no auto-repeat or timing rules.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
