//! Short-lived visual feedback driven by move results.
//!
//! The engine reports what happened in a [`MoveResult`]; this module turns
//! that into per-tile flash timers and floating messages keyed by tile id.
//! It is owned by the shell and never feeds back into the engine.

use arrayvec::ArrayVec;

use crate::core::{MoveResult, SimpleRng};
use crate::types::{Pos, TileId, MAX_MERGES, MERGE_FLASH_MS, MESSAGE_MS, SPAWN_FLASH_MS};

/// Lines shown above a merge.
pub const MERGE_MESSAGES: [&str; 4] = [
    "You've got this!",
    "Keep going, you're doing great!",
    "Be proud of how far you've come!",
    "Your potential is endless!",
];

/// Upper bound on messages alive at once.
pub const MAX_MESSAGES: usize = 8;

/// A message floating near the cell where a merge happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingMessage {
    pub text: &'static str,
    pub pos: Pos,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flash {
    id: TileId,
    remaining_ms: u32,
}

/// How a tile should be highlighted this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Merged,
    Spawned,
}

#[derive(Debug, Clone)]
pub struct Feedback {
    rng: SimpleRng,
    merged: ArrayVec<Flash, MAX_MERGES>,
    spawned: Option<Flash>,
    messages: ArrayVec<FloatingMessage, MAX_MESSAGES>,
}

impl Feedback {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            merged: ArrayVec::new(),
            spawned: None,
            messages: ArrayVec::new(),
        }
    }

    /// Record the effects of a move. Unchanged moves are ignored.
    pub fn on_move(&mut self, result: &MoveResult) {
        if !result.changed {
            return;
        }

        // Highlights from the previous move are stale once tiles have moved.
        self.merged.clear();
        for merge in &result.merges {
            self.merged.push(Flash {
                id: merge.tile_id,
                remaining_ms: MERGE_FLASH_MS,
            });
            self.push_message(merge.pos);
        }

        self.spawned = result.spawned.map(|s| Flash {
            id: s.tile_id,
            remaining_ms: SPAWN_FLASH_MS,
        });
    }

    fn push_message(&mut self, pos: Pos) {
        let Some(&text) = self.rng.choose(&MERGE_MESSAGES) else {
            return;
        };
        if self.messages.is_full() {
            self.messages.remove(0);
        }
        self.messages.push(FloatingMessage {
            text,
            pos,
            remaining_ms: MESSAGE_MS,
        });
    }

    /// Age every timer by `elapsed_ms`, dropping the expired ones.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for flash in &mut self.merged {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.merged.retain(|f| f.remaining_ms > 0);

        if let Some(flash) = &mut self.spawned {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
            if flash.remaining_ms == 0 {
                self.spawned = None;
            }
        }

        for msg in &mut self.messages {
            msg.remaining_ms = msg.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.messages.retain(|m| m.remaining_ms > 0);
    }

    pub fn highlight(&self, id: TileId) -> Highlight {
        if self.merged.iter().any(|f| f.id == id) {
            Highlight::Merged
        } else if self.spawned.map_or(false, |f| f.id == id) {
            Highlight::Spawned
        } else {
            Highlight::None
        }
    }

    pub fn messages(&self) -> &[FloatingMessage] {
        &self.messages
    }

    /// Newest message, if any is still alive.
    pub fn latest_message(&self) -> Option<&FloatingMessage> {
        self.messages.last()
    }

    /// True while anything is still animating (the frame is not static).
    pub fn is_active(&self) -> bool {
        !self.merged.is_empty() || self.spawned.is_some() || !self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.merged.clear();
        self.spawned = None;
        self.messages.clear();
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(1)
    }
}
