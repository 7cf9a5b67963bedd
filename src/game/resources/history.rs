//! Redo stack resource
//!
//! The forward move record (what has been played) lives inside the rules
//! engine as its push/pop move stack. This module holds the other half of
//! the history: moves that were undone and can still be replayed.
//!
//! # Invariants
//!
//! Maintained by [`GameState`](crate::game::resources::GameState), the only
//! writer:
//!
//! - Gains exactly one entry per successful undo
//! - Loses exactly one entry per successful redo
//! - Cleared by any new forward move, reset or position load, since
//!   branching invalidates every previously undone move
//!
//! So the stack never holds more moves than have been undone since the last
//! forward move or reset.

use crate::game::types::Move;

/// LIFO stack of undone moves, most recent undo last
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedoStack {
    moves: Vec<Move>,
}

impl RedoStack {
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub(crate) fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }

    /// The move a redo would replay next
    pub fn peek(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Undone moves in stack order (bottom first, next redo last)
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}
