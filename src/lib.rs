//! TapChess - tap-driven chess board interaction
//!
//! Select a piece, see its legal destinations, tap a destination to move,
//! undo and redo with correct branch invalidation. Chess rules come from
//! `shakmaty`; this crate owns the interaction state machine, the history
//! around it and the coordinate mapping front ends share.

pub mod core;
pub mod game;
pub mod input;
pub mod ui;

pub use game::{BoardSnapshot, ChessSession};
