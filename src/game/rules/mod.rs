//! Chess rules seam - the contract the game layer expects from a rules engine
//!
//! Move legality, check/mate/stalemate detection and FEN handling are owned
//! by an external rules engine. [`GameState`](crate::game::resources::GameState)
//! only talks to it through [`RulesEngine`], so the interaction layer never
//! touches engine internals and tests can swap in a different engine.
//!
//! The production implementation is
//! [`ChessEngine`](crate::game::resources::ChessEngine), backed by `shakmaty`.
//!
//! # Contract
//!
//! - `legal_moves` lists every legal move, optionally only those leaving a square
//! - `push_move` advances one ply; moves not in `legal_moves` are refused
//! - `pop_move` reverts exactly one ply and restores the prior position verbatim
//! - `to_fen` after `push_move` + `pop_move` equals `to_fen` before them


use crate::game::error::GameResult;
use crate::game::types::{Color, Move, Piece, Square};

/// Authoritative chess position with push/pop history
pub trait RulesEngine {
    /// All legal moves, or only those originating at `from`
    fn legal_moves(&self, from: Option<Square>) -> Vec<Move>;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    /// Advance the position one ply
    ///
    /// Returns [`GameError::IllegalMove`](crate::game::error::GameError::IllegalMove)
    /// and leaves the position unchanged if `mv` is not legal.
    fn push_move(&mut self, mv: Move) -> GameResult<()>;

    /// Revert one ply, returning the move that was undone
    fn pop_move(&mut self) -> Option<Move>;

    /// Moves played since the start position or the last FEN load, oldest first
    fn move_stack(&self) -> &[Move];

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    fn is_game_over(&self) -> bool;

    fn to_fen(&self) -> String;

    /// Replace the position and clear the move stack
    fn load_fen(&mut self, fen: &str) -> GameResult<()>;

    /// Back to the standard starting position with an empty move stack
    fn reset(&mut self);
}
