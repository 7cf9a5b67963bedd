//! Error types for game module
//!
//! Provides custom error types for move submission, position loading and
//! input parsing. None of these are fatal: a rejected move leaves every piece
//! of game state untouched and the caller simply clears its selection.

use crate::game::types::{Move, Square};

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The rules engine does not list this move as legal in the current position
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// A move was requested from a square with no piece on it
    #[error("No piece on {square}")]
    EmptySquare { square: Square },

    /// Text that does not name a board square
    #[error("Invalid square: {input:?}")]
    InvalidSquare { input: String },

    /// Text that is not a UCI move
    #[error("Invalid move notation: {input:?}")]
    InvalidMove { input: String },

    /// FEN that failed to parse or describes an impossible position
    #[error("Invalid FEN {fen:?}: {message}")]
    InvalidFen { fen: String, message: String },

    /// A promotion piece was chosen while no promotion was pending
    #[error("No promotion is pending")]
    NoPendingPromotion,
}

impl GameError {
    /// True for user intents that failed the legality check
    ///
    /// These are recovered locally and surface only as "selection cleared,
    /// no move made".
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::IllegalMove { .. } | GameError::EmptySquare { .. }
        )
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
