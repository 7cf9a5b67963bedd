//! Game over state tracking and result management
//!
//! Tracks end-game conditions and provides methods for determining the
//! outcome and displaying results. Unlike a timer-driven game there is no
//! terminal latch here: the state is recomputed from the rules engine after
//! every move, undo and redo, so undoing a mating move brings the game back
//! to `Playing`.
//!
//! # Game Over Conditions
//!
//! ## Checkmate
//! - **WhiteWon**: Black is in check with no legal moves
//! - **BlackWon**: White is in check with no legal moves
//!
//! ## Draw Conditions
//! - **Stalemate**: Side to move has no legal moves but is NOT in check
//! - **InsufficientMaterial**: Neither player can deliver checkmate (e.g., K vs K)

use crate::game::rules::RulesEngine;
use crate::game::types::Color;
use serde::{Deserialize, Serialize};

/// Status flags read from the rules engine after a position change
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
    pub game_over: bool,
}

impl GameStatus {
    pub fn from_engine<E: RulesEngine + ?Sized>(engine: &E) -> Self {
        Self {
            check: engine.is_check(),
            checkmate: engine.is_checkmate(),
            stalemate: engine.is_stalemate(),
            insufficient_material: engine.is_insufficient_material(),
            game_over: engine.is_game_over(),
        }
    }
}

/// The game's end state, shown by front ends as the game-end overlay
///
/// # State Transitions
///
/// ```text
/// Playing ⇄ WhiteWon / BlackWon / Stalemate / InsufficientMaterial
/// ```
///
/// Transitions back to `Playing` happen only through undo, reset or loading
/// a new position.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum GameOverState {
    /// Game is still in progress
    #[default]
    Playing,

    /// White won by checkmate
    WhiteWon,

    /// Black won by checkmate
    BlackWon,

    /// Draw by stalemate
    ///
    /// The side to move has no legal moves but is not in check.
    Stalemate,

    /// Draw by insufficient material
    ///
    /// Neither player has enough pieces to deliver checkmate.
    InsufficientMaterial,
}

impl GameOverState {
    /// Derive the end state from status flags and the side to move
    ///
    /// On checkmate the side to move is the side that has been mated.
    pub fn from_status(status: GameStatus, side_to_move: Color) -> Self {
        if status.checkmate {
            match side_to_move {
                Color::White => GameOverState::BlackWon,
                Color::Black => GameOverState::WhiteWon,
            }
        } else if status.stalemate {
            GameOverState::Stalemate
        } else if status.insufficient_material {
            GameOverState::InsufficientMaterial
        } else {
            GameOverState::Playing
        }
    }

    /// Check if the game has ended
    ///
    /// Returns `true` for any non-Playing state.
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameOverState::Playing)
    }

    /// Get a human-readable message describing the game result
    pub fn message(&self) -> &'static str {
        match self {
            GameOverState::Playing => "Game in progress",
            GameOverState::WhiteWon => "White wins by checkmate!",
            GameOverState::BlackWon => "Black wins by checkmate!",
            GameOverState::Stalemate => "Draw by stalemate",
            GameOverState::InsufficientMaterial => "Draw by insufficient material",
        }
    }

    /// Get the winner of the game, if there is one
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOverState::WhiteWon => Some(Color::White),
            GameOverState::BlackWon => Some(Color::Black),
            _ => None,
        }
    }

    /// Check if the game ended in a draw
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameOverState::Stalemate | GameOverState::InsufficientMaterial
        )
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self, GameOverState::WhiteWon | GameOverState::BlackWon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_state_default() {
        //! Verifies GameOverState defaults to Playing
        let state = GameOverState::default();
        assert_eq!(state, GameOverState::Playing);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_checkmate_winner_is_side_not_to_move() {
        //! The mated side is the one to move, so the other side wins
        let status = GameStatus {
            check: true,
            checkmate: true,
            game_over: true,
            ..Default::default()
        };

        let state = GameOverState::from_status(status, Color::Black);
        assert_eq!(state, GameOverState::WhiteWon);
        assert_eq!(state.winner(), Some(Color::White));
        assert!(state.is_checkmate());

        let state = GameOverState::from_status(status, Color::White);
        assert_eq!(state, GameOverState::BlackWon);
        assert_eq!(state.winner(), Some(Color::Black));
    }

    #[test]
    fn test_draws_have_no_winner() {
        let stalemate = GameOverState::from_status(
            GameStatus {
                stalemate: true,
                game_over: true,
                ..Default::default()
            },
            Color::White,
        );
        assert_eq!(stalemate, GameOverState::Stalemate);
        assert!(stalemate.is_draw());
        assert_eq!(stalemate.winner(), None);

        let bare_kings = GameOverState::from_status(
            GameStatus {
                insufficient_material: true,
                game_over: true,
                ..Default::default()
            },
            Color::White,
        );
        assert_eq!(bare_kings, GameOverState::InsufficientMaterial);
        assert!(bare_kings.is_game_over());
    }

    #[test]
    fn test_check_alone_is_still_playing() {
        let state = GameOverState::from_status(
            GameStatus {
                check: true,
                ..Default::default()
            },
            Color::White,
        );
        assert_eq!(state, GameOverState::Playing);
        assert_eq!(state.message(), "Game in progress");
    }
}
