//! Game state resource - rules engine plus redo stack
//!
//! [`GameState`] is the only writer of the chess position during a session.
//! It owns the rules engine (whose push/pop move stack is the forward
//! history) and the [`RedoStack`] of undone moves, and keeps the two
//! consistent:
//!
//! - A successful forward move clears the redo stack
//! - `undo` moves one ply from the engine onto the redo stack
//! - `redo` moves one ply from the redo stack back onto the engine
//! - A rejected move changes nothing at all
//!
//! # Promotion
//!
//! When the piece on `from` is a pawn and `to` is on rank 1 or rank 8, the
//! move is submitted with a promotion piece: the caller's choice if given,
//! otherwise a queen.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut game = GameState::new();
//! let e2 = "e2".parse()?;
//! let e4 = "e4".parse()?;
//!
//! let outcome = game.apply_move(e2, e4)?;
//! assert_eq!(game.turn_to_move(), Color::Black);
//!
//! game.undo();            // back to the start position, one redo available
//! game.redo();            // e2e4 again, redo stack empty
//! ```

use crate::game::error::{GameError, GameResult};
use crate::game::resources::engine::ChessEngine;
use crate::game::resources::game_over::{GameOverState, GameStatus};
use crate::game::resources::history::RedoStack;
use crate::game::resources::player::promotion::{is_promotion_move, DEFAULT_PROMOTION};
use crate::game::rules::RulesEngine;
use crate::game::types::{Color, File, Move, Piece, PieceKind, Square};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Result of a successfully applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// The move as submitted, promotion piece included
    pub mv: Move,
    /// Side that made the move
    pub mover: Color,
    /// Piece removed by the move (en passant reports the captured pawn)
    pub captured: Option<Piece>,
    /// Engine status after the move
    pub status: GameStatus,
    pub game_over: GameOverState,
}

/// Chess position plus undo/redo history for one game session
#[derive(Debug, Clone, Default)]
pub struct GameState<E: RulesEngine = ChessEngine> {
    engine: E,
    redo_stack: RedoStack,
}

impl GameState<ChessEngine> {
    /// New game at the standard starting position
    pub fn new() -> Self {
        Self::default()
    }

    /// New game starting from an arbitrary position
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        Ok(Self::with_engine(ChessEngine::from_fen(fen)?))
    }
}

impl<E: RulesEngine> GameState<E> {
    /// Wrap an engine as-is, keeping its current position and move stack
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            redo_stack: RedoStack::default(),
        }
    }

    /// Back to the standard start with empty history and redo stack
    pub fn reset(&mut self) {
        self.engine.reset();
        self.redo_stack.clear();
        info!("[GAME] Reset to starting position");
    }

    /// Apply a move, promoting to a queen when a promotion is required
    pub fn apply_move(&mut self, from: Square, to: Square) -> GameResult<MoveOutcome> {
        self.apply_move_with_promotion(from, to, None)
    }

    /// Apply a move with an optional caller-chosen promotion piece
    ///
    /// `promotion` is only consulted when the move actually promotes; it is
    /// ignored for every other move. On any error the position, history and
    /// redo stack are exactly as before the call.
    pub fn apply_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> GameResult<MoveOutcome> {
        let piece = self
            .engine
            .piece_at(from)
            .ok_or(GameError::EmptySquare { square: from })?;

        let to = match self.castling_destination(piece, from, to) {
            Some(king_to) => {
                debug!("[GAME] King onto own rook on {} read as castling to {}", to, king_to);
                king_to
            }
            None => to,
        };
        let promotion = is_promotion_move(Some(piece), to)
            .then(|| promotion.unwrap_or(DEFAULT_PROMOTION));
        let mv = Move {
            from,
            to,
            promotion,
        };

        let captured = self.captured_by(piece, mv);
        self.engine.push_move(mv)?;
        self.redo_stack.clear();

        let status = self.status();
        let game_over = GameOverState::from_status(status, self.engine.side_to_move());
        info!("[GAME] {} played {}", piece.color, mv);
        if let Some(target) = captured {
            debug!("[GAME] {} captured {:?}", mv, target.kind);
        }
        if game_over.is_game_over() {
            info!("[GAME] {}", game_over.message());
        }

        Ok(MoveOutcome {
            mv,
            mover: piece.color,
            captured,
            status,
            game_over,
        })
    }

    /// King destination for a king dropped onto its own corner rook
    fn castling_destination(&self, king: Piece, from: Square, to: Square) -> Option<Square> {
        if king.kind != PieceKind::King || from.rank() != to.rank() {
            return None;
        }
        let rook = self.engine.piece_at(to)?;
        if rook.kind != PieceKind::Rook || rook.color != king.color {
            return None;
        }
        let file = match to.file().index() {
            7 => File::new(6)?,
            0 => File::new(2)?,
            _ => return None,
        };
        Some(Square::from_coords(file, from.rank()))
    }

    /// Piece that `mv` would remove from the board
    fn captured_by(&self, mover: Piece, mv: Move) -> Option<Piece> {
        match self.engine.piece_at(mv.to) {
            Some(target) if target.color != mover.color => Some(target),
            Some(_) => None,
            // Diagonal pawn step onto an empty square can only be en passant
            None if mover.kind == PieceKind::Pawn && mv.from.file() != mv.to.file() => {
                Some(Piece::new(PieceKind::Pawn, mover.color.other()))
            }
            None => None,
        }
    }

    /// Take back the last ply, keeping it available for redo
    ///
    /// Returns `None` (and does nothing) when no move has been played.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.engine.pop_move()?;
        self.redo_stack.push(mv);
        debug!(
            "[GAME] Undid {} ({} redo available)",
            mv,
            self.redo_stack.len()
        );
        Some(mv)
    }

    /// Replay the most recently undone ply
    ///
    /// Returns `None` (and does nothing) when the redo stack is empty.
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.redo_stack.pop()?;
        if let Err(e) = self.engine.push_move(mv) {
            // Only reachable if the engine was changed behind our back
            warn!("[GAME] Redo of {} failed: {}", mv, e);
            self.redo_stack.push(mv);
            return None;
        }
        debug!("[GAME] Redid {}", mv);
        Some(mv)
    }

    /// Squares the piece on `from` can legally move to
    ///
    /// Empty when `from` is empty, holds an opponent piece, or the piece has
    /// no legal moves. Promotion variants collapse into one destination.
    pub fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
        self.engine
            .legal_moves(Some(from))
            .into_iter()
            .map(|mv| mv.to)
            .collect()
    }

    /// True iff a piece occupies `square` and belongs to the other side
    pub fn is_opponent_piece(&self, square: Square, mover: Color) -> bool {
        self.engine
            .piece_at(square)
            .is_some_and(|piece| piece.color != mover)
    }

    pub fn turn_to_move(&self) -> Color {
        self.engine.side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.engine.piece_at(square)
    }

    pub fn fen(&self) -> String {
        self.engine.to_fen()
    }

    /// Replace the position; history and redo stack start over
    ///
    /// An invalid FEN leaves everything untouched.
    pub fn load_fen(&mut self, fen: &str) -> GameResult<()> {
        self.engine.load_fen(fen)?;
        self.redo_stack.clear();
        info!("[GAME] Loaded position {}", fen.trim());
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::from_engine(&self.engine)
    }

    pub fn game_over_state(&self) -> GameOverState {
        GameOverState::from_status(self.status(), self.engine.side_to_move())
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    /// Moves played since the start (or the last FEN load), oldest first
    pub fn played_moves(&self) -> &[Move] {
        self.engine.move_stack()
    }

    pub fn ply_count(&self) -> usize {
        self.engine.move_stack().len()
    }

    pub fn redo_stack(&self) -> &RedoStack {
        &self.redo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.engine.move_stack().is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
