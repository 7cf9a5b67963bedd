//! Chess engine resource - shakmaty-backed rules engine
//!
//! This module provides [`ChessEngine`], the [`RulesEngine`] the game state
//! runs on. It wraps a `shakmaty::Chess` position and is the single source of
//! truth for move legality and game-end detection.
//!
//! # History
//!
//! shakmaty positions advance by value and keep no history, so the engine
//! records every pushed move together with the position it was played from.
//! `pop_move` restores that stored position, which makes push/pop round trips
//! exact down to castling rights, en passant and move clocks.
//!
//! # Coordinate System
//!
//! - **Crate squares**: linear index 0-63 where `index = rank * 8 + file`
//! - **shakmaty squares**: the same layout (a1 = 0, h8 = 63)
//! - Conversion helpers: `to_engine_square()` and `from_engine_square()`
//!
//! # Castling
//!
//! shakmaty encodes castling as "king takes own rook". The engine reports it
//! in king-destination form (e1g1, e1c1) because that is where the user clicks.

use crate::game::error::{GameError, GameResult};
use crate::game::rules::RulesEngine;
use crate::game::types::{Color, Move, Piece, PieceKind, Square};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position, Role};
use tracing::{debug, warn};

/// A pushed move and the position it was played from
#[derive(Debug, Clone)]
struct PlayedMove {
    before: Chess,
    mv: Move,
}

/// Chess engine resource - single source of truth for the chess position
#[derive(Debug, Clone, Default)]
pub struct ChessEngine {
    position: Chess,
    played: Vec<PlayedMove>,
    move_stack: Vec<Move>,
}

impl ChessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from a FEN string with an empty move stack
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        let mut engine = Self::new();
        engine.load_fen(fen)?;
        Ok(engine)
    }

    /// Convert a crate square to a shakmaty square
    #[inline]
    pub fn to_engine_square(square: Square) -> shakmaty::Square {
        shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(square.file().index())),
            shakmaty::Rank::new(u32::from(square.rank().index())),
        )
    }

    /// Convert a shakmaty square to a crate square
    #[inline]
    pub fn from_engine_square(square: shakmaty::Square) -> Square {
        Square::from_index_masked(square as u8)
    }

    pub fn role_to_kind(role: Role) -> PieceKind {
        match role {
            Role::Pawn => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King => PieceKind::King,
        }
    }

    pub fn color_from_engine(color: shakmaty::Color) -> Color {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }

    /// Express a shakmaty move in the crate's UCI shape
    ///
    /// Drop moves (`Move::Put`) do not exist in standard chess and map to `None`.
    fn convert_move(m: &shakmaty::Move) -> Option<Move> {
        match m {
            shakmaty::Move::Normal {
                from,
                to,
                promotion,
                ..
            } => Some(Move {
                from: Self::from_engine_square(*from),
                to: Self::from_engine_square(*to),
                promotion: promotion.map(Self::role_to_kind),
            }),
            shakmaty::Move::EnPassant { from, to, .. } => Some(Move::new(
                Self::from_engine_square(*from),
                Self::from_engine_square(*to),
            )),
            shakmaty::Move::Castle { king, rook, .. } => {
                let king_file = if rook.file() == shakmaty::File::H {
                    shakmaty::File::G
                } else {
                    shakmaty::File::C
                };
                let king_dest = shakmaty::Square::from_coords(king_file, king.rank());
                Some(Move::new(
                    Self::from_engine_square(*king),
                    Self::from_engine_square(king_dest),
                ))
            }
            shakmaty::Move::Put { .. } => None,
        }
    }

    /// Find the shakmaty move matching `mv` exactly, promotion included
    fn find_legal(&self, mv: Move) -> Option<shakmaty::Move> {
        self.position
            .legal_moves()
            .into_iter()
            .find(|m| Self::convert_move(m) == Some(mv))
    }
}

impl RulesEngine for ChessEngine {
    fn legal_moves(&self, from: Option<Square>) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(Self::convert_move)
            .filter(|mv| from.map_or(true, |sq| mv.from == sq))
            .collect()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(Self::to_engine_square(square))
            .map(|p| Piece::new(Self::role_to_kind(p.role), Self::color_from_engine(p.color)))
    }

    fn side_to_move(&self) -> Color {
        Self::color_from_engine(self.position.turn())
    }

    fn push_move(&mut self, mv: Move) -> GameResult<()> {
        let Some(engine_move) = self.find_legal(mv) else {
            debug!("[ENGINE] Refused {} (not legal)", mv);
            return Err(GameError::IllegalMove { mv });
        };

        let before = self.position.clone();
        self.position = before
            .clone()
            .play(engine_move)
            .map_err(|_| GameError::IllegalMove { mv })?;
        self.played.push(PlayedMove { before, mv });
        self.move_stack.push(mv);
        Ok(())
    }

    fn pop_move(&mut self) -> Option<Move> {
        let PlayedMove { before, mv } = self.played.pop()?;
        self.position = before;
        self.move_stack.pop();
        Some(mv)
    }

    fn move_stack(&self) -> &[Move] {
        &self.move_stack
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    fn to_fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    fn load_fen(&mut self, fen: &str) -> GameResult<()> {
        let invalid = |message: String| GameError::InvalidFen {
            fen: fen.to_string(),
            message,
        };

        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;

        if !self.played.is_empty() {
            warn!(
                "[ENGINE] Loading FEN discards {} played move(s)",
                self.played.len()
            );
        }

        self.position = position;
        self.played.clear();
        self.move_stack.clear();
        Ok(())
    }

    fn reset(&mut self) {
        self.position = Chess::default();
        self.played.clear();
        self.move_stack.clear();
    }
}
