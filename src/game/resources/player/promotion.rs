//! Pawn promotion policy and pending-promotion tracking
//!
//! A pawn arriving on rank 1 or rank 8 needs a promotion piece before the
//! move can be submitted. The default policy picks a queen without asking;
//! the `Ask` policy parks the move in a [`PendingPromotion`] until the player
//! chooses.

use crate::game::types::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// Piece used when nobody is asked
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

/// How a promotion piece is chosen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Promote to a queen immediately
    #[default]
    AutoQueen,
    /// Wait for the player to pick a piece
    Ask,
}

/// A promotion move waiting for the player's piece choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    /// Color of the promoting pawn
    pub color: Color,
}

/// Check if moving `piece` to `target` requires a promotion piece
///
/// Uses absolute ranks: any pawn landing on rank index 0 or 7 qualifies,
/// with no color-relative adjustment. Whether the move is legal at all is
/// left to the rules engine.
pub fn is_promotion_move(piece: Option<Piece>, target: Square) -> bool {
    matches!(piece, Some(p) if p.kind == PieceKind::Pawn) && target.rank().is_back_rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_pawn_to_back_rank_needs_promotion() {
        let white_pawn = Some(Piece::new(PieceKind::Pawn, Color::White));
        let black_pawn = Some(Piece::new(PieceKind::Pawn, Color::Black));

        assert!(is_promotion_move(white_pawn, sq("e8")));
        assert!(is_promotion_move(black_pawn, sq("a1")));
        assert!(!is_promotion_move(white_pawn, sq("e7")));
    }

    #[test]
    fn test_promotion_uses_absolute_ranks() {
        //! No color adjustment: a white pawn "arriving" on rank 1 still counts
        let white_pawn = Some(Piece::new(PieceKind::Pawn, Color::White));
        assert!(is_promotion_move(white_pawn, sq("d1")));
    }

    #[test]
    fn test_non_pawns_never_promote() {
        let rook = Some(Piece::new(PieceKind::Rook, Color::White));
        assert!(!is_promotion_move(rook, sq("h8")));
        assert!(!is_promotion_move(None, sq("h8")));
    }

    #[test]
    fn test_default_policy_is_auto_queen() {
        assert_eq!(PromotionPolicy::default(), PromotionPolicy::AutoQueen);
        assert_eq!(DEFAULT_PROMOTION, PieceKind::Queen);
    }
}
