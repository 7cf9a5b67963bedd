//! Board interaction state machine
//!
//! Turns a stream of "square tapped" events into selections and move
//! requests against [`GameState`]. There is exactly one machine no matter how
//! many front ends feed it; the front end resolves pointer positions into
//! squares first (see [`BoardGeometry`](crate::input::BoardGeometry)).
//!
//! # States
//!
//! ```text
//!            tap own piece                tap selected square
//!   Idle ───────────────────▶ Selecting ─────────────────────▶ Idle
//!    ▲                          │   │
//!    │  move applied/rejected   │   │ promotion target, Ask policy
//!    └──────────────────────────┘   ▼
//!    ▲                       AwaitingPromotion
//!    └──── choose_promotion / any tap ──┘
//! ```
//!
//! | State | Tap | Result |
//! |---|---|---|
//! | Idle | empty square or opponent piece | stays Idle |
//! | Idle | piece of the side to move | Selecting, legal targets shown |
//! | Selecting | the selected square | Idle, game state untouched |
//! | Selecting | any other square | move attempted, Idle either way |
//!
//! `AwaitingPromotion` is only reachable with [`PromotionPolicy::Ask`]. With
//! the default policy promotions resolve to a queen inside the move request.
//!
//! Taps that resolved to no square (off the board) are ignored in every state.

use crate::game::error::{GameError, GameResult};
use crate::game::resources::{
    is_promotion_move, GameState, MoveOutcome, PendingPromotion, PromotionPolicy, Selection,
};
use crate::game::rules::RulesEngine;
use crate::game::types::{PieceKind, Square};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Where the machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum InteractionPhase {
    Idle,
    Selecting { square: Square },
    AwaitingPromotion { pending: PendingPromotion },
}

/// What a single tap did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// Off-board tap, empty square or opponent piece while idle
    Ignored,
    /// A piece was selected; `targets` are its legal destinations
    Selected {
        square: Square,
        targets: BTreeSet<Square>,
    },
    /// The selected square was tapped again
    Deselected,
    /// The move was applied
    Moved(MoveOutcome),
    /// The move was refused; nothing changed except the selection
    Rejected {
        from: Square,
        to: Square,
        error: GameError,
    },
    /// Waiting for [`BoardInteraction::choose_promotion`]
    PromotionPending(PendingPromotion),
    /// A tap arrived while a promotion choice was pending
    PromotionCancelled,
}

impl TapOutcome {
    /// True if the tap changed the position
    pub fn is_move(&self) -> bool {
        matches!(self, TapOutcome::Moved(_))
    }
}

/// Selection plus promotion policy; the state machine itself
#[derive(Debug, Default, Clone)]
pub struct BoardInteraction {
    selection: Selection,
    policy: PromotionPolicy,
}

impl BoardInteraction {
    pub fn new(policy: PromotionPolicy) -> Self {
        Self {
            selection: Selection::default(),
            policy,
        }
    }

    pub fn policy(&self) -> PromotionPolicy {
        self.policy
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> InteractionPhase {
        if let Some(pending) = self.selection.pending_promotion {
            InteractionPhase::AwaitingPromotion { pending }
        } else if let Some(square) = self.selection.selected {
            InteractionPhase::Selecting { square }
        } else {
            InteractionPhase::Idle
        }
    }

    /// Feed one tap into the machine
    pub fn tap<E: RulesEngine>(
        &mut self,
        game: &mut GameState<E>,
        square: Option<Square>,
    ) -> TapOutcome {
        let Some(square) = square else {
            debug!("[INPUT] Tap outside the board ignored");
            return TapOutcome::Ignored;
        };

        if let Some(pending) = self.selection.pending_promotion {
            self.clear();
            info!(
                "[INPUT] Promotion {}{} cancelled by tap on {}",
                pending.from, pending.to, square
            );
            return TapOutcome::PromotionCancelled;
        }

        match self.selection.selected {
            None => self.try_select(game, square),
            Some(selected) if selected == square => {
                self.clear();
                TapOutcome::Deselected
            }
            Some(from) => self.try_move(game, from, square),
        }
    }

    fn try_select<E: RulesEngine>(&mut self, game: &GameState<E>, square: Square) -> TapOutcome {
        let turn = game.turn_to_move();
        match game.piece_at(square) {
            Some(piece) if piece.color == turn => {
                let targets = game.legal_destinations(square);
                self.selection.select(square);
                debug!(
                    "[INPUT] Selected {:?} {:?} on {} ({} targets)",
                    piece.color,
                    piece.kind,
                    square,
                    targets.len()
                );
                TapOutcome::Selected { square, targets }
            }
            Some(_) => {
                debug!("[INPUT] {} holds an opponent piece, ignoring", square);
                TapOutcome::Ignored
            }
            None => TapOutcome::Ignored,
        }
    }

    fn try_move<E: RulesEngine>(
        &mut self,
        game: &mut GameState<E>,
        from: Square,
        to: Square,
    ) -> TapOutcome {
        let piece = game.piece_at(from);
        if self.policy == PromotionPolicy::Ask
            && is_promotion_move(piece, to)
            && game.legal_destinations(from).contains(&to)
        {
            if let Some(piece) = piece {
                let pending = PendingPromotion {
                    from,
                    to,
                    color: piece.color,
                };
                self.selection.pending_promotion = Some(pending);
                self.selection.showing_legal_targets = false;
                info!("[INPUT] Awaiting promotion choice for {}{}", from, to);
                return TapOutcome::PromotionPending(pending);
            }
        }

        self.clear();
        match game.apply_move(from, to) {
            Ok(outcome) => TapOutcome::Moved(outcome),
            Err(error) => {
                debug!("[INPUT] Move {}{} rejected: {}", from, to, error);
                TapOutcome::Rejected { from, to, error }
            }
        }
    }

    /// Resolve a pending promotion with the chosen piece
    ///
    /// The machine returns to idle whether or not the move is accepted.
    pub fn choose_promotion<E: RulesEngine>(
        &mut self,
        game: &mut GameState<E>,
        kind: PieceKind,
    ) -> GameResult<MoveOutcome> {
        let pending = self
            .selection
            .pending_promotion
            .ok_or(GameError::NoPendingPromotion)?;
        self.clear();
        game.apply_move_with_promotion(pending.from, pending.to, Some(kind))
    }

    /// Drop any selection or pending promotion
    ///
    /// Returns `true` if there was something to drop.
    pub fn cancel(&mut self) -> bool {
        let had_selection = !self.selection.is_cleared();
        self.clear();
        had_selection
    }

    pub(crate) fn clear(&mut self) {
        if !self.selection.is_cleared() {
            debug!("[INPUT] Selection cleared");
        }
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resources::GameOverState;
    use crate::game::types::Color;
    use assert_matches::assert_matches;

    fn sq(s: &str) -> Option<Square> {
        Some(s.parse().unwrap())
    }

    const PROMOTION_FEN: &str = "k7/4P3/8/8/8/8/8/7K w - - 0 1";

    // ========================================================================
    // Idle
    // ========================================================================

    #[test]
    fn test_idle_ignores_empty_and_opponent_squares() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        assert_eq!(machine.tap(&mut game, sq("e4")), TapOutcome::Ignored);
        assert_eq!(machine.tap(&mut game, sq("e7")), TapOutcome::Ignored);
        assert_eq!(machine.tap(&mut game, None), TapOutcome::Ignored);
        assert_eq!(machine.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_idle_selects_own_piece() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        let outcome = machine.tap(&mut game, sq("g1"));

        assert_matches!(outcome, TapOutcome::Selected { square, ref targets } => {
            assert_eq!(Some(square), sq("g1"));
            assert_eq!(targets.len(), 2);
        });
        assert_eq!(
            machine.phase(),
            InteractionPhase::Selecting {
                square: "g1".parse().unwrap()
            }
        );
        assert!(machine.selection().showing_legal_targets);
    }

    #[test]
    fn test_piece_without_moves_can_still_be_selected() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        assert_matches!(
            machine.tap(&mut game, sq("a1")),
            TapOutcome::Selected { ref targets, .. } if targets.is_empty()
        );
    }

    // ========================================================================
    // Selecting
    // ========================================================================

    #[test]
    fn test_tapping_selection_again_deselects() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();
        let fen = game.fen();

        machine.tap(&mut game, sq("e2"));
        assert_eq!(machine.tap(&mut game, sq("e2")), TapOutcome::Deselected);

        assert_eq!(machine.phase(), InteractionPhase::Idle);
        assert_eq!(game.fen(), fen);
    }

    #[test]
    fn test_legal_destination_moves() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        machine.tap(&mut game, sq("e2"));
        let outcome = machine.tap(&mut game, sq("e4"));

        assert!(outcome.is_move());
        assert_eq!(game.turn_to_move(), Color::Black);
        assert_eq!(machine.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_illegal_destination_is_rejected() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();
        let fen = game.fen();

        machine.tap(&mut game, sq("e2"));
        let outcome = machine.tap(&mut game, sq("e5"));

        assert_matches!(outcome, TapOutcome::Rejected { error: GameError::IllegalMove { .. }, .. });
        assert_eq!(machine.phase(), InteractionPhase::Idle);
        assert_eq!(game.fen(), fen);
    }

    #[test]
    fn test_tapping_other_own_piece_rejects() {
        //! Selecting d2 then tapping the own piece on e2 is a failed move, not a reselect
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        machine.tap(&mut game, sq("d2"));
        assert_matches!(machine.tap(&mut game, sq("e2")), TapOutcome::Rejected { .. });
        assert_eq!(machine.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_off_board_tap_keeps_selection() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        machine.tap(&mut game, sq("e2"));
        assert_eq!(machine.tap(&mut game, None), TapOutcome::Ignored);
        assert_matches!(machine.phase(), InteractionPhase::Selecting { .. });
    }

    // ========================================================================
    // Promotion
    // ========================================================================

    #[test]
    fn test_auto_queen_promotes_immediately() {
        let mut game = GameState::from_fen(PROMOTION_FEN).unwrap();
        let mut machine = BoardInteraction::default();

        machine.tap(&mut game, sq("e7"));
        let outcome = machine.tap(&mut game, sq("e8"));

        assert_matches!(outcome, TapOutcome::Moved(o) if o.mv.promotion == Some(PieceKind::Queen));
    }

    #[test]
    fn test_ask_policy_waits_for_choice() {
        let mut game = GameState::from_fen(PROMOTION_FEN).unwrap();
        let mut machine = BoardInteraction::new(PromotionPolicy::Ask);
        let fen = game.fen();

        machine.tap(&mut game, sq("e7"));
        let outcome = machine.tap(&mut game, sq("e8"));

        assert_matches!(outcome, TapOutcome::PromotionPending(p) if p.color == Color::White);
        assert_matches!(machine.phase(), InteractionPhase::AwaitingPromotion { .. });
        assert_eq!(game.fen(), fen);

        let moved = machine.choose_promotion(&mut game, PieceKind::Rook).unwrap();
        assert_eq!(moved.mv.to_uci(), "e7e8r");
        assert_eq!(machine.phase(), InteractionPhase::Idle);
        assert_eq!(moved.game_over, GameOverState::Playing);
    }

    #[test]
    fn test_tap_cancels_pending_promotion() {
        let mut game = GameState::from_fen(PROMOTION_FEN).unwrap();
        let mut machine = BoardInteraction::new(PromotionPolicy::Ask);
        let fen = game.fen();

        machine.tap(&mut game, sq("e7"));
        machine.tap(&mut game, sq("e8"));
        assert_eq!(
            machine.tap(&mut game, sq("h1")),
            TapOutcome::PromotionCancelled
        );

        assert_eq!(machine.phase(), InteractionPhase::Idle);
        assert_eq!(game.fen(), fen);
        assert_eq!(
            machine.choose_promotion(&mut game, PieceKind::Queen),
            Err(GameError::NoPendingPromotion)
        );
    }

    #[test]
    fn test_ask_policy_still_rejects_illegal_targets() {
        let mut game = GameState::from_fen(PROMOTION_FEN).unwrap();
        let mut machine = BoardInteraction::new(PromotionPolicy::Ask);

        machine.tap(&mut game, sq("e7"));
        assert_matches!(machine.tap(&mut game, sq("d8")), TapOutcome::Rejected { .. });
        assert_eq!(machine.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_cancel_reports_whether_anything_was_selected() {
        let mut game = GameState::new();
        let mut machine = BoardInteraction::default();

        assert!(!machine.cancel());
        machine.tap(&mut game, sq("b1"));
        assert!(machine.cancel());
        assert_eq!(machine.phase(), InteractionPhase::Idle);
    }
}
