//! Chess session - the embedding surface for front ends
//!
//! [`ChessSession`] bundles the game state, the interaction state machine
//! and the board geometry behind the small set of operations a front end
//! needs: reset, tap, undo, redo and a read-only [`BoardSnapshot`] to draw
//! from. Front ends never reach into the rules engine directly.
//!
//! Undo, redo, reset and loading a position all drop the current selection,
//! since its legal targets may no longer apply.

use crate::core::GameSettings;
use crate::game::error::GameResult;
use crate::game::resources::{GameOverState, GameState, MoveOutcome, PendingPromotion};
use crate::game::systems::{BoardInteraction, InteractionPhase, TapOutcome};
use crate::game::types::{Color, Move, PieceKind, Square};
use crate::input::BoardGeometry;
use serde::Serialize;
use tracing::info;

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub fen: String,
    pub side_to_move: Color,
    pub selected: Option<Square>,
    /// Destinations of the selected piece, empty unless hints are shown
    pub legal_targets: Vec<Square>,
    pub pending_promotion: Option<PendingPromotion>,
    pub game_over: bool,
    pub game_over_state: GameOverState,
    pub check: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub redo_depth: usize,
    pub ply_count: usize,
    pub flipped: bool,
}

/// One game session: position, history, selection and geometry
#[derive(Debug, Clone)]
pub struct ChessSession {
    game: GameState,
    interaction: BoardInteraction,
    geometry: BoardGeometry,
    show_hints: bool,
}

impl Default for ChessSession {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            game: GameState::new(),
            interaction: BoardInteraction::new(settings.promotion),
            geometry: settings.board,
            show_hints: settings.show_hints,
        }
    }
}

impl ChessSession {
    /// Build a session from user settings
    ///
    /// Fails only if `settings.start_fen` is set and invalid.
    pub fn new(settings: &GameSettings) -> GameResult<Self> {
        let game = match settings.start_fen.as_deref() {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new(),
        };
        Ok(Self {
            game,
            interaction: BoardInteraction::new(settings.promotion),
            geometry: settings.board,
            show_hints: settings.show_hints,
        })
    }

    pub fn reset(&mut self) {
        self.interaction.clear();
        self.game.reset();
    }

    /// Feed a tap on a resolved square (or off the board)
    pub fn tap_square(&mut self, square: Option<Square>) -> TapOutcome {
        self.interaction.tap(&mut self.game, square)
    }

    /// Feed a pointer position, resolving it through the board geometry
    pub fn tap_point(&mut self, x: f32, y: f32) -> TapOutcome {
        let square = self.geometry.square_at(x, y);
        self.tap_square(square)
    }

    pub fn choose_promotion(&mut self, kind: PieceKind) -> GameResult<MoveOutcome> {
        self.interaction.choose_promotion(&mut self.game, kind)
    }

    pub fn cancel_selection(&mut self) -> bool {
        self.interaction.cancel()
    }

    pub fn undo(&mut self) -> Option<Move> {
        self.interaction.clear();
        self.game.undo()
    }

    pub fn redo(&mut self) -> Option<Move> {
        self.interaction.clear();
        self.game.redo()
    }

    /// Replace the position; the selection is kept if the FEN is invalid
    pub fn load_fen(&mut self, fen: &str) -> GameResult<()> {
        self.game.load_fen(fen)?;
        self.interaction.clear();
        Ok(())
    }

    /// Rotate the board; the position and selection are unaffected
    pub fn flip_board(&mut self) {
        self.geometry.toggle_flip();
        info!("[GAME] Board flipped: {}", self.geometry.flipped);
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn interaction(&self) -> &BoardInteraction {
        &self.interaction
    }

    pub fn phase(&self) -> InteractionPhase {
        self.interaction.phase()
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = geometry;
    }

    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let selection = self.interaction.selection();
        let legal_targets = match selection.selected {
            Some(square) if self.show_hints && selection.showing_legal_targets => {
                self.game.legal_destinations(square).into_iter().collect()
            }
            _ => Vec::new(),
        };
        let status = self.game.status();
        let game_over_state = self.game.game_over_state();

        BoardSnapshot {
            fen: self.game.fen(),
            side_to_move: self.game.turn_to_move(),
            selected: selection.selected,
            legal_targets,
            pending_promotion: selection.pending_promotion,
            game_over: game_over_state.is_game_over(),
            game_over_state,
            check: status.check,
            can_undo: self.game.can_undo(),
            can_redo: self.game.can_redo(),
            redo_depth: self.game.redo_stack().len(),
            ply_count: self.game.ply_count(),
            flipped: self.geometry.flipped,
        }
    }
}
