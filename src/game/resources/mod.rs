//! Chess game resources - session-wide game state
//!
//! Each resource has exactly one owner and one writer. The interaction state
//! machine reads them and requests changes; only [`GameState`] mutates the
//! position and its history.
//!
//! # Resource Categories
//!
//! ## Position
//! - [`ChessEngine`] - Authoritative position with push/pop move stack
//! - [`GameState`] - Engine plus redo stack, the public move/undo/redo surface
//!
//! ## Player Interaction
//! - [`Selection`] - Tapped square and legal-target display flag
//! - [`PromotionPolicy`] / [`PendingPromotion`] - How promotion pieces are picked
//!
//! ## Game History
//! - [`RedoStack`] - Undone moves available for redo
//!
//! ## Game Status
//! - [`GameStatus`] - Check/mate/stalemate flags read from the engine
//! - [`GameOverState`] - Win/draw result for the game-end overlay

pub mod engine;
pub mod game_over;
pub mod game_state;
pub mod history;
pub mod player;
pub mod selection;

pub use engine::*;
pub use game_over::*;
pub use game_state::*;
pub use history::*;
pub use player::*;
pub use selection::*;
