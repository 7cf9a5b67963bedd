//! Chess game logic module
//!
//! Pure game logic with no rendering or windowing dependencies. Front ends
//! drive it through [`ChessSession`] or, for finer control, through
//! [`GameState`](resources::GameState) and
//! [`BoardInteraction`](systems::BoardInteraction) directly.
//!
//! # Module Organization
//!
//! - `types` - Square, Piece and Move value types
//! - `error` - [`GameError`](error::GameError) taxonomy
//! - `rules` - The [`RulesEngine`](rules::RulesEngine) contract
//! - `resources` - Engine, game state, redo stack, selection, game-over state
//! - `systems` - The tap-driven interaction state machine
//! - `session` - Embedding surface and render snapshot
//!
//! # Data Flow
//!
//! ```text
//! tap → BoardInteraction → GameState → RulesEngine (shakmaty)
//!                 ↓             ↓
//!            Selection     RedoStack / GameOverState → BoardSnapshot
//! ```

pub mod error;
pub mod resources;
pub mod rules;
pub mod session;
pub mod systems;
pub mod types;

pub use session::{BoardSnapshot, ChessSession};
