//! Settings that persist between sessions
//!
//! Every field has a default, so older or partial settings files still load.

use crate::game::resources::PromotionPolicy;
use crate::input::BoardGeometry;
use serde::{Deserialize, Serialize};

/// User preferences loaded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Board placement and orientation used for hit-testing
    pub board: BoardGeometry,

    /// How promotion pieces are chosen
    pub promotion: PromotionPolicy,

    /// Whether to show legal-move hints for the selected piece
    pub show_hints: bool,

    /// Position to start from instead of the standard setup
    pub start_fen: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board: BoardGeometry::default(),
            promotion: PromotionPolicy::AutoQueen,
            show_hints: true,
            start_fen: None,
        }
    }
}
