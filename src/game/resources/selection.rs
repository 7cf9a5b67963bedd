//! Selection resource for tracking the tapped square
//!
//! Transient interaction state: which square is tentatively chosen and
//! whether its legal destinations should be drawn. Owned by the interaction
//! state machine and never persisted; it returns to the cleared state after
//! every move attempt.

use crate::game::resources::player::PendingPromotion;
use crate::game::types::Square;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub selected: Option<Square>,
    pub showing_legal_targets: bool,
    /// Set only under the `Ask` promotion policy
    pub pending_promotion: Option<PendingPromotion>,
}

impl Selection {
    pub fn select(&mut self, square: Square) {
        self.selected = Some(square);
        self.showing_legal_targets = true;
        self.pending_promotion = None;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.showing_legal_targets = false;
        self.pending_promotion = None;
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_cleared(&self) -> bool {
        *self == Selection::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_then_clear() {
        let mut selection = Selection::default();
        assert!(selection.is_cleared());

        selection.select("e2".parse().unwrap());
        assert!(selection.is_selected());
        assert!(selection.showing_legal_targets);

        selection.clear();
        assert!(selection.is_cleared());
    }
}
