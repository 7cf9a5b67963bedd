//! Chess game systems - behaviour driven by player input
//!
//! # System Organization
//!
//! - [`input`] - Tap-driven selection and move requests (the board interaction
//!   state machine)
//!
//! Every front end feeds resolved squares into one [`BoardInteraction`];
//! there is no per-front-end copy of the select/move cycle.
//!
//! ```text
//! ┌─────────────────┐
//! │ Pointer         │  Screen point → Square (BoardGeometry)
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Input           │  Square tapped → select / move / reject
//! │                 │  → Updates Selection
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ GameState       │  Validates and applies moves, tracks undo/redo
//! └─────────────────┘
//! ```

pub mod input;

pub use input::*;
