//! Input module - pointer positions to board squares
//!
//! # Architecture
//!
//! - `pointer` - [`BoardGeometry`] hit-testing and tile rectangles
//!
//! Front ends resolve raw pointer positions here and hand the resulting
//! square (or `None`) to [`BoardInteraction`](crate::game::systems::BoardInteraction).

pub mod pointer;

pub use pointer::*;
