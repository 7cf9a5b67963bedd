//! Chess engine resource
//!
//! Wraps the external rules engine behind the crate's [`RulesEngine`](crate::game::rules::RulesEngine) seam.

pub mod engine;

pub use engine::*;
