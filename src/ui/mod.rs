//! UI module - text front end for the chess session
//!
//! - `console` - Command parsing, board drawing and the line-driven loop body

pub mod console;

pub use console::*;
