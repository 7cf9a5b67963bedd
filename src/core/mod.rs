//! Core module - application settings and their persistence
//!
//! # Resources
//!
//! - [`GameSettings`] - Board geometry, promotion policy, hints, start position
//!
//! # Persistence
//!
//! - [`load_settings`] / [`save_settings_to`] - JSON file in the platform config dir
//!
//! # Errors
//!
//! - [`CoreError`] - Settings I/O and serialization failures

pub mod error;
pub mod resources;
pub mod settings_persistence;

pub use error::*;
pub use resources::*;
pub use settings_persistence::*;
