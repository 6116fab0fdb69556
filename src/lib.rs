//! Note record utilities for the LivingNotes desktop applet
//!
//! This library defines the canonical shape of a note, converts between the
//! persisted JSON text and in-memory lists, and provides pure helpers that
//! transform a note list without mutating the caller's copy.

mod cli;
mod config;
mod errors;
mod helper;
mod note;
mod notification_state;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use notification_state::*;
pub use store::*;
pub use types::*;
