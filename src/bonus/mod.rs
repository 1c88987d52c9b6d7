//! Timed 2x income window with a cooldown.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
