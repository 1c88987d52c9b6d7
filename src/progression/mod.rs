//! Leveling: XP curve, level-up rewards, locked-row unlocks and bootstrap.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
