//! Gacha-style gifts with pity guarantees.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
