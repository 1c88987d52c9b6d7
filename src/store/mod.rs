//! Coin store: patients and the 2x booster at level-scaled prices.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
