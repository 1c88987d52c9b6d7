//! Economy: passive income, sell value, store and gift pricing, and the
//! reward-application helper every other subsystem pays out through.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
