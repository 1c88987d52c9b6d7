//! Spawn timer and the patient queue.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
