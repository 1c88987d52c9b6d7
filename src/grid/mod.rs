//! Grid and merge engine.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
