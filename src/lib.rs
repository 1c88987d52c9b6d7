//! Merge Clinic - rules engine for a terminal merge game.
//!
//! Entities sit on a grid and merge into higher tiers; leveling unlocks
//! content, a timed 2x bonus boosts income, and gifts pay out prizes with
//! pity guarantees. The binary is a thin ratatui driver over [`core::Session`].

pub mod bonus;
pub mod catalog;
pub mod core;
pub mod economy;
pub mod gift;
pub mod grid;
pub mod progression;
pub mod spawn;
pub mod store;
pub mod utils;
pub mod view;
