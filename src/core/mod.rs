//! Session state, balance numbers and the session facade.

#![allow(unused_imports)]

pub mod balance;
pub mod constants;
pub mod game_state;
pub mod ruleset;
pub mod session;

pub use balance::*;
pub use constants::*;
pub use game_state::*;
pub use ruleset::*;
pub use session::*;
