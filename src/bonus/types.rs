//! 2x income window state.

use crate::core::game_state::lenient;
use serde::{Deserialize, Serialize};

/// Timestamps (ms) bounding the active window and its cooldown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusWindow {
    #[serde(deserialize_with = "lenient")]
    pub active_until: i64,
    #[serde(deserialize_with = "lenient")]
    pub cooldown_until: i64,
}

/// Where the bonus timer machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusPhase {
    Idle,
    Active,
    Cooldown,
}

/// Result of the player pressing the bonus button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusOutcome {
    /// Window started; both deadlines set.
    Activated { active_until: i64, cooldown_until: i64 },
    /// Already running; nothing changed.
    AlreadyActive,
    /// Refused until the cooldown ends.
    CoolingDown { remaining_seconds: u64 },
}

impl BonusOutcome {
    pub fn message(&self) -> String {
        match self {
            BonusOutcome::Activated { .. } => "2x income is on!".to_string(),
            BonusOutcome::AlreadyActive => "2x is already running".to_string(),
            BonusOutcome::CoolingDown { remaining_seconds } => {
                format!("Bonus is recharging ({}s)", remaining_seconds)
            }
        }
    }
}
