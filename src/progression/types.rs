//! Level-up and bootstrap reports.

use crate::economy::types::AppliedReward;

/// Everything one level gained unlocked and paid out.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpEvent {
    pub level: u32,
    /// Line ids announced by the level's row (already-unlocked ones included)
    pub unlocked_lines: Vec<String>,
    /// Display labels for `unlocked_lines`
    pub unlocked_labels: Vec<String>,
    pub rewards: Vec<AppliedReward>,
    /// True if a locked-row cell opened at this level
    pub cell_unlocked: bool,
}

impl LevelUpEvent {
    pub fn title(&self) -> String {
        format!("Level {}!", self.level)
    }

    /// One-line summary for a popup or log.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.unlocked_labels.is_empty() {
            parts.push(format!("Unlocked: {}", self.unlocked_labels.join(", ")));
        }
        let mut gifts: Vec<String> = self.rewards.iter().map(|r| r.describe()).collect();
        if self.cell_unlocked {
            gifts.push("🔓 New bed opened".to_string());
        }
        if !gifts.is_empty() {
            parts.push(format!("Gift: {}", gifts.join(" · ")));
        }
        parts.join(" | ")
    }
}

/// What `bootstrap` did to a loaded or fresh session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapReport {
    /// Level 1's row, when this was a fresh session
    pub first_level: Option<LevelUpEvent>,
    /// Cells that received starter entities
    pub starters_placed: Vec<usize>,
    /// Entities moved out of locked cells
    pub relocated: usize,
    /// Entities dropped because no unlocked cell was free
    pub discarded: usize,
}
