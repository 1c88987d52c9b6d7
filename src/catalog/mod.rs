//! Static, read-only game content and lookups over it.

pub mod data;
pub mod types;

pub use data::*;
pub use types::*;

use crate::core::constants::DEFAULT_LEVEL_COINS;

/// All content the rules look up: lines, the level ladder and store prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub lines: Vec<Line>,
    pub progression: Vec<ProgressionRow>,
    pub store_prices: StorePrices,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            lines: builtin_lines(),
            progression: builtin_progression(),
            store_prices: builtin_store_prices(),
        }
    }

    pub fn line(&self, line_id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn tier(&self, line_id: &str, tier: u8) -> Option<&Tier> {
        self.line(line_id)?.tiers.get(tier as usize)
    }

    /// Income rate of a tier, 0 for unknown references.
    pub fn rate(&self, line_id: &str, tier: u8) -> f64 {
        self.tier(line_id, tier).map(|t| t.rate).unwrap_or(0.0)
    }

    /// True if `tier` of `line_id` can still merge into a higher tier.
    pub fn can_upgrade(&self, line_id: &str, tier: u8) -> bool {
        self.line(line_id)
            .and_then(Line::max_tier)
            .is_some_and(|max| tier < max)
    }

    /// Row for `level`. Levels past the ladder get a plain coin reward.
    pub fn progression_row(&self, level: u32) -> ProgressionRow {
        self.progression
            .iter()
            .find(|row| row.level == level)
            .cloned()
            .unwrap_or_else(|| ProgressionRow {
                level,
                unlocks: Vec::new(),
                rewards: vec![Reward::Coins {
                    amount: DEFAULT_LEVEL_COINS,
                }],
            })
    }

    /// Human-friendly label for a line, based on its base tier.
    pub fn unlock_label(&self, line_id: &str) -> String {
        match self.tier(line_id, 0) {
            Some(t) => format!("{} {}", t.icon, t.name),
            None => line_id.to_string(),
        }
    }
}
