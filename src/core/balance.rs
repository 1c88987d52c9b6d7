//! Tunable balance numbers.
//!
//! Every number the rules consult lives on [`Balance`]. The defaults are the
//! reference balance from `core::constants`; a host can override any subset
//! of them from a JSON file since every field falls back to its default.

use super::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    // Grid
    pub rows: usize,
    pub cols: usize,
    /// Row whose cells only accept placement once unlocked (left to right)
    pub locked_row_index: usize,
    /// Each level listed here unlocks one more cell of the locked row
    pub locked_row_unlock_levels: Vec<u32>,

    // Spawning
    pub spawn_every_seconds: u32,
    pub spawn_queue_max: usize,

    // Bonus
    pub bonus_multiplier: f64,
    pub bonus_duration_seconds: u32,
    pub bonus_cooldown_seconds: u32,

    // Economy
    pub value_per_rate: f64,
    pub sell_divisor: u64,
    pub store_price_per_level: f64,

    // Gifts
    pub gift_paid_base_cost: u64,
    pub gift_paid_cost_seconds: f64,
    pub gift_free_every_seconds: u32,
    pub gift_pity_rare: u32,
    pub gift_pity_legend: u32,
    pub gift_chance_rare: f64,
    pub gift_chance_legend: f64,
    pub gift_coin_multipliers: [f64; 4],
    pub gift_spawn_boost_seconds: u32,

    // Leveling
    pub xp_per_merge_base: u64,
    pub xp_need_base: f64,
    pub xp_need_pow: f64,

    // Host
    pub autosave_interval_ms: u64,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            locked_row_index: LOCKED_ROW_INDEX,
            locked_row_unlock_levels: LOCKED_ROW_UNLOCK_LEVELS.to_vec(),
            spawn_every_seconds: SPAWN_EVERY_SECONDS,
            spawn_queue_max: SPAWN_QUEUE_MAX,
            bonus_multiplier: BONUS_MULTIPLIER,
            bonus_duration_seconds: BONUS_DURATION_SECONDS,
            bonus_cooldown_seconds: BONUS_COOLDOWN_SECONDS,
            value_per_rate: VALUE_PER_RATE,
            sell_divisor: SELL_DIVISOR,
            store_price_per_level: STORE_PRICE_PER_LEVEL,
            gift_paid_base_cost: GIFT_PAID_BASE_COST,
            gift_paid_cost_seconds: GIFT_PAID_COST_SECONDS,
            gift_free_every_seconds: GIFT_FREE_EVERY_SECONDS,
            gift_pity_rare: GIFT_PITY_RARE,
            gift_pity_legend: GIFT_PITY_LEGEND,
            gift_chance_rare: GIFT_CHANCE_RARE,
            gift_chance_legend: GIFT_CHANCE_LEGEND,
            gift_coin_multipliers: GIFT_COIN_MULTIPLIERS,
            gift_spawn_boost_seconds: GIFT_SPAWN_BOOST_SECONDS,
            xp_per_merge_base: XP_PER_MERGE_BASE,
            xp_need_base: XP_NEED_BASE,
            xp_need_pow: XP_NEED_POW,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
        }
    }
}

impl Balance {
    /// Total number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Index of the first cell of the locked row.
    pub fn locked_row_start(&self) -> usize {
        self.locked_row_index * self.cols
    }

    /// True if `index` lies in the locked row.
    pub fn is_locked_row(&self, index: usize) -> bool {
        let start = self.locked_row_start();
        index >= start && index < start + self.cols
    }

    /// Number of locked-row cells a player at `level` is entitled to.
    pub fn locked_cells_earned_by(&self, level: u32) -> usize {
        let earned = self
            .locked_row_unlock_levels
            .iter()
            .filter(|&&threshold| threshold <= level)
            .count();
        earned.min(self.cols)
    }

    /// Interval the free gift waits between claims.
    pub fn gift_free_every_ms(&self) -> i64 {
        seconds_to_ms(self.gift_free_every_seconds)
    }

    /// Spawn boost interval used by the gift prize: half the base interval.
    pub fn gift_spawn_boost_interval(&self) -> u32 {
        ((self.spawn_every_seconds as f64 * 0.5).round() as u32).max(1)
    }
}

/// Converts whole seconds to milliseconds on the timestamp scale.
pub fn seconds_to_ms(seconds: u32) -> i64 {
    seconds as i64 * 1000
}

/// Whole seconds left until `until`, rounded up, never negative.
pub fn remaining_seconds(until: i64, now: i64) -> u64 {
    if until <= now {
        return 0;
    }
    ((until - now) as u64).div_ceil(1000)
}
