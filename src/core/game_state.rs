use super::balance::{seconds_to_ms, Balance};
use super::constants::SNAPSHOT_VERSION;
use super::ruleset::Ruleset;
use crate::bonus::types::BonusWindow;
use crate::gift::types::GiftState;
use crate::grid::types::{lenient_cells, PlacedEntity};
use crate::spawn::types::{lenient_queue, QueueEntry, SpawnBoostWindow};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;

/// Deserializes a field, falling back to its default when the stored value
/// has the wrong shape. Missing fields are covered by `#[serde(default)]`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserializes a list of strings, skipping entries of any other type.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = lenient(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Everything that changes during play. This is also the save snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    #[serde(deserialize_with = "lenient")]
    pub version: u32,
    /// Coins. Accrues fractionally; spent and shown as the integer floor
    #[serde(deserialize_with = "lenient")]
    pub currency: f64,
    #[serde(deserialize_with = "lenient")]
    pub xp: u64,
    #[serde(deserialize_with = "lenient")]
    pub level: u32,
    /// Line ids that can spawn or be bought
    #[serde(deserialize_with = "lenient_strings")]
    pub unlocked_lines: Vec<String>,
    /// How many cells of the locked row are open, left to right
    #[serde(deserialize_with = "lenient")]
    pub unlocked_locked_row_cells: usize,
    #[serde(deserialize_with = "lenient_cells")]
    pub grid: Vec<Option<PlacedEntity>>,
    #[serde(deserialize_with = "lenient_queue")]
    pub queue: VecDeque<QueueEntry>,
    #[serde(deserialize_with = "lenient")]
    pub next_spawn_at: i64,
    #[serde(deserialize_with = "lenient")]
    pub spawn_boost: SpawnBoostWindow,
    #[serde(deserialize_with = "lenient")]
    pub bonus: BonusWindow,
    #[serde(deserialize_with = "lenient")]
    pub gift: GiftState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_grid_size(Balance::default().cell_count())
    }
}

impl SessionState {
    /// Creates a fresh session whose first spawn is one interval away.
    pub fn new(balance: &Balance, now: i64) -> Self {
        let mut state = Self::with_grid_size(balance.cell_count());
        state.next_spawn_at = now + seconds_to_ms(balance.spawn_every_seconds);
        state
    }

    fn with_grid_size(cells: usize) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            currency: 0.0,
            xp: 0,
            level: 1,
            unlocked_lines: Vec::new(),
            unlocked_locked_row_cells: 0,
            grid: vec![None; cells],
            queue: VecDeque::new(),
            next_spawn_at: 0,
            spawn_boost: SpawnBoostWindow::default(),
            bonus: BonusWindow::default(),
            gift: GiftState::default(),
        }
    }

    /// Coins as shown and spent.
    pub fn coins(&self) -> u64 {
        self.currency.max(0.0).floor() as u64
    }

    pub fn is_unlocked(&self, line_id: &str) -> bool {
        self.unlocked_lines.iter().any(|id| id == line_id)
    }

    /// Uniformly random unlocked line, or `None` when nothing is unlocked.
    pub fn roll_unlocked_line(&self, rng: &mut impl Rng) -> Option<String> {
        self.unlocked_lines.choose(rng).cloned()
    }

    pub fn is_bonus_active(&self, now: i64) -> bool {
        now < self.bonus.active_until
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.iter().filter(|c| c.is_some()).count()
    }

    /// Repairs shape problems left by an old or damaged snapshot.
    ///
    /// Does not relocate entities out of locked cells; that needs the rng
    /// and happens in `progression::bootstrap`.
    pub fn sanitize(&mut self, rules: &Ruleset) {
        let balance = &rules.balance;
        self.version = SNAPSHOT_VERSION;

        if self.grid.len() != balance.cell_count() {
            tracing::warn!(
                target: "merge_clinic::persistence",
                found = self.grid.len(),
                expected = balance.cell_count(),
                "grid has wrong size, starting with an empty grid"
            );
            self.grid = vec![None; balance.cell_count()];
        }

        if !self.currency.is_finite() {
            self.currency = 0.0;
        }
        self.level = self.level.max(1);

        let mut seen = Vec::with_capacity(self.unlocked_lines.len());
        self.unlocked_lines.retain(|id| {
            let keep = rules.catalog.line(id).is_some() && !seen.contains(id);
            if keep {
                seen.push(id.clone());
            }
            keep
        });

        self.unlocked_locked_row_cells = self.unlocked_locked_row_cells.min(balance.cols);
        // Spawns are always base tier
        self.queue.retain(|entry| rules.catalog.line(&entry.line_id).is_some());
        for entry in self.queue.iter_mut() {
            entry.tier = 0;
        }
        self.queue.truncate(balance.spawn_queue_max);

        for entity in self.grid.iter_mut().flatten() {
            if let Some(max) = rules.catalog.line(&entity.line_id).and_then(|l| l.max_tier()) {
                entity.tier = entity.tier.min(max);
            }
        }
    }
}
