//! Queue entries, the spawn boost window and spawn/placement outcomes.

use crate::core::game_state::lenient;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A patient waiting to be placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub line_id: String,
    pub tier: u8,
}

impl QueueEntry {
    /// Spawns are always the base tier.
    pub fn base(line_id: impl Into<String>) -> Self {
        Self {
            line_id: line_id.into(),
            tier: 0,
        }
    }
}

/// Temporary override of the spawn interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnBoostWindow {
    #[serde(deserialize_with = "lenient")]
    pub until: i64,
    #[serde(deserialize_with = "lenient")]
    pub interval_seconds: u32,
}

/// Deserializes the queue entry by entry; malformed entries are dropped.
pub(crate) fn lenient_queue<'de, D>(deserializer: D) -> Result<VecDeque<QueueEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = lenient(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// Result of a spawn timer check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Timer not due yet.
    NotDue,
    /// Queue already at capacity; timer untouched.
    QueueFull,
    /// Due, but nothing is unlocked to draw from; timer untouched.
    NothingUnlocked,
    /// A new patient joined the queue.
    Spawned(QueueEntry),
}

/// Result of placing the queue head on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Queue is empty.
    NoPatient,
    /// No free unlocked cell; the queue was left as-is.
    NoFreeBed,
    Placed { index: usize, line_id: String },
}

impl PlaceOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PlaceOutcome::NoPatient => Some("No patient yet"),
            PlaceOutcome::NoFreeBed => Some("No free open beds"),
            PlaceOutcome::Placed { .. } => None,
        }
    }
}
