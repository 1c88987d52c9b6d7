//! Grid cell contents and move outcomes.

use crate::core::game_state::lenient;
use crate::progression::LevelUpEvent;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entity sitting in a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub id: Uuid,
    pub line_id: String,
    pub tier: u8,
}

impl PlacedEntity {
    /// Creates an entity with a fresh id drawn from `rng`.
    pub fn new(line_id: impl Into<String>, tier: u8, rng: &mut impl Rng) -> Self {
        Self {
            id: new_entity_id(rng),
            line_id: line_id.into(),
            tier,
        }
    }
}

/// Random (v4) UUID built from the injected rng so seeded runs repeat exactly.
pub fn new_entity_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Deserializes grid cells one by one; a malformed cell becomes empty.
pub(crate) fn lenient_cells<'de, D>(deserializer: D) -> Result<Vec<Option<PlacedEntity>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = lenient(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value::<Option<PlacedEntity>>(v).unwrap_or(None))
        .collect())
}

/// Display data for the tier produced by a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTier {
    pub line_id: String,
    pub tier: u8,
    pub name: String,
    pub icon: String,
}

/// What a move did.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Same cell, out of range, or empty source: nothing happened.
    Ignored,
    /// Target cell is still locked.
    Locked,
    /// Entity relocated into an empty cell.
    Moved { from: usize, to: usize },
    /// Two equal entities merged into the next tier at `at`.
    Merged {
        at: usize,
        merged: MergedTier,
        xp_gained: u64,
    },
    /// Both entities are already at the line's top tier.
    MaxTier,
    /// Different entities exchanged cells.
    Swapped { from: usize, to: usize },
}

/// Move outcome plus any level-ups it triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    pub level_ups: Vec<LevelUpEvent>,
}

impl MoveReport {
    pub fn new(outcome: MoveOutcome) -> Self {
        Self {
            outcome,
            level_ups: Vec::new(),
        }
    }

    pub fn message(&self) -> Option<String> {
        match &self.outcome {
            MoveOutcome::Locked => Some("That bed is still locked".to_string()),
            MoveOutcome::Merged {
                merged, xp_gained, ..
            } => Some(format!(
                "Merged! {} {} (+{} XP)",
                merged.icon, merged.name, xp_gained
            )),
            MoveOutcome::MaxTier => Some("Maximum rarity".to_string()),
            MoveOutcome::Ignored | MoveOutcome::Moved { .. } | MoveOutcome::Swapped { .. } => {
                None
            }
        }
    }
}
