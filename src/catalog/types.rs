//! Catalog data types: merge lines, tiers, progression rows and rewards.

use serde::{Deserialize, Serialize};

/// One rung of a merge line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    pub icon: String,
    /// Income units per second while placed on the grid
    pub rate: f64,
    /// Display accent color (no effect on the rules)
    pub accent: String,
}

/// A merge chain. Tier 0 is the base form; the last tier cannot merge further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub tiers: Vec<Tier>,
}

impl Line {
    /// Index of the highest tier, or `None` for a line with no tiers.
    pub fn max_tier(&self) -> Option<u8> {
        self.tiers.len().checked_sub(1).map(|t| t as u8)
    }
}

/// A reward granted by a level-up (and reused by gift prizes and the store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reward {
    /// Credit coins.
    Coins { amount: u64 },
    /// Enqueue up to `count` random unlocked base-tier patients.
    PatientPack { count: u32 },
    /// Extend the 2x window, or start one, without touching the cooldown.
    BonusWindow { seconds: u32 },
    /// Spawn every `interval_seconds` for the next `seconds`.
    SpawnBoost { seconds: u32, interval_seconds: u32 },
}

/// What reaching a level unlocks and grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRow {
    pub level: u32,
    pub unlocks: Vec<String>,
    pub rewards: Vec<Reward>,
}

/// Things the store sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreItem {
    /// One random unlocked patient into the queue
    RandomPatient,
    /// Up to three random unlocked patients into the queue
    PatientPack,
    /// Start the 2x bonus window (subject to its cooldown)
    Bonus,
}

impl StoreItem {
    pub fn all() -> [StoreItem; 3] {
        [
            StoreItem::RandomPatient,
            StoreItem::PatientPack,
            StoreItem::Bonus,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoreItem::RandomPatient => "Random patient",
            StoreItem::PatientPack => "Pack of 3 patients",
            StoreItem::Bonus => "2x booster",
        }
    }
}

/// Base (level 1) store prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePrices {
    pub random_patient: u64,
    pub patient_pack: u64,
    pub bonus: u64,
}

impl StorePrices {
    pub fn base_price(&self, item: StoreItem) -> u64 {
        match item {
            StoreItem::RandomPatient => self.random_patient,
            StoreItem::PatientPack => self.patient_pack,
            StoreItem::Bonus => self.bonus,
        }
    }
}
