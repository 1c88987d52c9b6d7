//! Gift (gacha) state, rarities, prizes and roll results.

use crate::core::game_state::lenient;
use serde::{Deserialize, Serialize};

/// Persistent gift timers and pity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftState {
    /// When the next free gift may be claimed (ms)
    #[serde(deserialize_with = "lenient")]
    pub next_free_at: i64,
    /// Rolls since the last rare-or-better
    #[serde(deserialize_with = "lenient")]
    pub pity_rare: u32,
    /// Rolls since the last legend
    #[serde(deserialize_with = "lenient")]
    pub pity_legend: u32,
}

/// How a roll is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftMode {
    /// Once per `gift_free_every_seconds`
    Free,
    /// Costs `gift_paid_cost` coins
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GiftRarity {
    Common,
    Rare,
    Legend,
}

impl GiftRarity {
    pub fn name(&self) -> &'static str {
        match self {
            GiftRarity::Common => "Common",
            GiftRarity::Rare => "Rare",
            GiftRarity::Legend => "Legend",
        }
    }

    /// True for rare and legend.
    pub fn is_rare_or_better(&self) -> bool {
        *self >= GiftRarity::Rare
    }
}

/// Entries of the weighted prize pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrizeKind {
    CoinsSmall,
    CoinsMedium,
    CoinsLarge,
    CoinsHuge,
    OnePatient,
    ThreePatients,
    SpawnBoost,
    /// Clears the bonus cooldown
    BonusReady,
    /// Starts (or extends) the 2x window right away
    BonusNow,
    /// Opens the next locked-row cell
    UnlockCell,
}

/// Weighted pool for a rarity, in selection order.
pub fn prize_pool(rarity: GiftRarity) -> &'static [(PrizeKind, u32)] {
    match rarity {
        GiftRarity::Common => &[
            (PrizeKind::CoinsSmall, 5),
            (PrizeKind::CoinsMedium, 3),
            (PrizeKind::OnePatient, 2),
        ],
        GiftRarity::Rare => &[
            (PrizeKind::CoinsLarge, 3),
            (PrizeKind::ThreePatients, 2),
            (PrizeKind::SpawnBoost, 2),
        ],
        GiftRarity::Legend => &[
            (PrizeKind::BonusReady, 3),
            (PrizeKind::BonusNow, 2),
            (PrizeKind::UnlockCell, 1),
            (PrizeKind::CoinsHuge, 1),
        ],
    }
}

/// A prize with its magnitude resolved against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    pub kind: PrizeKind,
    pub label: String,
    /// Coins, patients or seconds depending on the kind; 0 where meaningless
    pub amount: u64,
}

/// Why a roll was refused. Nothing is charged or stamped on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftFailure {
    Cooldown { remaining_seconds: u64 },
    Unaffordable { cost: u64 },
}

/// A completed roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftRoll {
    pub mode: GiftMode,
    pub rarity: GiftRarity,
    pub prize: Prize,
    /// Coins charged for a paid roll, 0 for free
    pub cost: u64,
}

pub type GiftOutcome = Result<GiftRoll, GiftFailure>;

impl GiftFailure {
    pub fn message(&self) -> String {
        match self {
            GiftFailure::Cooldown { remaining_seconds } => {
                format!("Free gift not ready yet ({}s)", remaining_seconds)
            }
            GiftFailure::Unaffordable { cost } => format!("Not enough coins: need 🪙 {}", cost),
        }
    }
}
