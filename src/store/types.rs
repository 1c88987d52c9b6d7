//! Store purchase results.

use crate::catalog::StoreItem;
use crate::economy::types::AppliedReward;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Charged `price` once; `delivered` is what arrived.
    Bought {
        item: StoreItem,
        price: u64,
        delivered: AppliedReward,
    },
    /// No line is unlocked yet, so there is nothing to sell.
    NothingUnlocked,
    QueueFull,
    /// The bonus is running or cooling down.
    BonusUnavailable,
    Unaffordable { price: u64 },
}

impl StoreOutcome {
    pub fn message(&self) -> String {
        match self {
            StoreOutcome::Bought {
                item, delivered, ..
            } => format!("Bought {}: {}", item.name(), delivered.describe()),
            StoreOutcome::NothingUnlocked => "Level up to unlock patients first".to_string(),
            StoreOutcome::QueueFull => "Queue is full".to_string(),
            StoreOutcome::BonusUnavailable => "2x is not available right now".to_string(),
            StoreOutcome::Unaffordable { price } => format!("Not enough coins: need 🪙 {}", price),
        }
    }

    pub fn is_bought(&self) -> bool {
        matches!(self, StoreOutcome::Bought { .. })
    }
}
