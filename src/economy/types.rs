//! Receipts for coin-moving operations.

/// What applying a [`crate::catalog::Reward`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedReward {
    Coins {
        amount: u64,
    },
    /// `added` can be short of `requested` when the queue fills up
    Patients {
        added: u32,
        requested: u32,
    },
    BonusWindow {
        seconds: u32,
        active_until: i64,
    },
    SpawnBoost {
        seconds: u32,
        interval_seconds: u32,
    },
}

impl AppliedReward {
    pub fn describe(&self) -> String {
        match self {
            AppliedReward::Coins { amount } => format!("🪙 +{}", amount),
            AppliedReward::Patients { added, .. } if *added > 0 => {
                format!("🎁 +{} patient(s) in queue", added)
            }
            AppliedReward::Patients { .. } => "🎁 Queue is full".to_string(),
            AppliedReward::BonusWindow { seconds, .. } => format!("⚡ 2x for {}s", seconds),
            AppliedReward::SpawnBoost {
                seconds,
                interval_seconds,
            } => format!(
                "⏱ Faster spawns (every {}s) for {}s",
                interval_seconds, seconds
            ),
        }
    }
}

/// What selling a cell did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellOutcome {
    /// Nothing there to sell.
    Empty,
    /// `amount` was credited; `value` is the entity's full worth.
    Sold { amount: u64, value: u64 },
}

impl SellOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            SellOutcome::Empty => None,
            SellOutcome::Sold { amount, .. } => Some(format!("Sold for 🪙 {}", amount)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_full_queue() {
        let receipt = AppliedReward::Patients {
            added: 0,
            requested: 2,
        };
        assert_eq!(receipt.describe(), "🎁 Queue is full");
    }

    #[test]
    fn test_describe_coins() {
        assert_eq!(AppliedReward::Coins { amount: 14 }.describe(), "🪙 +14");
    }
}
