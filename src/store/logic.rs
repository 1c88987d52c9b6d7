use super::types::StoreOutcome;
use crate::bonus::logic::{activate, phase};
use crate::bonus::types::{BonusOutcome, BonusPhase};
use crate::catalog::{Reward, StoreItem};
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::economy::logic::{apply_reward, scaled_store_price, try_spend};
use crate::economy::types::AppliedReward;
use rand::Rng;

/// Patients delivered by the pack item.
const PATIENT_PACK_SIZE: u32 = 3;

/// Price of `item` at the player's current level.
pub fn store_price(item: StoreItem, state: &SessionState, rules: &Ruleset) -> u64 {
    let base = rules.catalog.store_prices.base_price(item);
    scaled_store_price(base, state.level, &rules.balance)
}

/// Refusal reason for `item`, if any, checked before any coin moves.
fn precondition(
    item: StoreItem,
    state: &SessionState,
    rules: &Ruleset,
    now: i64,
) -> Option<StoreOutcome> {
    match item {
        StoreItem::RandomPatient | StoreItem::PatientPack => {
            if state.unlocked_lines.is_empty() {
                Some(StoreOutcome::NothingUnlocked)
            } else if state.queue.len() >= rules.balance.spawn_queue_max {
                Some(StoreOutcome::QueueFull)
            } else {
                None
            }
        }
        StoreItem::Bonus => match phase(state, now) {
            BonusPhase::Idle => None,
            BonusPhase::Active | BonusPhase::Cooldown => Some(StoreOutcome::BonusUnavailable),
        },
    }
}

/// Buys one `item`, charging exactly once on success and nothing otherwise.
pub fn buy(
    state: &mut SessionState,
    rules: &Ruleset,
    item: StoreItem,
    now: i64,
    rng: &mut impl Rng,
) -> StoreOutcome {
    if let Some(refusal) = precondition(item, state, rules, now) {
        return refusal;
    }
    let price = store_price(item, state, rules);
    if !try_spend(state, price) {
        return StoreOutcome::Unaffordable { price };
    }

    let delivered = match item {
        StoreItem::RandomPatient => {
            apply_reward(state, rules, &Reward::PatientPack { count: 1 }, now, rng)
        }
        StoreItem::PatientPack => apply_reward(
            state,
            rules,
            &Reward::PatientPack {
                count: PATIENT_PACK_SIZE,
            },
            now,
            rng,
        ),
        StoreItem::Bonus => match activate(state, &rules.balance, now) {
            BonusOutcome::Activated { active_until, .. } => AppliedReward::BonusWindow {
                seconds: rules.balance.bonus_duration_seconds,
                active_until,
            },
            // Refund if the gate refused
            BonusOutcome::AlreadyActive | BonusOutcome::CoolingDown { .. } => {
                state.currency += price as f64;
                return StoreOutcome::BonusUnavailable;
            }
        },
    };

    tracing::info!(
        target: "merge_clinic::economy",
        item = item.name(),
        price,
        "store purchase"
    );
    StoreOutcome::Bought {
        item,
        price,
        delivered,
    }
}
