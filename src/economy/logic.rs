//! Passive income, selling, price scaling and reward application.

use super::types::{AppliedReward, SellOutcome};
use crate::bonus::logic::grant_bonus_window;
use crate::catalog::{Catalog, Reward};
use crate::core::balance::{seconds_to_ms, Balance};
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::grid::types::PlacedEntity;
use crate::spawn::types::QueueEntry;
use rand::Rng;

/// Sum of income rates over the grid. Unknown line/tier references add 0.
pub fn income_per_second(state: &SessionState, catalog: &Catalog) -> f64 {
    state
        .grid
        .iter()
        .flatten()
        .map(|e| catalog.rate(&e.line_id, e.tier))
        .sum()
}

/// 2x while the bonus window is open, else 1x.
pub fn active_multiplier(state: &SessionState, balance: &Balance, now: i64) -> f64 {
    if state.is_bonus_active(now) {
        balance.bonus_multiplier
    } else {
        1.0
    }
}

/// Credits income for `elapsed_seconds` of wall-clock time. Returns the amount
/// credited. Linear in elapsed time with no cap; negative deltas credit nothing.
pub fn accrue_income(
    state: &mut SessionState,
    rules: &Ruleset,
    elapsed_seconds: f64,
    now: i64,
) -> f64 {
    if !elapsed_seconds.is_finite() || elapsed_seconds <= 0.0 {
        return 0.0;
    }
    let earned = income_per_second(state, &rules.catalog)
        * active_multiplier(state, &rules.balance, now)
        * elapsed_seconds;
    state.currency += earned;
    earned
}

/// Full worth of an entity: its rate times `value_per_rate`, at least 1.
pub fn entity_sell_value(entity: &PlacedEntity, rules: &Ruleset) -> u64 {
    let rate = rules.catalog.rate(&entity.line_id, entity.tier);
    ((rate * rules.balance.value_per_rate).round() as u64).max(1)
}

/// Sells whatever occupies `index` for a fraction of its value.
pub fn sell_at(state: &mut SessionState, rules: &Ruleset, index: usize) -> SellOutcome {
    let Some(entity) = state.grid.get_mut(index).and_then(Option::take) else {
        return SellOutcome::Empty;
    };
    let value = entity_sell_value(&entity, rules);
    let amount = (value / rules.balance.sell_divisor.max(1)).max(1);
    state.currency += amount as f64;
    tracing::debug!(
        target: "merge_clinic::economy",
        index,
        line = %entity.line_id,
        tier = entity.tier,
        amount,
        "sold"
    );
    SellOutcome::Sold { amount, value }
}

/// Store price at `level`: grows by `store_price_per_level` per level above 1.
pub fn scaled_store_price(base_price: u64, level: u32, balance: &Balance) -> u64 {
    let steps = level.saturating_sub(1) as f64;
    let multiplier = 1.0 + steps * balance.store_price_per_level;
    ((base_price as f64 * multiplier).round() as u64).max(1)
}

/// Cost of a paid gift: about `gift_paid_cost_seconds` of current income,
/// never below the base cost.
pub fn gift_paid_cost(state: &SessionState, rules: &Ruleset) -> u64 {
    let income = income_per_second(state, &rules.catalog).max(0.0);
    let scaled = (income * rules.balance.gift_paid_cost_seconds).round() as u64;
    scaled.max(rules.balance.gift_paid_base_cost)
}

/// Deducts `amount` if the player has that many whole coins.
pub fn try_spend(state: &mut SessionState, amount: u64) -> bool {
    if state.coins() < amount {
        return false;
    }
    state.currency -= amount as f64;
    true
}

/// Pushes up to `count` random unlocked base-tier patients, stopping when the
/// queue is full or nothing is unlocked. Returns how many were added.
pub fn enqueue_random_patients(
    state: &mut SessionState,
    rules: &Ruleset,
    count: u32,
    rng: &mut impl Rng,
) -> u32 {
    let mut added = 0;
    for _ in 0..count {
        if state.queue.len() >= rules.balance.spawn_queue_max {
            break;
        }
        let Some(line_id) = state.roll_unlocked_line(rng) else {
            break;
        };
        state.queue.push_back(QueueEntry::base(line_id));
        added += 1;
    }
    added
}

/// Applies one reward. Shared by level-ups, gift prizes and the store.
pub fn apply_reward(
    state: &mut SessionState,
    rules: &Ruleset,
    reward: &Reward,
    now: i64,
    rng: &mut impl Rng,
) -> AppliedReward {
    match *reward {
        Reward::Coins { amount } => {
            state.currency += amount as f64;
            AppliedReward::Coins { amount }
        }
        Reward::PatientPack { count } => {
            let added = enqueue_random_patients(state, rules, count, rng);
            AppliedReward::Patients {
                added,
                requested: count,
            }
        }
        Reward::BonusWindow { seconds } => {
            let active_until = grant_bonus_window(state, seconds, now);
            AppliedReward::BonusWindow {
                seconds,
                active_until,
            }
        }
        Reward::SpawnBoost {
            seconds,
            interval_seconds,
        } => {
            state.spawn_boost.until = now + seconds_to_ms(seconds);
            state.spawn_boost.interval_seconds = interval_seconds;
            // Bring a far-off spawn forward to the boosted interval
            state.next_spawn_at = state
                .next_spawn_at
                .min(now + seconds_to_ms(interval_seconds));
            AppliedReward::SpawnBoost {
                seconds,
                interval_seconds,
            }
        }
    }
}
