//! Gift rolls: gating, pity-aware rarity, weighted prize pick and payout.

use super::types::{
    prize_pool, GiftFailure, GiftMode, GiftOutcome, GiftRarity, GiftRoll, GiftState, Prize,
    PrizeKind,
};
use crate::bonus::logic::clear_cooldown;
use crate::catalog::Reward;
use crate::core::balance::{remaining_seconds, Balance};
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::economy::logic::{apply_reward, gift_paid_cost, income_per_second, try_spend};
use crate::grid::logic::unlock_next_locked_cell;
use rand::Rng;

/// Maps a uniform draw in `[0, 1)` to a rarity, honoring the pity counters.
///
/// Legend pity wins over rare pity. Under rare pity the draw decides between
/// legend and rare with legend's share of the rare-or-better odds.
pub fn rarity_for_draw(gift: &GiftState, balance: &Balance, draw: f64) -> GiftRarity {
    let legend_pity = balance.gift_pity_legend.max(1);
    let rare_pity = balance.gift_pity_rare.max(1);

    if gift.pity_legend >= legend_pity - 1 {
        return GiftRarity::Legend;
    }
    if gift.pity_rare >= rare_pity - 1 {
        let odds = balance.gift_chance_legend + balance.gift_chance_rare;
        let legend_given_rare = balance.gift_chance_legend / odds.max(1e-9);
        return if draw < legend_given_rare {
            GiftRarity::Legend
        } else {
            GiftRarity::Rare
        };
    }

    if draw < balance.gift_chance_legend {
        GiftRarity::Legend
    } else if draw < balance.gift_chance_legend + balance.gift_chance_rare {
        GiftRarity::Rare
    } else {
        GiftRarity::Common
    }
}

pub fn roll_rarity(gift: &GiftState, balance: &Balance, rng: &mut impl Rng) -> GiftRarity {
    rarity_for_draw(gift, balance, rng.gen::<f64>())
}

/// Resets or advances both pity counters after a roll of `rarity`.
pub fn update_pity(gift: &mut GiftState, rarity: GiftRarity) {
    if rarity == GiftRarity::Legend {
        gift.pity_legend = 0;
    } else {
        gift.pity_legend += 1;
    }
    if rarity.is_rare_or_better() {
        gift.pity_rare = 0;
    } else {
        gift.pity_rare += 1;
    }
}

/// Walks `pool` subtracting weights from `draw` (in `[0, total)`) and picks
/// the first entry where the remainder drops to zero or below.
pub fn select_weighted(pool: &[(PrizeKind, u32)], draw: f64) -> PrizeKind {
    let mut remainder = draw;
    for &(kind, weight) in pool {
        remainder -= weight as f64;
        if remainder <= 0.0 {
            return kind;
        }
    }
    // Float edge: fall back to the last entry
    pool.last().map(|&(kind, _)| kind).unwrap_or(PrizeKind::CoinsSmall)
}

pub fn pick_weighted(pool: &[(PrizeKind, u32)], rng: &mut impl Rng) -> PrizeKind {
    let total: u32 = pool.iter().map(|&(_, w)| w).sum();
    select_weighted(pool, rng.gen::<f64>() * total as f64)
}

/// Coin grant at `multiplier` seconds of `income`.
fn coin_grant(income: f64, multiplier: f64) -> u64 {
    (income * multiplier).round().max(0.0) as u64
}

/// Fixes a prize's magnitude and label. `income` is sampled before payout.
pub fn resolve_prize(kind: PrizeKind, income: f64, balance: &Balance) -> Prize {
    let [small, medium, large, huge] = balance.gift_coin_multipliers;
    let coins = |multiplier: f64| {
        let amount = coin_grant(income, multiplier);
        (format!("🪙 +{}", amount), amount)
    };
    let (label, amount) = match kind {
        PrizeKind::CoinsSmall => coins(small),
        PrizeKind::CoinsMedium => coins(medium),
        PrizeKind::CoinsLarge => coins(large),
        PrizeKind::CoinsHuge => coins(huge),
        PrizeKind::OnePatient => ("🐾 +1 patient".to_string(), 1),
        PrizeKind::ThreePatients => ("🐾 +3 patients".to_string(), 3),
        PrizeKind::SpawnBoost => (
            format!(
                "⏱ Faster spawns for {}s",
                balance.gift_spawn_boost_seconds
            ),
            balance.gift_spawn_boost_seconds as u64,
        ),
        PrizeKind::BonusReady => ("⚡ 2x ready".to_string(), 0),
        PrizeKind::BonusNow => (
            format!("⚡ 2x for {}s", balance.bonus_duration_seconds),
            balance.bonus_duration_seconds as u64,
        ),
        PrizeKind::UnlockCell => ("🔓 Open a bed".to_string(), 0),
    };
    Prize {
        kind,
        label,
        amount,
    }
}

/// Pays out `prize`. Returns the prize actually given, which differs only
/// when an unlock-cell prize falls back to the large coin grant.
pub fn apply_prize(
    state: &mut SessionState,
    rules: &Ruleset,
    prize: Prize,
    income: f64,
    now: i64,
    rng: &mut impl Rng,
) -> Prize {
    let balance = &rules.balance;
    let reward = match prize.kind {
        PrizeKind::CoinsSmall
        | PrizeKind::CoinsMedium
        | PrizeKind::CoinsLarge
        | PrizeKind::CoinsHuge => Reward::Coins {
            amount: prize.amount,
        },
        PrizeKind::OnePatient => Reward::PatientPack { count: 1 },
        PrizeKind::ThreePatients => Reward::PatientPack { count: 3 },
        PrizeKind::SpawnBoost => Reward::SpawnBoost {
            seconds: balance.gift_spawn_boost_seconds,
            interval_seconds: balance.gift_spawn_boost_interval(),
        },
        PrizeKind::BonusNow => Reward::BonusWindow {
            seconds: balance.bonus_duration_seconds,
        },
        PrizeKind::BonusReady => {
            clear_cooldown(state, now);
            return prize;
        }
        PrizeKind::UnlockCell => {
            if unlock_next_locked_cell(state, balance) {
                return prize;
            }
            let fallback = resolve_prize(PrizeKind::CoinsLarge, income, balance);
            state.currency += fallback.amount as f64;
            return fallback;
        }
    };
    apply_reward(state, rules, &reward, now, rng);
    prize
}

/// Rolls a gift. A refused roll changes nothing; a successful one charges
/// (or stamps the free timer) exactly once.
pub fn roll_gift(
    state: &mut SessionState,
    rules: &Ruleset,
    mode: GiftMode,
    now: i64,
    rng: &mut impl Rng,
) -> GiftOutcome {
    let balance = &rules.balance;
    let cost = match mode {
        GiftMode::Free => {
            if now < state.gift.next_free_at {
                return Err(GiftFailure::Cooldown {
                    remaining_seconds: remaining_seconds(state.gift.next_free_at, now),
                });
            }
            state.gift.next_free_at = now + balance.gift_free_every_ms();
            0
        }
        GiftMode::Paid => {
            let cost = gift_paid_cost(state, rules);
            if !try_spend(state, cost) {
                return Err(GiftFailure::Unaffordable { cost });
            }
            cost
        }
    };

    let rarity = roll_rarity(&state.gift, balance, rng);
    update_pity(&mut state.gift, rarity);

    let income = income_per_second(state, &rules.catalog).max(1.0);
    let kind = pick_weighted(prize_pool(rarity), rng);
    let prize = resolve_prize(kind, income, balance);
    let prize = apply_prize(state, rules, prize, income, now, rng);

    tracing::info!(
        target: "merge_clinic::gift",
        mode = ?mode,
        rarity = rarity.name(),
        prize = ?prize.kind,
        amount = prize.amount,
        cost,
        pity_rare = state.gift.pity_rare,
        pity_legend = state.gift.pity_legend,
        "gift rolled"
    );

    Ok(GiftRoll {
        mode,
        rarity,
        prize,
        cost,
    })
}

/// Seconds until the free gift is claimable (0 if now).
pub fn free_gift_remaining_seconds(state: &SessionState, now: i64) -> u64 {
    remaining_seconds(state.gift.next_free_at, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::types::PlacedEntity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (SessionState, Ruleset, ChaCha8Rng) {
        let rules = Ruleset::default();
        let mut state = SessionState::new(&rules.balance, 0);
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        (state, rules, ChaCha8Rng::seed_from_u64(5))
    }

    #[test]
    fn test_select_weighted_exact_draws() {
        let pool = prize_pool(GiftRarity::Common);
        assert_eq!(select_weighted(pool, 0.0), PrizeKind::CoinsSmall);
        assert_eq!(select_weighted(pool, 5.0), PrizeKind::CoinsSmall);
        assert_eq!(select_weighted(pool, 5.01), PrizeKind::CoinsMedium);
        assert_eq!(select_weighted(pool, 8.0), PrizeKind::CoinsMedium);
        assert_eq!(select_weighted(pool, 9.999), PrizeKind::OnePatient);
        // Past the total falls back to the last entry
        assert_eq!(select_weighted(pool, 12.0), PrizeKind::OnePatient);
    }

    #[test]
    fn test_pick_weighted_frequencies() {
        let mut rng = StdRng::seed_from_u64(1234);
        let pool = prize_pool(GiftRarity::Legend);
        let rolls = 7000;
        let mut unlocks = 0;
        let mut ready = 0;
        for _ in 0..rolls {
            match pick_weighted(pool, &mut rng) {
                PrizeKind::UnlockCell => unlocks += 1,
                PrizeKind::BonusReady => ready += 1,
                _ => {}
            }
        }
        // Expected 1000 and 3000
        assert!((800..1200).contains(&unlocks), "unlocks {}", unlocks);
        assert!((2700..3300).contains(&ready), "ready {}", ready);
    }

    #[test]
    fn test_rarity_for_draw_without_pity() {
        let balance = Balance::default();
        let gift = GiftState::default();
        assert_eq!(rarity_for_draw(&gift, &balance, 0.0), GiftRarity::Legend);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.029), GiftRarity::Legend);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.03), GiftRarity::Rare);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.249), GiftRarity::Rare);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.25), GiftRarity::Common);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.999), GiftRarity::Common);
    }

    #[test]
    fn test_rare_pity_forces_rare_or_better() {
        let balance = Balance::default();
        let gift = GiftState {
            pity_rare: 6,
            ..GiftState::default()
        };
        // Legend share of rare-or-better is 0.03 / 0.25 = 0.12
        assert_eq!(rarity_for_draw(&gift, &balance, 0.11), GiftRarity::Legend);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.12), GiftRarity::Rare);
        assert_eq!(rarity_for_draw(&gift, &balance, 0.99), GiftRarity::Rare);
    }

    #[test]
    fn test_legend_pity_wins() {
        let balance = Balance::default();
        let gift = GiftState {
            pity_rare: 6,
            pity_legend: 19,
            ..GiftState::default()
        };
        assert_eq!(rarity_for_draw(&gift, &balance, 0.99), GiftRarity::Legend);
    }

    #[test]
    fn test_update_pity() {
        let mut gift = GiftState::default();
        update_pity(&mut gift, GiftRarity::Common);
        assert_eq!((gift.pity_rare, gift.pity_legend), (1, 1));
        update_pity(&mut gift, GiftRarity::Rare);
        assert_eq!((gift.pity_rare, gift.pity_legend), (0, 2));
        update_pity(&mut gift, GiftRarity::Legend);
        assert_eq!((gift.pity_rare, gift.pity_legend), (0, 0));
    }

    #[test]
    fn test_twentieth_roll_is_legend() {
        let (mut state, rules, mut rng) = setup();
        // Rare chance 0 so every unforced roll is common or legend
        let mut rules = rules;
        rules.balance.gift_chance_rare = 0.0;
        rules.balance.gift_chance_legend = 0.0;
        rules.balance.gift_pity_rare = 1000;
        state.currency = 1e9;

        for roll in 1..=20 {
            let result = roll_gift(&mut state, &rules, GiftMode::Paid, 0, &mut rng).unwrap();
            if roll < 20 {
                assert_eq!(result.rarity, GiftRarity::Common, "roll {}", roll);
            } else {
                assert_eq!(result.rarity, GiftRarity::Legend);
            }
        }
        assert_eq!(state.gift.pity_legend, 0);
    }

    #[test]
    fn test_seventh_roll_is_rare_or_better() {
        let (mut state, mut rules, mut rng) = setup();
        rules.balance.gift_chance_rare = 0.0;
        rules.balance.gift_chance_legend = 0.0;
        state.currency = 1e9;
        for roll in 1..=7 {
            let result = roll_gift(&mut state, &rules, GiftMode::Paid, 0, &mut rng).unwrap();
            assert_eq!(result.rarity.is_rare_or_better(), roll == 7, "roll {}", roll);
        }
    }

    #[test]
    fn test_resolve_prize_scales_with_income() {
        let balance = Balance::default();
        let prize = resolve_prize(PrizeKind::CoinsHuge, 2.5, &balance);
        assert_eq!(prize.amount, 450);
        assert_eq!(prize.label, "🪙 +450");
        assert_eq!(resolve_prize(PrizeKind::CoinsSmall, 1.0, &balance).amount, 20);
    }

    #[test]
    fn test_unlock_cell_prize_opens_bed() {
        let (mut state, rules, mut rng) = setup();
        let prize = resolve_prize(PrizeKind::UnlockCell, 1.0, &rules.balance);
        let given = apply_prize(&mut state, &rules, prize, 1.0, 0, &mut rng);
        assert_eq!(given.kind, PrizeKind::UnlockCell);
        assert_eq!(state.unlocked_locked_row_cells, 1);
    }

    #[test]
    fn test_unlock_cell_falls_back_to_large_coins() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_locked_row_cells = 4;
        let prize = resolve_prize(PrizeKind::UnlockCell, 3.0, &rules.balance);
        let given = apply_prize(&mut state, &rules, prize, 3.0, 0, &mut rng);
        assert_eq!(given.kind, PrizeKind::CoinsLarge);
        assert_eq!(given.amount, 240);
        assert_eq!(state.coins(), 240);
        assert_eq!(state.unlocked_locked_row_cells, 4);
    }

    #[test]
    fn test_bonus_prizes() {
        let (mut state, rules, mut rng) = setup();
        state.bonus.active_until = 1_000;
        state.bonus.cooldown_until = 500_000;

        let ready = resolve_prize(PrizeKind::BonusReady, 1.0, &rules.balance);
        apply_prize(&mut state, &rules, ready, 1.0, 10_000, &mut rng);
        assert_eq!(state.bonus.cooldown_until, 0);
        assert_eq!(state.bonus.active_until, 0);

        let now = resolve_prize(PrizeKind::BonusNow, 1.0, &rules.balance);
        apply_prize(&mut state, &rules, now, 1.0, 10_000, &mut rng);
        assert_eq!(state.bonus.active_until, 100_000);
        assert_eq!(state.bonus.cooldown_until, 0);
    }

    #[test]
    fn test_spawn_boost_prize() {
        let (mut state, rules, mut rng) = setup();
        let prize = resolve_prize(PrizeKind::SpawnBoost, 1.0, &rules.balance);
        apply_prize(&mut state, &rules, prize, 1.0, 0, &mut rng);
        assert_eq!(state.spawn_boost.until, 120_000);
        assert_eq!(state.spawn_boost.interval_seconds, 5);
    }

    #[test]
    fn test_free_gift_cooldown() {
        let (mut state, rules, mut rng) = setup();
        let first = roll_gift(&mut state, &rules, GiftMode::Free, 1_000, &mut rng).unwrap();
        assert_eq!(first.cost, 0);
        assert_eq!(state.gift.next_free_at, 1_000 + 86_400_000);

        let before = state.clone();
        let refused = roll_gift(&mut state, &rules, GiftMode::Free, 2_000, &mut rng);
        assert_eq!(
            refused,
            Err(GiftFailure::Cooldown {
                remaining_seconds: 86_399
            })
        );
        assert_eq!(state, before);
        assert_eq!(free_gift_remaining_seconds(&state, 2_000), 86_399);
    }

    #[test]
    fn test_paid_gift_charges_once() {
        let (mut state, rules, mut rng) = setup();
        state.currency = 700.0;
        let roll = roll_gift(&mut state, &rules, GiftMode::Paid, 0, &mut rng).unwrap();
        assert_eq!(roll.cost, 600);
        // Coin prizes may have been added on top of the remaining 100
        assert!(state.currency >= 100.0);
        assert_eq!(state.gift.next_free_at, 0);
    }

    #[test]
    fn test_paid_gift_unaffordable_changes_nothing() {
        let (mut state, rules, mut rng) = setup();
        state.currency = 599.9;
        let before = state.clone();
        assert_eq!(
            roll_gift(&mut state, &rules, GiftMode::Paid, 0, &mut rng),
            Err(GiftFailure::Unaffordable { cost: 600 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_coin_prizes_use_income_before_payout() {
        let (mut state, rules, mut rng) = setup();
        state.grid[0] = Some(PlacedEntity::new("cat_siberian", 2, &mut rng));
        let income = income_per_second(&state, &rules.catalog).max(1.0);
        let prize = resolve_prize(PrizeKind::CoinsMedium, income, &rules.balance);
        assert_eq!(prize.amount, 160);
    }
}
