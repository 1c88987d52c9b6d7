//! XP curve, level-ups, locked-row unlocks and session bootstrap.

use super::types::{BootstrapReport, LevelUpEvent};
use crate::core::balance::Balance;
use crate::core::constants::XP_NEED_FLOOR;
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::economy::logic::apply_reward;
use crate::grid::logic::{find_free_unlocked_cell, is_cell_unlocked, unlock_next_locked_cell};
use crate::grid::types::PlacedEntity;
use rand::Rng;

/// XP needed to advance past `level`: `max(20, round(base * level^pow))`.
pub fn xp_needed(balance: &Balance, level: u32) -> u64 {
    let raw = balance.xp_need_base * (level as f64).powf(balance.xp_need_pow);
    (raw.round() as u64).max(XP_NEED_FLOOR)
}

/// Opens one more locked-row cell if `level` is an unlock level.
fn unlock_locked_cell_if_needed(state: &mut SessionState, balance: &Balance, level: u32) -> bool {
    balance.locked_row_unlock_levels.contains(&level) && unlock_next_locked_cell(state, balance)
}

/// Applies the progression row for `level`: unlocks, rewards, then the
/// locked-row cell.
fn apply_level_row(
    state: &mut SessionState,
    rules: &Ruleset,
    level: u32,
    now: i64,
    rng: &mut impl Rng,
) -> LevelUpEvent {
    let row = rules.catalog.progression_row(level);

    for id in &row.unlocks {
        if !state.is_unlocked(id) {
            state.unlocked_lines.push(id.clone());
        }
    }
    let unlocked_labels = row
        .unlocks
        .iter()
        .map(|id| rules.catalog.unlock_label(id))
        .collect();

    let rewards = row
        .rewards
        .iter()
        .map(|reward| apply_reward(state, rules, reward, now, rng))
        .collect();

    let cell_unlocked = unlock_locked_cell_if_needed(state, &rules.balance, level);

    LevelUpEvent {
        level,
        unlocked_lines: row.unlocks,
        unlocked_labels,
        rewards,
        cell_unlocked,
    }
}

/// Spends XP on as many levels as it covers, one event per level gained.
pub fn check_level_ups(
    state: &mut SessionState,
    rules: &Ruleset,
    now: i64,
    rng: &mut impl Rng,
) -> Vec<LevelUpEvent> {
    let mut events = Vec::new();
    loop {
        let need = xp_needed(&rules.balance, state.level);
        if state.xp < need {
            break;
        }
        state.xp -= need;
        state.level += 1;
        let event = apply_level_row(state, rules, state.level, now, rng);
        tracing::info!(
            target: "merge_clinic::progression",
            level = event.level,
            unlocked = ?event.unlocked_lines,
            cell_unlocked = event.cell_unlocked,
            "level up"
        );
        events.push(event);
    }
    events
}

/// Moves entities out of locked cells, dropping them if nothing is free.
/// Returns `(relocated, discarded)`.
pub fn relocate_locked_entities(
    state: &mut SessionState,
    balance: &Balance,
    rng: &mut impl Rng,
) -> (usize, usize) {
    let mut relocated = 0;
    let mut discarded = 0;
    for index in 0..state.grid.len() {
        if state.grid[index].is_none() || is_cell_unlocked(state, balance, index) {
            continue;
        }
        let entity = state.grid[index].take();
        match find_free_unlocked_cell(state, balance, rng) {
            Some(target) => {
                state.grid[target] = entity;
                relocated += 1;
            }
            None => {
                tracing::warn!(
                    target: "merge_clinic::progression",
                    index,
                    "no free bed for entity in locked cell, discarding it"
                );
                discarded += 1;
            }
        }
    }
    (relocated, discarded)
}

/// Prepares a fresh or freshly loaded session for play.
///
/// A session with nothing unlocked gets level 1's row and up to two starter
/// entities. Every session then gets its locked-row cells recomputed from
/// its level (never lowered) and has locked cells swept clear.
pub fn bootstrap(
    state: &mut SessionState,
    rules: &Ruleset,
    now: i64,
    rng: &mut impl Rng,
) -> BootstrapReport {
    let balance = &rules.balance;
    let mut report = BootstrapReport::default();

    if state.unlocked_lines.is_empty() {
        state.level = state.level.max(1);
        report.first_level = Some(apply_level_row(state, rules, 1, now, rng));

        let starters: Vec<String> = state.unlocked_lines.iter().take(2).cloned().collect();
        for line_id in starters {
            let Some(index) = find_free_unlocked_cell(state, balance, rng) else {
                break;
            };
            state.grid[index] = Some(PlacedEntity::new(line_id, 0, rng));
            report.starters_placed.push(index);
        }
    }

    let earned = balance.locked_cells_earned_by(state.level);
    state.unlocked_locked_row_cells = state.unlocked_locked_row_cells.max(earned).min(balance.cols);

    let (relocated, discarded) = relocate_locked_entities(state, balance, rng);
    report.relocated = relocated;
    report.discarded = discarded;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Reward;
    use crate::economy::types::AppliedReward;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (SessionState, Ruleset, ChaCha8Rng) {
        let rules = Ruleset::default();
        let state = SessionState::new(&rules.balance, 0);
        (state, rules, ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn test_xp_needed_values() {
        let balance = Balance::default();
        assert_eq!(xp_needed(&balance, 1), 80);
        assert_eq!(xp_needed(&balance, 2), 204);
    }

    #[test]
    fn test_xp_needed_strictly_increasing() {
        let balance = Balance::default();
        for level in 1..500 {
            assert!(
                xp_needed(&balance, level + 1) > xp_needed(&balance, level),
                "level {}",
                level
            );
        }
    }

    #[test]
    fn test_xp_needed_floor() {
        let balance = Balance {
            xp_need_base: 1.0,
            ..Balance::default()
        };
        assert_eq!(xp_needed(&balance, 1), 20);
    }

    #[test]
    fn test_no_level_up_below_need() {
        let (mut state, rules, mut rng) = setup();
        state.xp = 79;
        assert!(check_level_ups(&mut state, &rules, 0, &mut rng).is_empty());
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 79);
    }

    #[test]
    fn test_single_level_up_applies_row() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        state.xp = 85;

        let events = check_level_ups(&mut state, &rules, 0, &mut rng);

        assert_eq!(events.len(), 1);
        assert_eq!(state.level, 2);
        assert_eq!(state.xp, 5);
        assert!(state.is_unlocked("dog_husky"));
        assert_eq!(state.coins(), 12);
        assert_eq!(state.queue.len(), 1);
        assert_eq!(
            events[0].rewards,
            vec![
                AppliedReward::Coins { amount: 12 },
                AppliedReward::Patients {
                    added: 1,
                    requested: 1
                }
            ]
        );
    }

    #[test]
    fn test_multi_level_up_emits_one_event_per_level() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        let need = xp_needed(&rules.balance, 1) + xp_needed(&rules.balance, 2);
        state.xp = need + 7;

        let events = check_level_ups(&mut state, &rules, 0, &mut rng);

        assert_eq!(events.iter().map(|e| e.level).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 7);
        // Level 3 opens the first locked-row cell
        assert!(events[1].cell_unlocked);
        assert_eq!(state.unlocked_locked_row_cells, 1);
        assert!(state.is_unlocked("rodent_hamster"));
    }

    #[test]
    fn test_level_up_spawn_boost_reward() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        state.level = 2;
        state.xp = xp_needed(&rules.balance, 2);
        state.next_spawn_at = 100_000;

        check_level_ups(&mut state, &rules, 1_000, &mut rng);

        assert_eq!(state.spawn_boost.until, 61_000);
        assert_eq!(state.spawn_boost.interval_seconds, 6);
        assert_eq!(state.next_spawn_at, 7_000);
    }

    #[test]
    fn test_already_unlocked_line_is_not_duplicated() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = rules
            .catalog
            .lines
            .iter()
            .map(|l| l.id.clone())
            .collect();
        state.level = 5;
        state.xp = xp_needed(&rules.balance, 5);

        let events = check_level_ups(&mut state, &rules, 0, &mut rng);
        assert_eq!(events[0].unlocked_lines, vec!["cat_siberian".to_string()]);
        assert_eq!(state.unlocked_lines.len(), 5);
    }

    #[test]
    fn test_past_ladder_grants_default_coins() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        state.level = 15;
        state.xp = xp_needed(&rules.balance, 15);
        let events = check_level_ups(&mut state, &rules, 0, &mut rng);
        assert_eq!(events[0].level, 16);
        assert_eq!(events[0].rewards, vec![AppliedReward::Coins { amount: 10 }]);
    }

    #[test]
    fn test_cell_unlock_stops_when_row_full() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        state.unlocked_locked_row_cells = 4;
        state.level = 14;
        state.xp = xp_needed(&rules.balance, 14);
        let events = check_level_ups(&mut state, &rules, 0, &mut rng);
        assert!(!events[0].cell_unlocked);
        assert_eq!(state.unlocked_locked_row_cells, 4);
    }

    #[test]
    fn test_bootstrap_fresh_session() {
        let (mut state, rules, mut rng) = setup();
        let report = bootstrap(&mut state, &rules, 0, &mut rng);

        assert_eq!(state.level, 1);
        assert_eq!(state.unlocked_lines, vec!["cat_siberian".to_string()]);
        assert_eq!(state.coins(), 10);
        // Only one line unlocked at level 1, so one starter
        assert_eq!(report.starters_placed.len(), 1);
        assert_eq!(state.occupied_count(), 1);
        assert_eq!(state.unlocked_locked_row_cells, 0);
        let first = report.first_level.unwrap();
        assert_eq!(first.rewards, vec![AppliedReward::Coins { amount: 10 }]);
    }

    #[test]
    fn test_bootstrap_twice_applies_level_one_once() {
        let (mut state, rules, mut rng) = setup();
        bootstrap(&mut state, &rules, 0, &mut rng);
        let report = bootstrap(&mut state, &rules, 0, &mut rng);
        assert!(report.first_level.is_none());
        assert_eq!(state.coins(), 10);
        assert_eq!(state.occupied_count(), 1);
    }

    #[test]
    fn test_bootstrap_places_two_starters_with_two_starting_lines() {
        let (mut state, mut rules, mut rng) = setup();
        rules.catalog.progression[0].unlocks =
            vec!["cat_siberian".to_string(), "dog_husky".to_string()];
        rules.catalog.progression[0].rewards = vec![Reward::Coins { amount: 0 }];

        let report = bootstrap(&mut state, &rules, 0, &mut rng);
        assert_eq!(report.starters_placed.len(), 2);
        let lines: Vec<&str> = report
            .starters_placed
            .iter()
            .map(|&i| state.grid[i].as_ref().unwrap().line_id.as_str())
            .collect();
        assert_eq!(lines, vec!["cat_siberian", "dog_husky"]);
    }

    #[test]
    fn test_bootstrap_recomputes_cells_without_lowering() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        state.level = 7;
        bootstrap(&mut state, &rules, 0, &mut rng);
        assert_eq!(state.unlocked_locked_row_cells, 2);

        state.unlocked_locked_row_cells = 3;
        bootstrap(&mut state, &rules, 0, &mut rng);
        assert_eq!(state.unlocked_locked_row_cells, 3);
    }

    #[test]
    fn test_bootstrap_relocates_entities_from_locked_cells() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        state.grid[14] = Some(PlacedEntity::new("cat_siberian", 2, &mut rng));

        let report = bootstrap(&mut state, &rules, 0, &mut rng);

        assert_eq!(report.relocated, 1);
        assert!(state.grid[14].is_none());
        let (index, entity) = state
            .grid
            .iter()
            .enumerate()
            .find_map(|(i, c)| c.as_ref().map(|e| (i, e)))
            .unwrap();
        assert!(index < 12);
        assert_eq!(entity.tier, 2);
    }

    #[test]
    fn test_bootstrap_discards_when_no_bed_free() {
        let (mut state, rules, mut rng) = setup();
        state.unlocked_lines = vec!["cat_siberian".to_string()];
        for i in 0..12 {
            state.grid[i] = Some(PlacedEntity::new("cat_siberian", 0, &mut rng));
        }
        state.grid[15] = Some(PlacedEntity::new("dog_husky", 3, &mut rng));

        let report = bootstrap(&mut state, &rules, 0, &mut rng);
        assert_eq!(report.discarded, 1);
        assert!(state.grid[15].is_none());
        assert_eq!(state.occupied_count(), 12);
    }
}
