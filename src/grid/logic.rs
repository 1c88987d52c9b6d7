//! Cell locking, free-cell search and the move/merge/swap state machine.

use super::types::{MergedTier, MoveOutcome, MoveReport, PlacedEntity};
use crate::core::balance::Balance;
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::progression::logic::check_level_ups;
use rand::seq::SliceRandom;
use rand::Rng;

/// Cells outside the locked row are always open; locked-row cells open left
/// to right as `unlocked_locked_row_cells` grows.
pub fn is_cell_unlocked(state: &SessionState, balance: &Balance, index: usize) -> bool {
    if !balance.is_locked_row(index) {
        return true;
    }
    index - balance.locked_row_start() < state.unlocked_locked_row_cells
}

/// Indices of every empty, unlocked cell in grid order.
pub fn free_unlocked_cells(state: &SessionState, balance: &Balance) -> Vec<usize> {
    (0..state.grid.len())
        .filter(|&i| state.grid[i].is_none() && is_cell_unlocked(state, balance, i))
        .collect()
}

/// A uniformly random empty, unlocked cell.
pub fn find_free_unlocked_cell(
    state: &SessionState,
    balance: &Balance,
    rng: &mut impl Rng,
) -> Option<usize> {
    free_unlocked_cells(state, balance).choose(rng).copied()
}

/// Opens the next cell of the locked row. False if the row is already open.
pub fn unlock_next_locked_cell(state: &mut SessionState, balance: &Balance) -> bool {
    if state.unlocked_locked_row_cells >= balance.cols {
        return false;
    }
    state.unlocked_locked_row_cells += 1;
    true
}

/// XP for merging two entities of `source_tier`.
pub fn merge_xp(balance: &Balance, source_tier: u8) -> u64 {
    balance.xp_per_merge_base * (source_tier as u64 + 1)
}

/// Drags the entity at `from` onto `to`: relocate, merge or swap.
pub fn move_entity(
    state: &mut SessionState,
    rules: &Ruleset,
    from: usize,
    to: usize,
    now: i64,
    rng: &mut impl Rng,
) -> MoveReport {
    let len = state.grid.len();
    if from == to || from >= len || to >= len {
        return MoveReport::new(MoveOutcome::Ignored);
    }
    if !is_cell_unlocked(state, &rules.balance, to) {
        return MoveReport::new(MoveOutcome::Locked);
    }
    let Some(source) = state.grid[from].clone() else {
        return MoveReport::new(MoveOutcome::Ignored);
    };

    let outcome = match state.grid[to].clone() {
        None => {
            state.grid[to] = state.grid[from].take();
            MoveOutcome::Moved { from, to }
        }
        Some(target) if target.line_id == source.line_id && target.tier == source.tier => {
            if !rules.catalog.can_upgrade(&source.line_id, source.tier) {
                return MoveReport::new(MoveOutcome::MaxTier);
            }
            let next_tier = source.tier + 1;
            state.grid[to] = Some(PlacedEntity::new(source.line_id.clone(), next_tier, rng));
            state.grid[from] = None;

            let xp_gained = merge_xp(&rules.balance, source.tier);
            state.xp += xp_gained;

            let (name, icon) = match rules.catalog.tier(&source.line_id, next_tier) {
                Some(t) => (t.name.clone(), t.icon.clone()),
                None => (String::new(), "✨".to_string()),
            };
            tracing::debug!(
                target: "merge_clinic::grid",
                at = to,
                line = %source.line_id,
                tier = next_tier,
                xp_gained,
                "merged"
            );
            MoveOutcome::Merged {
                at: to,
                merged: MergedTier {
                    line_id: source.line_id,
                    tier: next_tier,
                    name,
                    icon,
                },
                xp_gained,
            }
        }
        Some(_) => {
            state.grid.swap(from, to);
            MoveOutcome::Swapped { from, to }
        }
    };

    let level_ups = check_level_ups(state, rules, now, rng);
    MoveReport { outcome, level_ups }
}
