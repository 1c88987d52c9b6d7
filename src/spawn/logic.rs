//! Timer-driven spawning into the queue, and placing the queue head.

use super::types::{PlaceOutcome, QueueEntry, SpawnOutcome};
use crate::core::balance::{remaining_seconds, seconds_to_ms};
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::grid::logic::find_free_unlocked_cell;
use crate::grid::types::PlacedEntity;
use rand::Rng;

/// Boosted interval while a spawn boost is running, else the base interval.
pub fn current_spawn_interval_seconds(state: &SessionState, rules: &Ruleset, now: i64) -> u32 {
    let boost = &state.spawn_boost;
    if now < boost.until && boost.interval_seconds > 0 {
        boost.interval_seconds
    } else {
        rules.balance.spawn_every_seconds
    }
}

/// Seconds until the next spawn is due (0 if due now).
pub fn spawn_countdown_seconds(state: &SessionState, now: i64) -> u64 {
    remaining_seconds(state.next_spawn_at, now)
}

/// Adds one base-tier patient when the timer is due.
///
/// A full queue leaves the timer alone, so the spawn fires as soon as room
/// frees up. With nothing unlocked the timer is also left alone and the
/// spawn is retried next tick. Otherwise a due timer always moves forward.
pub fn maybe_spawn(
    state: &mut SessionState,
    rules: &Ruleset,
    now: i64,
    rng: &mut impl Rng,
) -> SpawnOutcome {
    if state.queue.len() >= rules.balance.spawn_queue_max {
        return SpawnOutcome::QueueFull;
    }
    if now < state.next_spawn_at {
        return SpawnOutcome::NotDue;
    }
    let Some(line_id) = state.roll_unlocked_line(rng) else {
        return SpawnOutcome::NothingUnlocked;
    };

    let entry = QueueEntry::base(line_id);
    state.queue.push_back(entry.clone());
    let interval = current_spawn_interval_seconds(state, rules, now);
    state.next_spawn_at = now + seconds_to_ms(interval);
    tracing::debug!(
        target: "merge_clinic::spawn",
        line = %entry.line_id,
        queue_len = state.queue.len(),
        next_spawn_at = state.next_spawn_at,
        "spawned"
    );
    SpawnOutcome::Spawned(entry)
}

/// Places the queue head on a random free unlocked cell.
pub fn place_from_queue(
    state: &mut SessionState,
    rules: &Ruleset,
    now: i64,
    rng: &mut impl Rng,
) -> PlaceOutcome {
    maybe_spawn(state, rules, now, rng);

    if state.queue.is_empty() {
        return PlaceOutcome::NoPatient;
    }
    let Some(index) = find_free_unlocked_cell(state, &rules.balance, rng) else {
        return PlaceOutcome::NoFreeBed;
    };
    let Some(entry) = state.queue.pop_front() else {
        return PlaceOutcome::NoPatient;
    };
    state.grid[index] = Some(PlacedEntity::new(entry.line_id.clone(), entry.tier, rng));
    PlaceOutcome::Placed {
        index,
        line_id: entry.line_id,
    }
}
