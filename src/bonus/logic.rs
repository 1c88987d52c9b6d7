//! Bonus window timer machine: Idle -> Active -> Cooldown -> Idle.

use super::types::{BonusOutcome, BonusPhase};
use crate::core::balance::{remaining_seconds, seconds_to_ms, Balance};
use crate::core::game_state::SessionState;

pub fn phase(state: &SessionState, now: i64) -> BonusPhase {
    if now < state.bonus.active_until {
        BonusPhase::Active
    } else if now < state.bonus.cooldown_until {
        BonusPhase::Cooldown
    } else {
        BonusPhase::Idle
    }
}

/// Player-triggered activation, gated by the cooldown.
pub fn activate(state: &mut SessionState, balance: &Balance, now: i64) -> BonusOutcome {
    match phase(state, now) {
        BonusPhase::Active => BonusOutcome::AlreadyActive,
        BonusPhase::Cooldown => BonusOutcome::CoolingDown {
            remaining_seconds: remaining_seconds(state.bonus.cooldown_until, now),
        },
        BonusPhase::Idle => {
            let active_until = now + seconds_to_ms(balance.bonus_duration_seconds);
            let cooldown_until = active_until + seconds_to_ms(balance.bonus_cooldown_seconds);
            state.bonus.active_until = active_until;
            state.bonus.cooldown_until = cooldown_until;
            BonusOutcome::Activated {
                active_until,
                cooldown_until,
            }
        }
    }
}

/// Reward-granted window: ignores the cooldown gate and never writes it.
/// Extends a running window, otherwise starts one. Returns the new end.
pub fn grant_bonus_window(state: &mut SessionState, seconds: u32, now: i64) -> i64 {
    let extra = seconds_to_ms(seconds);
    if now < state.bonus.active_until {
        state.bonus.active_until += extra;
    } else {
        state.bonus.active_until = now + extra;
    }
    state.bonus.active_until
}

/// Makes the bonus immediately available again.
pub fn clear_cooldown(state: &mut SessionState, now: i64) {
    state.bonus.cooldown_until = 0;
    if state.bonus.active_until < now {
        state.bonus.active_until = 0;
    }
}

pub fn active_remaining_seconds(state: &SessionState, now: i64) -> u64 {
    remaining_seconds(state.bonus.active_until, now)
}

/// Seconds until the bonus can be pressed again; 0 while active or idle.
pub fn cooldown_remaining_seconds(state: &SessionState, now: i64) -> u64 {
    match phase(state, now) {
        BonusPhase::Cooldown => remaining_seconds(state.bonus.cooldown_until, now),
        BonusPhase::Active | BonusPhase::Idle => 0,
    }
}
