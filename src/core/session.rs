//! One player's session: state plus the rules it is played under.
//!
//! Every mutating entry point takes `now` (ms) and, where randomness is
//! involved, the caller's rng. The session never reads a clock itself.

use super::game_state::SessionState;
use super::ruleset::Ruleset;
use crate::bonus::logic::activate;
use crate::bonus::types::BonusOutcome;
use crate::catalog::StoreItem;
use crate::economy::logic::{accrue_income, sell_at};
use crate::economy::types::SellOutcome;
use crate::gift::logic::roll_gift;
use crate::gift::types::{GiftMode, GiftOutcome};
use crate::grid::logic::move_entity;
use crate::grid::types::MoveReport;
use crate::progression::logic::bootstrap;
use crate::progression::types::BootstrapReport;
use crate::spawn::logic::{maybe_spawn, place_from_queue};
use crate::spawn::types::{PlaceOutcome, SpawnOutcome};
use crate::store::logic::buy;
use crate::store::types::StoreOutcome;
use crate::view::{cell_view, hud, CellView, Hud};
use rand::Rng;

/// What one frame tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub income: f64,
    pub spawn: SpawnOutcome,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub rules: Ruleset,
}

impl Session {
    /// Fresh, not yet bootstrapped session.
    pub fn new(rules: Ruleset, now: i64) -> Self {
        let state = SessionState::new(&rules.balance, now);
        Self { state, rules }
    }

    /// Wraps a loaded snapshot, repairing its shape first.
    pub fn from_state(mut state: SessionState, rules: Ruleset) -> Self {
        state.sanitize(&rules);
        Self { state, rules }
    }

    pub fn bootstrap(&mut self, now: i64, rng: &mut impl Rng) -> BootstrapReport {
        bootstrap(&mut self.state, &self.rules, now, rng)
    }

    /// Accrues income for `elapsed_seconds`, then spawns if due.
    pub fn tick(&mut self, elapsed_seconds: f64, now: i64, rng: &mut impl Rng) -> TickReport {
        let income = accrue_income(&mut self.state, &self.rules, elapsed_seconds, now);
        let spawn = maybe_spawn(&mut self.state, &self.rules, now, rng);
        TickReport { income, spawn }
    }

    pub fn accrue_income(&mut self, elapsed_seconds: f64, now: i64) -> f64 {
        accrue_income(&mut self.state, &self.rules, elapsed_seconds, now)
    }

    pub fn maybe_spawn(&mut self, now: i64, rng: &mut impl Rng) -> SpawnOutcome {
        maybe_spawn(&mut self.state, &self.rules, now, rng)
    }

    pub fn place_from_queue(&mut self, now: i64, rng: &mut impl Rng) -> PlaceOutcome {
        place_from_queue(&mut self.state, &self.rules, now, rng)
    }

    pub fn move_entity(
        &mut self,
        from: usize,
        to: usize,
        now: i64,
        rng: &mut impl Rng,
    ) -> MoveReport {
        move_entity(&mut self.state, &self.rules, from, to, now, rng)
    }

    pub fn sell_at(&mut self, index: usize) -> SellOutcome {
        sell_at(&mut self.state, &self.rules, index)
    }

    pub fn activate_bonus(&mut self, now: i64) -> BonusOutcome {
        activate(&mut self.state, &self.rules.balance, now)
    }

    pub fn roll_gift(&mut self, mode: GiftMode, now: i64, rng: &mut impl Rng) -> GiftOutcome {
        roll_gift(&mut self.state, &self.rules, mode, now, rng)
    }

    pub fn buy(&mut self, item: StoreItem, now: i64, rng: &mut impl Rng) -> StoreOutcome {
        buy(&mut self.state, &self.rules, item, now, rng)
    }

    pub fn hud(&self, now: i64) -> Hud {
        hud(&self.state, &self.rules, now)
    }

    pub fn cell(&self, index: usize) -> CellView {
        cell_view(&self.state, &self.rules, index)
    }
}
