//! Read-only snapshots of a session for rendering.
//!
//! Nothing here mutates state. A host builds one [`Hud`] per frame and one
//! [`CellView`] per grid cell.

use crate::bonus::logic::{active_remaining_seconds, cooldown_remaining_seconds, phase};
use crate::bonus::types::BonusPhase;
use crate::catalog::{Catalog, StoreItem};
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use crate::economy::logic::{active_multiplier, gift_paid_cost, income_per_second};
use crate::gift::logic::free_gift_remaining_seconds;
use crate::grid::logic::is_cell_unlocked;
use crate::progression::logic::xp_needed;
use crate::spawn::logic::{current_spawn_interval_seconds, spawn_countdown_seconds};
use crate::store::logic::store_price;

/// Display info for the patient at the head of the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueHeadInfo {
    pub line_id: String,
    pub tier: u8,
    pub name: String,
    pub icon: String,
}

/// What one grid cell shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    Locked,
    Empty,
    Occupied {
        line_id: String,
        tier: u8,
        name: String,
        icon: String,
        rate: f64,
        /// The entity can still merge upward
        can_upgrade: bool,
    },
}

/// Every number the HUD shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub coins: u64,
    pub income_per_second: f64,
    pub multiplier: f64,
    pub level: u32,
    pub xp: u64,
    pub xp_needed: u64,
    pub queue_head: Option<QueueHeadInfo>,
    pub queue_len: usize,
    pub queue_max: usize,
    pub spawn_countdown_seconds: u64,
    pub spawn_interval_seconds: u32,
    pub bonus_phase: BonusPhase,
    pub bonus_remaining_seconds: u64,
    pub bonus_cooldown_seconds: u64,
    pub gift_free_remaining_seconds: u64,
    pub gift_paid_cost: u64,
    pub store_prices: Vec<(StoreItem, u64)>,
}

pub fn queue_head_info(state: &SessionState, catalog: &Catalog) -> Option<QueueHeadInfo> {
    let head = state.queue.front()?;
    let (name, icon) = match catalog.tier(&head.line_id, head.tier) {
        Some(t) => (t.name.clone(), t.icon.clone()),
        None => (head.line_id.clone(), "?".to_string()),
    };
    Some(QueueHeadInfo {
        line_id: head.line_id.clone(),
        tier: head.tier,
        name,
        icon,
    })
}

/// Lock, occupancy and tier display for `index`. Out of range reads as locked.
pub fn cell_view(state: &SessionState, rules: &Ruleset, index: usize) -> CellView {
    if index >= state.grid.len() || !is_cell_unlocked(state, &rules.balance, index) {
        return CellView::Locked;
    }
    let Some(entity) = &state.grid[index] else {
        return CellView::Empty;
    };
    let catalog = &rules.catalog;
    let (name, icon) = match catalog.tier(&entity.line_id, entity.tier) {
        Some(t) => (t.name.clone(), t.icon.clone()),
        None => (entity.line_id.clone(), "?".to_string()),
    };
    CellView::Occupied {
        line_id: entity.line_id.clone(),
        tier: entity.tier,
        name,
        icon,
        rate: catalog.rate(&entity.line_id, entity.tier),
        can_upgrade: catalog.can_upgrade(&entity.line_id, entity.tier),
    }
}

pub fn hud(state: &SessionState, rules: &Ruleset, now: i64) -> Hud {
    let balance = &rules.balance;
    Hud {
        coins: state.coins(),
        income_per_second: income_per_second(state, &rules.catalog),
        multiplier: active_multiplier(state, balance, now),
        level: state.level,
        xp: state.xp,
        xp_needed: xp_needed(balance, state.level),
        queue_head: queue_head_info(state, &rules.catalog),
        queue_len: state.queue.len(),
        queue_max: balance.spawn_queue_max,
        spawn_countdown_seconds: spawn_countdown_seconds(state, now),
        spawn_interval_seconds: current_spawn_interval_seconds(state, rules, now),
        bonus_phase: phase(state, now),
        bonus_remaining_seconds: active_remaining_seconds(state, now),
        bonus_cooldown_seconds: cooldown_remaining_seconds(state, now),
        gift_free_remaining_seconds: free_gift_remaining_seconds(state, now),
        gift_paid_cost: gift_paid_cost(state, rules),
        store_prices: StoreItem::all()
            .into_iter()
            .map(|item| (item, store_price(item, state, rules)))
            .collect(),
    }
}
