//! Snapshot integration tests
//!
//! Round-trips a played session through the JSON snapshot and checks that
//! damaged snapshots load, keep what is valid and repair the rest.

use merge_clinic::core::{Ruleset, Session, SessionState};
use merge_clinic::gift::GiftMode;
use merge_clinic::spawn::PlaceOutcome;
use merge_clinic::utils::persistence::{load_session, save_session};
use merge_clinic::view::CellView;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

fn test_dir() -> PathBuf {
    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
    let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "merge-clinic-snapshot-{}-{}",
        std::process::id(),
        test_id
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A session with some history: spawns, placements, a gift and a bonus.
fn played_session() -> (Session, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut session = Session::new(Ruleset::default(), 0);
    session.bootstrap(0, &mut rng);
    let mut now = 0;
    for _ in 0..6 {
        now += 10_000;
        session.tick(10.0, now, &mut rng);
        session.place_from_queue(now, &mut rng);
    }
    session.roll_gift(GiftMode::Free, now, &mut rng).unwrap();
    session.activate_bonus(now);
    (session, rng)
}

#[test]
fn test_round_trip_preserves_observable_state() {
    let (session, _) = played_session();
    let now = 60_000;

    let json = serde_json::to_string(&session.state).unwrap();
    let restored: SessionState = serde_json::from_str(&json).unwrap();
    let restored = Session::from_state(restored, Ruleset::default());

    assert_eq!(restored.state, session.state);
    assert_eq!(restored.hud(now), session.hud(now));
    for index in 0..16 {
        assert_eq!(restored.cell(index), session.cell(index));
    }
}

#[test]
fn test_round_trip_through_file() {
    let (session, _) = played_session();
    let path = test_dir().join("session.json");
    save_session(&path, &session.state).unwrap();
    let loaded = load_session(&path, &session.rules, 0);
    assert_eq!(loaded, session.state);
}

#[test]
fn test_restored_session_plays_on_identically() {
    let (mut original, rng) = played_session();
    let json = serde_json::to_string(&original.state).unwrap();
    let mut restored =
        Session::from_state(serde_json::from_str(&json).unwrap(), Ruleset::default());

    let mut rng_a = rng.clone();
    let mut rng_b = rng;
    for step in 1..=5 {
        let now = 60_000 + step * 10_000;
        original.tick(10.0, now, &mut rng_a);
        restored.tick(10.0, now, &mut rng_b);
        original.place_from_queue(now, &mut rng_a);
        restored.place_from_queue(now, &mut rng_b);
    }
    assert_eq!(original.state, restored.state);
}

#[test]
fn test_malformed_snapshot_keeps_valid_fields() {
    let json = r#"{
        "version": 1,
        "currency": 321.5,
        "xp": 12,
        "level": "nine",
        "unlocked_lines": ["cat_siberian", "dog_husky", "cat_siberian", 42],
        "unlocked_locked_row_cells": 9,
        "grid": [null, {"id": "not-a-uuid", "line_id": "cat_siberian", "tier": 0}],
        "queue": [{"line_id": "dog_husky", "tier": 0}],
        "bonus": {"active_until": 5000, "cooldown_until": "later"},
        "gift": {"next_free_at": 77, "pity_rare": 3, "pity_legend": 4}
    }"#;

    let path = test_dir().join("session.json");
    std::fs::write(&path, json).unwrap();
    let rules = Ruleset::default();
    let state = load_session(&path, &rules, 0);

    assert_eq!(state.currency, 321.5);
    assert_eq!(state.xp, 12);
    assert_eq!(state.level, 1);
    // Wrong-typed entries are skipped, duplicates dropped
    assert_eq!(
        state.unlocked_lines,
        vec!["cat_siberian".to_string(), "dog_husky".to_string()]
    );
    assert_eq!(state.unlocked_locked_row_cells, 4);
    // Short grid is replaced outright
    assert_eq!(state.grid.len(), 16);
    assert_eq!(state.occupied_count(), 0);
    assert_eq!(state.queue.len(), 1);
    assert_eq!(state.bonus.active_until, 5000);
    assert_eq!(state.bonus.cooldown_until, 0);
    assert_eq!(state.gift.pity_legend, 4);

    // Surviving unlocks keep the ladder where it was
    let mut session = Session::from_state(state, rules);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let report = session.bootstrap(0, &mut rng);
    assert!(report.first_level.is_none());
    assert!(report.starters_placed.is_empty());
    assert_eq!(session.state.level, 1);
    assert_eq!(session.state.unlocked_locked_row_cells, 4);
}

#[test]
fn test_malformed_queue_entries_place_in_bounds() {
    let json = r#"{
        "unlocked_lines": ["cat_siberian"],
        "queue": [
            {"line_id": "cat_siberian", "tier": 200},
            {"line_id": "dragon", "tier": 255}
        ]
    }"#;

    let path = test_dir().join("session.json");
    std::fs::write(&path, json).unwrap();
    let rules = Ruleset::default();
    let state = load_session(&path, &rules, 0);
    assert_eq!(state.queue.len(), 1);
    assert_eq!(state.queue[0].tier, 0);

    let mut session = Session::from_state(state, rules);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    session.bootstrap(0, &mut rng);
    let outcome = session.place_from_queue(0, &mut rng);
    let index = match outcome {
        PlaceOutcome::Placed { index, .. } => index,
        other => panic!("expected a placement, got {:?}", other),
    };

    let placed = session.state.grid[index].as_ref().unwrap();
    assert_eq!(placed.line_id, "cat_siberian");
    assert_eq!(placed.tier, 0);
    assert!(session.state.queue.iter().all(|e| e.line_id != "dragon"));
    assert!(matches!(
        session.cell(index),
        CellView::Occupied { tier: 0, can_upgrade: true, .. }
    ));
}
