//! JSON persistence for ~/.merge_clinic/ files: the session snapshot and
//! the optional balance override.

use crate::core::balance::Balance;
use crate::core::constants::{BALANCE_FILE_NAME, SAVE_FILE_NAME};
use crate::core::game_state::SessionState;
use crate::core::ruleset::Ruleset;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DATA_DIR_NAME: &str = ".merge_clinic";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get the ~/.merge_clinic/ directory path, creating it if needed.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let home_dir = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.merge_clinic/.
pub fn data_path(filename: &str) -> Result<PathBuf, PersistenceError> {
    Ok(data_dir()?.join(filename))
}

pub fn session_path() -> Result<PathBuf, PersistenceError> {
    data_path(SAVE_FILE_NAME)
}

pub fn balance_path() -> Result<PathBuf, PersistenceError> {
    data_path(BALANCE_FILE_NAME)
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(
                target: "merge_clinic::persistence",
                path = %path.display(),
                error = %e,
                "ignoring unparseable file"
            );
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON. Writes a `.tmp` sibling first and
/// renames it over `path`.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Balance tunables from `path`; missing keys keep their defaults.
pub fn load_balance(path: &Path) -> Balance {
    load_json_or_default(path)
}

/// Loads the snapshot at `path`. Never fails: a missing file gives a fresh
/// session and a damaged one is logged and replaced. The result is sanitized
/// but not bootstrapped.
pub fn load_session(path: &Path, rules: &Ruleset, now: i64) -> SessionState {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(
                target: "merge_clinic::persistence",
                path = %path.display(),
                "no save found, starting fresh"
            );
            return SessionState::new(&rules.balance, now);
        }
        Err(e) => {
            tracing::warn!(
                target: "merge_clinic::persistence",
                path = %path.display(),
                error = %e,
                "could not read save, starting fresh"
            );
            return SessionState::new(&rules.balance, now);
        }
    };

    match serde_json::from_str::<SessionState>(&json) {
        Ok(mut state) => {
            state.sanitize(rules);
            state
        }
        Err(e) => {
            tracing::warn!(
                target: "merge_clinic::persistence",
                path = %path.display(),
                error = %e,
                "save is not a session snapshot, starting fresh"
            );
            SessionState::new(&rules.balance, now)
        }
    }
}

pub fn save_session(path: &Path, state: &SessionState) -> Result<(), PersistenceError> {
    save_json(path, state)?;
    tracing::info!(
        target: "merge_clinic::persistence",
        path = %path.display(),
        level = state.level,
        coins = state.coins(),
        "session saved"
    );
    Ok(())
}

/// Removes the snapshot at `path`. A missing file is not an error.
pub fn delete_session(path: &Path) -> Result<(), PersistenceError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::types::PlacedEntity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn test_dir() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "merge-clinic-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_missing_returns_fresh_state() {
        let rules = Ruleset::default();
        let path = test_dir().join("missing.json");
        let state = load_session(&path, &rules, 5_000);
        assert_eq!(state, SessionState::new(&rules.balance, 5_000));
    }

    #[test]
    fn test_load_garbage_returns_fresh_state() {
        let rules = Ruleset::default();
        let path = test_dir().join("session.json");
        fs::write(&path, "not json at all {").unwrap();
        let state = load_session(&path, &rules, 0);
        assert_eq!(state.level, 1);
        assert!(state.unlocked_lines.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let rules = Ruleset::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut state = SessionState::new(&rules.balance, 0);
        state.currency = 123.75;
        state.level = 4;
        state.xp = 17;
        state.unlocked_lines = vec!["cat_siberian".to_string(), "wild_fox".to_string()];
        state.unlocked_locked_row_cells = 1;
        state.grid[12] = Some(PlacedEntity::new("wild_fox", 2, &mut rng));
        state.gift.pity_rare = 3;

        let path = test_dir().join("session.json");
        save_session(&path, &state).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = load_session(&path, &rules, 0);
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_repairs_partial_snapshot() {
        let rules = Ruleset::default();
        let path = test_dir().join("session.json");
        fs::write(
            &path,
            r#"{"level": "x", "currency": 50, "grid": [null, null], "unlocked_lines": ["dog_husky", "unicorn"]}"#,
        )
        .unwrap();
        let state = load_session(&path, &rules, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.coins(), 50);
        assert_eq!(state.grid.len(), 16);
        assert_eq!(state.unlocked_lines, vec!["dog_husky".to_string()]);
    }

    #[test]
    fn test_partial_balance_override() {
        let path = test_dir().join("balance.json");
        fs::write(&path, r#"{"spawn_every_seconds": 4, "gift_pity_legend": 10}"#).unwrap();
        let balance = load_balance(&path);
        assert_eq!(balance.spawn_every_seconds, 4);
        assert_eq!(balance.gift_pity_legend, 10);
        assert_eq!(balance.spawn_queue_max, 3);
    }

    #[test]
    fn test_delete_session_ignores_missing() {
        let path = test_dir().join("session.json");
        assert!(delete_session(&path).is_ok());
        fs::write(&path, "{}").unwrap();
        delete_session(&path).unwrap();
        assert!(!path.exists());
    }
}
