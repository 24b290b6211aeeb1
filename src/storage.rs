//! Local key-value storage and the day-keyed ritual journal.
//!
//! [`LocalStore`] is a single JSON file mapping string keys to string values.
//! [`RitualJournal`] keeps one [`RitualState`] per calendar day on top of it.

use crate::error::Result;
use crate::rituals::{RitualState, RitualTask, GRATITUDE_SLOTS};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

const STORE_FILE: &str = "storage.json";

/// Namespace prefix for ritual keys.
pub const RITUALS_NAMESPACE: &str = "cosmos_rituals";

/// File-backed string key-value store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store at `<dir>/storage.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(STORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole map. A missing file is an empty store.
    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Like `read_all`, but a broken store file reads as empty.
    fn read_all_lossy(&self) -> BTreeMap<String, String> {
        match self.read_all() {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "local store unreadable, treating as empty");
                BTreeMap::new()
            }
        }
    }

    /// Map to write back into. An unreadable file is moved aside to
    /// `storage.json.bak` so the other keys survive the next write.
    fn read_all_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_all() {
            Ok(map) => Ok(map),
            Err(e) => {
                let backup = self.backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "local store unreadable, moving it aside"
                );
                fs::rename(&self.path, &backup)?;
                Ok(BTreeMap::new())
            }
        }
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.read_all_lossy().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_all_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_all(&map)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut map = self.read_all_for_write()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }

    pub fn keys(&self) -> Vec<String> {
        self.read_all_lossy().into_keys().collect()
    }
}

/// Format a date the way ritual keys expect it (`DD/MM/YYYY`).
pub fn locale_date_string(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Ritual key for a given day.
pub fn day_key(date: NaiveDate) -> String {
    format!("{}_{}", RITUALS_NAMESPACE, locale_date_string(date))
}

/// Ritual key for the current local day.
pub fn today_key() -> String {
    day_key(Local::now().date_naive())
}

/// Every shape a stored ritual blob has had.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRituals {
    #[serde(default)]
    gratitude_list: Option<Vec<String>>,
    #[serde(default)]
    completed_tasks: Option<Vec<String>>,
    /// Legacy: full task objects carrying a `completed` flag. Anything other
    /// than an array is ignored.
    #[serde(default)]
    tasks: Option<Value>,
}

impl StoredRituals {
    fn into_state(self) -> RitualState {
        let mut state = RitualState::default();

        if let Some(list) = self.gratitude_list {
            for (slot, text) in list.into_iter().take(GRATITUDE_SLOTS).enumerate() {
                state.gratitude_list[slot] = text;
            }
        }

        let mut ids: Vec<String> = Vec::new();
        if let Some(Value::Array(tasks)) = self.tasks {
            if tasks.first().is_some_and(Value::is_object) {
                ids = legacy_completed_ids(&tasks);
            } else if !tasks.is_empty() {
                // Bare-identifier `tasks` arrays were never a written format.
                debug!("ignoring legacy tasks array without task objects");
            }
        }
        if let Some(completed) = self.completed_tasks {
            ids = completed;
        }

        for id in ids {
            match RitualTask::from_id(&id) {
                Some(task) if !state.completed_tasks.contains(&task) => {
                    state.completed_tasks.push(task)
                }
                Some(_) => {}
                None => debug!(task = %id, "dropping unknown ritual task"),
            }
        }

        state
    }
}

fn legacy_completed_ids(tasks: &[Value]) -> Vec<String> {
    tasks
        .iter()
        .filter(|t| t.get("completed").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|t| t.get("id").and_then(Value::as_str).map(String::from))
        .collect()
}

/// Decode a stored ritual blob, accepting current and legacy shapes.
pub fn decode_rituals(raw: &str) -> Result<RitualState> {
    let stored: StoredRituals = serde_json::from_str(raw)?;
    Ok(stored.into_state())
}

/// Per-day ritual persistence.
#[derive(Debug, Clone)]
pub struct RitualJournal {
    store: LocalStore,
}

impl RitualJournal {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Load the state stored under `day_key`. Never fails: absent or corrupt
    /// data yields the default state.
    pub fn load(&self, day_key: &str) -> RitualState {
        let Some(raw) = self.store.get_item(day_key) else {
            return RitualState::default();
        };
        match decode_rituals(&raw) {
            Ok(state) => state,
            Err(e) => {
                error!(key = day_key, error = %e, "failed to load rituals");
                RitualState::default()
            }
        }
    }

    /// Overwrite the state stored under `day_key`.
    pub fn save(&self, day_key: &str, state: &RitualState) -> Result<()> {
        let content = serde_json::to_string(state)?;
        self.store.set_item(day_key, &content)
    }

    pub fn load_today(&self) -> RitualState {
        self.load(&today_key())
    }

    pub fn save_today(&self, state: &RitualState) -> Result<()> {
        self.save(&today_key(), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn journal() -> (TempDir, RitualJournal) {
        let dir = TempDir::new().unwrap();
        let journal = RitualJournal::new(LocalStore::in_dir(dir.path()));
        (dir, journal)
    }

    #[test]
    fn test_day_key_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(day_key(date), "cosmos_rituals_07/03/2026");
    }

    #[test]
    fn test_local_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path());
        assert_eq!(store.get_item("anything"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_local_store_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path());
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "3").unwrap();
        assert_eq!(store.get_item("a"), Some("3".to_string()));
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);

        store.remove_item("a").unwrap();
        assert_eq!(store.get_item("a"), None);
    }

    #[test]
    fn test_local_store_corrupt_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path());
        fs::write(store.path(), "{{ not json").unwrap();
        assert_eq!(store.get_item("a"), None);

        // Writing recovers the file
        store.set_item("a", "1").unwrap();
        assert_eq!(store.get_item("a"), Some("1".to_string()));
    }

    #[test]
    fn test_write_over_corrupt_file_keeps_backup() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path());
        store.set_item("cosmos_rituals_14/10/2026", "{}").unwrap();
        let intact = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), &intact[..intact.len() / 2]).unwrap();
        let truncated = fs::read_to_string(store.path()).unwrap();

        store.set_item("cosmos_rituals_15/10/2026", "{}").unwrap();
        assert_eq!(store.keys(), vec!["cosmos_rituals_15/10/2026".to_string()]);
        assert_eq!(fs::read_to_string(store.backup_path()).unwrap(), truncated);
        assert!(store.backup_path().ends_with("storage.json.bak"));
    }

    #[test]
    fn test_healthy_store_writes_leave_no_backup() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::in_dir(dir.path());
        store.set_item("a", "1").unwrap();
        store.remove_item("a").unwrap();
        assert!(!store.backup_path().exists());
    }

    #[test]
    fn test_round_trip() {
        let (_dir, journal) = journal();
        let state = RitualState {
            gratitude_list: ["a".into(), "b".into(), "c".into()],
            completed_tasks: vec![RitualTask::Hydration],
        };
        journal.save("K", &state).unwrap();
        assert_eq!(journal.load("K"), state);
    }

    #[test]
    fn test_saved_value_has_exactly_two_fields() {
        let (_dir, journal) = journal();
        journal.save("K", &RitualState::default()).unwrap();
        let raw = journal.store().get_item("K").unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("gratitudeList"));
        assert!(obj.contains_key("completedTasks"));
    }

    #[test]
    fn test_save_overwrites() {
        let (_dir, journal) = journal();
        let mut state = RitualState::default();
        state.toggle_task(RitualTask::Nature);
        journal.save("K", &state).unwrap();
        state.toggle_task(RitualTask::Nature);
        journal.save("K", &state).unwrap();
        assert_eq!(journal.load("K"), RitualState::default());
    }

    #[test]
    fn test_missing_key_loads_default() {
        let (_dir, journal) = journal();
        assert_eq!(journal.load("nope"), RitualState::default());
    }

    #[test]
    fn test_legacy_task_objects_migrate() {
        let (_dir, journal) = journal();
        journal
            .store()
            .set_item(
                "K",
                r#"{"tasks":[{"id":"hydration","completed":true},{"id":"silence","completed":false}]}"#,
            )
            .unwrap();
        let state = journal.load("K");
        assert_eq!(state.completed_tasks, vec![RitualTask::Hydration]);
        assert_eq!(state.gratitude_list, RitualState::default().gratitude_list);
    }

    #[test]
    fn test_completed_tasks_wins_over_legacy_tasks() {
        let state = decode_rituals(
            r#"{"tasks":[{"id":"hydration","completed":true}],"completedTasks":["kindness"]}"#,
        )
        .unwrap();
        assert_eq!(state.completed_tasks, vec![RitualTask::Kindness]);
    }

    #[test]
    fn test_non_array_tasks_are_ignored() {
        let raw = r#"{"gratitudeList":["sol","mar","lua"],"tasks":"x"}"#;
        let state = decode_rituals(raw).unwrap();
        assert_eq!(state.gratitude_list, ["sol", "mar", "lua"]);
        assert!(state.completed_tasks.is_empty());
    }

    #[test]
    fn test_bare_id_tasks_are_ignored() {
        let state = decode_rituals(r#"{"tasks":["hydration","silence"]}"#).unwrap();
        assert!(state.completed_tasks.is_empty());
    }

    #[test]
    fn test_corrupted_value_loads_default() {
        let (_dir, journal) = journal();
        journal.store().set_item("K", "definitely not json").unwrap();
        assert_eq!(journal.load("K"), RitualState::default());
    }

    #[test]
    fn test_unknown_and_duplicate_ids_are_dropped() {
        let state =
            decode_rituals(r#"{"completedTasks":["nature","yoga","nature","silence"]}"#).unwrap();
        assert_eq!(
            state.completed_tasks,
            vec![RitualTask::Nature, RitualTask::Silence]
        );
    }

    #[test]
    fn test_gratitude_list_is_normalized_to_three() {
        let short = decode_rituals(r#"{"gratitudeList":["só um"]}"#).unwrap();
        assert_eq!(short.gratitude_list, ["só um".to_string(), String::new(), String::new()]);

        let long = decode_rituals(r#"{"gratitudeList":["1","2","3","4"]}"#).unwrap();
        assert_eq!(long.gratitude_list, ["1".to_string(), "2".into(), "3".into()]);
    }

    #[test]
    fn test_stale_days_are_kept_but_independent() {
        let (_dir, journal) = journal();
        let yesterday = day_key(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        let today = day_key(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        let mut state = RitualState::default();
        state.toggle_task(RitualTask::Silence);
        journal.save(&yesterday, &state).unwrap();

        assert_eq!(journal.load(&today), RitualState::default());
        assert_eq!(journal.store().keys().len(), 1);
    }
}
