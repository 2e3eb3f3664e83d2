//! Named, persisted copies of the board
//!
//! The whole collection lives under one key and is rewritten on every save
//! or delete. Newest entries come first.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::board::{Board, BoardError};
use crate::constants::storage::{DEFAULT_SNAPSHOT_PREFIX, SAVED_ROSTERS_KEY};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRoster {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub board: Board,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("no saved roster with id '{0}'")]
    NotFound(String),

    #[error("saved roster '{id}' holds an invalid board: {source}")]
    InvalidBoard { id: String, source: BoardError },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct SnapshotStore<S: KeyValueStore> {
    store: S,
    rosters: Vec<SavedRoster>,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    /// Read the persisted collection. A missing or unreadable value starts empty.
    pub fn open(store: S) -> Self {
        let rosters = match store.get(SAVED_ROSTERS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedRoster>>(&raw) {
                Ok(rosters) => rosters,
                Err(e) => {
                    error!(error = %e, key = SAVED_ROSTERS_KEY, "Saved rosters are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = ?e, key = SAVED_ROSTERS_KEY, "Failed to read saved rosters, starting empty");
                Vec::new()
            }
        };
        info!(count = rosters.len(), "Opened snapshot store");
        Self { store, rosters }
    }

    fn persist(&mut self) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(&self.rosters).context("Failed to serialize saved rosters")?;
        self.store.set(SAVED_ROSTERS_KEY, &raw)?;
        Ok(())
    }

    fn next_id(&self, timestamp: DateTime<Utc>) -> String {
        let mut millis = timestamp.timestamp_millis();
        while self.rosters.iter().any(|r| r.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    pub fn save_current(&mut self, name: &str, board: &Board) -> Result<SavedRoster, SnapshotError> {
        self.save_at(name, board, Utc::now())
    }

    fn save_at(
        &mut self,
        name: &str,
        board: &Board,
        timestamp: DateTime<Utc>,
    ) -> Result<SavedRoster, SnapshotError> {
        let name = match name.trim() {
            "" => format!(
                "{DEFAULT_SNAPSHOT_PREFIX} {}",
                timestamp.format("%d/%m %H:%M")
            ),
            trimmed => trimmed.to_string(),
        };
        let saved = SavedRoster {
            id: self.next_id(timestamp),
            name,
            timestamp,
            board: board.clone(),
        };
        self.rosters.insert(0, saved.clone());
        if let Err(e) = self.persist() {
            self.rosters.remove(0);
            return Err(e);
        }
        info!(id = %saved.id, name = %saved.name, "Saved roster snapshot");
        Ok(saved)
    }

    pub fn list(&self) -> &[SavedRoster] {
        &self.rosters
    }

    pub fn load(&self, id: &str) -> Result<Board, SnapshotError> {
        let saved = self
            .rosters
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| SnapshotError::NotFound(id.to_string()))?;
        saved.board.validate().map_err(|source| SnapshotError::InvalidBoard {
            id: id.to_string(),
            source,
        })?;
        info!(id, name = %saved.name, "Loaded roster snapshot");
        Ok(saved.board.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), SnapshotError> {
        let Some(idx) = self.rosters.iter().position(|r| r.id == id) else {
            warn!(id, "Delete requested for unknown snapshot");
            return Err(SnapshotError::NotFound(id.to_string()));
        };
        let removed = self.rosters.remove(idx);
        if let Err(e) = self.persist() {
            self.rosters.insert(idx, removed);
            return Err(e);
        }
        info!(id, name = %removed.name, "Deleted roster snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Assignment, BoardManager};
    use crate::storage::MemoryStore;
    use anyhow::anyhow;
    use chrono::TimeZone;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    fn sample_board() -> Board {
        let mut manager = BoardManager::default();
        manager.assign(1, Assignment::Name("BLACK".into())).unwrap();
        manager.set_roster_name("ELENCO A");
        manager.current().clone()
    }

    #[test]
    fn test_save_then_list_newest_first() {
        let mut snapshots = SnapshotStore::open(MemoryStore::new());
        let board = sample_board();
        snapshots.save_current("OLD", &board).unwrap();
        snapshots.save_current("ELENCO A", &board).unwrap();

        let list = snapshots.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "ELENCO A");
        assert_eq!(list[0].board, board);
        assert_ne!(list[0].id, list[1].id);
    }

    #[test]
    fn test_collection_persisted_as_one_value() {
        let mut snapshots = SnapshotStore::open(MemoryStore::new());
        snapshots.save_current("ELENCO A", &sample_board()).unwrap();
        let store = snapshots.store.clone();

        let raw = store.get(SAVED_ROSTERS_KEY).unwrap().unwrap();
        let parsed: Vec<SavedRoster> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);

        let reopened = SnapshotStore::open(store);
        assert_eq!(reopened.list(), snapshots.list());
    }

    #[test]
    fn test_load_and_not_found() {
        let mut snapshots = SnapshotStore::open(MemoryStore::new());
        let saved = snapshots.save_current("ELENCO A", &sample_board()).unwrap();
        assert_eq!(snapshots.load(&saved.id).unwrap(), sample_board());
        assert!(matches!(snapshots.load("nope"), Err(SnapshotError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_load_not_found_keeps_manager_untouched() {
        let snapshots = SnapshotStore::open(MemoryStore::new());
        let mut manager = BoardManager::default();
        manager.assign(1, Assignment::Name("BLACK".into())).unwrap();
        let before = manager.current().clone();

        if let Ok(board) = snapshots.load("missing") {
            manager.load_board(board).unwrap();
        }
        assert_eq!(manager.current(), &before);
        assert_eq!(manager.history_len(), 2);
    }

    #[test]
    fn test_delete() {
        let mut snapshots = SnapshotStore::open(MemoryStore::new());
        let a = snapshots.save_current("A", &sample_board()).unwrap();
        let b = snapshots.save_current("B", &sample_board()).unwrap();
        snapshots.delete(&a.id).unwrap();
        assert_eq!(snapshots.list().len(), 1);
        assert_eq!(snapshots.list()[0].id, b.id);
        assert!(matches!(snapshots.delete(&a.id), Err(SnapshotError::NotFound(_))));
    }

    #[test]
    fn test_blank_name_gets_default() {
        let mut snapshots = SnapshotStore::open(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap();
        let saved = snapshots.save_at("   ", &sample_board(), at).unwrap();
        assert_eq!(saved.name, "ELENCO 14/03 18:30");
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut snapshots = SnapshotStore::open(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap();
        let a = snapshots.save_at("A", &sample_board(), at).unwrap();
        let b = snapshots.save_at("B", &sample_board(), at).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_corrupt_value_opens_empty() {
        let mut store = MemoryStore::new();
        store.set(SAVED_ROSTERS_KEY, "{not json").unwrap();
        assert!(SnapshotStore::open(store).list().is_empty());
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let mut snapshots = SnapshotStore::open(FailingStore);
        assert!(matches!(
            snapshots.save_current("A", &sample_board()),
            Err(SnapshotError::Storage(_))
        ));
        assert!(snapshots.list().is_empty());
    }

    #[test]
    fn test_invalid_board_rejected_on_load() {
        let mut store = MemoryStore::new();
        let mut value = serde_json::to_value(vec![SavedRoster {
            id: "1".into(),
            name: "BROKEN".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            board: sample_board(),
        }])
        .unwrap();
        // strip the coach slot
        value[0]["board"]["slots"].as_array_mut().unwrap().remove(0);
        store.set(SAVED_ROSTERS_KEY, &value.to_string()).unwrap();

        let snapshots = SnapshotStore::open(store);
        assert!(matches!(
            snapshots.load("1"),
            Err(SnapshotError::InvalidBoard { source: BoardError::CoachCount(0), .. })
        ));
    }
}
