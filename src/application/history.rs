//! Append-only log of menu actions.

use super::collection::{load_collection, save_collection};
use crate::domain::{DomainResult, HISTORY_KEY, HistoryEntry, filter_history};
use crate::infrastructure::KeyValueStore;
use chrono::Local;
use std::sync::Arc;
use tracing::info;

/// Timestamp layout of history entries, e.g. `10/19/2026, 1:03:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Preset action filters offered on the history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Added,
    Deleted,
}

impl HistoryFilter {
    pub fn needle(&self) -> &'static str {
        match self {
            HistoryFilter::All => "",
            HistoryFilter::Added => "Added dish",
            HistoryFilter::Deleted => "Deleted dish",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryFilter::All => "All Actions",
            HistoryFilter::Added => "Added dish",
            HistoryFilter::Deleted => "Deleted dish",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            HistoryFilter::All => HistoryFilter::Added,
            HistoryFilter::Added => HistoryFilter::Deleted,
            HistoryFilter::Deleted => HistoryFilter::All,
        }
    }
}

/// The history collection for one session, kept in sync with the store.
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl std::fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog").field("entries", &self.entries).finish()
    }
}

impl HistoryLog {
    pub fn load(store: Arc<dyn KeyValueStore>) -> DomainResult<Self> {
        let entries = load_collection(store.as_ref(), HISTORY_KEY)?;
        Ok(Self { store, entries })
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `action` stamped with the current local time.
    pub fn append(&mut self, action: &str) -> DomainResult<&[HistoryEntry]> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.append_entry(HistoryEntry::new(timestamp, action))
    }

    /// Persists the extended log, then adopts it in memory.
    pub fn append_entry(&mut self, entry: HistoryEntry) -> DomainResult<&[HistoryEntry]> {
        let mut updated = self.entries.clone();
        updated.push(entry);
        save_collection(self.store.as_ref(), HISTORY_KEY, &updated)?;

        self.entries = updated;
        Ok(&self.entries)
    }

    pub fn filter(&self, needle: &str) -> Vec<&HistoryEntry> {
        filter_history(&self.entries, needle)
    }

    /// Drops the whole log, in storage and in memory.
    pub fn clear(&mut self) -> DomainResult<()> {
        self.store.remove(HISTORY_KEY)?;
        info!(removed = self.entries.len(), "history cleared");
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::MemoryStore;

    fn fresh_log() -> (Arc<MemoryStore>, HistoryLog) {
        let store = Arc::new(MemoryStore::new());
        let log = HistoryLog::load(store.clone()).unwrap();
        (store, log)
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let (_, log) = fresh_log();
        assert!(log.is_empty());
    }

    #[test]
    fn test_load_malformed_payload_is_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(HISTORY_KEY, "{not json").unwrap();
        let log = HistoryLog::load(store).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_load_reports_store_failure() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let result = HistoryLog::load(store);
        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }

    #[test]
    fn test_append_persists_and_timestamps() {
        let (store, mut log) = fresh_log();
        log.append("Added dish: Bobotie").unwrap();

        assert_eq!(log.len(), 1);
        let entry = &log.entries()[0];
        assert_eq!(entry.action, "Added dish: Bobotie");
        assert!(entry.timestamp.contains(", "));
        assert!(entry.timestamp.ends_with("AM") || entry.timestamp.ends_with("PM"));

        let reloaded = HistoryLog::load(store).unwrap();
        assert_eq!(reloaded.entries(), log.entries());
    }

    #[test]
    fn test_append_keeps_memory_on_failure() {
        let (store, mut log) = fresh_log();
        log.append("Added dish: Bobotie").unwrap();

        store.set_failing(true);
        assert!(log.append("Deleted dish: Bobotie").is_err());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_filter_by_preset() {
        let (_, mut log) = fresh_log();
        log.append_entry(HistoryEntry::new("t1", "Added dish: Bobotie")).unwrap();
        log.append_entry(HistoryEntry::new("t2", "Deleted dish: Bobotie")).unwrap();

        assert_eq!(log.filter(HistoryFilter::Added.needle()).len(), 1);
        assert_eq!(log.filter(HistoryFilter::Deleted.needle())[0].timestamp, "t2");
        assert_eq!(log.filter(HistoryFilter::All.needle()).len(), 2);
        assert_eq!(HistoryFilter::Deleted.next(), HistoryFilter::All);
    }

    #[test]
    fn test_clear_empties_memory_and_storage() {
        let (store, mut log) = fresh_log();
        log.append("Added dish: Bobotie").unwrap();

        log.clear().unwrap();
        assert!(log.is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
        assert!(HistoryLog::load(store).unwrap().is_empty());
    }

    #[test]
    fn test_clear_failure_keeps_entries() {
        let (store, mut log) = fresh_log();
        log.append("Added dish: Bobotie").unwrap();

        store.set_failing(true);
        assert!(log.clear().is_err());
        assert_eq!(log.len(), 1);
    }
}
