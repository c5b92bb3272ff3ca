use crate::clock::Clock;
use crate::diary_entry::DiaryEntry;
use crate::storage::KeyValueStorage;
use uuid::Uuid;

/// Storage key for the serialized entry sequence.
pub const ENTRIES_KEY: &str = "glass_diary_entries";

/// Owner of the authoritative entry sequence, newest-first.
///
/// Every successful mutation serializes the full sequence to storage.
/// Persistence is best-effort: failures are logged and the in-memory
/// sequence stands, it is never rolled back.
pub struct EntryStore {
    entries: Vec<DiaryEntry>,
    storage: Box<dyn KeyValueStorage>,
    clock: Box<dyn Clock>,
}

impl EntryStore {
    /// Loads the persisted sequence, falling back to an empty diary on a
    /// missing key, unreadable storage, or malformed data.
    pub fn load(storage: Box<dyn KeyValueStorage>, clock: Box<dyn Clock>) -> Self {
        let entries = match storage.get(ENTRIES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable diary data");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read diary data, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = entries.len(), "diary loaded");
        EntryStore {
            entries,
            storage,
            clock,
        }
    }

    /// Saves a new entry at the head of the sequence and returns its id.
    /// Content that is empty after trimming is rejected as a no-op.
    pub fn save(&mut self, content: &str) -> Option<String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return None;
        }
        let entry = DiaryEntry::new(
            Uuid::new_v4().to_string(),
            trimmed.to_string(),
            self.clock.now_ms(),
        );
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        self.persist();
        Some(id)
    }

    /// Removes the entry with the matching id, if present. An unknown id
    /// is a no-op, not an error.
    pub fn delete(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
        self.persist();
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize diary");
                return;
            }
        };
        if let Err(e) = self.storage.set(ENTRIES_KEY, &json) {
            tracing::warn!(error = %e, "failed to persist diary");
        }
    }
}
