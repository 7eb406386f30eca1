use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::{ActivityError, Result};
use crate::core::models::activity::{ActivityDraft, ActivityRecord};
use crate::core::traits::activity_store::ActivityStore;

/// Local store that keeps every activity in one JSON array file.
///
/// Example `activities.json`:
/// ```text
/// [
///   {
///     "id": "9b2f6c1e-...",
///     "date": "2024-01-02",
///     "duration": 15,
///     "description": "Code review",
///     "card_number": "CD-2",
///     "responsible": "Bob"
///   }
/// ]
/// ```
///
/// Every write rewrites the whole file through a temp file in the same
/// directory, so a crash never leaves a half-written array behind.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<ActivityRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| ActivityError::Storage {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    fn write(&self, records: &[ActivityRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|e| ActivityError::Storage {
            path: self.path.clone(),
            detail: format!("failed to serialize activities: {e}"),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        writeln!(tmp, "{json}")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "activity file written");
        Ok(())
    }
}

impl ActivityStore for JsonFileStore {
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        self.read()
    }

    fn insert(&self, record: &ActivityRecord) -> Result<ActivityRecord> {
        let mut records = self.read()?;

        if records.iter().any(|r| r.id == record.id) {
            return Err(ActivityError::validation(format!(
                "an activity with id '{}' already exists",
                record.id
            )));
        }

        records.push(record.clone());
        self.write(&records)?;
        Ok(record.clone())
    }

    fn replace(&self, id: &str, draft: &ActivityDraft) -> Result<ActivityRecord> {
        let mut records = self.read()?;

        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ActivityError::NotFound { id: id.to_string() })?;
        *slot = ActivityRecord::from_draft(id.to_string(), draft.clone());
        let updated = slot.clone();

        self.write(&records)?;
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let records = self.read()?;
        let before = records.len();

        let remaining: Vec<_> = records.into_iter().filter(|r| r.id != id).collect();
        if remaining.len() == before {
            tracing::debug!(id, "delete of absent activity ignored");
            return Ok(());
        }

        self.write(&remaining)
    }

    fn name(&self) -> &str {
        "local"
    }

    fn reloads_after_write(&self) -> bool {
        false
    }
}
