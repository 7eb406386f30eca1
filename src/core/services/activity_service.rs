use crate::core::errors::{ActivityError, Result};
use crate::core::models::activity::{ActivityDraft, ActivityRecord};
use crate::core::models::filter::{FilterCriteria, filter_records};
use crate::core::services::csv_export;
use crate::core::services::pagination::{self, Page};
use crate::core::traits::activity_store::ActivityStore;

/// Owns the in-memory snapshot of activities and funnels every
/// mutation through an `ActivityStore` backend.
///
/// The snapshot is kept in display order (date descending, ties in the
/// order the store returned them). A failed operation never leaves the
/// snapshot partially changed.
pub struct ActivityService<S: ActivityStore> {
    store: S,
    snapshot: Vec<ActivityRecord>,
}

impl<S: ActivityStore> ActivityService<S> {
    /// Create a facade with an empty snapshot. Call `load` to populate it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: Vec::new(),
        }
    }

    /// The backend this facade talks to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current snapshot, in display order.
    pub fn activities(&self) -> &[ActivityRecord] {
        &self.snapshot
    }

    /// Look up one activity in the snapshot.
    pub fn get(&self, id: &str) -> Option<&ActivityRecord> {
        self.snapshot.iter().find(|r| r.id == id)
    }

    /// Replace the snapshot with the store's full record set.
    pub fn load(&mut self) -> Result<()> {
        let mut records = self.store.fetch_all()?;
        sort_for_display(&mut records);
        tracing::debug!(
            backend = self.store.name(),
            count = records.len(),
            "activities loaded"
        );
        self.snapshot = records;
        Ok(())
    }

    /// Validate and persist a new activity.
    pub fn create(&mut self, draft: ActivityDraft) -> Result<ActivityRecord> {
        draft.validate()?;
        let record = ActivityRecord::with_generated_id(draft);
        let stored = self.store.insert(&record)?;
        tracing::info!(id = %stored.id, "activity created");

        self.refresh_after_write(|snapshot| snapshot.push(stored.clone()));
        Ok(stored)
    }

    /// Replace the mutable fields of an existing activity.
    ///
    /// The id must be present in the snapshot; otherwise nothing is
    /// sent to the store and `NotFound` is returned.
    pub fn update(&mut self, id: &str, draft: ActivityDraft) -> Result<ActivityRecord> {
        if self.get(id).is_none() {
            return Err(ActivityError::NotFound { id: id.to_string() });
        }
        draft.validate()?;

        let stored = self.store.replace(id, &draft)?;
        tracing::info!(id = %stored.id, "activity updated");

        self.refresh_after_write(|snapshot| {
            if let Some(slot) = snapshot.iter_mut().find(|r| r.id == stored.id) {
                *slot = stored.clone();
            }
        });
        Ok(stored)
    }

    /// Delete an activity. Returns `false` without touching the store
    /// when the id is not in the snapshot.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            tracing::debug!(id, "remove of unknown id skipped");
            return Ok(false);
        }
        self.store.delete(id)?;
        tracing::info!(id, "activity removed");

        self.refresh_after_write(|snapshot| snapshot.retain(|r| r.id != id));
        Ok(true)
    }

    /// Snapshot records matching `criteria`, in display order.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<ActivityRecord> {
        filter_records(&self.snapshot, criteria)
    }

    /// Page `page` (1-based) of `records`.
    pub fn paginate<'a>(
        &self,
        records: &'a [ActivityRecord],
        page: usize,
        page_size: usize,
    ) -> Result<Page<'a, ActivityRecord>> {
        pagination::paginate(records, page, page_size)
    }

    /// CSV text for `records`.
    pub fn to_csv(&self, records: &[ActivityRecord]) -> String {
        csv_export::to_csv(records)
    }

    /// Bring the snapshot in line with a write the store accepted.
    ///
    /// Stores that reload get re-fetched; if that fetch fails the
    /// local edit is applied instead so the committed write stays
    /// visible.
    fn refresh_after_write(&mut self, apply_locally: impl FnOnce(&mut Vec<ActivityRecord>)) {
        if self.store.reloads_after_write() {
            match self.load() {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!(error = %e, "reload after write failed, patching snapshot locally")
                }
            }
        }
        apply_locally(&mut self.snapshot);
        sort_for_display(&mut self.snapshot);
    }
}

/// Total minutes across `records`.
pub fn total_minutes(records: &[ActivityRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.duration)).sum()
}

/// Date descending; `sort_by` is stable, so equal dates keep arrival order.
fn sort_for_display(records: &mut [ActivityRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
