use crate::core::errors::Result;
use crate::core::models::activity::{ActivityDraft, ActivityRecord};

/// Port for durable activity storage.
///
/// Implementations live in `adapters::stores` (e.g. JsonFileStore,
/// RestStore). The core layer only depends on this trait, never on a
/// concrete backend.
pub trait ActivityStore: Send + Sync {
    /// Fetch every stored activity.
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>>;

    /// Persist a new activity. The returned record carries the id the
    /// store settled on, which may differ from the one passed in.
    fn insert(&self, record: &ActivityRecord) -> Result<ActivityRecord>;

    /// Replace the mutable fields of the activity with the given id.
    ///
    /// Fails with `NotFound` when no such activity exists.
    fn replace(&self, id: &str, draft: &ActivityDraft) -> Result<ActivityRecord>;

    /// Delete the activity with the given id. Deleting an absent id
    /// succeeds.
    fn delete(&self, id: &str) -> Result<()>;

    /// Human-readable name of this backend (e.g. "local", "remote").
    fn name(&self) -> &str;

    /// Whether the facade should re-fetch after a successful write.
    ///
    /// Remote stores own ordering and ids, so their view is
    /// authoritative; local stores are updated in place instead.
    fn reloads_after_write(&self) -> bool {
        true
    }
}

impl<T: ActivityStore + ?Sized> ActivityStore for Box<T> {
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        (**self).fetch_all()
    }

    fn insert(&self, record: &ActivityRecord) -> Result<ActivityRecord> {
        (**self).insert(record)
    }

    fn replace(&self, id: &str, draft: &ActivityDraft) -> Result<ActivityRecord> {
        (**self).replace(id, draft)
    }

    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn reloads_after_write(&self) -> bool {
        (**self).reloads_after_write()
    }
}
