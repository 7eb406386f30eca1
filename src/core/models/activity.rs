use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::errors::{ActivityError, Result};

/// One logged unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub date: NaiveDate,
    /// Minutes spent, always greater than zero.
    pub duration: u32,
    pub description: String,
    pub card_number: String,
    pub responsible: String,
}

impl ActivityRecord {
    /// Build a record from a draft with a freshly generated UUID.
    pub fn with_generated_id(draft: ActivityDraft) -> Self {
        Self::from_draft(uuid::Uuid::new_v4().to_string(), draft)
    }

    /// Build a record from an id and its mutable fields.
    pub fn from_draft(id: String, draft: ActivityDraft) -> Self {
        Self {
            id,
            date: draft.date,
            duration: draft.duration,
            description: draft.description,
            card_number: draft.card_number,
            responsible: draft.responsible,
        }
    }

    /// The mutable fields of this record.
    pub fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            date: self.date,
            duration: self.duration,
            description: self.description.clone(),
            card_number: self.card_number.clone(),
            responsible: self.responsible.clone(),
        }
    }
}

/// Everything about an activity except its id.
///
/// Used as the payload for creation and as the full-replace payload
/// for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub date: NaiveDate,
    pub duration: u32,
    pub description: String,
    pub card_number: String,
    pub responsible: String,
}

impl ActivityDraft {
    /// Check the presence and positivity rules.
    ///
    /// Text fields must contain something other than whitespace and
    /// the duration must be at least one minute.
    pub fn validate(&self) -> Result<()> {
        if self.duration == 0 {
            return Err(ActivityError::validation(
                "duration must be a positive number of minutes",
            ));
        }
        for (label, value) in [
            ("description", &self.description),
            ("card number", &self.card_number),
            ("responsible", &self.responsible),
        ] {
            if value.trim().is_empty() {
                return Err(ActivityError::validation(format!("{label} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Names of the editable fields of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Date,
    Duration,
    Description,
    CardNumber,
    Responsible,
}

impl ActivityField {
    /// Human-readable label, matching the CSV/table column names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Duration => "Duration (minutes)",
            Self::Description => "Description",
            Self::CardNumber => "Card/Jira Number",
            Self::Responsible => "Responsible",
        }
    }
}

/// A partial update: only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub description: Option<String>,
    pub card_number: Option<String>,
    pub responsible: Option<String>,
}

impl ActivityPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.duration.is_none()
            && self.description.is_none()
            && self.card_number.is_none()
            && self.responsible.is_none()
    }

    /// Merge this patch onto an existing record, producing the full
    /// replacement draft.
    pub fn apply_to(&self, record: &ActivityRecord) -> ActivityDraft {
        let base = record.to_draft();
        ActivityDraft {
            date: self.date.unwrap_or(base.date),
            duration: self.duration.unwrap_or(base.duration),
            description: self.description.clone().unwrap_or(base.description),
            card_number: self.card_number.clone().unwrap_or(base.card_number),
            responsible: self.responsible.clone().unwrap_or(base.responsible),
        }
    }
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ActivityError::validation(format!(
            "invalid date '{s}'. Expected ISO 8601 (YYYY-MM-DD), e.g. 2024-01-15"
        ))
    })
}
