use chrono::NaiveDate;

use crate::core::models::activity::ActivityRecord;

/// User-entered filters for the activity list.
///
/// Every field is optional; an unset field matches everything. Date
/// bounds are inclusive, text filters are case-insensitive substring
/// matches and an empty string counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub card_number: Option<String>,
    pub responsible: Option<String>,
}

impl FilterCriteria {
    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && active_text(&self.card_number).is_none()
            && active_text(&self.responsible).is_none()
    }

    /// Whether a single record passes all active filters.
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        let date_in_range = self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end);

        let card_match = active_text(&self.card_number)
            .is_none_or(|needle| contains_ignore_case(&record.card_number, needle));

        let responsible_match = active_text(&self.responsible)
            .is_none_or(|needle| contains_ignore_case(&record.responsible, needle));

        date_in_range && card_match && responsible_match
    }
}

fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Return the ordered subsequence of `records` matching `criteria`.
pub fn filter_records(records: &[ActivityRecord], criteria: &FilterCriteria) -> Vec<ActivityRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}
