use chrono::NaiveDate;

use crate::core::models::activity::{ActivityField, ActivityRecord};

/// Column order of the exported file.
pub const CSV_COLUMNS: [ActivityField; 5] = [
    ActivityField::Date,
    ActivityField::CardNumber,
    ActivityField::Responsible,
    ActivityField::Duration,
    ActivityField::Description,
];

/// Serialize records to CSV text, one row per record in input order.
///
/// Rows are joined with `\n` and there is no trailing newline. The
/// description is always quoted; other fields are quoted only when
/// they contain a comma, quote or line break. Embedded quotes are
/// doubled (RFC 4180), so plain values come out exactly as they are.
pub fn to_csv(records: &[ActivityRecord]) -> String {
    let header = CSV_COLUMNS
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(",");

    std::iter::once(header)
        .chain(records.iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("activities_{}.csv", date.format("%Y-%m-%d"))
}

fn csv_row(record: &ActivityRecord) -> String {
    [
        escape_field(&record.date.format("%Y-%m-%d").to_string()),
        escape_field(&record.card_number),
        escape_field(&record.responsible),
        record.duration.to_string(),
        quote(&record.description),
    ]
    .join(",")
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote(value)
    } else {
        value.to_string()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
