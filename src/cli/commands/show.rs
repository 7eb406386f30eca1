use colored::Colorize;

use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::output;
use crate::core::errors::{ActivityError, Result};
use crate::core::models::activity::ActivityField;

/// Execute the `actman show` command.
pub fn execute(opts: &StoreOptions, id: &str) -> Result<()> {
    let session = store_helpers::open(opts)?;
    let record = session
        .service
        .get(id)
        .ok_or_else(|| ActivityError::NotFound { id: id.to_string() })?;

    output::header(&format!("Activity {}", record.id));
    let rows = [
        (ActivityField::Date, record.date.to_string()),
        (ActivityField::CardNumber, record.card_number.clone()),
        (ActivityField::Responsible, record.responsible.clone()),
        (ActivityField::Duration, record.duration.to_string()),
        (ActivityField::Description, record.description.clone()),
    ];
    for (field, value) in rows {
        println!("  {:<20} {}", field.label().dimmed(), value);
    }
    Ok(())
}
