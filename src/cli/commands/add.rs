use chrono::Utc;

use crate::cli::ActivityArgs;
use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::output;
use crate::core::errors::{ActivityError, Result};
use crate::core::models::activity::ActivityDraft;

/// Execute the `actman add` command.
///
/// Builds a draft from the options (date defaults to today, UTC),
/// validates it and stores it through the configured backend.
pub fn execute(opts: &StoreOptions, fields: &ActivityArgs) -> Result<()> {
    let draft = draft_from_args(fields)?;
    let mut session = store_helpers::open(opts)?;

    let created = store_helpers::with_spinner(session.backend, "Saving activity...", || {
        session.service.create(draft)
    })?;

    output::success(&format!(
        "Logged {} min on {} for {} ({})",
        created.duration, created.card_number, created.responsible, created.date
    ));
    println!("  id: {}", created.id);
    Ok(())
}

fn draft_from_args(fields: &ActivityArgs) -> Result<ActivityDraft> {
    let missing = |name: &str| ActivityError::validation(format!("--{name} is required"));

    Ok(ActivityDraft {
        date: fields.date.unwrap_or_else(|| Utc::now().date_naive()),
        duration: fields.duration.ok_or_else(|| missing("duration"))?,
        description: fields
            .description
            .clone()
            .ok_or_else(|| missing("description"))?,
        card_number: fields.card_number.clone().ok_or_else(|| missing("card"))?,
        responsible: fields
            .responsible
            .clone()
            .ok_or_else(|| missing("responsible"))?,
    })
}
