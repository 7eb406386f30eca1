use crate::cli::ActivityArgs;
use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::output;
use crate::core::errors::{ActivityError, Result};
use crate::core::models::activity::ActivityPatch;

/// Execute the `actman edit` command.
///
/// Only the given options change; the rest of the activity is kept and
/// the merged result replaces the stored one.
pub fn execute(opts: &StoreOptions, id: &str, fields: &ActivityArgs) -> Result<()> {
    let patch = patch_from_args(fields);
    if patch.is_empty() {
        return Err(ActivityError::validation(
            "nothing to change. Pass at least one of --date, --duration, --description, --card, --responsible",
        ));
    }

    let mut session = store_helpers::open(opts)?;
    let current = session
        .service
        .get(id)
        .ok_or_else(|| ActivityError::NotFound { id: id.to_string() })?;
    let draft = patch.apply_to(current);

    let updated = store_helpers::with_spinner(session.backend, "Updating activity...", || {
        session.service.update(id, draft)
    })?;

    output::success(&format!(
        "Updated {}: {} min on {} for {} ({})",
        updated.id, updated.duration, updated.card_number, updated.responsible, updated.date
    ));
    Ok(())
}

fn patch_from_args(fields: &ActivityArgs) -> ActivityPatch {
    ActivityPatch {
        date: fields.date,
        duration: fields.duration,
        description: fields.description.clone(),
        card_number: fields.card_number.clone(),
        responsible: fields.responsible.clone(),
    }
}
