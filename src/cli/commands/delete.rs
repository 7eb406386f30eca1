use std::io::{self, BufRead, Write};

use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `actman delete` command.
///
/// Asks for confirmation unless `--yes` is given. Deleting an id that
/// does not exist is reported but is not an error.
pub fn execute(opts: &StoreOptions, id: &str, yes: bool) -> Result<()> {
    let mut session = store_helpers::open(opts)?;

    if let Some(record) = session.service.get(id) {
        if !yes {
            print!(
                "  Delete {} min on {} ({}, {})? [y/N]: ",
                record.duration, record.card_number, record.responsible, record.date
            );
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().lock().read_line(&mut input)?;
            let answer = input.trim().to_lowercase();
            if answer != "y" && answer != "yes" {
                output::warning("Deletion cancelled");
                return Ok(());
            }
        }
    }

    let existed = store_helpers::with_spinner(session.backend, "Deleting activity...", || {
        session.service.remove(id)
    })?;

    if existed {
        output::success(&format!("Deleted activity {id}"));
    } else {
        output::warning(&format!("No activity with id {id}; nothing to delete"));
    }
    Ok(())
}
