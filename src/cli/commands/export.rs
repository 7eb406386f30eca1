use std::path::PathBuf;

use chrono::Utc;

use crate::cli::FilterArgs;
use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::csv_export::export_file_name;

/// Execute the `actman export` command.
///
/// Writes the filtered activities as CSV, in list order, to
/// `activities_<today>.csv` unless another destination is given.
pub fn execute(
    opts: &StoreOptions,
    filters: &FilterArgs,
    output_path: Option<&str>,
    to_stdout: bool,
) -> Result<()> {
    let session = store_helpers::open(opts)?;
    let records = session.service.filter(&filters.to_criteria());
    let csv = session.service.to_csv(&records);

    if to_stdout {
        println!("{csv}");
        return Ok(());
    }

    let path = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now().date_naive())));
    std::fs::write(&path, csv)?;
    tracing::info!(path = %path.display(), rows = records.len(), "export written");

    if records.is_empty() {
        output::warning(&format!(
            "No activities matched; wrote header only to {}",
            path.display()
        ));
    } else {
        output::success(&format!(
            "Exported {} activities to {}",
            records.len(),
            path.display()
        ));
    }
    Ok(())
}
