use colored::Colorize;

use crate::cli::commands::list::format_minutes;
use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::{context, output};
use crate::config::app_config::Backend;
use crate::core::errors::Result;
use crate::core::services::activity_service::total_minutes;

/// Execute the `actman status` command.
///
/// Displays the configured backend, where activities live and a
/// summary of what is stored.
pub fn execute(opts: &StoreOptions) -> Result<()> {
    let project = context::project();
    let session = store_helpers::open(opts)?;
    let config = &session.config;

    output::header(&format!("actman v{}", env!("CARGO_PKG_VERSION")));
    println!("  Backend: {}", session.backend.to_string().cyan());
    println!("  Config: {}", project.config_file().display());

    match session.backend {
        Backend::Local => {
            println!("  Store: {}", config.local_path(project.root()).display());
        }
        Backend::Remote => {
            let remote = config.remote.clone().unwrap_or_default();
            let url = opts
                .remote_url
                .clone()
                .or(remote.url)
                .unwrap_or_else(|| "—".to_string());
            println!("  Store: {url} (table {})", remote.table);
        }
    }
    println!("  Page size: {}", config.actman.page_size);

    let records = session.service.activities();
    println!("\n{}", "  Activities".bold());
    if records.is_empty() {
        output::warning("Nothing logged yet. Run 'actman add' to log your first activity.");
        return Ok(());
    }

    // Snapshot is newest first.
    let newest = records.first().map(|r| r.date);
    let oldest = records.last().map(|r| r.date);
    output::success(&format!("{} activities", records.len()));
    if let (Some(oldest), Some(newest)) = (oldest, newest) {
        output::success(&format!("From {oldest} to {newest}"));
    }
    output::success(&format!(
        "Total logged: {}",
        format_minutes(total_minutes(records))
    ));
    Ok(())
}
