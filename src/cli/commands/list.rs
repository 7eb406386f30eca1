use colored::Colorize;

use crate::cli::FilterArgs;
use crate::cli::commands::store_helpers::{self, StoreOptions};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::activity::ActivityRecord;
use crate::core::services::activity_service::total_minutes;

/// Execute the `actman list` command.
///
/// Shows one page of the filtered activities, newest first, followed
/// by a footer with the page position and the filtered total.
pub fn execute(
    opts: &StoreOptions,
    filters: &FilterArgs,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let session = store_helpers::open(opts)?;
    let criteria = filters.to_criteria();
    let page_size = page_size.unwrap_or(session.config.actman.page_size);

    let filtered = session.service.filter(&criteria);
    let view = session.service.paginate(&filtered, page, page_size)?;

    output::header(&format!("Activities ({})", filtered.len()));

    if view.items.is_empty() {
        output::warning("No activities found");
        if !filtered.is_empty() {
            println!("  Page {page} is past the last page ({}).", view.total_pages);
        } else if !criteria.is_empty() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    println!();
    print_header_row();
    for record in view.items {
        print_row(record);
    }

    println!();
    println!(
        "  Page {} of {} {} showing {}-{} {} total {}",
        view.page,
        view.total_pages,
        "│".dimmed(),
        view.first_position(),
        view.first_position() + view.items.len() - 1,
        "│".dimmed(),
        format_minutes(total_minutes(&filtered)).bold()
    );
    if view.has_previous() {
        println!(
            "  {}",
            format!("Previous page: actman list --page {}", view.page - 1).dimmed()
        );
    }
    if view.has_next() {
        println!(
            "  {}",
            format!("Next page: actman list --page {}", view.page + 1).dimmed()
        );
    }
    Ok(())
}

fn print_header_row() {
    println!(
        "  {:<36} {:<10} {:<14} {:<16} {:>8}  {}",
        "ID".bold(),
        "Date".bold(),
        "Card/Jira".bold(),
        "Responsible".bold(),
        "Duration".bold(),
        "Description".bold()
    );
}

fn print_row(record: &ActivityRecord) {
    println!(
        "  {:<36} {:<10} {:<14} {:<16} {:>8}  {}",
        record.id.dimmed(),
        record.date.to_string(),
        truncate(&record.card_number, 14).cyan(),
        truncate(&record.responsible, 16),
        format!("{} min", record.duration),
        record.description
    );
}

/// `95` → `1h 35m`, `40` → `40m`.
pub fn format_minutes(total: u64) -> String {
    let (h, m) = (total / 60, total % 60);
    if h == 0 {
        format!("{m}m")
    } else {
        format!("{h}h {m:02}m")
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
