pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::app_config::Backend;
use crate::core::models::activity::parse_date;
use crate::core::models::filter::FilterCriteria;

/// Log your working time. Filter it. Export it.
#[derive(Parser, Debug)]
#[command(name = "actman", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Persistence backend (overrides config.toml)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Base URL of the remote database service
    #[arg(long, global = true, env = "ACTMAN_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// API key for the remote database service
    #[arg(long, global = true, env = "ACTMAN_REMOTE_KEY", hide_env_values = true)]
    pub remote_key: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to alternative actman directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize actman in the current directory (backend from --backend, default local)
    Init {
        /// Table holding the activities on the remote service
        #[arg(long, default_value = "activities")]
        table: String,
    },

    /// Log a new activity
    Add {
        #[command(flatten)]
        fields: ActivityArgs,
    },

    /// List activities, newest first
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page (default: page_size from config.toml)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show a single activity
    Show {
        /// Activity id
        id: String,
    },

    /// Change fields of an existing activity
    Edit {
        /// Activity id
        id: String,
        #[command(flatten)]
        fields: ActivityArgs,
    },

    /// Delete an activity
    Delete {
        /// Activity id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export filtered activities to CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file (default: activities_<today>.csv)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<String>,
        /// Write CSV to standard output instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Show backend, store location and totals
    Status,
}

/// Activity fields as command-line options. For `add` everything but
/// the date is required; for `edit` every field is optional.
#[derive(Args, Debug, Default)]
pub struct ActivityArgs {
    /// Day of the activity, YYYY-MM-DD (default for add: today)
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,
    /// Minutes spent
    #[arg(long)]
    pub duration: Option<u32>,
    /// What was done
    #[arg(long)]
    pub description: Option<String>,
    /// Card or Jira number
    #[arg(long = "card")]
    pub card_number: Option<String>,
    /// Person responsible
    #[arg(long)]
    pub responsible: Option<String>,
}

/// Filter options shared by `list` and `export`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Earliest date to include, YYYY-MM-DD
    #[arg(long, value_parser = date_arg)]
    pub from: Option<NaiveDate>,
    /// Latest date to include, YYYY-MM-DD
    #[arg(long, value_parser = date_arg)]
    pub to: Option<NaiveDate>,
    /// Card number contains (case-insensitive)
    #[arg(long)]
    pub card: Option<String>,
    /// Responsible contains (case-insensitive)
    #[arg(long)]
    pub responsible: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            start_date: self.from,
            end_date: self.to,
            card_number: self.card.clone(),
            responsible: self.responsible.clone(),
        }
    }
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}
