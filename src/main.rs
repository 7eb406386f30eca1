mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::commands::store_helpers::StoreOptions;
use cli::{Cli, Commands};

fn main() {
    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    init_logging(args.verbose);
    cli::output::set_quiet(args.quiet);
    cli::context::init(args.config.as_deref());

    let opts = StoreOptions {
        backend: args.backend,
        remote_url: args.remote_url.clone(),
        remote_key: args.remote_key.clone(),
    };

    let result = match &args.command {
        Commands::Init { table } => cli::commands::init::execute(&opts, table, args.verbose),
        Commands::Add { fields } => cli::commands::add::execute(&opts, fields),
        Commands::List {
            filters,
            page,
            page_size,
        } => cli::commands::list::execute(&opts, filters, *page, *page_size),
        Commands::Show { id } => cli::commands::show::execute(&opts, id),
        Commands::Edit { id, fields } => cli::commands::edit::execute(&opts, id, fields),
        Commands::Delete { id, yes } => cli::commands::delete::execute(&opts, id, *yes),
        Commands::Export {
            filters,
            output,
            stdout,
        } => cli::commands::export::execute(&opts, filters, output.as_deref(), *stdout),
        Commands::Status => cli::commands::status::execute(&opts),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `ACTMAN_LOG` takes a tracing filter
/// directive; `--verbose` turns on debug output for this crate.
fn init_logging(verbose: bool) {
    let default = if verbose { "actman=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ACTMAN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
