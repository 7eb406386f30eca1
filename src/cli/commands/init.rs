use std::io::Write;
use std::path::Path;

use crate::cli::commands::store_helpers::StoreOptions;
use crate::cli::{context, output};
use crate::config::app_config::{AppConfig, Backend, CONFIG_FILE, RemoteSection};
use crate::core::errors::{ActivityError, Result};

/// Execute the `actman init` command.
///
/// Creates the actman directory with a `config.toml` for the chosen
/// backend. The remote key is never written to disk.
pub fn execute(opts: &StoreOptions, table: &str, verbose: bool) -> Result<()> {
    let project = context::project();
    if project.is_initialized() {
        return Err(ActivityError::AlreadyInitialized {
            path: project.config_file(),
        });
    }
    let dir = project.root();

    let backend = opts.backend.unwrap_or(Backend::Local);
    output::header(&format!("actman — initializing ({backend} backend)"));

    std::fs::create_dir_all(dir)?;
    output::success(&format!("Created {}/", dir.display()));

    let remote = match backend {
        Backend::Local => None,
        Backend::Remote => Some(RemoteSection {
            url: opts.remote_url.clone(),
            table: table.to_string(),
            ..RemoteSection::default()
        }),
    };
    let config = AppConfig::new(backend, remote);
    config.save(dir)?;
    output::success(&format!("Generated {CONFIG_FILE}"));

    if backend == Backend::Remote {
        add_to_gitignore(".env")?;
        if opts.remote_url.is_none() {
            output::warning("No remote URL yet: set ACTMAN_REMOTE_URL or edit [remote] url");
        }
        if opts.remote_key.is_none() {
            output::warning("No API key yet: set ACTMAN_REMOTE_KEY (a .env file works too)");
        }
    }

    output::success("Ready.\n");
    print_next_steps(&config, dir, verbose);
    Ok(())
}

/// Add an entry to .gitignore if not already present.
fn add_to_gitignore(entry: &str) -> Result<()> {
    let gitignore = Path::new(".gitignore");

    if gitignore.exists() {
        let content = std::fs::read_to_string(gitignore)?;
        if content.lines().any(|l| l.trim() == entry) {
            return Ok(());
        }
        let mut file = std::fs::OpenOptions::new().append(true).open(gitignore)?;
        writeln!(file, "\n# actman: remote credentials\n{entry}")?;
    } else {
        std::fs::write(gitignore, format!("# actman: remote credentials\n{entry}\n"))?;
    }

    output::success(&format!("Added {entry} to .gitignore"));
    Ok(())
}

/// Print next steps after init.
fn print_next_steps(config: &AppConfig, dir: &Path, verbose: bool) {
    println!("  Next steps:");
    println!("     1. Log work:   actman add --duration 30 --card AB-1 --responsible you --description \"...\"");
    println!("     2. Review it:  actman list");
    println!("     3. Export it:  actman export");

    if !verbose {
        return;
    }
    println!();
    println!("  Files:");
    println!("     {}  — configuration", dir.join(CONFIG_FILE).display());
    if config.actman.backend == Backend::Local {
        println!("     {}  — activities (created on first add)", config.local_path(dir).display());
    }
}
