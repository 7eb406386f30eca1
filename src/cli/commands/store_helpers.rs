use crate::adapters::stores::json_file_store::JsonFileStore;
use crate::adapters::stores::rest_store::RestStore;
use crate::cli::{context, output};
use crate::config::app_config::{AppConfig, Backend};
use crate::core::errors::{ActivityError, Result};
use crate::core::services::activity_service::ActivityService;
use crate::core::traits::activity_store::ActivityStore;

/// Backend selection coming from global flags and the environment.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub backend: Option<Backend>,
    pub remote_url: Option<String>,
    pub remote_key: Option<String>,
}

/// A loaded facade plus the configuration it was built from.
pub struct Session {
    pub config: AppConfig,
    pub backend: Backend,
    pub service: ActivityService<Box<dyn ActivityStore>>,
}

/// Load config, build the selected store and fetch the snapshot.
pub fn open(opts: &StoreOptions) -> Result<Session> {
    let dir = context::project().root();
    let config = AppConfig::load(dir)?;
    let backend = opts.backend.unwrap_or(config.actman.backend);

    let store: Box<dyn ActivityStore> = match backend {
        Backend::Local => {
            let store = JsonFileStore::new(config.local_path(dir));
            tracing::debug!(path = %store.path().display(), "using local store");
            Box::new(store)
        }
        Backend::Remote => {
            let store = build_remote(&config, opts)?;
            tracing::debug!(endpoint = %store.endpoint(), "using remote store");
            Box::new(store)
        }
    };

    let mut service = ActivityService::new(store);
    with_spinner(backend, "Loading activities...", || service.load())?;
    tracing::debug!(
        store = service.store().name(),
        count = service.activities().len(),
        "snapshot loaded"
    );

    Ok(Session {
        config,
        backend,
        service,
    })
}

/// Run `op` behind a spinner when it talks to the network.
pub fn with_spinner<T>(backend: Backend, msg: &str, op: impl FnOnce() -> Result<T>) -> Result<T> {
    if backend == Backend::Local {
        return op();
    }
    let sp = output::spinner(msg);
    let result = op();
    output::clear_spinner(sp);
    result
}

fn build_remote(config: &AppConfig, opts: &StoreOptions) -> Result<RestStore> {
    let section = config.remote.clone().unwrap_or_default();

    let url = opts
        .remote_url
        .clone()
        .or(section.url.clone())
        .ok_or_else(|| ActivityError::InvalidConfig {
            detail: "no remote URL configured.\n\n  \
                     Set ACTMAN_REMOTE_URL or add `url = \"...\"` under [remote] in config.toml."
                .into(),
        })?;

    let key = opts
        .remote_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ActivityError::InvalidConfig {
            detail: "no remote API key.\n\n  \
                     Set ACTMAN_REMOTE_KEY in your environment or in a .env file."
                .into(),
        })?;

    Ok(RestStore::new(&url, &section.table, &key).with_timeout(section.timeout()))
}
