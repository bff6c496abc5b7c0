//! Terminal client command handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use indyfy_core::config::{self, Config};
use indyfy_core::identity::firebase::session_store::SessionStore;
use indyfy_core::identity::{FirebaseIdentityService, IdentityService, MemoryIdentityService};
use indyfy_core::logging;

pub async fn run(offline: bool) -> Result<()> {
    let _log_guard = logging::init(&config::paths::logs_dir())?;

    let service: Arc<dyn IdentityService> = if offline {
        tracing::info!("starting with the in-memory backend");
        Arc::new(MemoryIdentityService::new())
    } else {
        let settings = Config::load()
            .context("load config")?
            .firebase()?;
        let store = SessionStore::new(config::paths::session_path());
        Arc::new(FirebaseIdentityService::connect(settings, store).await)
    };

    indyfy_tui::run_app(service).await
}
