//! Full-screen terminal client for INDYFY.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
pub use features::{auth, nav, pages};
use indyfy_core::identity::IdentityService;
use indyfy_core::session::SessionObserver;
pub use runtime::TuiRuntime;

/// Runs the terminal client against `service` until the user quits.
///
/// Starts the session observer, hands it to the runtime, and shuts it down
/// after the terminal has been restored.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the event loop fails.
pub async fn run_app(service: Arc<dyn IdentityService>) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("INDYFY needs an interactive terminal.");
    }

    let observer = SessionObserver::start(Arc::clone(&service));
    let mut runtime = TuiRuntime::new(service, observer)?;
    tracing::info!("terminal client started");

    let result = runtime.run();

    let observer = runtime.take_session();
    // Restores the terminal.
    drop(runtime);
    if let Some(observer) = observer {
        observer.shutdown().await;
    }
    tracing::info!("terminal client stopped");

    result
}
