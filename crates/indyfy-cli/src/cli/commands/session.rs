//! Saved session command handlers.

use anyhow::{Context, Result};
use indyfy_core::config::{self, Config};
use indyfy_core::identity::IdentityService;
use indyfy_core::identity::firebase::FirebaseIdentityService;
use indyfy_core::identity::firebase::session_store::SessionStore;

fn store() -> SessionStore {
    SessionStore::new(config::paths::session_path())
}

/// Prints the saved account, then its profile when the backend is reachable.
pub async fn whoami() -> Result<()> {
    let store = store();
    let Some(saved) = store.load()? else {
        println!("Not signed in");
        return Ok(());
    };

    let settings = Config::load().context("load config")?.firebase()?;
    let service = FirebaseIdentityService::new(settings, store);
    let Some(account) = service.restore().await else {
        println!("Session for {} has expired", saved.account.email);
        return Ok(());
    };

    println!("Email:    {}", account.email);
    println!("Account:  {}", account.id);
    match service.read_profile(&account.id).await {
        Ok(Some(profile)) => {
            println!("Username: {}", profile.username);
            println!("Role:     {}", profile.role.label());
            println!("Joined:   {}", profile.created_at.format("%Y-%m-%d"));
        }
        Ok(None) => println!("No profile yet"),
        Err(e) => {
            tracing::warn!(code = %e.code, "profile read failed");
            println!("Profile unavailable: {}", e.message);
        }
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = store();
    if store.clear()? {
        println!("Signed out ({} removed)", store.path().display());
    } else {
        println!("No saved session");
    }
    Ok(())
}
