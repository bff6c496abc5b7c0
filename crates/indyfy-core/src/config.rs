//! Configuration management for INDYFY.
//!
//! Loads configuration from ${INDYFY_HOME}/config.toml with sensible defaults,
//! then applies environment overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for INDYFY configuration and data files.
    //!
    //! INDYFY_HOME resolution order:
    //! 1. INDYFY_HOME environment variable (if set)
    //! 2. ~/.config/indyfy (default)

    use std::path::PathBuf;

    /// Returns the INDYFY home directory.
    pub fn indyfy_home() -> PathBuf {
        if let Ok(home) = std::env::var("INDYFY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".indyfy"),
            |h| h.join(".config").join("indyfy"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        indyfy_home().join("config.toml")
    }

    /// Returns the path of the persisted session file.
    pub fn session_path() -> PathBuf {
        indyfy_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        indyfy_home().join("logs")
    }
}

/// Environment variables that override config file values.
pub mod env {
    pub const FIREBASE_API_KEY: &str = "INDYFY_FIREBASE_API_KEY";
    pub const FIREBASE_PROJECT_ID: &str = "INDYFY_FIREBASE_PROJECT_ID";
    pub const GOOGLE_CLIENT_ID: &str = "INDYFY_GOOGLE_CLIENT_ID";
    pub const GOOGLE_CLIENT_SECRET: &str = "INDYFY_GOOGLE_CLIENT_SECRET";
}

/// `[firebase]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub identity_toolkit_url: String,
    pub secure_token_url: String,
    pub firestore_url: String,
}

impl FirebaseConfig {
    pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
    pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
    pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: None,
            identity_toolkit_url: Self::DEFAULT_IDENTITY_TOOLKIT_URL.to_string(),
            secure_token_url: Self::DEFAULT_SECURE_TOKEN_URL.to_string(),
            firestore_url: Self::DEFAULT_FIRESTORE_URL.to_string(),
        }
    }
}

/// `[google]` section: OAuth client used for federated sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Loopback port for the OAuth redirect. 0 picks a random port.
    pub callback_port: u16,
    pub auth_url: String,
    pub token_url: String,
}

impl GoogleConfig {
    pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
    pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            callback_port: 0,
            auth_url: Self::DEFAULT_AUTH_URL.to_string(),
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub firebase: FirebaseConfig,
    pub google: GoogleConfig,
}

/// Validated Firebase connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub project_id: String,
    pub identity_toolkit_url: String,
    pub secure_token_url: String,
    pub firestore_url: String,
    pub google: Option<GoogleSettings>,
}

/// Validated Google OAuth client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub callback_port: u16,
    pub auth_url: String,
    pub token_url: String,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn trim_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl Config {
    /// Loads configuration from the default config path and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies overrides looked up by environment variable name.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(env::FIREBASE_API_KEY) {
            self.firebase.api_key = Some(v);
        }
        if let Some(v) = get(env::FIREBASE_PROJECT_ID) {
            self.firebase.project_id = Some(v);
        }
        if let Some(v) = get(env::GOOGLE_CLIENT_ID) {
            self.google.client_id = Some(v);
        }
        if let Some(v) = get(env::GOOGLE_CLIENT_SECRET) {
            self.google.client_secret = Some(v);
        }
    }

    /// Returns the validated Firebase settings.
    ///
    /// Google sign-in settings are `None` when no client id is configured.
    pub fn firebase(&self) -> Result<FirebaseSettings> {
        let api_key = non_empty(self.firebase.api_key.as_ref()).with_context(|| {
            format!(
                "Missing Firebase API key. Set firebase.api_key in {} or {}",
                paths::config_path().display(),
                env::FIREBASE_API_KEY
            )
        })?;
        let project_id = non_empty(self.firebase.project_id.as_ref()).with_context(|| {
            format!(
                "Missing Firebase project id. Set firebase.project_id in {} or {}",
                paths::config_path().display(),
                env::FIREBASE_PROJECT_ID
            )
        })?;

        let google = non_empty(self.google.client_id.as_ref()).map(|client_id| GoogleSettings {
            client_id,
            client_secret: non_empty(self.google.client_secret.as_ref()),
            callback_port: self.google.callback_port,
            auth_url: trim_url(&self.google.auth_url),
            token_url: trim_url(&self.google.token_url),
        });

        Ok(FirebaseSettings {
            api_key,
            project_id,
            identity_toolkit_url: trim_url(&self.firebase.identity_toolkit_url),
            secure_token_url: trim_url(&self.firebase.secure_token_url),
            firestore_url: trim_url(&self.firebase.firestore_url),
            google,
        })
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();

        assert_eq!(config.firebase.api_key, None);
        assert_eq!(
            config.firebase.firestore_url,
            FirebaseConfig::DEFAULT_FIRESTORE_URL
        );
        assert_eq!(config.google.callback_port, 0);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[firebase]\napi_key = \"key\"\nproject_id = \"indyfy-test\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.firebase.api_key.as_deref(), Some("key"));
        assert_eq!(
            config.firebase.identity_toolkit_url,
            FirebaseConfig::DEFAULT_IDENTITY_TOOLKIT_URL
        );
    }

    #[test]
    fn test_load_invalid_toml_fails_with_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[firebase\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_from_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# INDYFY Configuration"));
        assert!(contents.contains("[firebase]"));
        // The template itself must parse.
        Config::load_from(&config_path).unwrap();
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config = Config::default();
        config.firebase.api_key = Some("from-file".to_string());
        let vars: HashMap<&str, &str> = HashMap::from([
            (env::FIREBASE_API_KEY, "from-env"),
            (env::GOOGLE_CLIENT_ID, "client"),
            (env::FIREBASE_PROJECT_ID, "  "),
        ]);

        config.apply_overrides(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.firebase.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.google.client_id.as_deref(), Some("client"));
        assert_eq!(config.firebase.project_id, None);
    }

    #[test]
    fn test_firebase_requires_api_key_and_project() {
        let mut config = Config::default();
        assert!(config.firebase().is_err());

        config.firebase.api_key = Some("key".to_string());
        let err = config.firebase().unwrap_err();
        assert!(err.to_string().contains("project id"));

        config.firebase.project_id = Some("indyfy-test".to_string());
        let settings = config.firebase().unwrap();
        assert_eq!(settings.project_id, "indyfy-test");
        assert_eq!(settings.google, None);
    }

    #[test]
    fn test_firebase_trims_trailing_slashes() {
        let mut config = Config::default();
        config.firebase.api_key = Some("key".to_string());
        config.firebase.project_id = Some("p".to_string());
        config.firebase.firestore_url = "http://127.0.0.1:9000/v1/".to_string();
        config.google.client_id = Some("client".to_string());

        let settings = config.firebase().unwrap();
        assert_eq!(settings.firestore_url, "http://127.0.0.1:9000/v1");
        assert_eq!(settings.google.unwrap().client_id, "client");
    }
}
