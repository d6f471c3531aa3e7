//! Configuration and credential storage for cloudctl.
//!
//! Settings live in `<config dir>/config.toml`, the API key in
//! `<config dir>/credentials.toml`. The config dir defaults to the platform
//! config directory (`~/.config/cloudctl` on Linux) and can be moved with
//! `CLOUDCTL_CONFIG_DIR`. `CLOUDCTL_API_KEY` takes precedence over the
//! stored key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colors::ColorMode;

pub const API_KEY_ENV: &str = "CLOUDCTL_API_KEY";
pub const CONFIG_DIR_ENV: &str = "CLOUDCTL_CONFIG_DIR";

const SETTINGS_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode credentials: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// User settings from `config.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color mode for diagnostics
    pub color: ColorMode,
    /// Project used when `--project` is not given
    pub default_project: Option<String>,
    /// Remote used when `--remote` is not given
    pub default_remote: Option<String>,
}

impl Settings {
    /// Load settings from `config.toml` in the given directory.
    /// Returns defaults if the file doesn't exist or is invalid.
    pub fn load(dir: &Path) -> Self {
        Self::load_from_path(&dir.join(SETTINGS_FILE))
    }

    /// Load settings from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credentials {
    api_key: String,
}

/// Directory holding settings and credentials.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .map(|d| d.join("cloudctl"))
        .unwrap_or_else(|| PathBuf::from(".cloudctl"))
}

/// Stored API key in `dir`, if any.
pub fn stored_api_key(dir: &Path) -> Option<String> {
    let path = dir.join(CREDENTIALS_FILE);
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<Credentials>(&content) {
        Ok(creds) if !creds.api_key.trim().is_empty() => Some(creds.api_key.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// API key from the environment, falling back to the stored one.
pub fn api_key() -> Option<String> {
    env_api_key().or_else(|| stored_api_key(&config_dir()))
}

/// API key from `CLOUDCTL_API_KEY` when set and non-empty.
pub fn env_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Whether a credential is configured right now. Reads the environment and
/// the credentials file on every call.
pub fn has_credentials() -> bool {
    api_key().is_some()
}

/// Write `api_key` to `<dir>/credentials.toml`, creating `dir` if needed.
pub fn store_credentials(dir: &Path, api_key: &str) -> Result<PathBuf, ConfigError> {
    let path = dir.join(CREDENTIALS_FILE);
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let content = toml::to_string(&Credentials {
        api_key: api_key.to_string(),
    })?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Remove stored credentials. Returns false when there was nothing to remove.
pub fn clear_credentials(dir: &Path) -> Result<bool, ConfigError> {
    let path = dir.join(CREDENTIALS_FILE);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ConfigError::Remove { path, source }),
    }
}

/// Mask all but the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let hidden = key.chars().count().saturating_sub(4);
    format!("{}{}", "*".repeat(hidden), visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.color, ColorMode::Auto);
        assert!(settings.default_project.is_none());
        assert!(settings.default_remote.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let settings = Settings::load(temp.path());
        assert!(settings.default_remote.is_none());
    }

    #[test]
    fn test_load_valid_settings() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::write(
            temp.path().join("config.toml"),
            r#"
color = "never"
default_project = "shop"
default_remote = "production"
"#,
        )
        .expect("write config");

        let settings = Settings::load(temp.path());
        assert_eq!(settings.color, ColorMode::Never);
        assert_eq!(settings.default_project.as_deref(), Some("shop"));
        assert_eq!(settings.default_remote.as_deref(), Some("production"));
    }

    #[test]
    fn test_load_invalid_settings_falls_back() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::write(temp.path().join("config.toml"), "color = [").expect("write config");
        let settings = Settings::load(temp.path());
        assert_eq!(settings.color, ColorMode::Auto);
    }

    #[test]
    fn test_store_and_clear_credentials() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("nested");
        assert!(stored_api_key(&dir).is_none());

        let path = store_credentials(&dir, "abc123").expect("store");
        assert!(path.ends_with("credentials.toml"));
        assert_eq!(stored_api_key(&dir).as_deref(), Some("abc123"));

        assert!(clear_credentials(&dir).expect("clear"));
        assert!(stored_api_key(&dir).is_none());
        assert!(!clear_credentials(&dir).expect("second clear"));
    }

    #[test]
    fn test_blank_stored_key_is_absent() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::write(temp.path().join("credentials.toml"), "api_key = \"  \"\n")
            .expect("write");
        assert!(stored_api_key(temp.path()).is_none());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdefgh"), "****efgh");
        assert_eq!(mask_key("abc"), "abc");
    }
}
