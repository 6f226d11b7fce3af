//! User configuration at ~/.config/history-today/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HistoryError, HistoryResult};
use crate::storage::FileStorage;
use crate::source::WikimediaClient;

static DEFAULT_API_BASE_URL: &str = "https://api.wikimedia.org/feed/v1/wikipedia";
static DEFAULT_LANGUAGE: &str = "en";
static DEFAULT_SHARE_BASE_URL: &str = "https://history-of-today.app/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Wikipedia language edition, e.g. "en" or "de".
    #[serde(default = "default_language")]
    pub language: String,

    /// Where favorites and preferences are stored. Defaults to the platform
    /// data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: default_api_base_url(),
            language: default_language(),
            data_dir: None,
            share_base_url: default_share_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn config_path() -> HistoryResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HistoryError::Config("Could not determine config directory".into()))?
            .join("history-today");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, creating a commented-out default on first run.
    pub fn load() -> HistoryResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            info!(path = %config_path.display(), "created default config");
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> HistoryResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| HistoryError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HistoryError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> HistoryResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => dirs::data_dir()
                .map(|dir| dir.join("history-today"))
                .ok_or_else(|| HistoryError::Config("Could not determine data directory".into())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn storage(&self) -> HistoryResult<FileStorage> {
        Ok(FileStorage::new(self.data_path()?))
    }

    pub fn client(&self) -> HistoryResult<WikimediaClient> {
        WikimediaClient::new(&self.api_base_url, &self.language, self.request_timeout())
    }

    pub fn save(&self, path: &Path) -> HistoryResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| HistoryError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| HistoryError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HistoryResult<()> {
        let contents = format!(
            "\
# history-today configuration

# Feed to read days from:
# api_base_url = \"{DEFAULT_API_BASE_URL}\"

# Wikipedia language edition:
# language = \"{DEFAULT_LANGUAGE}\"

# Where favorites and preferences are stored:
# data_dir = \"~/.local/share/history-today\"

# Base of links printed by `history-today share`:
# share_base_url = \"{DEFAULT_SHARE_BASE_URL}\"

# Seconds before a request is given up:
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HistoryError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HistoryError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history-today/config.toml");

        Settings::create_default_config(&path).unwrap();
        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.data_dir, None);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_and_tilde_expansion() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "language = \"de\"\ndata_dir = \"~/history\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.language, "de");
        assert_eq!(settings.request_timeout_secs, 5);

        let data_path = settings.data_path().unwrap();
        assert!(data_path.ends_with("history"));
        assert!(!data_path.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(settings.share_base_url, DEFAULT_SHARE_BASE_URL);
    }

    #[test]
    fn test_save_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let settings = Settings {
            language: "fr".into(),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().language, "fr");
    }
}
