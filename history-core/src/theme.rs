//! Persisted light/dark/system preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HistoryError, HistoryResult};
use crate::storage::{Storage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Read the stored preference. Anything unreadable falls back to `System`.
    pub fn load(storage: &impl Storage) -> Theme {
        match storage.get(THEME_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "could not read theme");
                Theme::default()
            }
        }
    }

    pub fn save(self, storage: &mut impl Storage) -> HistoryResult<()> {
        let serialized =
            serde_json::to_string(&self).map_err(|e| HistoryError::Serialization(e.to_string()))?;
        storage.set(THEME_KEY, &serialized)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::System => write!(f, "system"),
        }
    }
}

impl FromStr for Theme {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(HistoryError::InvalidTheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_to_system() {
        assert_eq!(Theme::load(&MemoryStorage::new()), Theme::System);
        assert_eq!(
            Theme::load(&MemoryStorage::with_value(THEME_KEY, "\"sepia\"")),
            Theme::System
        );
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        Theme::Dark.save(&mut storage).unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(Theme::load(&storage), Theme::Dark);
    }
}
