//! Application-level configuration loading: storage backend and notification buffers.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::player_store::DEFAULT_STORAGE_KEY;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FOOTBALL_MANAGER_CONFIG_PATH";
/// Default location of the file-backed key-value store.
const DEFAULT_STORE_PATH: &str = "data/store.json";
const DEFAULT_NOTIFICATION_CAPACITY: usize = 16;
const DEFAULT_NOTIFICATION_HISTORY: usize = 8;

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Where the roster is persisted.
    pub storage: StorageConfig,
    /// Sizing of the notification fan-out.
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of key-value store backing the roster.
pub enum StorageBackend {
    /// JSON document on disk, survives restarts.
    File,
    /// Process memory, lost on shutdown.
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
/// Key-value store selection.
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Backing file, only used by [`StorageBackend::File`].
    pub path: PathBuf,
    /// Key the serialized roster is stored under.
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Notification channel sizing.
pub struct NotificationConfig {
    /// Broadcast buffer per subscriber.
    pub capacity: usize,
    /// Number of recent notifications replayed to late subscribers.
    pub history: usize,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration from `path`, falling back to built-in defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        backend = ?app_config.storage.backend,
                        key = %app_config.storage.key,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    storage: RawStorage,
    #[serde(default)]
    notifications: RawNotifications,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStorage {
    backend: Option<StorageBackend>,
    path: Option<PathBuf>,
    key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNotifications {
    capacity: Option<usize>,
    history: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let RawConfig {
            storage,
            notifications,
        } = value;

        Self {
            storage: StorageConfig {
                backend: storage.backend.unwrap_or(StorageBackend::File),
                path: storage
                    .path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
                key: storage
                    .key
                    .filter(|key| !key.is_empty())
                    .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            },
            notifications: NotificationConfig {
                capacity: notifications
                    .capacity
                    .unwrap_or(DEFAULT_NOTIFICATION_CAPACITY)
                    .max(1),
                history: notifications.history.unwrap_or(DEFAULT_NOTIFICATION_HISTORY),
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
