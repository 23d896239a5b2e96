//! Roster persistence over a single key of a [`KeyValueStore`].

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::{
    config::{StorageBackend, StorageConfig},
    dao::{
        key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore},
        models::{PlayerEntity, PlayerList},
        storage::{StorageError, StorageResult},
    },
};

/// Key the serialized roster lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "football-manager-players";

/// Narrow read/write adapter over the roster key.
#[derive(Clone)]
pub struct PlayerStore {
    backend: Arc<dyn KeyValueStore>,
    key: Arc<str>,
}

impl PlayerStore {
    /// Bind `backend` to `key`.
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Bind `backend` to [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    /// Open the backend selected by the configuration.
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        let backend: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::File => Arc::new(FileKeyValueStore::open(&config.path)?),
            StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        };
        Ok(Self::new(backend, config.key.as_str()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw persisted text, if any.
    pub fn read(&self) -> StorageResult<Option<String>> {
        self.backend.get(&self.key)
    }

    /// Replace the persisted text.
    pub fn write(&self, value: &str) -> StorageResult<()> {
        self.backend.set(&self.key, value)
    }

    /// Serialize `players` and write the result.
    pub fn write_players(&self, players: &PlayerList) -> StorageResult<()> {
        let encoded = serde_json::to_string(players)
            .map_err(|err| StorageError::unavailable("encoding player list", err))?;
        self.write(&encoded)
    }

    /// Probe the backend.
    pub fn health_check(&self) -> StorageResult<()> {
        self.backend.health_check()
    }
}

/// Why parseable persisted text was not accepted as a roster.
#[derive(Debug, Error)]
pub enum ShapeMismatch {
    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),
}

/// Result of decoding the persisted roster text.
#[derive(Debug)]
pub enum Decoded {
    /// The text is a JSON array; its elements are taken as they are.
    Players(PlayerList),
    /// The text is valid JSON but not an array.
    WrongShape(ShapeMismatch),
    /// The text is not JSON at all.
    Malformed(serde_json::Error),
}

/// Decode persisted roster text, keeping "not JSON" apart from "JSON of the wrong shape".
///
/// Array elements are not inspected.
pub fn decode_persisted(text: &str) -> Decoded {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => {
            Decoded::Players(items.into_iter().map(PlayerEntity::from).collect())
        }
        Ok(other) => Decoded::WrongShape(ShapeMismatch::NotAnArray(json_kind(&other))),
        Err(err) => Decoded::Malformed(err),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
