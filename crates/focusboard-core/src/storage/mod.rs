mod config;
pub mod database;
pub mod memory;

pub use config::{Config, NotificationsConfig, PresetConfig, TimerDefaults};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DatabaseError, Result};

/// Durable string-keyed storage holding JSON documents.
///
/// All access is single-threaded; each record is read, modified and written
/// back within one call, so no partial write is ever observable.
pub trait KvStore {
    /// Get the raw value stored under `key`.
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// Insert or replace the value stored under `key`.
    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn kv_remove(&self, key: &str) -> Result<(), DatabaseError>;

    /// Run `f` so that either all of its writes land or none do.
    fn atomically<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        f()
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).kv_set(key, value)
    }

    fn kv_remove(&self, key: &str) -> Result<(), DatabaseError> {
        (**self).kv_remove(key)
    }

    fn atomically<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        (**self).atomically(f)
    }
}

/// Read and decode a JSON document.
///
/// Missing keys and documents that fail to decode both yield `T::default()`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    let Some(raw) = store.kv_get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed record, using default");
            Ok(T::default())
        }
    }
}

/// Encode and store a JSON document.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.kv_set(key, &raw)?;
    Ok(())
}

/// Returns the data directory and creates it if needed.
///
/// `FOCUSBOARD_DATA_DIR` overrides the location entirely. Otherwise the
/// directory is `~/.config/focusboard[-dev]/`, with the `-dev` suffix when
/// `FOCUSBOARD_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSBOARD_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSBOARD_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focusboard-dev")
            } else {
                base_dir.join("focusboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
