//! Key-value settings store.
//!
//! Preference toggles survive restarts through an opaque JSON blob; the
//! engine itself only ever sees the typed [`Preferences`] decoded from it.
//! GUI shells persist through this store, the CLI reads the TOML config
//! instead.

use crate::config::Preferences;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Opaque key-value persistence for user preferences.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<&Value>;

    fn set(&mut self, key: &str, value: Value);
}

/// A settings store backed by a single JSON file.
#[derive(Debug, Default)]
pub struct JsonFileStore {
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Loads the store from disk; a missing file yields an empty store.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let values = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self { values })
    }

    /// Writes the store to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)
    }

    /// Default location: `~/.config/sortdesk/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("sortdesk")
                .join("settings.json")
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

impl Preferences {
    /// Decodes preferences from a store, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_store(store: &dyn SettingsStore) -> Self {
        let defaults = Preferences::default();
        Self {
            auto_rename: store
                .get("auto_rename")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.auto_rename),
            copy_original: store
                .get("copy_original")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.copy_original),
            date_format: store
                .get("date_format")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.date_format),
            time_format: store
                .get("time_format")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Writes every preference into a store.
    pub fn write_to_store(&self, store: &mut dyn SettingsStore) {
        store.set("auto_rename", json!(self.auto_rename));
        store.set("copy_original", json!(self.copy_original));
        store.set("date_format", json!(self.date_format));
        store.set(
            "time_format",
            self.time_format
                .as_ref()
                .map(|t| json!(t))
                .unwrap_or(Value::Null),
        );
    }
}
