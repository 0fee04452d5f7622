//! User preferences and scan-filter configuration.
//!
//! Configuration is a TOML file with three sections:
//!
//! ```toml
//! [preferences]
//! auto_rename = true
//! copy_original = false
//! date_format = "YYYY-MM-DD"
//! time_format = "HH-mm-ss"   # optional
//!
//! [filters]
//! enable_hidden_files = false
//! exclude_filenames = [".DS_Store", "Thumbs.db"]
//! exclude_extensions = ["tmp", "bak"]
//! exclude_patterns = ["*.partial"]
//!
//! [shortcuts]
//! "ctrl+shift+d" = "~/Documents"
//! "ctrl+1" = "~/Pictures"
//! ```
//!
//! Lookup order: an explicit `--config` path, then `./.sortdeskrc.toml`,
//! then `~/.config/sortdesk/config.toml`, then built-in defaults.

use crate::error::ConfigError;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub preferences: Preferences,

    #[serde(default)]
    pub filters: FilterRules,

    /// Raw chord string to destination directory. Canonicalized by
    /// [`crate::shortcuts::ShortcutMap`].
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
}

/// User preference toggles consumed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Resolve name collisions silently by appending a counter suffix.
    #[serde(default = "default_true")]
    pub auto_rename: bool,

    /// Keep the source file: move operations become copies.
    #[serde(default)]
    pub copy_original: bool,

    /// Date pattern for `$[today]`, in `YYYY-MM-DD` token style.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Optional time pattern appended to `$[today]`.
    #[serde(default)]
    pub time_format: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "YYYY-MM-DD".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_rename: true,
            copy_original: false,
            date_format: default_date_format(),
            time_format: None,
        }
    }
}

/// Which files a directory scan should skip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Include dotfiles in scans. Off by default.
    #[serde(default)]
    pub enable_hidden_files: bool,

    /// Exact file names to skip.
    #[serde(default)]
    pub exclude_filenames: Vec<String>,

    /// Extensions to skip, case-insensitive.
    #[serde(default)]
    pub exclude_extensions: Vec<String>,

    /// Glob patterns to skip.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl AppConfig {
    /// Loads configuration with the documented fallback chain.
    ///
    /// An explicitly given path must exist and parse; the fallback locations
    /// are only used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from(".sortdeskrc.toml");
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortdesk")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

impl FilterRules {
    /// Pre-compiles the rules so per-file checks are set lookups.
    pub fn compile(&self) -> Result<CompiledFilters, ConfigError> {
        let patterns = self
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(|_| ConfigError::InvalidGlobPattern(p.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledFilters {
            enable_hidden_files: self.enable_hidden_files,
            filenames: self.exclude_filenames.iter().cloned().collect(),
            extensions: self
                .exclude_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            patterns,
        })
    }
}

/// Compiled filter rules ready for matching.
pub struct CompiledFilters {
    enable_hidden_files: bool,
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
}

impl CompiledFilters {
    /// Whether a scanned file should enter the working list.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if !self.enable_hidden_files && file_name.starts_with('.') {
            return false;
        }
        if self.filenames.contains(file_name.as_ref()) {
            return false;
        }
        if let Some(ext) = file_path.extension() {
            if self.extensions.contains(&ext.to_string_lossy().to_lowercase()) {
                return false;
            }
        }
        if self.patterns.iter().any(|p| p.matches_path(file_path)) {
            return false;
        }
        true
    }
}
