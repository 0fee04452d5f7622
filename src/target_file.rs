//! The working-list entry: a file the user has queued for processing.

use crate::file_category::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A filesystem entry in the user's working list.
///
/// `path` is the unique key for the entry; all list lookups and removals go
/// through it rather than positional indexes. `checked` is ephemeral
/// selection state and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFile {
    /// File name including the extension.
    pub name: String,
    /// Absolute path, the stable identity of the entry.
    pub path: PathBuf,
    /// Extension without the leading dot, empty when the file has none.
    pub ext: String,
    /// Category derived from the extension.
    pub category: Category,
    /// Whether the entry is selected in the working list.
    #[serde(default)]
    pub checked: bool,
}

impl TargetFile {
    /// Builds an entry from a path, deriving name, extension and category.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let category = Category::classify(&ext);
        Self {
            name,
            path: path.to_path_buf(),
            ext,
            category,
            checked: false,
        }
    }

    /// File name without the extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Re-derives name, extension and category after a rename or move.
    pub fn relocated(&self, new_path: PathBuf) -> Self {
        let mut updated = Self::from_path(&new_path);
        updated.checked = self.checked;
        updated
    }
}
