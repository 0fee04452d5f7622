//! In-memory working-list state.
//!
//! The file list is owned by one `AppState` value and every mutation goes
//! through [`reduce`] with an [`Action`], keeping a single-writer discipline
//! without a global store. Entries are addressed by their stable path, never
//! by positional index, so removals during a partially completed batch
//! cannot shift out from under later updates.

use crate::target_file::TargetFile;
use std::path::{Path, PathBuf};

/// Top-level application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    files: Vec<TargetFile>,
}

/// A state mutation.
#[derive(Debug, Clone)]
pub enum Action {
    /// Appends newly discovered files; paths already present are ignored.
    AddFiles(Vec<TargetFile>),
    /// Removes the entry with this path, if present.
    RemoveByPath(PathBuf),
    /// Flips the selection flag of the entry with this path.
    ToggleChecked(PathBuf),
    /// Sets the selection flag on every entry.
    SetAllChecked(bool),
    /// Replaces an entry's identity after a successful rename or move that
    /// keeps it in the list.
    Relocated { path: PathBuf, new_path: PathBuf },
    /// Empties the list.
    Clear,
}

/// Applies one action, returning the next state. Pure: no IO, no
/// side effects.
pub fn reduce(state: AppState, action: Action) -> AppState {
    let mut files = state.files;
    match action {
        Action::AddFiles(new_files) => {
            for file in new_files {
                if !files.iter().any(|f| f.path == file.path) {
                    files.push(file);
                }
            }
        }
        Action::RemoveByPath(path) => {
            files.retain(|f| f.path != path);
        }
        Action::ToggleChecked(path) => {
            if let Some(file) = files.iter_mut().find(|f| f.path == path) {
                file.checked = !file.checked;
            }
        }
        Action::SetAllChecked(checked) => {
            for file in &mut files {
                file.checked = checked;
            }
        }
        Action::Relocated { path, new_path } => {
            if let Some(file) = files.iter_mut().find(|f| f.path == path) {
                *file = file.relocated(new_path);
            }
        }
        Action::Clear => files.clear(),
    }
    AppState { files }
}

impl AppState {
    pub fn files(&self) -> &[TargetFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    /// The currently selected entries.
    pub fn checked_files(&self) -> Vec<TargetFile> {
        self.files.iter().filter(|f| f.checked).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> TargetFile {
        TargetFile::from_path(Path::new(path))
    }

    #[test]
    fn test_add_files_deduplicates_by_path() {
        let state = reduce(
            AppState::default(),
            Action::AddFiles(vec![file("/a/x.txt"), file("/a/y.txt")]),
        );
        let state = reduce(state, Action::AddFiles(vec![file("/a/x.txt")]));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_remove_by_path() {
        let state = reduce(
            AppState::default(),
            Action::AddFiles(vec![file("/a/x.txt"), file("/a/y.txt")]),
        );
        let state = reduce(state, Action::RemoveByPath(PathBuf::from("/a/x.txt")));
        assert_eq!(state.len(), 1);
        assert!(!state.contains(Path::new("/a/x.txt")));
        assert!(state.contains(Path::new("/a/y.txt")));
    }

    #[test]
    fn test_removal_order_does_not_depend_on_indexes() {
        let state = reduce(
            AppState::default(),
            Action::AddFiles(vec![file("/a/1.txt"), file("/a/2.txt"), file("/a/3.txt")]),
        );
        // Remove out of order, as a batch completing unordered would.
        let state = reduce(state, Action::RemoveByPath(PathBuf::from("/a/2.txt")));
        let state = reduce(state, Action::RemoveByPath(PathBuf::from("/a/1.txt")));
        assert_eq!(state.len(), 1);
        assert!(state.contains(Path::new("/a/3.txt")));
    }

    #[test]
    fn test_toggle_and_select_all() {
        let state = reduce(
            AppState::default(),
            Action::AddFiles(vec![file("/a/x.txt"), file("/a/y.txt")]),
        );
        let state = reduce(state, Action::ToggleChecked(PathBuf::from("/a/x.txt")));
        assert_eq!(state.checked_files().len(), 1);

        let state = reduce(state, Action::SetAllChecked(true));
        assert_eq!(state.checked_files().len(), 2);

        let state = reduce(state, Action::SetAllChecked(false));
        assert!(state.checked_files().is_empty());
    }

    #[test]
    fn test_relocated_updates_identity_in_place() {
        let state = reduce(AppState::default(), Action::AddFiles(vec![file("/a/x.txt")]));
        let state = reduce(
            state,
            Action::Relocated {
                path: PathBuf::from("/a/x.txt"),
                new_path: PathBuf::from("/a/x (1).txt"),
            },
        );
        assert_eq!(state.len(), 1);
        assert!(state.contains(Path::new("/a/x (1).txt")));
        assert_eq!(state.files()[0].name, "x (1).txt");
    }

    #[test]
    fn test_reduce_on_absent_path_is_a_no_op() {
        let state = reduce(AppState::default(), Action::AddFiles(vec![file("/a/x.txt")]));
        let state = reduce(state, Action::RemoveByPath(PathBuf::from("/a/other.txt")));
        let state = reduce(state, Action::ToggleChecked(PathBuf::from("/a/other.txt")));
        assert_eq!(state.len(), 1);
        assert!(state.checked_files().is_empty());
    }
}
