//! Collision-safe destination resolution.
//!
//! Given a candidate file name and a target directory, finds a path that is
//! free at resolution time. Collisions are resolved either automatically by
//! appending `" (n)"` before the extension, or interactively through the
//! [`Prompter`] collaborator. A declined prompt cancels the item and the
//! caller must not touch the filesystem for it.
//!
//! Races with other processes are not handled; this is a single-user desktop
//! assumption.

use crate::error::{EngineError, EngineResult};
use crate::fs_access::FileSystem;
use crate::prompt::Prompter;
use std::path::{Path, PathBuf};

/// Characters that are rejected in user-entered file names.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '<', '>', '|'];

/// Outcome of destination resolution. Cancellation is a normal outcome, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A path that did not exist when it was resolved.
    Ready(PathBuf),
    /// The user declined to pick a name; nothing was touched.
    Cancelled,
}

/// Rejects empty names and names containing [`FORBIDDEN_NAME_CHARS`].
pub fn validate_file_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::Validation {
            field: "file name",
            reason: "name must not be empty".to_string(),
        });
    }
    if let Some(bad) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(EngineError::Validation {
            field: "file name",
            reason: format!("name must not contain '{}'", bad),
        });
    }
    Ok(())
}

/// Joins stem and extension back into a file name.
pub fn join_name(stem: &str, ext: &str) -> String {
    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, ext)
    }
}

/// Resolves a free destination path for `stem.ext` inside `directory`.
///
/// With `auto_rename` set, each collision appends the next `" (i)"` counter
/// to the original stem until a free path is found. Without it, the user is
/// prompted per collision with the counter candidate as the suggestion; the
/// reply becomes the new stem and is checked again. An empty reply cancels.
///
/// The returned `Ready` path did not exist at resolution time.
pub fn resolve_destination(
    directory: &Path,
    stem: &str,
    ext: &str,
    auto_rename: bool,
    fs: &dyn FileSystem,
    prompter: &dyn Prompter,
) -> EngineResult<Resolved> {
    validate_file_name(&join_name(stem, ext))?;

    let mut current_stem = stem.to_string();
    let mut counter: u32 = 1;

    loop {
        let candidate = directory.join(join_name(&current_stem, ext));
        if !fs.exists(&candidate) {
            return Ok(Resolved::Ready(candidate));
        }

        let suggestion = format!("{} ({})", stem, counter);
        counter += 1;

        if auto_rename {
            current_stem = suggestion;
        } else {
            let message = format!(
                "'{}' already exists in {}. Enter a different name",
                join_name(&current_stem, ext),
                directory.display()
            );
            match prompter.prompt_text(&message, &suggestion) {
                Some(reply) => {
                    validate_file_name(&join_name(&reply, ext))?;
                    current_stem = reply;
                }
                None => return Ok(Resolved::Cancelled),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_access::RealFileSystem;
    use crate::prompt::ScriptedPrompter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_free_name_is_returned_untouched() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let resolved = resolve_destination(
            temp.path(),
            "report",
            "txt",
            true,
            &RealFileSystem,
            &ScriptedPrompter::decline_all(),
        )
        .unwrap();
        assert_eq!(resolved, Resolved::Ready(temp.path().join("report.txt")));
    }

    #[test]
    fn test_auto_rename_skips_taken_counters() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join("a (1).txt"), "").unwrap();

        let resolved = resolve_destination(
            temp.path(),
            "a",
            "txt",
            true,
            &RealFileSystem,
            &ScriptedPrompter::decline_all(),
        )
        .unwrap();
        assert_eq!(resolved, Resolved::Ready(temp.path().join("a (2).txt")));
    }

    #[test]
    fn test_declined_prompt_cancels() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp.path().join("a.txt"), "").unwrap();

        let resolved = resolve_destination(
            temp.path(),
            "a",
            "txt",
            false,
            &RealFileSystem,
            &ScriptedPrompter::decline_all(),
        )
        .unwrap();
        assert_eq!(resolved, Resolved::Cancelled);
    }

    #[test]
    fn test_prompt_reply_is_rechecked_for_collisions() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();

        // First reply collides again, second is free.
        let prompter = ScriptedPrompter::new()
            .push_text(Some("b"))
            .push_text(Some("c"));
        let resolved = resolve_destination(
            temp.path(),
            "a",
            "txt",
            false,
            &RealFileSystem,
            &prompter,
        )
        .unwrap();
        assert_eq!(resolved, Resolved::Ready(temp.path().join("c.txt")));
    }

    #[test]
    fn test_forbidden_characters_rejected() {
        assert!(validate_file_name("a:b").is_err());
        assert!(validate_file_name("a*b").is_err());
        assert!(validate_file_name("a|b").is_err());
        assert!(validate_file_name("  ").is_err());
        assert!(validate_file_name("plain name.txt").is_ok());
    }

    #[test]
    fn test_join_name_without_extension() {
        assert_eq!(join_name("Makefile", ""), "Makefile");
        assert_eq!(join_name("a", "txt"), "a.txt");
    }
}
