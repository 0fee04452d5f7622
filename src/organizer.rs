//! The organizing engine: move, copy, rename, delete and bucket files.
//!
//! Every operation is a thin, collision-safe wrapper over the
//! [`FileSystem`] collaborator. The engine never displays UI; interactive
//! decisions go through the [`Prompter`] and cancellations come back as
//! outcome variants rather than errors. In-memory list maintenance is the
//! caller's job and must only happen for outcomes reported as successful
//! here.

use crate::config::{CompiledFilters, Preferences};
use crate::error::{EngineError, EngineResult, PreconditionError};
use crate::fs_access::FileSystem;
use crate::prompt::Prompter;
use crate::resolver::{resolve_destination, validate_file_name, Resolved};
use crate::rule::GroupKey;
use crate::target_file::TargetFile;
use crate::template::expand_template;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A completed rename or move, with the file's new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub new_path: PathBuf,
    pub new_name: String,
}

/// Outcome of a single move/copy/rename. Cancellation is a silent no-op for
/// the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Done(Transfer),
    Cancelled,
}

/// Outcome of a batch delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; no filesystem call was made.
    Declined,
    Completed(DeleteReport),
}

/// Per-file results of a confirmed delete. Failures are collected
/// independently; removed siblings are never rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Per-file outcome of a bucketing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Moved { new_path: PathBuf },
    Copied { new_path: PathBuf },
    /// The user cancelled the collision prompt for this file.
    Cancelled,
    /// The grouping key does not cover this file.
    Skipped,
    Failed { reason: String },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Moved { .. } | FileOutcome::Copied { .. })
    }

    /// The destination path for successful outcomes.
    pub fn new_path(&self) -> Option<&Path> {
        match self {
            FileOutcome::Moved { new_path } | FileOutcome::Copied { new_path } => {
                Some(new_path.as_path())
            }
            _ => None,
        }
    }
}

/// Results of `organize_by_key`, one entry per input file in input order.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    pub outcomes: Vec<(PathBuf, FileOutcome)>,
}

impl OrganizeReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }
}

/// Whether an existing bucket directory is reused or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirPolicy {
    /// Reuse the directory when it already exists.
    Reuse,
    /// Remove an existing directory (and its contents) before recreating it.
    Replace,
}

/// The file-organizing engine over its two collaborators.
pub struct Engine<'a> {
    fs: &'a dyn FileSystem,
    prompter: &'a dyn Prompter,
}

impl<'a> Engine<'a> {
    pub fn new(fs: &'a dyn FileSystem, prompter: &'a dyn Prompter) -> Self {
        Self { fs, prompter }
    }

    /// Scans a directory into working-list entries, applying filter rules.
    pub fn scan_directory(
        &self,
        path: &Path,
        recursive: bool,
        filters: &CompiledFilters,
    ) -> EngineResult<Vec<TargetFile>> {
        if !self.fs.exists(path) {
            return Err(PreconditionError::DestinationMissing(path.to_path_buf()).into());
        }
        let entries = self
            .fs
            .list_directory(path, recursive)
            .map_err(|source| EngineError::Operation {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(entries
            .iter()
            .filter(|p| filters.should_include(p))
            .map(|p| TargetFile::from_path(p))
            .collect())
    }

    /// Moves (or, with `copy`, copies) one file into `dest_dir`, resolving
    /// name collisions per the policy.
    ///
    /// `copy = true` preserves the source file. The destination directory
    /// must already exist; creating it is the caller's responsibility.
    pub fn move_or_copy(
        &self,
        file: &TargetFile,
        dest_dir: &Path,
        copy: bool,
        auto_rename: bool,
    ) -> EngineResult<MoveOutcome> {
        if !self.fs.exists(dest_dir) {
            return Err(PreconditionError::DestinationMissing(dest_dir.to_path_buf()).into());
        }

        let resolved = resolve_destination(
            dest_dir,
            &file.stem(),
            &file.ext,
            auto_rename,
            self.fs,
            self.prompter,
        )?;
        let destination = match resolved {
            Resolved::Ready(path) => path,
            Resolved::Cancelled => return Ok(MoveOutcome::Cancelled),
        };

        let result = if copy {
            self.fs.copy(&file.path, &destination)
        } else {
            self.fs.rename(&file.path, &destination)
        };
        result.map_err(|source| EngineError::Operation {
            path: file.path.clone(),
            source,
        })?;

        Ok(MoveOutcome::Done(transfer(destination)))
    }

    /// Renames a file in its current directory using a keyword template.
    ///
    /// The expanded template becomes the new stem; the extension is kept.
    /// `now` is injected so expansion stays deterministic under test.
    pub fn rename_in_place(
        &self,
        file: &TargetFile,
        name_template: &str,
        prefs: &Preferences,
        auto_rename: bool,
        now: DateTime<Local>,
    ) -> EngineResult<MoveOutcome> {
        let new_stem = expand_template(
            name_template,
            &file.ext,
            file.category,
            &prefs.date_format,
            prefs.time_format.as_deref(),
            now,
        );
        validate_file_name(&new_stem)?;

        let parent = file
            .path
            .parent()
            .ok_or_else(|| PreconditionError::DestinationMissing(file.path.clone()))?;

        let resolved = resolve_destination(
            parent,
            &new_stem,
            &file.ext,
            auto_rename,
            self.fs,
            self.prompter,
        )?;
        let destination = match resolved {
            Resolved::Ready(path) => path,
            Resolved::Cancelled => return Ok(MoveOutcome::Cancelled),
        };

        self.fs
            .rename(&file.path, &destination)
            .map_err(|source| EngineError::Operation {
                path: file.path.clone(),
                source,
            })?;

        Ok(MoveOutcome::Done(transfer(destination)))
    }

    /// Deletes the given files after a single up-front confirmation.
    ///
    /// A declined confirmation returns [`DeleteOutcome::Declined`] without
    /// touching the filesystem. On confirmation each file is removed
    /// independently and failures are collected into the report.
    pub fn delete_files(&self, files: &[TargetFile]) -> EngineResult<DeleteOutcome> {
        if files.is_empty() {
            return Err(PreconditionError::EmptySelection.into());
        }

        let noun = if files.len() == 1 { "file" } else { "files" };
        let message = format!("Delete {} {}? This cannot be undone.", files.len(), noun);
        if !self.prompter.confirm(&message) {
            return Ok(DeleteOutcome::Declined);
        }

        let mut report = DeleteReport::default();
        for file in files {
            match self.fs.remove_file(&file.path) {
                Ok(()) => report.removed.push(file.path.clone()),
                Err(e) => report.failed.push((file.path.clone(), e.to_string())),
            }
        }
        Ok(DeleteOutcome::Completed(report))
    }

    /// Buckets files into per-key subdirectories of `base_dir`.
    ///
    /// Files are grouped by the key's output; each distinct key gets a
    /// subdirectory named after it, created (or replaced, per `dir_policy`)
    /// before the group's files are moved or copied into it. A failure to
    /// create one bucket fails only that group's files; other groups
    /// proceed.
    pub fn organize_by_key(
        &self,
        files: &[TargetFile],
        key: &GroupKey,
        base_dir: &Path,
        dir_policy: DirPolicy,
        copy: bool,
        auto_rename: bool,
    ) -> EngineResult<OrganizeReport> {
        if files.is_empty() {
            return Err(PreconditionError::EmptySelection.into());
        }
        if !self.fs.exists(base_dir) {
            return Err(PreconditionError::DestinationMissing(base_dir.to_path_buf()).into());
        }

        // BTreeMap keeps group processing order deterministic.
        let mut groups: BTreeMap<String, Vec<&TargetFile>> = BTreeMap::new();
        let mut outcomes: BTreeMap<PathBuf, FileOutcome> = BTreeMap::new();
        for file in files {
            match key.key_for(file) {
                Some(bucket) => groups.entry(bucket).or_default().push(file),
                None => {
                    outcomes.insert(file.path.clone(), FileOutcome::Skipped);
                }
            }
        }

        for (bucket, members) in &groups {
            let bucket_dir = base_dir.join(bucket);
            if let Err(e) = self.prepare_bucket(&bucket_dir, dir_policy) {
                // The whole group fails; other groups are unaffected.
                for file in members {
                    outcomes.insert(
                        file.path.clone(),
                        FileOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
                continue;
            }

            for file in members {
                let outcome = match self.move_or_copy(file, &bucket_dir, copy, auto_rename) {
                    Ok(MoveOutcome::Done(t)) => {
                        if copy {
                            FileOutcome::Copied {
                                new_path: t.new_path,
                            }
                        } else {
                            FileOutcome::Moved {
                                new_path: t.new_path,
                            }
                        }
                    }
                    Ok(MoveOutcome::Cancelled) => FileOutcome::Cancelled,
                    Err(e) => FileOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
                outcomes.insert(file.path.clone(), outcome);
            }
        }

        // Report in input order.
        let report = OrganizeReport {
            outcomes: files
                .iter()
                .filter_map(|f| {
                    outcomes
                        .remove(&f.path)
                        .map(|outcome| (f.path.clone(), outcome))
                })
                .collect(),
        };
        Ok(report)
    }

    fn prepare_bucket(&self, bucket_dir: &Path, policy: DirPolicy) -> EngineResult<()> {
        if self.fs.exists(bucket_dir) {
            match policy {
                DirPolicy::Reuse => return Ok(()),
                DirPolicy::Replace => {
                    self.fs
                        .remove_dir_all(bucket_dir)
                        .map_err(|source| EngineError::DirectoryCreation {
                            path: bucket_dir.to_path_buf(),
                            source,
                        })?;
                }
            }
        }
        self.fs
            .create_dir(bucket_dir)
            .map_err(|source| EngineError::DirectoryCreation {
                path: bucket_dir.to_path_buf(),
                source,
            })
    }
}

fn transfer(destination: PathBuf) -> Transfer {
    let new_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Transfer {
        new_path: destination,
        new_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_access::RealFileSystem;
    use crate::prompt::ScriptedPrompter;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn engine_with<'a>(prompter: &'a ScriptedPrompter) -> Engine<'a> {
        Engine::new(&RealFileSystem, prompter)
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_move_into_existing_directory() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let dest = temp.path().join("sorted");
        fs::create_dir(&dest).unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "x").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);

        let outcome = engine.move_or_copy(&file, &dest, false, true).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Done(Transfer {
                new_path: dest.join("a.txt"),
                new_name: "a.txt".to_string(),
            })
        );
        assert!(!src.exists());
        assert!(dest.join("a.txt").exists());
    }

    #[test]
    fn test_copy_preserves_source() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let dest = temp.path().join("sorted");
        fs::create_dir(&dest).unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "x").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);

        let outcome = engine.move_or_copy(&file, &dest, true, true).unwrap();
        assert!(matches!(outcome, MoveOutcome::Done(_)));
        assert!(src.exists());
        assert!(dest.join("a.txt").exists());
    }

    #[test]
    fn test_move_to_missing_directory_is_a_precondition_error() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("a.txt");
        fs::write(&src, "x").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);

        let result = engine.move_or_copy(&file, &temp.path().join("missing"), false, true);
        assert!(matches!(
            result,
            Err(EngineError::Precondition(
                PreconditionError::DestinationMissing(_)
            ))
        ));
        assert!(src.exists());
    }

    #[test]
    fn test_move_collision_auto_renames() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let dest = temp.path().join("sorted");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), "old").unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "new").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);

        let outcome = engine.move_or_copy(&file, &dest, false, true).unwrap();
        match outcome {
            MoveOutcome::Done(t) => assert_eq!(t.new_name, "a (1).txt"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "old");
    }

    #[test]
    fn test_move_collision_declined_prompt_leaves_filesystem_untouched() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let dest = temp.path().join("sorted");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), "old").unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "new").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);

        let outcome = engine.move_or_copy(&file, &dest, false, false).unwrap();
        assert_eq!(outcome, MoveOutcome::Cancelled);
        assert!(src.exists());
        assert!(!dest.join("a (1).txt").exists());
    }

    #[test]
    fn test_rename_in_place_with_template() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("photo.png");
        fs::write(&src, "x").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);
        let prefs = Preferences::default();

        let outcome = engine
            .rename_in_place(&file, "$[today]_$[type]", &prefs, true, fixed_now())
            .unwrap();
        match outcome {
            MoveOutcome::Done(t) => {
                assert_eq!(t.new_name, "2024-01-15_image.png");
                assert!(t.new_path.exists());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!src.exists());
    }

    #[test]
    fn test_rename_rejects_forbidden_characters_after_expansion() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("photo.png");
        fs::write(&src, "x").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let file = TargetFile::from_path(&src);
        let prefs = Preferences::default();

        let result = engine.rename_in_place(&file, "a:b", &prefs, true, fixed_now());
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert!(src.exists());
    }

    #[test]
    fn test_delete_declined_touches_nothing() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("a.txt");
        fs::write(&src, "x").unwrap();

        let prompter = ScriptedPrompter::new().push_confirm(false);
        let engine = engine_with(&prompter);
        let files = vec![TargetFile::from_path(&src)];

        let outcome = engine.delete_files(&files).unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert!(src.exists());
    }

    #[test]
    fn test_delete_collects_failures_independently() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let present = temp.path().join("a.txt");
        fs::write(&present, "x").unwrap();
        let missing = temp.path().join("gone.txt");

        let prompter = ScriptedPrompter::new().push_confirm(true);
        let engine = engine_with(&prompter);
        let files = vec![
            TargetFile::from_path(&present),
            TargetFile::from_path(&missing),
        ];

        match engine.delete_files(&files).unwrap() {
            DeleteOutcome::Completed(report) => {
                assert_eq!(report.removed, vec![present.clone()]);
                assert_eq!(report.failed.len(), 1);
                assert_eq!(report.failed[0].0, missing);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!present.exists());
    }

    #[test]
    fn test_delete_empty_selection_is_a_precondition_error() {
        let prompter = ScriptedPrompter::new().push_confirm(true);
        let engine = engine_with(&prompter);
        let result = engine.delete_files(&[]);
        assert!(matches!(
            result,
            Err(EngineError::Precondition(PreconditionError::EmptySelection))
        ));
    }

    #[test]
    fn test_organize_by_extension_creates_one_bucket_per_key() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        for name in ["a.png", "b.txt", "c.png"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }
        let files: Vec<_> = ["a.png", "b.txt", "c.png"]
            .iter()
            .map(|n| TargetFile::from_path(&temp.path().join(n)))
            .collect();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let report = engine
            .organize_by_key(
                &files,
                &GroupKey::Extension,
                temp.path(),
                DirPolicy::Reuse,
                false,
                true,
            )
            .unwrap();

        assert_eq!(report.succeeded(), 3);
        assert!(temp.path().join("png").join("a.png").exists());
        assert!(temp.path().join("png").join("c.png").exists());
        assert!(temp.path().join("txt").join("b.txt").exists());

        let buckets: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .collect();
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_organize_replace_policy_recreates_bucket() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let bucket = temp.path().join("png");
        fs::create_dir(&bucket).unwrap();
        fs::write(bucket.join("stale.png"), "old").unwrap();
        fs::write(temp.path().join("a.png"), "x").unwrap();

        let files = vec![TargetFile::from_path(&temp.path().join("a.png"))];
        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        engine
            .organize_by_key(
                &files,
                &GroupKey::Extension,
                temp.path(),
                DirPolicy::Replace,
                false,
                true,
            )
            .unwrap();

        assert!(!bucket.join("stale.png").exists());
        assert!(bucket.join("a.png").exists());
    }

    #[test]
    fn test_organize_unmatched_files_are_skipped() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp.path().join("invoice-1.pdf"), "x").unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();
        let files = vec![
            TargetFile::from_path(&temp.path().join("invoice-1.pdf")),
            TargetFile::from_path(&temp.path().join("notes.txt")),
        ];

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let report = engine
            .organize_by_key(
                &files,
                &GroupKey::Matched(crate::rule::MatchRule::Contains("invoice".into())),
                temp.path(),
                DirPolicy::Reuse,
                false,
                true,
            )
            .unwrap();

        assert_eq!(report.succeeded(), 1);
        assert!(report
            .outcomes
            .iter()
            .any(|(p, o)| p.ends_with("notes.txt") && *o == FileOutcome::Skipped));
        assert!(temp.path().join("invoice").join("invoice-1.pdf").exists());
        assert!(temp.path().join("notes.txt").exists());
    }

    #[test]
    fn test_organize_empty_selection_is_a_precondition_error() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let result = engine.organize_by_key(
            &[],
            &GroupKey::Extension,
            temp.path(),
            DirPolicy::Reuse,
            false,
            true,
        );
        assert!(matches!(
            result,
            Err(EngineError::Precondition(PreconditionError::EmptySelection))
        ));
    }

    #[test]
    fn test_scan_directory_applies_filters() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp.path().join("a.png"), "x").unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();

        let prompter = ScriptedPrompter::decline_all();
        let engine = engine_with(&prompter);
        let filters = crate::config::FilterRules::default().compile().unwrap();

        let files = engine.scan_directory(temp.path(), false, &filters).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.png");
    }
}
