//! Command-line interface.
//!
//! The CLI is the "UI" side of the engine: it scans directories into the
//! working list, invokes engine operations, keeps the list in sync through
//! reducer actions, and renders outcomes. All interactive questions go
//! through the [`Prompter`] so `--yes` can make runs non-interactive.

use crate::config::AppConfig;
use crate::error::PreconditionError;
use crate::fs_access::RealFileSystem;
use crate::organizer::{DeleteOutcome, DirPolicy, Engine, MoveOutcome};
use crate::output::OutputFormatter;
use crate::prompt::{AcceptAll, ConsolePrompter, Prompter};
use crate::rule::{GroupKey, MatchRule};
use crate::shortcuts::ShortcutMap;
use crate::state::{reduce, Action, AppState};
use crate::target_file::TargetFile;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use regex::Regex;
use std::path::{Path, PathBuf};

/// sortdesk - organize, rename and clean up local files by rule.
#[derive(Parser, Debug)]
#[command(name = "sortdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer yes to every prompt (collisions take the suggested name).
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the files a scan of a directory would pick up.
    List {
        dir: PathBuf,

        /// Recurse into subdirectories.
        #[arg(short, long)]
        recursive: bool,
    },

    /// Bucket a directory's files into per-key subdirectories.
    Organize {
        dir: PathBuf,

        /// Grouping key for the bucket directories.
        #[arg(long, value_enum, default_value = "extension")]
        by: GroupBy,

        /// Regex for `--by matched`; the matched text names the bucket.
        #[arg(long)]
        matching: Option<String>,

        /// Base directory for the buckets (defaults to the scanned dir).
        #[arg(long)]
        into: Option<PathBuf>,

        /// Copy files instead of moving them.
        #[arg(long)]
        copy: bool,

        /// Replace existing bucket directories instead of reusing them.
        #[arg(long)]
        replace_dirs: bool,

        /// Recurse into subdirectories when scanning.
        #[arg(short, long)]
        recursive: bool,

        /// Show the plan without touching the filesystem.
        #[arg(long)]
        dry_run: bool,
    },

    /// Move (or copy) files into a directory.
    Move {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Destination directory.
        #[arg(long, conflicts_with = "key")]
        to: Option<PathBuf>,

        /// Shortcut chord bound to a directory in the config, e.g.
        /// "ctrl+shift+d".
        #[arg(long)]
        key: Option<String>,

        /// Copy files instead of moving them.
        #[arg(long)]
        copy: bool,
    },

    /// Rename files in place with a keyword template.
    ///
    /// The template may contain $[today], $[ext] and $[type]; it becomes
    /// the new name body and the extension is kept.
    Rename {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(short, long)]
        template: String,
    },

    /// Delete files after confirmation.
    Delete {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GroupBy {
    /// One bucket per file extension.
    Extension,
    /// One bucket per category (image, video, audio, ...).
    Category,
    /// One bucket per matched text (requires --matching).
    Matched,
}

/// Parses arguments and runs the selected command.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let console;
    let accept_all;
    let prompter: &dyn Prompter = if cli.yes {
        accept_all = AcceptAll;
        &accept_all
    } else {
        console = ConsolePrompter::new();
        &console
    };

    let fs = RealFileSystem;
    let engine = Engine::new(&fs, prompter);

    match cli.command {
        Commands::List { dir, recursive } => list(&engine, &config, &dir, recursive),
        Commands::Organize {
            dir,
            by,
            matching,
            into,
            copy,
            replace_dirs,
            recursive,
            dry_run,
        } => {
            let key = group_key(by, matching.as_deref())?;
            let base = into.unwrap_or_else(|| dir.clone());
            organize(
                &engine,
                &config,
                &dir,
                &base,
                &key,
                copy || config.preferences.copy_original,
                replace_dirs,
                recursive,
                dry_run,
            )
        }
        Commands::Move {
            files,
            to,
            key,
            copy,
        } => {
            let dest = destination_dir(&config, to, key)?;
            move_files(
                &engine,
                &config,
                &files,
                &dest,
                copy || config.preferences.copy_original,
            )
        }
        Commands::Rename { files, template } => rename(&engine, &config, &files, &template),
        Commands::Delete { files } => delete(&engine, &files),
    }
}

fn group_key(by: GroupBy, matching: Option<&str>) -> Result<GroupKey, String> {
    match by {
        GroupBy::Extension => Ok(GroupKey::Extension),
        GroupBy::Category => Ok(GroupKey::Category),
        GroupBy::Matched => {
            let pattern = matching.ok_or("--by matched requires --matching <regex>")?;
            let regex =
                Regex::new(pattern).map_err(|e| format!("invalid --matching pattern: {}", e))?;
            Ok(GroupKey::Matched(MatchRule::Pattern(regex)))
        }
    }
}

fn destination_dir(
    config: &AppConfig,
    to: Option<PathBuf>,
    key: Option<String>,
) -> Result<PathBuf, String> {
    if let Some(dir) = to {
        return Ok(dir);
    }
    if let Some(chord) = key {
        let shortcuts = ShortcutMap::from_config(&config.shortcuts).map_err(|e| e.to_string())?;
        return shortcuts
            .directory_for(&chord)
            .map(|dir| expand_home(dir))
            .ok_or_else(|| format!("no directory bound to shortcut '{}'", chord));
    }
    Err(PreconditionError::NoDestination.to_string())
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        if let Ok(rest) = path.strip_prefix("~") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn list(
    engine: &Engine,
    config: &AppConfig,
    dir: &Path,
    recursive: bool,
) -> Result<(), String> {
    let filters = config.filters.compile().map_err(|e| e.to_string())?;
    let files = engine
        .scan_directory(dir, recursive, &filters)
        .map_err(|e| e.to_string())?;

    if files.is_empty() {
        OutputFormatter::info("No files found.");
        return Ok(());
    }
    for file in &files {
        println!(
            " {:<8} {:<6} {}",
            file.category.name(),
            file.ext.to_lowercase(),
            file.path.display()
        );
    }
    OutputFormatter::success(&format!("{} file(s)", files.len()));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn organize(
    engine: &Engine,
    config: &AppConfig,
    dir: &Path,
    base: &Path,
    key: &GroupKey,
    copy: bool,
    replace_dirs: bool,
    recursive: bool,
    dry_run: bool,
) -> Result<(), String> {
    let filters = config.filters.compile().map_err(|e| e.to_string())?;
    let files = engine
        .scan_directory(dir, recursive, &filters)
        .map_err(|e| e.to_string())?;
    if files.is_empty() {
        return Err(PreconditionError::EmptySelection.to_string());
    }

    if dry_run {
        OutputFormatter::dry_run_notice(&format!("Plan for {}:", dir.display()));
        let mut planned = 0usize;
        for file in &files {
            match key.key_for(file) {
                Some(bucket) => {
                    println!(" - {} → {}/", file.name, base.join(&bucket).display());
                    planned += 1;
                }
                None => println!(" - {} (not matched)", file.name),
            }
        }
        OutputFormatter::dry_run_notice(&format!(
            "{} of {} file(s) would be {}. No files were modified.",
            planned,
            files.len(),
            if copy { "copied" } else { "moved" }
        ));
        return Ok(());
    }

    let mut state = reduce(AppState::default(), Action::AddFiles(files.clone()));
    let policy = if replace_dirs {
        DirPolicy::Replace
    } else {
        DirPolicy::Reuse
    };

    let report = engine
        .organize_by_key(&files, key, base, policy, copy, config.preferences.auto_rename)
        .map_err(|e| e.to_string())?;

    // Moved entries leave the list; copies and failures stay.
    for (path, outcome) in &report.outcomes {
        if outcome.is_success() && !copy {
            state = reduce(state, Action::RemoveByPath(path.clone()));
        }
    }

    OutputFormatter::outcome_lines(&report);
    OutputFormatter::organize_summary(&report);
    if !state.is_empty() && !copy {
        OutputFormatter::warning(&format!(
            "{} file(s) were not moved and remain in place.",
            state.len()
        ));
    }
    Ok(())
}

fn move_files(
    engine: &Engine,
    config: &AppConfig,
    paths: &[PathBuf],
    dest: &Path,
    copy: bool,
) -> Result<(), String> {
    let files: Vec<TargetFile> = paths.iter().map(|p| TargetFile::from_path(p)).collect();
    let pb = OutputFormatter::create_progress_bar(files.len() as u64);

    let mut failures = 0usize;
    for file in &files {
        match engine.move_or_copy(file, dest, copy, config.preferences.auto_rename) {
            Ok(MoveOutcome::Done(t)) => {
                pb.println(format!("✓ {} → {}", file.name, t.new_path.display()));
            }
            Ok(MoveOutcome::Cancelled) => {
                pb.println(format!("- {} (cancelled)", file.name));
            }
            Err(e) => {
                failures += 1;
                pb.println(format!("✗ {}: {}", file.name, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failures > 0 {
        Err(format!("{} file(s) could not be processed", failures))
    } else {
        OutputFormatter::success("Done.");
        Ok(())
    }
}

fn rename(
    engine: &Engine,
    config: &AppConfig,
    paths: &[PathBuf],
    template: &str,
) -> Result<(), String> {
    let now = Local::now();
    let mut failures = 0usize;
    for path in paths {
        let file = TargetFile::from_path(path);
        match engine.rename_in_place(
            &file,
            template,
            &config.preferences,
            config.preferences.auto_rename,
            now,
        ) {
            Ok(MoveOutcome::Done(t)) => {
                OutputFormatter::success(&format!("{} → {}", file.name, t.new_name));
            }
            Ok(MoveOutcome::Cancelled) => {
                OutputFormatter::warning(&format!("{} left unchanged", file.name));
            }
            Err(e) => {
                failures += 1;
                OutputFormatter::error(&format!("{}: {}", file.name, e));
            }
        }
    }
    if failures > 0 {
        Err(format!("{} file(s) could not be renamed", failures))
    } else {
        Ok(())
    }
}

fn delete(engine: &Engine, paths: &[PathBuf]) -> Result<(), String> {
    let files: Vec<TargetFile> = paths.iter().map(|p| TargetFile::from_path(p)).collect();
    let mut state = reduce(AppState::default(), Action::AddFiles(files.clone()));

    match engine.delete_files(&files).map_err(|e| e.to_string())? {
        DeleteOutcome::Declined => {
            OutputFormatter::info("Nothing deleted.");
            Ok(())
        }
        DeleteOutcome::Completed(report) => {
            for path in &report.removed {
                state = reduce(state, Action::RemoveByPath(path.clone()));
            }
            OutputFormatter::delete_summary(&report);
            if !state.is_empty() {
                OutputFormatter::warning(&format!("{} file(s) still present.", state.len()));
            }
            if report.failed.is_empty() {
                Ok(())
            } else {
                Err(format!("{} file(s) could not be deleted", report.failed.len()))
            }
        }
    }
}
