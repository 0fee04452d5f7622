//! CLI output formatting.
//!
//! All user-facing printing funnels through here so styling stays
//! consistent. The engine itself never prints.

use crate::organizer::{DeleteReport, FileOutcome, OrganizeReport};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Progress bar for batch operations.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// One line per file outcome of a bucketing run.
    pub fn outcome_lines(report: &OrganizeReport) {
        for (path, outcome) in &report.outcomes {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            match outcome {
                FileOutcome::Moved { new_path } => {
                    println!(" {} {} → {}", "✓".green(), name, new_path.display());
                }
                FileOutcome::Copied { new_path } => {
                    println!(" {} {} ⇒ {} (copy)", "✓".green(), name, new_path.display());
                }
                FileOutcome::Cancelled => {
                    println!(" {} {} (cancelled)", "-".yellow(), name);
                }
                FileOutcome::Skipped => {
                    println!(" {} {} (not matched)", "-".dimmed(), name);
                }
                FileOutcome::Failed { reason } => {
                    eprintln!(" {} {}: {}", "✗".red(), name, reason);
                }
            }
        }
    }

    /// Summary table of a bucketing run, grouped by destination directory.
    pub fn organize_summary(report: &OrganizeReport) {
        let mut per_bucket: BTreeMap<String, usize> = BTreeMap::new();
        for (_, outcome) in &report.outcomes {
            if let Some(new_path) = outcome.new_path() {
                let bucket = new_path
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                *per_bucket.entry(bucket).or_insert(0) += 1;
            }
        }

        Self::header("SUMMARY");
        let width = per_bucket
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(9);

        println!("{:<width$} | {}", "Directory".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));
        for (bucket, count) in &per_bucket {
            println!(
                "{:<width$} | {}",
                bucket,
                count.to_string().green(),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));

        let failed = report.failed();
        println!(
            "{:<width$} | {} moved/copied, {} failed",
            "Total".bold(),
            report.succeeded().to_string().green().bold(),
            if failed > 0 {
                failed.to_string().red().to_string()
            } else {
                failed.to_string()
            },
            width = width
        );
    }

    /// Reports a confirmed delete run.
    pub fn delete_summary(report: &DeleteReport) {
        Self::success(&format!("Deleted {} file(s)", report.removed.len()));
        for (path, reason) in &report.failed {
            Self::error(&format!("could not delete {}: {}", path.display(), reason));
        }
    }
}
