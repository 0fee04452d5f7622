//! Organize rules: predicates over target files and grouping keys.
//!
//! A [`MatchRule`] decides whether a file is covered by a user action; a
//! [`GroupKey`] turns a file into the bucket name used by
//! `organize_by_key`.

use crate::file_category::Category;
use crate::target_file::TargetFile;
use regex::Regex;

/// Bucket name used for files without an extension when grouping by
/// extension.
const NO_EXTENSION_BUCKET: &str = "other";

/// A predicate over target files.
#[derive(Debug, Clone)]
pub enum MatchRule {
    /// Extension equals the given value, case-insensitive.
    Extension(String),
    /// Category equals the given value.
    ByCategory(Category),
    /// File name contains the given text.
    Contains(String),
    /// File name starts with the given text.
    Prefix(String),
    /// File name ends with the given text.
    Suffix(String),
    /// File name matches the given regular expression.
    Pattern(Regex),
}

impl MatchRule {
    /// Whether the rule covers this file.
    pub fn matches(&self, file: &TargetFile) -> bool {
        match self {
            MatchRule::Extension(ext) => file.ext.eq_ignore_ascii_case(ext),
            MatchRule::ByCategory(category) => file.category == *category,
            MatchRule::Contains(text) => file.name.contains(text.as_str()),
            MatchRule::Prefix(text) => file.name.starts_with(text.as_str()),
            MatchRule::Suffix(text) => file.name.ends_with(text.as_str()),
            MatchRule::Pattern(regex) => regex.is_match(&file.name),
        }
    }

    /// The text this rule matched in the file name, if any.
    ///
    /// For the literal rules this is the rule's own text; for patterns it is
    /// the first match in the name.
    pub fn matched_value(&self, file: &TargetFile) -> Option<String> {
        if !self.matches(file) {
            return None;
        }
        match self {
            MatchRule::Extension(ext) => Some(ext.to_lowercase()),
            MatchRule::ByCategory(category) => Some(category.name().to_string()),
            MatchRule::Contains(text) | MatchRule::Prefix(text) | MatchRule::Suffix(text) => {
                Some(text.clone())
            }
            MatchRule::Pattern(regex) => regex
                .find(&file.name)
                .map(|found| found.as_str().to_string()),
        }
    }
}

/// How `organize_by_key` derives the bucket-directory name for a file.
#[derive(Debug, Clone)]
pub enum GroupKey {
    /// Bucket per lowercased extension; extensionless files fall into
    /// `"other"`.
    Extension,
    /// Bucket per category name.
    Category,
    /// Bucket per matched-text value; files the rule does not match are
    /// skipped.
    Matched(MatchRule),
}

impl GroupKey {
    /// The bucket name for this file, or `None` when the file is not
    /// covered.
    pub fn key_for(&self, file: &TargetFile) -> Option<String> {
        match self {
            GroupKey::Extension => {
                if file.ext.is_empty() {
                    Some(NO_EXTENSION_BUCKET.to_string())
                } else {
                    Some(file.ext.to_lowercase())
                }
            }
            GroupKey::Category => Some(file.category.name().to_string()),
            GroupKey::Matched(rule) => rule.matched_value(file),
        }
    }
}
