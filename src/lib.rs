//! sortdesk - a rule-driven file organizer
//!
//! This library classifies files by extension, resolves name collisions
//! safely, expands keyword templates for renaming, and moves, copies,
//! deletes and buckets files into directories. The engine is pure logic over
//! three collaborators: the filesystem, a user prompter, and the preference
//! configuration.

pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod fs_access;
pub mod organizer;
pub mod output;
pub mod prompt;
pub mod resolver;
pub mod rule;
pub mod settings;
pub mod shortcuts;
pub mod state;
pub mod target_file;
pub mod template;

pub use config::{AppConfig, CompiledFilters, FilterRules, Preferences};
pub use error::{ConfigError, EngineError, EngineResult, PreconditionError};
pub use file_category::Category;
pub use fs_access::{FileSystem, RealFileSystem};
pub use organizer::{
    DeleteOutcome, DeleteReport, DirPolicy, Engine, FileOutcome, MoveOutcome, OrganizeReport,
    Transfer,
};
pub use prompt::{AcceptAll, ConsolePrompter, Prompter, ScriptedPrompter};
pub use resolver::{resolve_destination, validate_file_name, Resolved};
pub use rule::{GroupKey, MatchRule};
pub use settings::{JsonFileStore, SettingsStore};
pub use shortcuts::{Chord, ShortcutMap};
pub use state::{reduce, Action, AppState};
pub use target_file::TargetFile;
pub use template::expand_template;
