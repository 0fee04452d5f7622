//! User-prompt collaborator.
//!
//! The engine never talks to a terminal directly; it asks a [`Prompter`] for
//! confirmations and replacement names. The CLI plugs in [`ConsolePrompter`];
//! tests plug in [`ScriptedPrompter`] with canned answers.

use console::Term;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Interactive questions the engine may need answered mid-operation.
pub trait Prompter {
    /// Asks a yes/no question. `true` means the user accepted.
    fn confirm(&self, message: &str) -> bool;

    /// Asks for a text value, offering `default` as the suggestion.
    ///
    /// Returns `None` when the user declines (empty input), which callers
    /// treat as cancellation of that item.
    fn prompt_text(&self, message: &str, default: &str) -> Option<String>;
}

/// Terminal-backed prompter used by the CLI binary.
pub struct ConsolePrompter {
    term: Term,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.term.write_str(&format!("{} [y/N] ", message)).is_err() {
            return false;
        }
        match self.term.read_line() {
            Ok(answer) => matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"),
            Err(_) => false,
        }
    }

    fn prompt_text(&self, message: &str, default: &str) -> Option<String> {
        if self
            .term
            .write_str(&format!("{} [{}] (empty cancels): ", message, default))
            .is_err()
        {
            return None;
        }
        match self.term.read_line() {
            Ok(answer) => {
                let answer = answer.trim();
                if answer.is_empty() {
                    None
                } else {
                    Some(answer.to_string())
                }
            }
            Err(_) => None,
        }
    }
}

/// A prompter that replays scripted answers, for tests and non-interactive
/// runs.
///
/// Confirmations pop from one queue, text answers from another; an exhausted
/// queue declines.
pub struct ScriptedPrompter {
    confirms: RefCell<VecDeque<bool>>,
    texts: RefCell<VecDeque<Option<String>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self {
            confirms: RefCell::new(VecDeque::new()),
            texts: RefCell::new(VecDeque::new()),
        }
    }

    /// A prompter that accepts every confirmation and every suggested name.
    pub fn accept_all() -> AcceptAll {
        AcceptAll
    }

    /// A prompter that declines everything.
    pub fn decline_all() -> Self {
        Self::new()
    }

    pub fn push_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn push_text(self, answer: Option<&str>) -> Self {
        self.texts
            .borrow_mut()
            .push_back(answer.map(|s| s.to_string()));
        self
    }
}

impl Default for ScriptedPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str) -> bool {
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    fn prompt_text(&self, _message: &str, _default: &str) -> Option<String> {
        self.texts.borrow_mut().pop_front().unwrap_or(None)
    }
}

/// Accepts every prompt with its suggested default. Used for `--yes` runs.
pub struct AcceptAll;

impl Prompter for AcceptAll {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn prompt_text(&self, _message: &str, default: &str) -> Option<String> {
        Some(default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_replays_answers_in_order() {
        let prompter = ScriptedPrompter::new()
            .push_confirm(true)
            .push_confirm(false)
            .push_text(Some("renamed"))
            .push_text(None);

        assert!(prompter.confirm("first?"));
        assert!(!prompter.confirm("second?"));
        assert_eq!(prompter.prompt_text("name?", "x"), Some("renamed".into()));
        assert_eq!(prompter.prompt_text("name?", "x"), None);
    }

    #[test]
    fn test_exhausted_script_declines() {
        let prompter = ScriptedPrompter::decline_all();
        assert!(!prompter.confirm("anything?"));
        assert_eq!(prompter.prompt_text("name?", "x"), None);
    }

    #[test]
    fn test_accept_all_takes_default() {
        let prompter = ScriptedPrompter::accept_all();
        assert!(prompter.confirm("ok?"));
        assert_eq!(prompter.prompt_text("name?", "a (1)"), Some("a (1)".into()));
    }
}
