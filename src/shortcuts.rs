//! Keyboard-shortcut bindings to destination directories.
//!
//! Chords are canonicalized (sorted modifiers, lowercased key) so that
//! "Shift+Ctrl+D" and "ctrl+shift+d" are the same map key and lookup is a
//! single hash probe.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Modifier keys, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "alt" | "option" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            "meta" | "cmd" | "super" => Some(Modifier::Meta),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
            Modifier::Meta => "meta",
        }
    }
}

/// A canonicalized modifier+key combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    modifiers: Vec<Modifier>,
    key: String,
}

impl FromStr for Chord {
    type Err = ConfigError;

    /// Parses a `+`-separated chord such as `"ctrl+shift+d"`.
    ///
    /// Exactly one non-modifier token is required; modifier order and case
    /// do not matter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Vec::new();
        let mut key = None;

        for token in s.split('+') {
            let token = token.trim().to_lowercase();
            if token.is_empty() {
                return Err(ConfigError::InvalidChord {
                    chord: s.to_string(),
                    reason: "empty token".to_string(),
                });
            }
            if let Some(modifier) = Modifier::parse(&token) {
                if !modifiers.contains(&modifier) {
                    modifiers.push(modifier);
                }
            } else if key.is_none() {
                key = Some(token);
            } else {
                return Err(ConfigError::InvalidChord {
                    chord: s.to_string(),
                    reason: "more than one non-modifier key".to_string(),
                });
            }
        }

        let key = key.ok_or_else(|| ConfigError::InvalidChord {
            chord: s.to_string(),
            reason: "missing a non-modifier key".to_string(),
        })?;

        modifiers.sort();
        Ok(Chord { modifiers, key })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.name())?;
        }
        f.write_str(&self.key)
    }
}

/// Chord to destination-directory bindings.
#[derive(Debug, Default)]
pub struct ShortcutMap {
    bindings: HashMap<Chord, PathBuf>,
}

impl ShortcutMap {
    /// Builds the map from the raw `[shortcuts]` config table.
    pub fn from_config(raw: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut bindings = HashMap::new();
        for (chord, directory) in raw {
            bindings.insert(chord.parse::<Chord>()?, PathBuf::from(directory));
        }
        Ok(Self { bindings })
    }

    /// Looks up the directory bound to a chord, accepting any token order.
    pub fn directory_for(&self, chord: &str) -> Option<&PathBuf> {
        let chord = chord.parse::<Chord>().ok()?;
        self.bindings.get(&chord)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
