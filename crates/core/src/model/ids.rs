use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest accepted module identifier, in characters.
pub const MAX_MODULE_ID_LEN: usize = 64;

/// Identifier of a learning module (e.g. `smt`, `priceAction`).
///
/// Any value passing validation is accepted; the set of modules is open so new
/// modules can be tracked without store changes. Surrounding whitespace is
/// trimmed, case is preserved.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Creates a validated `ModuleId`.
    ///
    /// # Errors
    ///
    /// Returns `ModuleIdError::Empty` if the value is blank after trimming,
    /// `ModuleIdError::TooLong` past `MAX_MODULE_ID_LEN` characters, and
    /// `ModuleIdError::InvalidChar` for anything outside `[A-Za-z0-9_.-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, ModuleIdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModuleIdError::Empty);
        }

        let len = trimmed.chars().count();
        if len > MAX_MODULE_ID_LEN {
            return Err(ModuleIdError::TooLong {
                len,
                max: MAX_MODULE_ID_LEN,
            });
        }

        if let Some(ch) = trimmed.chars().find(|ch| !is_id_char(*ch)) {
            return Err(ModuleIdError::InvalidChar(ch));
        }

        if trimmed.len() == raw.len() {
            return Ok(Self(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleIdError {
    #[error("module id cannot be empty")]
    Empty,
    #[error("module id is too long ({len} > {max} characters)")]
    TooLong { len: usize, max: usize },
    #[error("module id contains invalid character {0:?}")]
    InvalidChar(char),
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModuleId {
    type Err = ModuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ModuleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
