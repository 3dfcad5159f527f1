//! Strongly-typed wrappers for battle concepts
//!
//! Newtypes over bare strings keep distinct concepts from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fighter display name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FighterName(String);

impl FighterName {
    pub fn new(s: impl Into<String>) -> Self {
        FighterName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FighterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FighterName {
    fn from(s: String) -> Self {
        FighterName(s)
    }
}

impl From<&str> for FighterName {
    fn from(s: &str) -> Self {
        FighterName(s.to_string())
    }
}
