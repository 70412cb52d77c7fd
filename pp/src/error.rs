//! Pattern error types

use serde::Serialize;
use thiserror::Error;

use crate::pattern::Pattern;

/// Expected shape of a pattern's input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// One item per labeled field, in order
    Exactly(&'static [&'static str]),
    /// Unlabeled list capped at this many items
    AtMost(usize),
}

impl Arity {
    /// Check whether `count` items satisfy this arity
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Exactly(fields) => count == fields.len(),
            Self::AtMost(max) => count <= *max,
        }
    }

    fn separator(&self) -> &'static str {
        match self {
            Self::Exactly(_) => " but",
            Self::AtMost(_) => ";",
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(fields) => write!(f, "exactly {} items ({})", fields.len(), fields.join(", ")),
            Self::AtMost(max) => write!(f, "at most {} items", max),
        }
    }
}

/// Errors that can occur while resolving or rendering a pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Unknown pattern type '{name}'. Supported types: {}", .supported.join(", "))]
    UnknownPattern {
        name: String,
        supported: Vec<&'static str>,
    },

    #[error("{pattern}: expects {expected}{} got {actual}", .expected.separator())]
    ArityMismatch {
        pattern: Pattern,
        expected: Arity,
        actual: usize,
    },
}

impl PatternError {
    /// Check if this error came from an unresolvable pattern name
    pub fn is_unknown_pattern(&self) -> bool {
        matches!(self, PatternError::UnknownPattern { .. })
    }

    /// Check if this error came from a wrong item count
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, PatternError::ArityMismatch { .. })
    }
}

/// Result type alias for pattern operations
pub type Result<T> = std::result::Result<T, PatternError>;
