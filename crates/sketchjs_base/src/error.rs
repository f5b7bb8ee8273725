//! Error types with source location tracking.
//!
//! The translator is best-effort: unrecognized constructs pass through
//! unchanged, so very few operations can fail at all. The ones that can
//! (bracket imbalance during atomization) report a [`SpannedError`] carrying
//! the byte offset of the offending bracket.

use crate::span::Span;
use std::fmt;

/// An error annotated with its source location.
///
/// Implements [`std::error::Error`] and [`fmt::Display`]. The display format
/// is `{message} at {start}..{end}`.
#[derive(Debug, Clone)]
pub struct SpannedError {
    /// Human-readable error description.
    pub message: String,
    /// Location in source where the error occurred.
    pub span: Span,
}

impl SpannedError {
    /// Creates an error with the given message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Creates an error pinned to a single byte offset.
    pub fn at(message: impl Into<String>, offset: usize) -> Self {
        Self::new(message, Span::at(offset))
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for SpannedError {}

/// Alias for `std::result::Result<T, SpannedError>`.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offsets() {
        let err = SpannedError::at("unbalanced brackets", 42);
        let display = format!("{}", err);
        assert!(display.contains("unbalanced brackets"));
        assert!(display.contains("42..42"));
    }
}
