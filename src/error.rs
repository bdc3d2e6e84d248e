//! Errors produced when parsing clocks from their text form.

use std::num::ParseIntError;

/// Error returned when a commit ID or full clock string is malformed.
///
/// Malformed input is never transient, so callers should report it rather
/// than retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The commit ID did not contain exactly one `/`.
    #[error("invalid clock string {input:?}: expected one '/', found {count}")]
    Separator { input: String, count: usize },

    /// The sequence suffix carried a sign.
    #[error("invalid clock string {input:?}: sequence must be unsigned digits")]
    Signed { input: String },

    /// The sequence suffix was not a decimal integer that fits in a u64.
    #[error("invalid clock string {input:?}: {source}")]
    Sequence {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

impl FormatError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        return match self {
            FormatError::Separator { input, .. } => input,
            FormatError::Signed { input } => input,
            FormatError::Sequence { input, .. } => input,
        };
    }
}
