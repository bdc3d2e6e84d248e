//! A single commit position on a single branch.
//!
//! A `Clock` pairs a branch name with a sequence number. The first commit on a
//! branch has sequence 0 and each later commit on that branch takes the
//! previous head's sequence plus one. Sequence numbers are never reused.
//!
//! The text form is the commit ID, `"<branch>/<sequence>"`:
//!
//! ```
//! use forkclock::Clock;
//!
//! let clock = Clock::parse_commit_id("release/15").unwrap();
//! assert_eq!(clock.branch(), "release");
//! assert_eq!(clock.sequence(), 15);
//! assert_eq!(clock.to_commit_id(), "release/15");
//! ```

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::FormatError;

/// Separator between the branch and sequence in a commit ID.
pub const COMMIT_ID_SEPARATOR: char = '/';

/// One commit on one branch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Clock {
    branch: SmolStr,
    sequence: u64,
}

impl Clock {
    /// The first commit on `branch`.
    pub fn new(branch: impl Into<SmolStr>) -> Clock {
        return Clock::at(branch, 0);
    }

    /// A clock at an explicit sequence number.
    pub fn at(branch: impl Into<SmolStr>, sequence: u64) -> Clock {
        return Clock {
            branch: branch.into(),
            sequence,
        };
    }

    #[inline]
    pub fn branch(&self) -> &str {
        return &self.branch;
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        return self.sequence;
    }

    /// The next commit on the same branch. Saturates at `u64::MAX`.
    pub fn next(&self) -> Clock {
        return Clock {
            branch: self.branch.clone(),
            sequence: self.sequence.saturating_add(1),
        };
    }

    /// The previous commit on the same branch, if this is not the first one.
    pub fn prev(&self) -> Option<Clock> {
        let sequence = self.sequence.checked_sub(1)?;
        return Some(Clock {
            branch: self.branch.clone(),
            sequence,
        });
    }

    /// Format as `"<branch>/<sequence>"`.
    pub fn to_commit_id(&self) -> String {
        return self.to_string();
    }

    /// Parse a commit ID of the form `"<branch>/<sequence>"`.
    ///
    /// Fails unless the input holds exactly one `/` and the suffix is an
    /// unsigned decimal integer.
    pub fn parse_commit_id(s: &str) -> Result<Clock, FormatError> {
        let mut parts = s.split(COMMIT_ID_SEPARATOR);
        let (branch, suffix) = match (parts.next(), parts.next(), parts.next()) {
            (Some(branch), Some(suffix), None) => (branch, suffix),
            _ => {
                return Err(FormatError::Separator {
                    input: s.to_string(),
                    count: s.matches(COMMIT_ID_SEPARATOR).count(),
                });
            }
        };

        // u64::from_str tolerates a leading '+', which would not round-trip.
        if suffix.starts_with('+') {
            return Err(FormatError::Signed {
                input: s.to_string(),
            });
        }
        let sequence = suffix.parse::<u64>().map_err(|source| FormatError::Sequence {
            input: s.to_string(),
            source,
        })?;

        return Ok(Clock::at(branch, sequence));
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}{}{}", self.branch, COMMIT_ID_SEPARATOR, self.sequence);
    }
}

impl FromStr for Clock {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return Clock::parse_commit_id(s);
    }
}
