//! Full provenance of a commit across branch forks.
//!
//! A `FullClock` is the path through the fork forest that produced a commit.
//! Every element except the last records the sequence its branch had when the
//! next branch in the chain was forked from it. The last element, the head, is
//! the commit's own branch and sequence.
//!
//! ```text
//! master: 0 - 1 - 2
//!                  \
//!             foo:  0 - 1 - 2 - 3        [(master, 2), (foo, 3)]
//! ```
//!
//! History is a tree of branches, each branch a list of integer-indexed
//! commits. There are no merge commits, so walking `parent` from any commit
//! follows a unique path and always ends at a root.
//!
//! Complexity:
//! - head, branch: O(1)
//! - child, parent: O(n) where n is the chain length (a fresh chain is built)
//! - is_ancestor_of: O(n)

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::clock::Clock;
use crate::error::FormatError;

/// Separator between commit IDs in the text form of a full clock.
pub const FULL_CLOCK_SEPARATOR: char = ',';

/// Fork chains are almost always short; keep them inline.
type Chain = SmallVec<[Clock; 4]>;

/// An ordered chain of clocks, `[c0, c1, ..., cn]`, with `cn` as the head.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FullClock {
    clocks: Chain,
}

impl FullClock {
    /// An empty chain. Real commits always have at least one element.
    pub fn new() -> FullClock {
        return FullClock {
            clocks: SmallVec::new(),
        };
    }

    /// The first commit of a fresh repository: `[(branch, 0)]`.
    pub fn root(branch: impl Into<SmolStr>) -> FullClock {
        let mut clocks = Chain::new();
        clocks.push(Clock::new(branch));
        return FullClock { clocks };
    }

    /// The first commit on a new branch forked from this commit.
    ///
    /// `[(master, 2)].fork("foo")` is `[(master, 2), (foo, 0)]`.
    pub fn fork(&self, branch: impl Into<SmolStr>) -> FullClock {
        let mut clocks = self.clocks.clone();
        clocks.push(Clock::new(branch));
        return FullClock { clocks };
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.clocks.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.clocks.is_empty();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clock> {
        return self.clocks.iter();
    }

    pub fn as_slice(&self) -> &[Clock] {
        return &self.clocks;
    }

    /// The last clock in the chain, or `None` for an empty chain.
    #[inline]
    pub fn head(&self) -> Option<&Clock> {
        return self.clocks.last();
    }

    /// The branch of the head, or `None` for an empty chain.
    #[inline]
    pub fn branch(&self) -> Option<&str> {
        return self.head().map(Clock::branch);
    }

    /// The commit ID of the head.
    pub fn commit_id(&self) -> Option<String> {
        return self.head().map(Clock::to_commit_id);
    }

    /// The next commit on the head's branch.
    ///
    /// `[(master, 0), (foo, 0)]` becomes `[(master, 0), (foo, 1)]`. An empty
    /// chain has no head to advance and comes back empty.
    pub fn child(&self) -> FullClock {
        let Some((head, rest)) = self.clocks.split_last() else {
            return FullClock::new();
        };
        let mut clocks: Chain = rest.iter().cloned().collect();
        clocks.push(head.next());
        return FullClock { clocks };
    }

    /// The direct predecessor of this commit, or `None` for a root.
    ///
    /// - `[(master, 2), (foo, 1)]` steps back on `foo` to `[(master, 2), (foo, 0)]`.
    /// - `[(master, 2), (foo, 0)]` steps across the fork to `[(master, 2)]`.
    /// - `[(master, 0)]` is a root.
    pub fn parent(&self) -> Option<FullClock> {
        let (head, rest) = self.clocks.split_last()?;
        let mut clocks: Chain = rest.iter().cloned().collect();
        match head.prev() {
            Some(prev) => clocks.push(prev),
            None if !rest.is_empty() => {}
            None => return None,
        }
        return Some(FullClock { clocks });
    }

    /// Successive parents of this commit, nearest first, ending at the root.
    pub fn ancestors(&self) -> Ancestors {
        return Ancestors {
            next: self.parent(),
        };
    }

    /// True if walking `parent` from `other` reaches `self`.
    ///
    /// Every commit is its own ancestor. The empty chain is an ancestor of
    /// nothing.
    pub fn is_ancestor_of(&self, other: &FullClock) -> bool {
        let Some((head, rest)) = self.clocks.split_last() else {
            return false;
        };
        if self.len() > other.len() {
            return false;
        }
        if rest != &other.clocks[..rest.len()] {
            return false;
        }
        let fork = &other.clocks[rest.len()];
        return fork.branch() == head.branch() && head.sequence() <= fork.sequence();
    }

    /// Parse the text form, commit IDs joined with `,`.
    pub fn parse(s: &str) -> Result<FullClock, FormatError> {
        if s.is_empty() {
            return Ok(FullClock::new());
        }
        let mut clocks = Chain::new();
        for part in s.split(FULL_CLOCK_SEPARATOR) {
            clocks.push(Clock::parse_commit_id(part)?);
        }
        return Ok(FullClock { clocks });
    }
}

impl fmt::Display for FullClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clock) in self.clocks.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", FULL_CLOCK_SEPARATOR)?;
            }
            write!(f, "{}", clock)?;
        }
        return Ok(());
    }
}

impl FromStr for FullClock {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return FullClock::parse(s);
    }
}

impl FromIterator<Clock> for FullClock {
    fn from_iter<I: IntoIterator<Item = Clock>>(iter: I) -> Self {
        return FullClock {
            clocks: iter.into_iter().collect(),
        };
    }
}

impl From<Vec<Clock>> for FullClock {
    fn from(clocks: Vec<Clock>) -> Self {
        return FullClock {
            clocks: SmallVec::from_vec(clocks),
        };
    }
}

impl<'a> IntoIterator for &'a FullClock {
    type Item = &'a Clock;
    type IntoIter = std::slice::Iter<'a, Clock>;

    fn into_iter(self) -> Self::IntoIter {
        return self.clocks.iter();
    }
}

/// Iterator over the ancestors of a commit. See [`FullClock::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors {
    next: Option<FullClock>,
}

impl Iterator for Ancestors {
    type Item = FullClock;

    fn next(&mut self) -> Option<FullClock> {
        let current = self.next.take()?;
        self.next = current.parent();
        return Some(current);
    }
}
