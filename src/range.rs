//! Per-branch interval algebra for diffing two points in history.
//!
//! Everything reachable from a `FullClock` can be written as one inclusive
//! range per branch: `[(master, 2), (foo, 3)]` reaches `master: [0, 2]` and
//! `foo: [0, 3]`. The commits new in `to` relative to `from` are then what
//! survives after adding `to`'s ranges and removing `from`'s. That result is
//! the diff frontier, the smallest set of commits an index must scan to find
//! which files changed.
//!
//! ```
//! use forkclock::{ClockRangeList, FullClock};
//!
//! let from: FullClock = "master/2,foo/1".parse().unwrap();
//! let to: FullClock = "master/2,foo/3".parse().unwrap();
//!
//! let diff = ClockRangeList::diff(&from, &to);
//! let foo = diff.get("foo").unwrap();
//! assert_eq!((foo.left(), foo.right()), (2, 3));
//! assert!(diff.get("master").is_none());
//! ```

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::clock::Clock;
use crate::full_clock::FullClock;

/// An inclusive range of sequence numbers on one branch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClockRange {
    branch: SmolStr,
    left: u64,
    right: u64,
}

impl ClockRange {
    /// A range `[left, right]` on `branch`. May be empty if `left > right`.
    pub fn new(branch: impl Into<SmolStr>, left: u64, right: u64) -> ClockRange {
        return ClockRange {
            branch: branch.into(),
            left,
            right,
        };
    }

    #[inline]
    pub fn branch(&self) -> &str {
        return &self.branch;
    }

    /// Inclusive lower bound.
    #[inline]
    pub fn left(&self) -> u64 {
        return self.left;
    }

    /// Inclusive upper bound.
    #[inline]
    pub fn right(&self) -> u64 {
        return self.right;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.left > self.right;
    }

    /// Number of commits covered. Saturates for `[0, u64::MAX]`.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        return (self.right - self.left).saturating_add(1);
    }

    /// True if `clock` is on this branch and inside the bounds.
    pub fn contains(&self, clock: &Clock) -> bool {
        return clock.branch() == self.branch()
            && self.left <= clock.sequence()
            && clock.sequence() <= self.right;
    }
}

/// A set of commits expressed as at most one `ClockRange` per branch.
///
/// Ranges keep the order in which their branches were first added. Empty
/// ranges are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockRangeList {
    ranges: Vec<ClockRange>,
}

impl ClockRangeList {
    pub fn new() -> ClockRangeList {
        return ClockRangeList { ranges: Vec::new() };
    }

    /// The commits reachable from `to` but not from `from`.
    ///
    /// Built by adding all of `to` and then subtracting `from`. A branch that
    /// only `from` mentions has nothing to subtract from and is ignored.
    pub fn diff(from: &FullClock, to: &FullClock) -> ClockRangeList {
        let mut list = ClockRangeList::new();
        list.add_full_clock(to);
        list.sub_full_clock(from);
        tracing::trace!(%from, %to, ranges = list.len(), "computed clock diff");
        return list;
    }

    /// Union `[0, c]` into the list for every clock `c` in `fc`.
    pub fn add_full_clock(&mut self, fc: &FullClock) {
        for clock in fc {
            self.add_clock(clock);
        }
    }

    /// Union `[0, clock.sequence]` into the range for `clock.branch`.
    pub fn add_clock(&mut self, clock: &Clock) {
        match self.position(clock.branch()) {
            Some(i) => {
                let range = &mut self.ranges[i];
                range.right = range.right.max(clock.sequence());
            }
            None => {
                self.ranges.push(ClockRange::new(clock.branch(), 0, clock.sequence()));
            }
        }
    }

    /// Remove `[0, c]` from the list for every clock `c` in `fc`.
    pub fn sub_full_clock(&mut self, fc: &FullClock) {
        for clock in fc {
            self.sub_clock(clock);
        }
    }

    /// Raise the lower bound of `clock.branch` past `clock.sequence`,
    /// dropping the range if nothing is left.
    pub fn sub_clock(&mut self, clock: &Clock) {
        let Some(i) = self.position(clock.branch()) else {
            return;
        };
        match clock.sequence().checked_add(1) {
            Some(left) if left <= self.ranges[i].right => {
                let range = &mut self.ranges[i];
                range.left = range.left.max(left);
            }
            _ => {
                let dropped = self.ranges.remove(i);
                tracing::trace!(branch = dropped.branch(), "range exhausted");
            }
        }
    }

    pub fn ranges(&self) -> &[ClockRange] {
        return &self.ranges;
    }

    /// The range for `branch`, if any commits on it are in the set.
    pub fn get(&self, branch: &str) -> Option<&ClockRange> {
        return self.ranges.iter().find(|r| r.branch() == branch);
    }

    /// True if `clock` is in the set.
    pub fn contains(&self, clock: &Clock) -> bool {
        return self.get(clock.branch()).is_some_and(|r| r.contains(clock));
    }

    /// Ranges keyed by branch name.
    pub fn by_branch(&self) -> FxHashMap<&str, &ClockRange> {
        return self.ranges.iter().map(|r| (r.branch(), r)).collect();
    }

    /// Number of branches with a non-empty range.
    #[inline]
    pub fn len(&self) -> usize {
        return self.ranges.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.ranges.is_empty();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClockRange> {
        return self.ranges.iter();
    }

    fn position(&self, branch: &str) -> Option<usize> {
        return self.ranges.iter().position(|r| r.branch() == branch);
    }
}

impl IntoIterator for ClockRangeList {
    type Item = ClockRange;
    type IntoIter = std::vec::IntoIter<ClockRange>;

    fn into_iter(self) -> Self::IntoIter {
        return self.ranges.into_iter();
    }
}

impl<'a> IntoIterator for &'a ClockRangeList {
    type Item = &'a ClockRange;
    type IntoIter = std::slice::Iter<'a, ClockRange>;

    fn into_iter(self) -> Self::IntoIter {
        return self.ranges.iter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fc(clocks: &[(&str, u64)]) -> FullClock {
        return clocks.iter().map(|(b, s)| Clock::at(*b, *s)).collect();
    }

    fn triples(list: &ClockRangeList) -> Vec<(&str, u64, u64)> {
        return list.iter().map(|r| (r.branch(), r.left(), r.right())).collect();
    }

    #[test]
    fn range_len_and_contains() {
        let range = ClockRange::new("foo", 2, 3);
        assert_eq!(range.len(), 2);
        assert!(range.contains(&Clock::at("foo", 2)));
        assert!(range.contains(&Clock::at("foo", 3)));
        assert!(!range.contains(&Clock::at("foo", 4)));
        assert!(!range.contains(&Clock::at("bar", 2)));

        let empty = ClockRange::new("foo", 4, 3);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(ClockRange::new("foo", 0, u64::MAX).len(), u64::MAX);
    }

    #[test]
    fn add_extends_right_bound() {
        let mut list = ClockRangeList::new();
        list.add_clock(&Clock::at("master", 2));
        list.add_clock(&Clock::at("master", 5));
        list.add_clock(&Clock::at("master", 1));
        list.add_clock(&Clock::at("foo", 0));
        assert_eq!(triples(&list), vec![("master", 0, 5), ("foo", 0, 0)]);
    }

    #[test]
    fn sub_raises_left_bound() {
        let mut list = ClockRangeList::new();
        list.add_clock(&Clock::at("master", 5));
        list.sub_clock(&Clock::at("master", 2));
        assert_eq!(triples(&list), vec![("master", 3, 5)]);

        // A smaller subtraction never widens the range again.
        list.sub_clock(&Clock::at("master", 0));
        assert_eq!(triples(&list), vec![("master", 3, 5)]);
    }

    #[test]
    fn sub_drops_exhausted_range() {
        let mut list = ClockRangeList::new();
        list.add_clock(&Clock::at("master", 5));
        list.add_clock(&Clock::at("foo", 1));
        list.sub_clock(&Clock::at("master", 5));
        assert_eq!(triples(&list), vec![("foo", 0, 1)]);

        list.sub_clock(&Clock::at("foo", u64::MAX));
        assert!(list.is_empty());
    }

    #[test]
    fn sub_unknown_branch_is_noop() {
        let mut list = ClockRangeList::new();
        list.add_clock(&Clock::at("master", 5));
        list.sub_clock(&Clock::at("foo", 1));
        assert_eq!(triples(&list), vec![("master", 0, 5)]);
    }

    #[test]
    fn diff_new_branch() {
        let from = fc(&[("master", 2)]);
        let to = fc(&[("master", 2), ("foo", 3)]);
        let diff = ClockRangeList::diff(&from, &to);
        assert_eq!(triples(&diff), vec![("foo", 0, 3)]);
    }

    #[test]
    fn diff_same_branch() {
        let from = fc(&[("master", 2), ("foo", 1)]);
        let to = fc(&[("master", 2), ("foo", 3)]);
        let diff = ClockRangeList::diff(&from, &to);
        assert_eq!(triples(&diff), vec![("foo", 2, 3)]);
    }

    #[test]
    fn diff_self_is_empty() {
        let clock = fc(&[("master", 2), ("foo", 3)]);
        assert!(ClockRangeList::diff(&clock, &clock).is_empty());
    }

    #[test]
    fn diff_disjoint_is_full_history() {
        let from = fc(&[("other", 7)]);
        let to = fc(&[("master", 2), ("foo", 3)]);
        let diff = ClockRangeList::diff(&from, &to);
        assert_eq!(triples(&diff), vec![("master", 0, 2), ("foo", 0, 3)]);
    }

    #[test]
    fn diff_backwards_is_empty() {
        // Everything in an ancestor is reachable from its descendant.
        let from = fc(&[("master", 2), ("foo", 3)]);
        let to = fc(&[("master", 1)]);
        assert!(ClockRangeList::diff(&from, &to).is_empty());
    }

    #[test]
    fn queries() {
        let from = fc(&[("master", 2), ("foo", 1)]);
        let to = fc(&[("master", 4), ("bar", 3)]);
        let diff = ClockRangeList::diff(&from, &to);

        assert!(diff.contains(&Clock::at("master", 3)));
        assert!(!diff.contains(&Clock::at("master", 2)));
        assert!(diff.contains(&Clock::at("bar", 0)));
        assert!(!diff.contains(&Clock::at("foo", 2)));

        let map = diff.by_branch();
        assert_eq!(map.len(), 2);
        assert_eq!(map["bar"], &ClockRange::new("bar", 0, 3));
    }
}
