//! Forkclock - branch-aware logical clocks for a versioned file store.
//!
//! Every commit is named by a [`FullClock`], the chain of branch positions
//! that leads to it through the fork tree. From two full clocks,
//! [`ClockRangeList::diff`] computes the per-branch sequence ranges that are
//! new in one relative to the other, without loading the commit graph.
//!
//! # Quick Start
//!
//! ```
//! use forkclock::{ClockRangeList, FullClock};
//!
//! // Three commits on master, then a branch forked at master/2.
//! let base = FullClock::root("master").child().child();
//! let feature = base.fork("foo").child().child().child();
//! assert_eq!(feature.to_string(), "master/2,foo/3");
//!
//! // Walk back across the fork.
//! assert!(base.is_ancestor_of(&feature));
//! assert_eq!(feature.ancestors().count(), 6);
//!
//! // Only foo's commits separate the two.
//! let diff = ClockRangeList::diff(&base, &feature);
//! assert_eq!(diff.len(), 1);
//! assert_eq!(diff.get("foo").unwrap().index_bounds(), (("foo", 0), ("foo", 3)));
//! ```

pub mod array;
pub mod clock;
pub mod error;
pub mod full_clock;
pub mod range;

pub use array::ClockArray;
pub use clock::Clock;
pub use error::FormatError;
pub use full_clock::Ancestors;
pub use full_clock::FullClock;
pub use range::ClockRange;
pub use range::ClockRangeList;
