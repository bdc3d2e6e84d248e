//! Ordered-array projection for secondary indexes.
//!
//! A document store indexes a clock as the compound key `[branch, sequence]`
//! and a full clock as a list of such keys. A bounded query
//! `branch == X AND left <= sequence <= right` is then a key range from
//! `[X, left]` to `[X, right]`. The field order here is part of the stored
//! index format and must not change.

use crate::clock::Clock;
use crate::full_clock::FullClock;
use crate::range::ClockRange;

/// `[branch, sequence]`.
pub type ClockArray<'a> = (&'a str, u64);

impl Clock {
    pub fn to_array(&self) -> ClockArray<'_> {
        return (self.branch(), self.sequence());
    }
}

impl FullClock {
    pub fn to_array(&self) -> Vec<ClockArray<'_>> {
        return self.iter().map(Clock::to_array).collect();
    }
}

impl ClockRange {
    /// Inclusive lower and upper index keys covering this range.
    pub fn index_bounds(&self) -> (ClockArray<'_>, ClockArray<'_>) {
        return ((self.branch(), self.left()), (self.branch(), self.right()));
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;
    use serde::ser::SerializeSeq;
    use serde::ser::SerializeTuple;
    use smol_str::SmolStr;

    use crate::clock::Clock;
    use crate::full_clock::FullClock;

    impl Serialize for Clock {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(2)?;
            tuple.serialize_element(self.branch())?;
            tuple.serialize_element(&self.sequence())?;
            return tuple.end();
        }
    }

    impl<'de> Deserialize<'de> for Clock {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let (branch, sequence) = <(SmolStr, u64)>::deserialize(deserializer)?;
            return Ok(Clock::at(branch, sequence));
        }
    }

    impl Serialize for FullClock {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for clock in self {
                seq.serialize_element(clock)?;
            }
            return seq.end();
        }
    }

    impl<'de> Deserialize<'de> for FullClock {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let clocks = Vec::<Clock>::deserialize(deserializer)?;
            return Ok(FullClock::from(clocks));
        }
    }
}
