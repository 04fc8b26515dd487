//! The `Interval` stored in `IntervalMap` and represents the range [from, to)
//!
//! Stored intervals never overlap, so the map orders them by `from` alone:
//! - [1,4) < [4,9), because 1 < 4
//! - [4,9) and [7,12) can not both be stored; inserting the second splits it into
//!   [4,7), [7,9) and [9,12).
//!
//! Only half-open intervals are supported, i.e., [...,...).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The interval stored in `IntervalMap` represents [from, to)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "(i64, i64)", into = "(i64, i64)")
)]
pub struct Interval {
    /// Inclusive start
    from: i64,
    /// Exclusive end
    to: i64,
}

impl Interval {
    /// Create a new `Interval`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when `to <= from`
    ///
    /// # Example
    /// ```rust
    /// use split_interval_map::{Error, Interval};
    ///
    /// assert!(Interval::new(1, 2).is_ok());
    /// assert_eq!(Interval::new(2, 2), Err(Error::InvalidRange { from: 2, to: 2 }));
    /// ```
    #[inline]
    pub fn new(from: i64, to: i64) -> Result<Self> {
        if to <= from {
            return Err(Error::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[inline]
    #[must_use]
    pub fn from(&self) -> i64 {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> i64 {
        self.to
    }

    /// Width of the interval.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.to.abs_diff(self.from)
    }

    /// Always `false`, since `to > from` holds for every `Interval`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks if `key` falls inside [from, to)
    #[inline]
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.from <= key && key < self.to
    }

    /// Checks if self overlaps with other interval
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.to > other.from && other.to > self.from
    }

    /// Checks if the two intervals touch without overlapping.
    #[inline]
    #[must_use]
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.to == other.from || other.to == self.from
    }

    /// Moves the end. Callers keep `to > from`.
    pub(crate) fn set_to(&mut self, to: i64) {
        debug_assert!(to > self.from, "interval end must stay above its start");
        self.to = to;
    }
}

impl TryFrom<(i64, i64)> for Interval {
    type Error = Error;

    #[inline]
    fn try_from((from, to): (i64, i64)) -> Result<Self> {
        Self::new(from, to)
    }
}

impl From<Interval> for (i64, i64) {
    #[inline]
    fn from(interval: Interval) -> Self {
        (interval.from, interval.to)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_range_is_rejected() {
        assert_eq!(
            Interval::new(3, 1),
            Err(Error::InvalidRange { from: 3, to: 1 })
        );
        assert!(Interval::new(i64::MIN, i64::MAX).is_ok());
        assert!(Interval::try_from((4, 4)).is_err());
        assert_eq!(<(i64, i64)>::from(Interval::try_from((1, 4)).unwrap()), (1, 4));
    }

    #[test]
    fn half_open_membership() {
        let i = Interval::new(10, 20).unwrap();
        assert!(i.contains(10));
        assert!(i.contains(19));
        assert!(!i.contains(20));
        assert!(!i.contains(9));
        assert_eq!(i.len(), 10);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(10, 20).unwrap();
        let b = Interval::new(20, 30).unwrap();
        let c = Interval::new(15, 25).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.is_adjacent(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }
}
