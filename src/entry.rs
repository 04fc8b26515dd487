#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// A stored range together with every value that covers it.
///
/// Values keep the order in which they reached the range: values that were
/// already present come before values merged in by later inserts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry<V> {
    /// The range of this entry
    interval: Interval,
    /// Values associated with the range
    values: Vec<V>,
}

impl<V> Entry<V> {
    pub(crate) fn new(interval: Interval, values: Vec<V>) -> Self {
        Self { interval, values }
    }

    /// Inclusive start of the range.
    #[inline]
    #[must_use]
    pub fn from(&self) -> i64 {
        self.interval.from()
    }

    /// Exclusive end of the range.
    #[inline]
    #[must_use]
    pub fn to(&self) -> i64 {
        self.interval.to()
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Splits the entry into its interval and values.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Interval, Vec<V>) {
        (self.interval, self.values)
    }

    #[inline]
    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    pub(crate) fn set_to(&mut self, to: i64) {
        self.interval.set_to(to);
    }

    pub(crate) fn append(&mut self, values: impl IntoIterator<Item = V>) {
        self.values.extend(values);
    }

    /// Puts `values` in front of the current ones.
    pub(crate) fn prepend(&mut self, mut values: Vec<V>) {
        values.append(&mut self.values);
        self.values = values;
    }
}

impl<V: Clone> Entry<V> {
    pub(crate) fn cloned_values(&self) -> Vec<V> {
        self.values.clone()
    }
}
