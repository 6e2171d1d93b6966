use crate::interval::Interval;

/// An interval and its value, as stored under one key of an `IntervalTree`.
///
/// Entries whose intervals share a category id and a low bound live in the
/// same tree node, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalEntry<T, V> {
    /// Interval of the entry
    pub interval: Interval<T>,
    /// Value of the entry
    pub value: V,
}

impl<T, V> IntervalEntry<T, V> {
    pub(crate) fn new(interval: Interval<T>, value: V) -> Self {
        Self { interval, value }
    }

    /// Returns a reference to the interval.
    #[inline]
    pub fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    /// Returns a reference to the value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, returning the interval and the value.
    #[inline]
    pub fn into_parts(self) -> (Interval<T>, V) {
        (self.interval, self.value)
    }
}
