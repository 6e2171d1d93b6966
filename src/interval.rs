//! The `Interval` stored in `IntervalTree` and represents the interval [low, high)
//!
//! Intervals are ordered by `low` first and then by `high`. For instance, with
//! intervals of type `Interval<i32>`:
//! - [1,4)<[2,5), because 1<2
//! - [1,4)<[1,5), because 4<5
//!
//! Only half-open intervals are supported. An empty interval such as the query
//! range of a pure shift, [7,7), contains no position and overlaps nothing.

use crate::position::Position;

/// The interval stored in `IntervalTree` represents [low, high)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Interval<T> {
    /// Low value
    pub low: T,
    /// high value
    pub high: T,
}

impl<T: Ord> Interval<T> {
    /// Create a new `Interval`
    ///
    /// # Panics
    ///
    /// This method panics when low >= high
    #[inline]
    pub fn new(low: T, high: T) -> Self {
        assert!(low < high, "invalid range");
        Self { low, high }
    }

    /// Build a possibly empty query range without validation.
    pub(crate) fn query(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Returns `true` if the interval contains no position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.low >= self.high
    }

    /// Checks if self overlaps with other interval
    ///
    /// Empty intervals never overlap.
    #[inline]
    pub fn overlap(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.high > other.low
            && other.high > self.low
    }
}

impl<T: Position> Interval<T> {
    /// Returns the interval translated by `amount`.
    #[inline]
    #[must_use]
    pub fn shift(&self, amount: T) -> Self {
        Self {
            low: self.low + amount,
            high: self.high + amount,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[should_panic(expected = "invalid range")]
    fn invalid_range_should_panic() {
        let _interval = Interval::new(3, 1);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(0, 10);
        assert!(!a.overlap(&Interval::new(10, 20)));
        assert!(!Interval::new(10, 20).overlap(&a));
        assert!(a.overlap(&Interval::new(9, 20)));
        assert!(a.overlap(&Interval::new(2, 3)));
    }

    #[test]
    fn empty_query_overlaps_nothing() {
        let a = Interval::new(10, 20);
        let point = Interval::query(15, 15);
        assert!(point.is_empty());
        assert!(!a.overlap(&point));
        assert!(!point.overlap(&a));
    }

    #[test]
    fn shift_moves_both_bounds() {
        assert_eq!(Interval::new(3, 8).shift(4), Interval::new(7, 12));
        assert_eq!(Interval::new(3, 8).shift(-3), Interval::new(0, 5));
    }
}
