use log::{debug, trace};

use crate::entry::IntervalEntry;
use crate::interval::Interval;
use crate::iter::{IntoIter, Iter};
use crate::node::{CategoryId, Key, Link, Node, Shift};
use crate::position::Position;

/// An interval tree keyed by `(category id, low)` whose positions can be
/// shifted in bulk.
///
/// Shifts queued by [`IntervalTree::remove_and_shift`] are resolved lazily:
/// every operation resolves the pending shifts of the nodes it visits before
/// reading them, which is why lookups take `&mut self`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalTree<T, V> {
    /// Root of the AVL tree
    pub(crate) root: Link<T, V>,
    /// Number of distinct keys in the tree
    pub(crate) len: usize,
}

impl<T, V> IntervalTree<T, V>
where
    T: Position,
{
    /// Create an empty `IntervalTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Insert an interval of the given category.
    ///
    /// Intervals sharing both the category and the low bound are kept side by
    /// side under one key.
    ///
    /// # Example
    /// ```rust
    /// use lazy_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(1, Interval::new(3, 5), "a");
    /// tree.insert(1, Interval::new(3, 9), "b");
    /// tree.insert(2, Interval::new(3, 4), "c");
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(1, 3).map(<[_]>::len), Some(2));
    /// ```
    #[inline]
    pub fn insert(&mut self, id: CategoryId, interval: Interval<T>, value: V) {
        let key = Key {
            id,
            pos: interval.low,
        };
        let (root, created) = Node::insert(self.root.take(), key, IntervalEntry::new(interval, value));
        self.root = Some(root);
        if created {
            self.len += 1;
        }
    }

    /// Return the entries stored under `(id, pos)`.
    ///
    /// # Example
    /// ```rust
    /// use lazy_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(0, Interval::new(1, 3), 'x');
    /// let entries = tree.get(0, 1).unwrap();
    /// assert_eq!(entries[0].interval(), &Interval::new(1, 3));
    /// assert!(tree.get(0, 2).is_none());
    /// ```
    #[inline]
    pub fn get(&mut self, id: CategoryId, pos: T) -> Option<&[IntervalEntry<T, V>]> {
        Node::search(self.root.as_deref_mut(), &Key { id, pos }).map(|node| node.entries.as_slice())
    }

    /// Return the value of the longest interval stored under `(id, pos)`.
    ///
    /// When several intervals share the greatest high bound, the one stored
    /// under the key first wins.
    ///
    /// # Example
    /// ```rust
    /// use lazy_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(1, Interval::new(10, 12), "short");
    /// tree.insert(1, Interval::new(10, 30), "long");
    /// assert_eq!(tree.find_largest(1, 10), Some(&"long"));
    /// assert_eq!(tree.find_largest(2, 10), None);
    /// ```
    #[inline]
    pub fn find_largest(&mut self, id: CategoryId, pos: T) -> Option<&V> {
        self.get(id, pos)?
            .iter()
            .reduce(|best, entry| {
                if entry.interval.high > best.interval.high {
                    entry
                } else {
                    best
                }
            })
            .map(IntervalEntry::value)
    }

    /// Remove every interval stored under `(id, pos)`, returning them.
    ///
    /// # Example
    /// ```rust
    /// use lazy_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(4, Interval::new(2, 6), ());
    /// assert_eq!(tree.remove(4, 2).map(|entries| entries.len()), Some(1));
    /// assert_eq!(tree.remove(4, 2), None);
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    pub fn remove(&mut self, id: CategoryId, pos: T) -> Option<Vec<IntervalEntry<T, V>>> {
        let (root, removed) = Node::remove(self.root.take(), &Key { id, pos });
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Remove every interval overlapping [low, high), then move every
    /// remaining key at or above `low` by `amount`.
    ///
    /// The shift is recorded on the root and only reaches the affected nodes
    /// when later operations visit them. With `low == high` nothing is removed
    /// and the call is a pure shift.
    ///
    /// When `high + amount < low` the moved keys may land among the keys left
    /// in place. They are then taken out, shifted and inserted again right
    /// away, and a moved key landing on an existing one joins its entries
    /// after those already there.
    ///
    /// # Example
    /// ```rust
    /// use lazy_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(0, Interval::new(0, 4), "kept");
    /// tree.insert(0, Interval::new(5, 8), "removed");
    /// tree.insert(0, Interval::new(10, 12), "moved");
    /// tree.remove_and_shift(5, 9, -4);
    /// assert_eq!(tree.find_largest(0, 0), Some(&"kept"));
    /// assert_eq!(tree.find_largest(0, 6), Some(&"moved"));
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn remove_and_shift(&mut self, low: T, high: T, amount: T) {
        debug_assert!(low <= high, "invalid range");
        let mut removed = 0;
        if low < high {
            let query = Interval::query(low, high);
            self.root = self
                .root
                .take()
                .and_then(|root| root.remove_overlaps(&query, &mut removed));
            self.len -= removed;
        }
        if high + amount < low {
            self.shift_eagerly(low, amount);
        } else if amount != T::ZERO {
            if let Some(root) = self.root.as_deref_mut() {
                root.add_shift(Shift {
                    threshold: low,
                    amount,
                });
            }
        }
        trace!("remove_and_shift [{low:?}, {high:?}) by {amount:?}: {removed} keys removed");
    }

    /// Move every key at or above `threshold` by `amount` now, re-inserting
    /// the moved entries so they take their place among the others.
    fn shift_eagerly(&mut self, threshold: T, amount: T) {
        let Some(root) = self.root.take() else {
            return;
        };
        let (below, above) = root.split(threshold);
        self.root = below;
        let Some(mut above) = above else {
            return;
        };
        let moved = above.count();
        self.len -= moved;
        above.flush();
        for (id, interval, value) in IntoIter::new(Some(above)) {
            self.insert(id, interval.shift(amount), value);
        }
        debug!("shifted {moved} keys below {threshold:?} by re-inserting them");
    }

    /// Find all intervals in the tree that overlap with the given interval,
    /// in key order.
    ///
    /// # Example
    /// ```rust
    /// use lazy_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(0, Interval::new(1, 3), 'a');
    /// tree.insert(1, Interval::new(2, 4), 'b');
    /// tree.insert(0, Interval::new(6, 7), 'c');
    /// let found: Vec<_> = tree
    ///     .find_all_overlap(&Interval::new(2, 7))
    ///     .into_iter()
    ///     .map(|(_, _, v)| *v)
    ///     .collect();
    /// assert_eq!(found, vec!['a', 'b', 'c']);
    /// ```
    #[inline]
    pub fn find_all_overlap(&mut self, interval: &Interval<T>) -> Vec<(CategoryId, &Interval<T>, &V)> {
        let mut found = Vec::new();
        if let Some(root) = self.root.as_deref_mut() {
            root.find_overlaps(interval, &mut found);
        }
        found
    }

    /// Resolve every pending shift in the tree.
    ///
    /// This visits every node. Lookups do not need it; iteration calls it.
    #[inline]
    pub fn flush_shifts(&mut self) {
        if let Some(root) = self.root.as_deref_mut() {
            root.flush();
        }
    }

    /// Get an iterator over the entries of the tree, sorted by key.
    ///
    /// Pending shifts are resolved first.
    #[inline]
    pub fn iter(&mut self) -> Iter<'_, T, V> {
        self.flush_shifts();
        Iter::new(self.root.as_deref())
    }

    /// Remove all intervals from the tree
    #[inline]
    pub fn clear(&mut self) {
        debug!("clearing interval tree with {} keys", self.len);
        self.root = None;
        self.len = 0;
    }

    /// Return the number of distinct keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no intervals.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, V> Default for IntervalTree<T, V>
where
    T: Position,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> IntoIterator for IntervalTree<T, V>
where
    T: Position,
{
    type Item = (CategoryId, Interval<T>, V);
    type IntoIter = IntoIter<T, V>;

    /// Drain the tree in key order, resolving pending shifts first.
    #[inline]
    fn into_iter(mut self) -> Self::IntoIter {
        self.flush_shifts();
        IntoIter::new(self.root)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_tree_operations_are_noops() {
        let mut tree = IntervalTree::<i32, ()>::new();
        assert_eq!(tree.find_largest(0, 0), None);
        assert!(tree.get(0, 0).is_none());
        assert!(tree.remove(0, 0).is_none());
        tree.remove_and_shift(0, 10, 5);
        assert!(tree.find_all_overlap(&Interval::new(0, 10)).is_empty());
        assert!(tree.is_empty());
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn find_largest_prefers_first_of_equal_highs() {
        let mut tree = IntervalTree::new();
        tree.insert(3, Interval::new(5, 9), "first");
        tree.insert(3, Interval::new(5, 7), "shorter");
        tree.insert(3, Interval::new(5, 9), "second");
        assert_eq!(tree.find_largest(3, 5), Some(&"first"));
    }

    #[test]
    fn find_largest_prefers_entries_already_in_place() {
        let mut tree = IntervalTree::new();
        tree.insert(0, Interval::new(2, 6), "kept");
        tree.insert(0, Interval::new(12, 16), "moved");
        tree.remove_and_shift(8, 10, -10);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(0, 2).map(<[_]>::len), Some(2));
        assert_eq!(tree.find_largest(0, 2), Some(&"kept"));
    }

    #[test]
    fn same_position_different_category_are_distinct_keys() {
        let mut tree = IntervalTree::new();
        tree.insert(1, Interval::new(5, 9), 'a');
        tree.insert(2, Interval::new(5, 6), 'b');
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find_largest(1, 5), Some(&'a'));
        assert_eq!(tree.find_largest(2, 5), Some(&'b'));
    }

    #[test]
    fn clear_empties_the_tree() {
        let mut tree = IntervalTree::new();
        tree.insert(0, Interval::new(1, 3), 1);
        tree.insert(0, Interval::new(2, 4), 2);
        tree.remove_and_shift(10, 10, 3);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.root.is_none());
    }
}
