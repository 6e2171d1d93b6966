use std::cmp::Ordering;
use std::mem;

use crate::entry::IntervalEntry;
use crate::interval::Interval;
use crate::position::Position;

/// Identifier separating different kinds of intervals stored in one tree.
pub type CategoryId = u32;

/// Owned link to a subtree
pub(crate) type Link<T, V> = Option<Box<Node<T, V>>>;

/// Key of a node, ordered by position first and then by category id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Key<T> {
    /// Category of the intervals in the node
    pub id: CategoryId,
    /// Low bound shared by the intervals in the node
    pub pos: T,
}

impl<T: Ord> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos
            .cmp(&other.pos)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl<T: Ord> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A shift of positions that has not reached a subtree yet.
///
/// Every key at or above `threshold`, and every interval of such a key, moves
/// by `amount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Shift<T> {
    pub threshold: T,
    pub amount: T,
}

/// Node of the interval tree
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Node<T, V> {
    /// Key of the node
    pub key: Key<T>,
    /// Upper bound of the highs in this subtree, valid once `shifts` is resolved
    pub max_high: T,
    /// Intervals sharing the key, in insertion order
    pub entries: Vec<IntervalEntry<T, V>>,
    /// Shifts queued on this subtree, oldest first
    pub shifts: Vec<Shift<T>>,
    /// Number of nodes on the longest path down to a leaf, counting this one
    pub height: usize,
    /// Left subtree
    pub left: Link<T, V>,
    /// Right subtree
    pub right: Link<T, V>,
}

/// Height of a possibly absent subtree.
pub(crate) fn height<T, V>(link: &Link<T, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<T, V> Node<T, V>
where
    T: Position,
{
    /// Create a leaf holding a single entry
    pub(crate) fn new(key: Key<T>, entry: IntervalEntry<T, V>) -> Self {
        Node {
            key,
            max_high: entry.interval.high,
            entries: vec![entry],
            shifts: Vec::new(),
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Queue a shift on this subtree without touching anything else.
    pub(crate) fn add_shift(&mut self, shift: Shift<T>) {
        self.shifts.push(shift);
    }

    /// Resolve the queued shifts of this node and push them one level down.
    ///
    /// A shift only touches the node when `max_high` says the subtree may hold
    /// an interval reaching the threshold. The bound is raised by positive
    /// amounts and left alone by negative ones, so it stays an upper bound.
    pub(crate) fn apply_shifts(&mut self) {
        if self.shifts.is_empty() {
            return;
        }
        for shift in mem::take(&mut self.shifts) {
            if self.max_high >= shift.threshold {
                if self.key.pos >= shift.threshold {
                    self.key.pos = self.key.pos + shift.amount;
                    for entry in &mut self.entries {
                        entry.interval = entry.interval.shift(shift.amount);
                    }
                }
                if shift.amount > T::ZERO {
                    self.max_high = self.max_high + shift.amount;
                }
            }
            if let Some(left) = self.left.as_deref_mut() {
                left.add_shift(shift);
            }
            if let Some(right) = self.right.as_deref_mut() {
                right.add_shift(shift);
            }
        }
    }

    /// Recalculate height and max high from the entries and both children.
    ///
    /// The children are resolved first so their bounds describe their current
    /// positions.
    fn update_height_and_max(&mut self) {
        if let Some(left) = self.left.as_deref_mut() {
            left.apply_shifts();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.apply_shifts();
        }
        self.height = 1 + height(&self.left).max(height(&self.right));
        if let Some(max_high) = self
            .entries
            .iter()
            .map(|entry| entry.interval.high)
            .chain(self.left.iter().map(|left| left.max_high))
            .chain(self.right.iter().map(|right| right.max_high))
            .max()
        {
            self.max_high = max_high;
        }
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Binary tree left rotate.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        self.apply_shifts();
        let Some(mut new_root) = self.right.take() else {
            return self;
        };
        new_root.apply_shifts();
        self.right = new_root.left.take();
        self.update_height_and_max();
        new_root.left = Some(self);
        new_root.update_height_and_max();
        new_root
    }

    /// Binary tree right rotate.
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        self.apply_shifts();
        let Some(mut new_root) = self.left.take() else {
            return self;
        };
        new_root.apply_shifts();
        self.left = new_root.right.take();
        self.update_height_and_max();
        new_root.right = Some(self);
        new_root.update_height_and_max();
        new_root
    }

    /// Restore the AVL property of a subtree whose children differ in height
    /// by at most two, returning the new subtree root.
    pub(crate) fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update_height_and_max();
        match self.balance_factor() {
            bf if bf < -1 => {
                if let Some(right) = self.right.take() {
                    self.right = Some(if height(&right.left) > height(&right.right) {
                        right.rotate_right()
                    } else {
                        right
                    });
                }
                self.rotate_left()
            }
            bf if bf > 1 => {
                if let Some(left) = self.left.take() {
                    self.left = Some(if height(&left.right) > height(&left.left) {
                        left.rotate_left()
                    } else {
                        left
                    });
                }
                self.rotate_right()
            }
            _ => self,
        }
    }

    /// Link `left` and `right` under `mid`, whatever their heights.
    ///
    /// Every key of `left` must be smaller and every key of `right` greater
    /// than the key of `mid`, and `mid` must have no pending shifts.
    pub(crate) fn join(left: Link<T, V>, mut mid: Box<Self>, right: Link<T, V>) -> Box<Self> {
        debug_assert!(mid.shifts.is_empty());
        let (left_height, right_height) = (height(&left), height(&right));
        match (left, right) {
            (Some(mut left), right) if left_height > right_height + 1 => {
                left.apply_shifts();
                let inner = left.right.take();
                left.right = Some(Self::join(inner, mid, right));
                left.rebalance()
            }
            (left, Some(mut right)) if right_height > left_height + 1 => {
                right.apply_shifts();
                let inner = right.left.take();
                right.left = Some(Self::join(left, mid, inner));
                right.rebalance()
            }
            (left, right) => {
                mid.left = left;
                mid.right = right;
                mid.rebalance()
            }
        }
    }

    /// Insert an entry below `link`, returning the new subtree root and
    /// whether a node was created for it.
    pub(crate) fn insert(
        link: Link<T, V>,
        key: Key<T>,
        entry: IntervalEntry<T, V>,
    ) -> (Box<Self>, bool) {
        let Some(mut node) = link else {
            return (Box::new(Self::new(key, entry)), true);
        };
        node.apply_shifts();
        let created = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, created) = Self::insert(node.left.take(), key, entry);
                node.left = Some(left);
                created
            }
            Ordering::Greater => {
                let (right, created) = Self::insert(node.right.take(), key, entry);
                node.right = Some(right);
                created
            }
            Ordering::Equal => {
                node.entries.push(entry);
                false
            }
        };
        (node.rebalance(), created)
    }

    /// Remove the node with the given key below `link`, returning the new
    /// subtree root and the entries of the removed node.
    pub(crate) fn remove(
        link: Link<T, V>,
        key: &Key<T>,
    ) -> (Link<T, V>, Option<Vec<IntervalEntry<T, V>>>) {
        let Some(mut node) = link else {
            return (None, None);
        };
        node.apply_shifts();
        let removed = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove(node.left.take(), key);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(node.right.take(), key);
                node.right = right;
                removed
            }
            Ordering::Equal => {
                let (rest, entries) = node.unlink();
                return (rest, Some(entries));
            }
        };
        (Some(node.rebalance()), removed)
    }

    /// Take a resolved node out of its subtree, promoting the in-order
    /// successor when both children are present.
    fn unlink(mut self: Box<Self>) -> (Link<T, V>, Vec<IntervalEntry<T, V>>) {
        let entries = mem::take(&mut self.entries);
        let rest = match (self.left.take(), self.right.take()) {
            (Some(left), Some(right)) => {
                let (right, successor) = right.take_min();
                Some(Self::join(Some(left), successor, right))
            }
            (Some(mut child), None) | (None, Some(mut child)) => {
                child.apply_shifts();
                Some(child.rebalance())
            }
            (None, None) => None,
        };
        (rest, entries)
    }

    /// Detach the leftmost node of this subtree. Returns the remaining subtree
    /// and the detached node, resolved and without children.
    fn take_min(mut self: Box<Self>) -> (Link<T, V>, Box<Self>) {
        self.apply_shifts();
        match self.left.take() {
            None => {
                let rest = self.right.take();
                (rest, self)
            }
            Some(left) => {
                let (rest, min) = left.take_min();
                self.left = rest;
                (Some(self.rebalance()), min)
            }
        }
    }

    /// Find the node with exactly the given key.
    pub(crate) fn search<'a>(mut link: Option<&'a mut Self>, key: &Key<T>) -> Option<&'a mut Self> {
        while let Some(node) = link {
            node.apply_shifts();
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Greater => link = node.right.as_deref_mut(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Collect every entry of this subtree overlapping `query`, in key order.
    pub(crate) fn find_overlaps<'a>(
        &'a mut self,
        query: &Interval<T>,
        found: &mut Vec<(CategoryId, &'a Interval<T>, &'a V)>,
    ) {
        self.apply_shifts();
        if query.low >= self.max_high {
            return;
        }
        let Node {
            key,
            entries,
            left,
            right,
            ..
        } = self;
        if let Some(left) = left.as_deref_mut() {
            left.find_overlaps(query, found);
        }
        let (id, pos) = (key.id, key.pos);
        let entries: &'a [IntervalEntry<T, V>] = entries;
        found.extend(
            entries
                .iter()
                .filter(|entry| entry.interval.overlap(query))
                .map(|entry| (id, &entry.interval, &entry.value)),
        );
        if query.high > pos {
            if let Some(right) = right.as_deref_mut() {
                right.find_overlaps(query, found);
            }
        }
    }

    /// Remove every entry of this subtree overlapping `query`, dropping nodes
    /// left without entries. `removed` counts the dropped nodes.
    pub(crate) fn remove_overlaps(
        mut self: Box<Self>,
        query: &Interval<T>,
        removed: &mut usize,
    ) -> Link<T, V> {
        self.apply_shifts();
        if query.low >= self.max_high {
            return Some(self);
        }
        let left = self
            .left
            .take()
            .and_then(|left| left.remove_overlaps(query, removed));
        self.entries.retain(|entry| !entry.interval.overlap(query));
        let past_key = query.high > self.key.pos;

        if self.entries.is_empty() {
            *removed += 1;
            self.left = left;
            let (rest, _) = self.unlink();
            // The replacement root may be the promoted successor, whose
            // entries have not been examined yet.
            return if past_key {
                rest.and_then(|rest| rest.remove_overlaps(query, removed))
            } else {
                rest
            };
        }

        let mut right = self.right.take();
        if past_key {
            right = right.and_then(|right| right.remove_overlaps(query, removed));
        }
        Some(Self::join(left, self, right))
    }

    /// Split this subtree into the keys below `pos` and the keys at or above
    /// it, both balanced.
    pub(crate) fn split(mut self: Box<Self>, pos: T) -> (Link<T, V>, Link<T, V>) {
        self.apply_shifts();
        let (left, right) = (self.left.take(), self.right.take());
        if self.key.pos < pos {
            let (below, above) = right.map_or((None, None), |right| right.split(pos));
            (Some(Self::join(left, self, below)), above)
        } else {
            let (below, above) = left.map_or((None, None), |left| left.split(pos));
            (below, Some(Self::join(above, self, right)))
        }
    }

    /// Number of nodes in this subtree.
    pub(crate) fn count(&self) -> usize {
        1 + self.left.as_deref().map_or(0, Self::count)
            + self.right.as_deref().map_or(0, Self::count)
    }

    /// Resolve every pending shift of this subtree and recompute the bounds
    /// exactly.
    pub(crate) fn flush(&mut self) {
        self.apply_shifts();
        if let Some(left) = self.left.as_deref_mut() {
            left.flush();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.flush();
        }
        self.update_height_and_max();
    }
}
