use std::{slice, vec};

use crate::entry::IntervalEntry;
use crate::interval::Interval;
use crate::node::{CategoryId, Link, Node};

/// Pushes a link of nodes on the left to stack.
fn left_link<'a, T, V>(stack: &mut Vec<&'a Node<T, V>>, mut x: Option<&'a Node<T, V>>) {
    while let Some(node) = x {
        stack.push(node);
        x = node.left.as_deref();
    }
}

/// An iterator over the entries of a `IntervalTree`.
///
/// Created by [`IntervalTree::iter`](crate::IntervalTree::iter), after every
/// pending shift has been resolved.
#[derive(Debug)]
pub struct Iter<'a, T, V> {
    /// Stack for iteration
    stack: Vec<&'a Node<T, V>>,
    /// Category of the node being yielded
    id: CategoryId,
    /// Remaining entries of the node being yielded
    entries: slice::Iter<'a, IntervalEntry<T, V>>,
}

impl<'a, T, V> Iter<'a, T, V> {
    pub(crate) fn new(root: Option<&'a Node<T, V>>) -> Self {
        let mut stack = Vec::new();
        left_link(&mut stack, root);
        Iter {
            stack,
            id: 0,
            entries: <&[IntervalEntry<T, V>]>::default().iter(),
        }
    }
}

impl<'a, T, V> Iterator for Iter<'a, T, V> {
    type Item = (CategoryId, &'a Interval<T>, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                return Some((self.id, &entry.interval, &entry.value));
            }
            let x = self.stack.pop()?;
            left_link(&mut self.stack, x.right.as_deref());
            self.id = x.key.id;
            self.entries = x.entries.iter();
        }
    }
}

/// An into iterator over the entries of a `IntervalTree`.
#[derive(Debug)]
pub struct IntoIter<T, V> {
    /// Stack for iteration
    stack: Vec<Box<Node<T, V>>>,
    /// Category of the node being drained
    id: CategoryId,
    /// Remaining entries of the node being drained
    entries: vec::IntoIter<IntervalEntry<T, V>>,
}

impl<T, V> IntoIter<T, V> {
    pub(crate) fn new(root: Link<T, V>) -> Self {
        let mut iter = IntoIter {
            stack: Vec::new(),
            id: 0,
            entries: Vec::new().into_iter(),
        };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut x: Link<T, V>) {
        while let Some(mut node) = x {
            x = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T, V> Iterator for IntoIter<T, V> {
    type Item = (CategoryId, Interval<T>, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                let (interval, value) = entry.into_parts();
                return Some((self.id, interval, value));
            }
            let mut x = self.stack.pop()?;
            self.push_left(x.right.take());
            self.id = x.key.id;
            self.entries = std::mem::take(&mut x.entries).into_iter();
        }
    }
}
