//! `lazy_interval_tree` is an interval tree whose positions can be shifted in bulk.
//!
//! Intervals are keyed by a category id and their low bound, and stored in an
//! AVL tree augmented with the greatest high bound of every subtree, so each
//! modification takes O(logN) time.
//!
//! [`IntervalTree::remove_and_shift`] removes every interval overlapping a
//! range and then moves every remaining interval past the range by a delta,
//! the way markers must follow an edit of the text they annotate. The move is
//! not applied eagerly: it is queued on the root and pushed one level down
//! each time an operation visits a node, so its cost is spread over the
//! operations that actually touch the affected region.
//!
//! # Example
//!
//! ```rust
//! use lazy_interval_tree::{Interval, IntervalTree};
//!
//! let mut tree = IntervalTree::new();
//! tree.insert(1, Interval::new(10, 20), "a");
//! tree.insert(1, Interval::new(20, 25), "b");
//!
//! // Insert five positions at 20: "b" moves, "a" stays.
//! tree.remove_and_shift(20, 20, 5);
//! assert_eq!(tree.find_largest(1, 10), Some(&"a"));
//! assert_eq!(tree.find_largest(1, 25), Some(&"b"));
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for the tree, pending shifts included.
//! - `graphviz`: [`IntervalTree::draw`] writes the raw tree as a dot file.

mod entry;
#[cfg(feature = "graphviz")]
mod graphviz;
mod interval;
mod iter;
mod node;
mod position;
mod tree;


pub use entry::IntervalEntry;
pub use interval::Interval;
pub use iter::{IntoIter, Iter};
pub use node::CategoryId;
pub use position::Position;
pub use tree::IntervalTree;
