//! Dump the raw shape of an `IntervalTree` in the Graphviz dot language.
//!
//! Nodes are drawn as stored, with their pending shifts unresolved, which is
//! what makes the output useful when chasing a stale bound.

use std::fmt::{self, Debug, Write as _};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::node::Node;
use crate::position::Position;
use crate::tree::IntervalTree;

/// Writes the label of one value into a node.
type ValueLabel<'a, V> = &'a dyn Fn(&mut String, &V) -> fmt::Result;

impl<T, V> IntervalTree<T, V>
where
    T: Position,
    V: Debug,
{
    /// Write the tree to `path` as a dot graph, values included.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or written.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let label: ValueLabel<'_, V> = &|out, value| write!(out, " = {value:?}");
        self.write_dot(path.as_ref(), Some(label))
    }
}

impl<T, V> IntervalTree<T, V>
where
    T: Position,
{
    /// Write the tree to `path` as a dot graph, leaving the values out.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or written.
    pub fn draw_without_value(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.write_dot(path.as_ref(), None)
    }

    fn write_dot(&self, path: &Path, value_label: Option<ValueLabel<'_, V>>) -> io::Result<()> {
        let mut dot = String::from("digraph {\n    node [shape=box];\n");
        if let Some(root) = self.root.as_deref() {
            let mut next_id = 0;
            write_node(&mut dot, root, &mut next_id, value_label)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        }
        dot.push_str("}\n");
        File::create(path)?.write_all(dot.as_bytes())
    }
}

/// Writes `node` and its subtree, returning the dot id given to `node`.
fn write_node<T, V>(
    dot: &mut String,
    node: &Node<T, V>,
    next_id: &mut usize,
    value_label: Option<ValueLabel<'_, V>>,
) -> Result<usize, fmt::Error>
where
    T: Position,
{
    let id = *next_id;
    *next_id += 1;

    write!(
        dot,
        "    n{id} [label=\"({}, {:?}) max={:?} h={}",
        node.key.id, node.key.pos, node.max_high, node.height
    )?;
    if !node.shifts.is_empty() {
        write!(dot, " pending={}", node.shifts.len())?;
    }
    for entry in &node.entries {
        write!(dot, "\\n[{:?}, {:?})", entry.interval.low, entry.interval.high)?;
        if let Some(label) = value_label {
            label(&mut *dot, &entry.value)?;
        }
    }
    dot.push_str("\"];\n");

    for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
        let child_id = write_node(dot, child, next_id, value_label)?;
        writeln!(dot, "    n{id} -> n{child_id};")?;
    }
    Ok(id)
}

#[cfg(test)]
mod test {
    use std::fs;

    use crate::{Interval, IntervalTree};

    #[test]
    fn draw_writes_every_node() {
        let mut tree = IntervalTree::new();
        tree.insert(0, Interval::new(16, 21), 30);
        tree.insert(0, Interval::new(8, 9), 23);
        tree.insert(1, Interval::new(0, 23), 3);
        tree.remove_and_shift(10, 10, 4);

        let path = std::env::temp_dir().join("lazy_interval_tree_draw.dot");
        tree.draw(&path).unwrap();
        let dot = fs::read_to_string(&path).unwrap();
        assert_eq!(dot.matches("label=").count(), 3);
        assert_eq!(dot.matches("->").count(), 2);
        assert!(dot.contains("pending=1"));
        assert!(dot.contains(" = 23"));

        tree.draw_without_value(&path).unwrap();
        let dot = fs::read_to_string(&path).unwrap();
        assert!(!dot.contains(" = 23"));
        let _ = fs::remove_file(&path);
    }
}
