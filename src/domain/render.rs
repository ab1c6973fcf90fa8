//! Text renderings of the hierarchy.
//!
//! [`DisplayLines`] produces the indented listing shown by the menu:
//!
//! ```text
//! Hospital (root)
//!   Cardiology (department)
//!     Dr. Lee (doctor)
//!       Details: Cardiologist
//! ```
//!
//! [`TreeNodeConvert`] builds a `termtree` box-drawing view of the same tree.
use std::io::{self, Write};

use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use super::arena::{HospitalTree, TreeIterator};
use super::entities::TreeNode;

/// Spaces per depth level.
pub const INDENT_WIDTH: usize = 2;

fn indent(depth: usize) -> String {
    " ".repeat(INDENT_WIDTH * depth)
}

/// Lazy pre-order rendering, one line per item.
pub struct DisplayLines<'a> {
    nodes: TreeIterator<'a>,
    pending_detail: Option<String>,
}

impl Iterator for DisplayLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending_detail.take() {
            return Some(line);
        }
        let (_, depth, node) = self.nodes.next()?;
        if !node.detail.is_empty() {
            self.pending_detail = Some(format!("{}Details: {}", indent(depth + 1), node.detail));
        }
        Some(format!("{}{}", indent(depth), node))
    }
}

impl HospitalTree {
    pub fn display_lines(&self) -> DisplayLines<'_> {
        DisplayLines {
            nodes: self.iter(),
            pending_detail: None,
        }
    }

    /// Whole indented listing, lines joined with `\n` (no trailing newline).
    pub fn render(&self) -> String {
        self.display_lines().join("\n")
    }

    #[instrument(level = "debug", skip_all)]
    pub fn write_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.display_lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// Conversion into a `termtree` for box-drawing output.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn tree_label(node: &TreeNode) -> String {
    if node.detail.is_empty() {
        node.to_string()
    } else {
        format!("{}: {}", node, node.detail)
    }
}

impl TreeNodeConvert for HospitalTree {
    /// Built bottom-up: walking the pre-order listing backwards, every node's
    /// subtrees are already on the stack, first child on top.
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        let order: Vec<_> = self.iter().collect();
        let mut built: Vec<Tree<String>> = Vec::new();
        for (idx, _, node) in order.into_iter().rev() {
            let mut tree = Tree::new(tree_label(node));
            for _ in 0..self.children(idx).count() {
                if let Some(child) = built.pop() {
                    tree.push(child);
                }
            }
            built.push(tree);
        }
        built.pop().unwrap_or_else(|| Tree::new(String::new()))
    }
}
