//! Tree nodes built in tree mode.

use std::cmp::Ordering;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file (or anything that is not a directory).
    File,
    /// Directory.
    Directory,
}

/// A single file or directory in a scanned hierarchy.
///
/// A directory's `size` is its own metadata size only. The size shown for
/// a directory is [`TreeNode::display_size`], folded over the subtree when
/// it is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Entry name (not full path).
    pub name: CompactString,

    /// Node type.
    pub kind: NodeKind,

    /// Measured size of this entry alone.
    pub size: u64,

    /// Children (directories only). Arrival order until sorted.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new file node.
    pub fn new_file(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            size,
            children: Vec::new(),
        }
    }

    /// Create a new, childless directory node.
    pub fn new_directory(name: impl Into<CompactString>, own_size: u64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            size: own_size,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Append a child. Files never take children.
    pub fn push_child(&mut self, child: TreeNode) {
        debug_assert!(self.is_dir(), "file node '{}' cannot have children", self.name);
        if self.is_dir() {
            self.children.push(child);
        }
    }

    /// Own size plus the display size of every child, recursively.
    pub fn display_size(&self) -> u64 {
        match self.kind {
            NodeKind::File => self.size,
            NodeKind::Directory => self
                .children
                .iter()
                .fold(self.size, |total, child| total + child.display_size()),
        }
    }

    /// Order direct children: directories first, then by name bytes.
    pub fn sort_children(&mut self) {
        self.children.sort_by(Self::listing_order);
    }

    /// Comparator used for listings.
    pub fn listing_order(a: &TreeNode, b: &TreeNode) -> Ordering {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name.as_bytes().cmp(b.name.as_bytes()))
    }

    /// Count (files, directories) below this node, excluding itself.
    pub fn descendant_counts(&self) -> (u64, u64) {
        self.children.iter().fold((0, 0), |(files, dirs), child| {
            if child.is_dir() {
                let (f, d) = child.descendant_counts();
                (files + f, dirs + d + 1)
            } else {
                (files + 1, dirs)
            }
        })
    }
}
