//! Sorted tree rendering with box-drawing connectors.

use std::io::{self, Write};

use pardu_core::TreeNode;

/// Connector before a child that has later siblings.
pub const BRANCH: &str = "├── ";
/// Connector before the final child.
pub const LAST: &str = "└── ";
/// Ancestor column when that ancestor has later siblings.
pub const VERT: &str = "│   ";
/// Ancestor column when that ancestor was the final child.
pub const SPACE: &str = "    ";

/// Format size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Prints a scanned hierarchy depth-first.
///
/// Children of each node are sorted right before they are printed, so the
/// output does not depend on the order in which concurrent visits finished.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer {
    verbose: bool,
}

impl TreeRenderer {
    /// Create a renderer. In verbose mode every line carries a size column.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Render `root`, labelled with `label` on the first line.
    pub fn render<W: Write + ?Sized>(
        &self,
        root: &mut TreeNode,
        label: &str,
        out: &mut W,
    ) -> io::Result<()> {
        if self.verbose {
            writeln!(out, "{label} {:<8}", format_size(root.display_size()))?;
        } else {
            writeln!(out, "{label}")?;
        }

        let mut prefix = String::new();
        self.render_children(root, &mut prefix, out)
    }

    /// Render into a string.
    pub fn render_to_string(&self, root: &mut TreeNode, label: &str) -> String {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.render(root, label, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    fn render_children<W: Write + ?Sized>(
        &self,
        node: &mut TreeNode,
        prefix: &mut String,
        out: &mut W,
    ) -> io::Result<()> {
        node.sort_children();
        let count = node.children.len();

        for (i, child) in node.children.iter_mut().enumerate() {
            let is_last = i + 1 == count;
            self.render_line(child, prefix, is_last, out)?;

            if child.is_dir() && !child.children.is_empty() {
                let len = prefix.len();
                prefix.push_str(if is_last { SPACE } else { VERT });
                self.render_children(child, prefix, out)?;
                prefix.truncate(len);
            }
        }
        Ok(())
    }

    fn render_line<W: Write + ?Sized>(
        &self,
        node: &TreeNode,
        prefix: &str,
        is_last: bool,
        out: &mut W,
    ) -> io::Result<()> {
        let connector = if is_last { LAST } else { BRANCH };
        let marker = if node.is_dir() { "/" } else { "" };

        if self.verbose {
            writeln!(
                out,
                "{prefix}{connector}{:<8} {}{marker}",
                format_size(node.display_size()),
                node.name
            )
        } else {
            writeln!(out, "{prefix}{connector}{}{marker}", node.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let mut b = TreeNode::new_directory("b", 0);
        b.push_child(TreeNode::new_file("c.txt", 20));

        let mut root = TreeNode::new_directory("r", 0);
        root.push_child(TreeNode::new_file("a.txt", 10));
        root.push_child(b);
        root
    }

    #[test]
    fn test_render_sorted_tree() {
        let mut root = sample();
        let text = TreeRenderer::new(false).render_to_string(&mut root, "/r");

        assert_eq!(text, "/r\n├── b/\n│   └── c.txt\n└── a.txt\n");
    }

    #[test]
    fn test_render_last_directory_uses_blank_column() {
        let mut inner = TreeNode::new_directory("z", 0);
        inner.push_child(TreeNode::new_file("deep", 1));
        let mut root = TreeNode::new_directory("r", 0);
        root.push_child(inner);

        let text = TreeRenderer::new(false).render_to_string(&mut root, "r");
        assert_eq!(text, "r\n└── z/\n    └── deep\n");
    }

    #[test]
    fn test_render_verbose_sizes() {
        let mut root = sample();
        let text = TreeRenderer::new(true).render_to_string(&mut root, "/r");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], format!("/r {:<8}", format_size(30)));
        assert_eq!(lines[1], format!("├── {:<8} b/", format_size(20)));
        assert_eq!(lines[2], format!("│   └── {:<8} c.txt", format_size(20)));
        assert_eq!(lines[3], format!("└── {:<8} a.txt", format_size(10)));
    }

    #[test]
    fn test_render_ignores_arrival_order() {
        let mut forward = TreeNode::new_directory("r", 0);
        let mut backward = TreeNode::new_directory("r", 0);
        let names = ["m", "a", "z", "k"];
        for name in names {
            forward.push_child(TreeNode::new_file(name, 1));
        }
        for name in names.iter().rev() {
            backward.push_child(TreeNode::new_file(*name, 1));
        }

        let renderer = TreeRenderer::new(false);
        assert_eq!(
            renderer.render_to_string(&mut forward, "r"),
            renderer.render_to_string(&mut backward, "r")
        );
    }

    #[test]
    fn test_render_single_file_root() {
        let mut root = TreeNode::new_file("a.txt", 10);
        let text = TreeRenderer::new(false).render_to_string(&mut root, "a.txt");
        assert_eq!(text, "a.txt\n");
    }
}
