//! Tree-building directory visitor.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use pardu_core::TreeNode;
use tracing::{debug, trace};

use crate::fs;
use crate::path_buf::PathBuffer;
use crate::walker::Walker;

impl Walker<'_> {
    /// Visit directory `dir` and return its node with the whole subtree
    /// attached. `own_size` is the directory's own measured size.
    ///
    /// Returns `None` only when `depth` is already past the ceiling. A
    /// directory that cannot be opened comes back as a childless node.
    /// Counters are updated exactly as in [`Walker::walk`]; the root
    /// (depth 0) is not counted as a directory.
    pub(crate) fn build(
        &self,
        dir: &Path,
        name: &OsStr,
        own_size: u64,
        depth: u32,
    ) -> Option<TreeNode> {
        if depth > self.config.max_depth {
            debug!(path = %dir.display(), depth, "depth limit reached");
            return None;
        }
        if depth > 0 {
            self.totals.record_dir();
        }

        let mut node = TreeNode::new_directory(&*name.to_string_lossy(), own_size);

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                trace!(path = %dir.display(), error = %err, "cannot open directory");
                return Some(node);
            }
        };

        let mut buf = PathBuffer::new(dir);
        let mut files = Vec::new();
        let subdirs = Mutex::new(Vec::new());

        rayon::scope(|s| {
            for entry in entries {
                let name = entry.file_name();
                let path = buf.join(&name);

                let Some(meta) = self.admit(&entry, &name, path) else {
                    continue;
                };
                let size = self.measure(&meta);

                if meta.is_dir {
                    let child = path.to_path_buf();
                    let subdirs = &subdirs;
                    s.spawn(move |_| {
                        if let Some(node) = self.build(&child, &name, size, depth + 1) {
                            subdirs
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .push(node);
                        }
                    });
                } else {
                    self.totals.record_file(size);
                    files.push(TreeNode::new_file(&*name.to_string_lossy(), size));
                }
            }
        });

        let mut children = subdirs.into_inner().unwrap_or_else(PoisonError::into_inner);
        children.append(&mut files);
        node.children = children;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::totals::ScanTotals;
    use pardu_core::{ExclusionSet, ScanConfig, ScanSummary};
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn build(root: &Path, config: &ScanConfig) -> (Option<TreeNode>, ScanSummary) {
        let excludes = ExclusionSet::new(&config.exclude_patterns).unwrap();
        let totals = ScanTotals::new();
        let console = Console::null();
        let walker = Walker::new(config, &excludes, &totals, &console);
        let node = walker.build(root, OsStr::new("root"), 0, 0);
        (node, totals.snapshot())
    }

    fn apparent() -> ScanConfig {
        ScanConfig::builder().apparent_size(true).build().unwrap()
    }

    fn child<'n>(node: &'n TreeNode, name: &str) -> &'n TreeNode {
        node.children
            .iter()
            .find(|c| c.name.as_str() == name)
            .unwrap_or_else(|| panic!("no child named {name}"))
    }

    #[test]
    fn test_build_mirrors_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        stdfs::create_dir(root.join("b")).unwrap();
        stdfs::write(root.join("a.txt"), "0123456789").unwrap();
        stdfs::write(root.join("b/c.txt"), "01234567890123456789").unwrap();

        let (node, summary) = build(root, &apparent());
        let node = node.unwrap();

        assert!(node.is_dir());
        assert_eq!(node.child_count(), 2);
        assert_eq!(child(&node, "a.txt").size, 10);

        let b = child(&node, "b");
        assert!(b.is_dir());
        assert_eq!(child(b, "c.txt").size, 20);

        assert_eq!(summary.file_count, 2);
        assert_eq!(summary.dir_count, 1);
        assert_eq!(summary.total_size, 30);
        assert_eq!(node.descendant_counts(), (2, 1));
    }

    #[test]
    fn test_build_past_ceiling_returns_none() {
        let temp = TempDir::new().unwrap();
        let config = apparent();
        let excludes = ExclusionSet::empty();
        let totals = ScanTotals::new();
        let console = Console::null();
        let walker = Walker::new(&config, &excludes, &totals, &console);

        let node = walker.build(temp.path(), OsStr::new("x"), 0, config.max_depth + 1);
        assert!(node.is_none());
        assert_eq!(totals.snapshot(), ScanSummary::default());
    }

    #[test]
    fn test_build_unreadable_directory_is_childless() {
        let temp = TempDir::new().unwrap();
        let (node, summary) = build(&temp.path().join("vanished"), &apparent());

        let node = node.unwrap();
        assert!(node.is_dir());
        assert_eq!(node.child_count(), 0);
        assert_eq!(summary, ScanSummary::default());
    }

    #[test]
    fn test_build_depth_limit_drops_deep_subtree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        stdfs::create_dir_all(root.join("d1/d2")).unwrap();
        stdfs::write(root.join("d1/d2/f"), "x").unwrap();

        let mut config = apparent();
        config.max_depth = 1;

        let (node, summary) = build(root, &config);
        let node = node.unwrap();
        let d1 = child(&node, "d1");
        assert_eq!(d1.child_count(), 0);
        assert_eq!(summary.dir_count, 1);
        assert_eq!(summary.file_count, 0);
    }

    #[test]
    fn test_build_keeps_files_of_deepest_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        stdfs::create_dir_all(root.join("d1/d2")).unwrap();
        stdfs::write(root.join("d1/kept"), "12").unwrap();

        let mut config = apparent();
        config.max_depth = 1;

        let (node, summary) = build(root, &config);
        let d1 = child(node.as_ref().unwrap(), "d1");
        assert_eq!(d1.child_count(), 1);
        assert!(child(d1, "kept").is_file());
        assert_eq!(summary.file_count, 1);
        assert_eq!(summary.total_size, 2);
    }

    #[test]
    fn test_build_many_siblings_none_lost() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for i in 0..100 {
            let dir = root.join(format!("dir{i:03}"));
            stdfs::create_dir(&dir).unwrap();
            stdfs::write(dir.join("f"), "x").unwrap();
        }

        let (node, summary) = build(root, &apparent());
        let node = node.unwrap();
        assert_eq!(node.child_count(), 100);
        assert!(node.children.iter().all(|c| c.child_count() == 1));
        assert_eq!(summary.dir_count, 100);
        assert_eq!(summary.file_count, 100);
    }
}
