/*!
 * Directory scanning: builds the ordered project tree
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::classifier::classify;
use crate::config::Config;
use crate::error::{ProjectMdError, Result};
use crate::matcher::IgnoreMatcher;
use crate::types::{BinaryNode, DirectoryNode, FileNode, FileType, Node};
use crate::utils::{to_slash, ALWAYS_EXCLUDED_DIRS};

/// Scanner for directory contents
pub struct Scanner {
    /// Traversal root
    root: PathBuf,
    /// Compiled ignore rules
    matcher: IgnoreMatcher,
    /// Progress spinner
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(root: impl Into<PathBuf>, matcher: IgnoreMatcher, progress: Arc<ProgressBar>) -> Self {
        Self {
            root: root.into(),
            matcher,
            progress,
        }
    }

    /// Create a scanner from configuration, loading the ignore file it names
    pub fn from_config(config: &Config, progress: Arc<ProgressBar>) -> Self {
        let matcher = match &config.ignore_file {
            Some(path) => {
                IgnoreMatcher::from_file(&config.target_dir, path, &config.ignore_patterns)
            }
            None => IgnoreMatcher::compile(&config.target_dir, "", &config.ignore_patterns),
        };
        Self::new(config.target_dir.clone(), matcher, progress)
    }

    /// Scan the root directory and return the project tree
    ///
    /// Fails only if the root itself cannot be listed.
    pub fn scan(&self) -> Result<DirectoryNode> {
        let mut ancestors = Vec::new();
        if let Ok(canonical) = fs::canonicalize(&self.root) {
            ancestors.push(canonical);
        }
        self.scan_directory(&self.root, Path::new(""), &mut ancestors)
    }

    /// Scan a directory and return its node representation
    fn scan_directory(
        &self,
        abs_path: &Path,
        rel_path: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<DirectoryNode> {
        let name = rel_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mut dir_node = DirectoryNode::new(name, rel_path);

        let walker = WalkDir::new(abs_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|source| ProjectMdError::Traversal {
                path: abs_path.to_path_buf(),
                source,
            })?;
            let entry_name = entry.file_name().to_string_lossy().to_string();
            let entry_path = entry.path();
            let entry_rel = rel_path.join(&entry_name);
            // follows symlinks
            let is_dir = entry_path.is_dir();

            if is_dir && ALWAYS_EXCLUDED_DIRS.contains(&entry_name.as_str()) {
                trace!("Skipping excluded directory {}", to_slash(&entry_rel));
                continue;
            }

            if self.matcher.is_ignored(&entry_rel, is_dir) {
                debug!("Ignoring {}", to_slash(&entry_rel));
                continue;
            }

            if is_dir {
                if let Some(node) = self.scan_subdirectory(entry_path, &entry_rel, ancestors) {
                    dir_node.contents.push(Node::Directory(node));
                }
            } else {
                dir_node.contents.push(self.process_file(entry_path, entry_rel, entry_name));
            }
        }

        Ok(dir_node)
    }

    /// Recurse into a subdirectory, skipping it if it loops back or cannot be read
    fn scan_subdirectory(
        &self,
        abs_path: &Path,
        rel_path: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> Option<DirectoryNode> {
        let canonical = fs::canonicalize(abs_path).ok();
        if let Some(canonical) = &canonical {
            if ancestors.contains(canonical) {
                warn!(
                    "Skipping {}: symlink loops back to {}",
                    to_slash(rel_path),
                    canonical.display()
                );
                return None;
            }
        }

        let pushed = canonical.map(|c| ancestors.push(c)).is_some();
        let result = self.scan_directory(abs_path, rel_path, ancestors);
        if pushed {
            ancestors.pop();
        }

        match result {
            Ok(node) => Some(node),
            Err(e) => {
                warn!("Error processing directory {}: {}", to_slash(rel_path), e);
                None
            }
        }
    }

    /// Classify a single file and return its node representation
    fn process_file(&self, abs_path: &Path, rel_path: PathBuf, name: String) -> Node {
        self.progress.inc(1);
        self.progress.set_message(to_slash(&rel_path));

        leaf_node(classify(abs_path), name, rel_path)
    }
}

/// Build the leaf node for a classified file; only text is ever inlined
fn leaf_node(kind: FileType, name: String, path: PathBuf) -> Node {
    match kind {
        FileType::TextFile => Node::File(FileNode { name, path }),
        FileType::BinaryFile | FileType::Directory => Node::Binary(BinaryNode { name, path }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn scanner(root: &Path, ignore: &str) -> Scanner {
        Scanner::new(
            root,
            IgnoreMatcher::compile(root, ignore, &[]),
            Arc::new(ProgressBar::hidden()),
        )
    }

    #[test]
    fn test_leaf_node_only_inlines_text() {
        let text = leaf_node(FileType::TextFile, "a.py".into(), PathBuf::from("a.py"));
        assert_eq!(text.kind(), FileType::TextFile);

        let bin = leaf_node(FileType::BinaryFile, "b.bin".into(), PathBuf::from("b.bin"));
        assert_eq!(bin.kind(), FileType::BinaryFile);

        let odd = leaf_node(FileType::Directory, "c".into(), PathBuf::from("c"));
        assert_eq!(odd.kind(), FileType::BinaryFile);
    }

    fn names(dir: &DirectoryNode) -> Vec<&str> {
        dir.contents.iter().map(Node::name).collect()
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let dir = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "C.txt", "_x.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("m")).unwrap();

        let tree = scanner(dir.path(), "").scan().unwrap();
        assert_eq!(names(&tree), vec!["C.txt", "_x.txt", "a.txt", "b.txt", "m"]);
    }

    #[test]
    fn test_empty_directory_kept() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let tree = scanner(dir.path(), "").scan().unwrap();
        assert_eq!(
            tree.contents,
            vec![Node::Directory(DirectoryNode::new("empty", "empty"))]
        );
    }

    #[test]
    fn test_excluded_dirs_only_when_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git").join("objects")).unwrap();
        fs::create_dir_all(dir.path().join("pkg").join("__pycache__")).unwrap();
        fs::write(dir.path().join("pkg").join("__pycache__").join("m.pyc"), [0u8]).unwrap();
        // a plain file named like an excluded directory is kept
        fs::write(dir.path().join("pkg").join(".git"), "gitdir: ../.git").unwrap();

        let tree = scanner(dir.path(), "!.git\n!__pycache__\n").scan().unwrap();
        assert_eq!(names(&tree), vec!["pkg"]);
        assert_eq!(tree.leaf_paths(), vec!["pkg/.git"]);
    }

    #[test]
    fn test_ignored_directory_not_descended() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("target").join("debug")).unwrap();
        fs::write(dir.path().join("target").join("debug").join("app"), "x").unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        let tree = scanner(dir.path(), "target/\n").scan().unwrap();
        assert_eq!(names(&tree), vec!["main.rs"]);
    }

    #[test]
    fn test_relative_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a").join("b")).unwrap();
        fs::write(dir.path().join("a").join("b").join("c.txt"), "c").unwrap();

        let tree = scanner(dir.path(), "").scan().unwrap();
        assert_eq!(tree.path, PathBuf::from(""));
        assert_eq!(tree.leaf_paths(), vec!["a/b/c.txt"]);
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let result = scanner(&dir.path().join("missing"), "").scan();
        assert!(matches!(result, Err(ProjectMdError::Traversal { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_skipped() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("f.txt"), "f").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("loop")).unwrap();

        let tree = scanner(dir.path(), "").scan().unwrap();
        assert_eq!(tree.leaf_paths(), vec!["sub/f.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_binary() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
            .unwrap();

        let tree = scanner(dir.path(), "").scan().unwrap();
        assert_eq!(tree.contents[0].kind(), FileType::BinaryFile);
    }
}
