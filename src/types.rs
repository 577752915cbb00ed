/*!
 * Core types and data structures for projectmd
 */

use std::path::{Path, PathBuf};

use crate::utils::to_slash;

/// Kind of a filesystem entry that made it into the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Directory containing other entries
    Directory,
    /// File whose content can be inlined
    TextFile,
    /// File whose content is never inlined
    BinaryFile,
}

/// Represents a directory in the project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name (empty for the root)
    pub name: String,
    /// Relative path from scan root
    pub path: PathBuf,
    /// Directory contents, ordered by name
    pub contents: Vec<Node>,
}

/// Represents a text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name
    pub name: String,
    /// Relative path from scan root
    pub path: PathBuf,
}

/// Represents a binary file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode {
    /// File name
    pub name: String,
    /// Relative path from scan root
    pub path: PathBuf,
}

/// A generic tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Directory node
    Directory(DirectoryNode),
    /// Text file node
    File(FileNode),
    /// Binary file node
    Binary(BinaryNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
            Node::Binary(bin) => &bin.name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Node::Directory(dir) => &dir.path,
            Node::File(file) => &file.path,
            Node::Binary(bin) => &bin.path,
        }
    }

    pub fn kind(&self) -> FileType {
        match self {
            Node::Directory(_) => FileType::Directory,
            Node::File(_) => FileType::TextFile,
            Node::Binary(_) => FileType::BinaryFile,
        }
    }
}

impl DirectoryNode {
    /// Create an empty directory node
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            contents: Vec::new(),
        }
    }

    /// Relative paths of every leaf (text or binary file) in traversal order,
    /// using forward slashes
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaf_paths(&mut paths);
        paths
    }

    fn collect_leaf_paths(&self, out: &mut Vec<String>) {
        for node in &self.contents {
            match node {
                Node::Directory(dir) => dir.collect_leaf_paths(out),
                leaf => out.push(to_slash(leaf.path())),
            }
        }
    }

    /// Count (directories, text files, binary files) below this node
    pub fn counts(&self) -> (usize, usize, usize) {
        self.contents
            .iter()
            .fold((0, 0, 0), |(dirs, text, bin), node| match node {
                Node::Directory(dir) => {
                    let (d, t, b) = dir.counts();
                    (dirs + d + 1, text + t, bin + b)
                }
                Node::File(_) => (dirs, text + 1, bin),
                Node::Binary(_) => (dirs, text, bin + 1),
            })
    }
}
