/*!
 * Markdown writer for projectmd
 *
 * Renders the project tree as a nested bullet list, gathers file contents
 * into fenced code blocks and assembles the final `<project>` document.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tracing::warn;

use crate::types::{DirectoryNode, Node};
use crate::utils::to_slash;

/// Indentation added per nesting level in the tree section
const INDENT: &str = "  ";

/// Note emitted in place of binary content
pub const BINARY_NOTICE: &str = "_(binary file, not included)_";

/// Fence language tags by lower-cased file extension
static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("py", "python"),
        ("pyi", "python"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("jsx", "jsx"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("json", "json"),
        ("html", "html"),
        ("htm", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("rs", "rust"),
        ("toml", "toml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("md", "markdown"),
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "zsh"),
        ("go", "go"),
        ("java", "java"),
        ("kt", "kotlin"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("hpp", "cpp"),
        ("cs", "csharp"),
        ("rb", "ruby"),
        ("php", "php"),
        ("swift", "swift"),
        ("sql", "sql"),
        ("xml", "xml"),
        ("lua", "lua"),
    ])
});

/// Fence language tag for a file name, empty if the extension is unknown
pub fn language_for(name: &str) -> &'static str {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .and_then(|ext| LANGUAGES.get(ext.as_str()).copied())
        .unwrap_or("")
}

/// Backtick fence long enough that nothing inside `content` can close it
fn fence_for(content: &str) -> String {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}

/// Markdown writer for the project tree
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    /// Root the tree's relative paths are resolved against
    root: PathBuf,
}

impl MarkdownWriter {
    /// Create a writer reading files below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Render the tree as a nested Markdown bullet list
    pub fn render_tree(&self, root: &DirectoryNode) -> String {
        let mut lines = Vec::new();
        Self::render_directory(root, 0, &mut lines);
        lines.join("\n")
    }

    fn render_directory(dir: &DirectoryNode, depth: usize, lines: &mut Vec<String>) {
        let indent = INDENT.repeat(depth);
        for node in &dir.contents {
            match node {
                Node::Directory(sub) => {
                    lines.push(format!("{}- **{}/**", indent, sub.name));
                    Self::render_directory(sub, depth + 1, lines);
                }
                leaf => lines.push(format!("{}- {}", indent, leaf.name())),
            }
        }
    }

    /// Gather file contents: one heading and fenced block per file
    pub fn gather_contents(&self, root: &DirectoryNode) -> String {
        let mut blocks = Vec::new();
        self.gather_directory(root, &mut blocks);
        blocks.join("\n")
    }

    fn gather_directory(&self, dir: &DirectoryNode, blocks: &mut Vec<String>) {
        for node in &dir.contents {
            match node {
                Node::Directory(sub) => self.gather_directory(sub, blocks),
                Node::File(file) => {
                    let content = self.read_text(&file.path);
                    blocks.push(Self::text_block(&to_slash(&file.path), &file.name, &content));
                }
                Node::Binary(bin) => {
                    blocks.push(format!("## {}\n\n{}\n", to_slash(&bin.path), BINARY_NOTICE));
                }
            }
        }
    }

    /// Read a text file, substituting the error message on failure
    fn read_text(&self, rel_path: &Path) -> String {
        match fs::read_to_string(self.root.join(rel_path)) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", to_slash(rel_path), e);
                format!("Could not read file: {}", e)
            }
        }
    }

    fn text_block(path: &str, name: &str, content: &str) -> String {
        let fence = fence_for(content);
        let mut block = format!("## {}\n\n{}{}\n", path, fence, language_for(name));
        block.push_str(content);
        if !content.is_empty() && !content.ends_with('\n') {
            block.push('\n');
        }
        block.push_str(&fence);
        block.push('\n');
        block
    }

    /// Assemble both sections into the final document
    pub fn assemble(&self, tree_section: &str, contents_section: &str) -> String {
        format!(
            "<project>\n# Project Structure\n\n{}\n\n# File Contents\n\n{}\n</project>\n",
            tree_section, contents_section
        )
    }

    /// Render, gather and assemble in one go
    pub fn write(&self, root: &DirectoryNode) -> String {
        self.assemble(&self.render_tree(root), &self.gather_contents(root))
    }

    /// Total on-disk size of the files inlined as text
    pub fn text_bytes(&self, root: &DirectoryNode) -> u64 {
        root.contents
            .iter()
            .map(|node| match node {
                Node::Directory(sub) => self.text_bytes(sub),
                Node::File(file) => fs::metadata(self.root.join(&file.path))
                    .map(|m| m.len())
                    .unwrap_or(0),
                Node::Binary(_) => 0,
            })
            .sum()
    }
}
