/*!
 * Ignore-file handling for projectmd
 *
 * Compiles gitignore-style patterns from a single root-level ignore file
 * into a predicate over paths relative to the traversal root.
 */

use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

/// Compiled ignore rules
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    rules: Gitignore,
}

impl IgnoreMatcher {
    /// A matcher that ignores nothing
    pub fn empty() -> Self {
        Self {
            rules: Gitignore::empty(),
        }
    }

    /// Compile ignore-file contents, then any extra patterns, in order
    ///
    /// Later lines override earlier ones, so `extra` patterns win over the
    /// file. Lines that fail to parse are skipped.
    pub fn compile(root: &Path, contents: &str, extra: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        let lines = contents.lines().chain(extra.iter().map(String::as_str));
        for line in lines {
            if let Err(e) = builder.add_line(None, line) {
                warn!("Invalid ignore pattern '{}': {}", line, e);
            }
        }

        match builder.build() {
            Ok(rules) => {
                debug!(
                    "Compiled {} ignore rules ({} negations)",
                    rules.num_ignores(),
                    rules.num_whitelists()
                );
                Self { rules }
            }
            Err(e) => {
                warn!("Failed to compile ignore rules, ignoring nothing: {}", e);
                Self::empty()
            }
        }
    }

    /// Load rules from an ignore file
    ///
    /// A missing or unreadable file yields a matcher that ignores nothing
    /// (apart from `extra`).
    pub fn from_file(root: &Path, ignore_file: &Path, extra: &[String]) -> Self {
        let contents = match fs::read_to_string(ignore_file) {
            Ok(contents) => {
                debug!("Loaded ignore file {}", ignore_file.display());
                contents
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No ignore file at {}", ignore_file.display());
                String::new()
            }
            Err(e) => {
                warn!(
                    "Could not read ignore file {}, continuing without it: {}",
                    ignore_file.display(),
                    e
                );
                String::new()
            }
        };

        Self::compile(root, &contents, extra)
    }

    /// Whether the entry at `rel_path` (relative to the root) is ignored
    ///
    /// A path under an ignored directory is ignored too.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.rules.is_empty() || rel_path.as_os_str().is_empty() {
            return false;
        }
        self.rules
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }
}
