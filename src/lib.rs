/*!
 * projectmd - Serialize a project directory into Markdown for LLM context
 *
 * This library walks a directory tree honoring its ignore file, renders the
 * tree as a Markdown list and inlines text files in fenced code blocks, all
 * wrapped in a `<project>` element ready to paste into a model's context.
 */

pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logger;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod sink;
pub mod tokenizer;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, OutputTarget};
pub use error::{ProjectMdError, Result};
pub use matcher::IgnoreMatcher;
pub use report::{Reporter, ScanReport};
pub use scanner::Scanner;
pub use sink::{deliver, Delivery};
pub use tokenizer::{create_tokenizer, Tokenizer};
pub use types::{BinaryNode, DirectoryNode, FileNode, FileType, Node};
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
