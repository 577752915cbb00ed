/*!
 * Configuration handling for projectmd
 */

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::{ProjectMdError, Result};
use crate::tokenizer::{Encoding, TokenizerChoice};
use crate::utils::DEFAULT_IGNORE_FILE;

/// Where the assembled document goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputKind {
    /// System clipboard (default)
    #[default]
    Clipboard,
    /// Standard output
    Stdout,
    /// A file given by --output-file
    File,
}

/// Resolved destination for the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Clipboard,
    Stdout,
    File(PathBuf),
}

/// Command-line arguments for projectmd
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projectmd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Serialize a project directory into Markdown for LLM context",
    long_about = "Walks a directory, honors its .gitignore, renders a tree of the project and inlines every text file in fenced code blocks. The result is wrapped in <project> tags and copied to the clipboard."
)]
pub struct Args {
    /// Project root to serialize
    #[clap(default_value = ".")]
    pub directory: PathBuf,

    /// Where to deliver the document
    #[clap(short, long, value_enum, default_value_t = OutputKind::default())]
    pub output: OutputKind,

    /// Output file path (used with --output file)
    #[clap(short = 'f', long)]
    pub output_file: Option<PathBuf>,

    /// Ignore file to use instead of <DIRECTORY>/.gitignore
    #[clap(long)]
    pub ignore_file: Option<PathBuf>,

    /// Do not read any ignore file
    #[clap(long)]
    pub no_ignore_file: bool,

    /// Extra gitignore-style patterns, applied after the ignore file
    #[clap(long = "ignore", value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Subword encoding used for token counting
    #[clap(long, value_enum, default_value_t = Encoding::default())]
    pub encoding: Encoding,

    /// Token counting strategy
    #[clap(long, value_enum, default_value_t = TokenizerChoice::default())]
    pub tokenizer: TokenizerChoice,

    /// Print a detailed statistics table
    #[clap(long)]
    pub stats: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Traversal root
    pub target_dir: PathBuf,

    /// Destination of the document
    pub output: OutputTarget,

    /// Ignore file to load, if any
    pub ignore_file: Option<PathBuf>,

    /// Whether `ignore_file` was given explicitly
    pub ignore_file_explicit: bool,

    /// Patterns applied after the ignore file
    pub ignore_patterns: Vec<String>,

    /// Encoding for subword token counting
    pub encoding: Encoding,

    /// Token counting strategy
    pub tokenizer: TokenizerChoice,

    /// Print the statistics table
    pub stats: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let output = match args.output {
            OutputKind::Clipboard => OutputTarget::Clipboard,
            OutputKind::Stdout => OutputTarget::Stdout,
            OutputKind::File => match args.output_file {
                Some(path) => OutputTarget::File(path),
                None => crate::bail!(Config, "--output file requires --output-file <PATH>"),
            },
        };

        let ignore_file_explicit = args.ignore_file.is_some();
        let ignore_file = if args.no_ignore_file {
            None
        } else {
            Some(
                args.ignore_file
                    .unwrap_or_else(|| args.directory.join(DEFAULT_IGNORE_FILE)),
            )
        };

        Ok(Self {
            target_dir: args.directory,
            output,
            ignore_file,
            ignore_file_explicit,
            ignore_patterns: args.ignore_patterns,
            encoding: args.encoding,
            tokenizer: args.tokenizer,
            stats: args.stats,
        })
    }

    /// Configuration with defaults for a given root
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let target_dir = root.into();
        Self {
            ignore_file: Some(target_dir.join(DEFAULT_IGNORE_FILE)),
            target_dir,
            output: OutputTarget::Clipboard,
            ignore_file_explicit: false,
            ignore_patterns: Vec::new(),
            encoding: Encoding::default(),
            tokenizer: TokenizerChoice::default(),
            stats: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            return Err(ProjectMdError::PathNotFound(format!(
                "Target directory not found: {}",
                self.target_dir.display()
            )));
        }

        if let OutputTarget::File(path) = &self.output {
            if let Some(parent) = path.parent() {
                if parent != Path::new("") && !parent.is_dir() {
                    return Err(ProjectMdError::PathNotFound(format!(
                        "Output directory not found: {}",
                        parent.display()
                    )));
                }
            }
        }

        // A missing default .gitignore just means "no rules"
        if let (true, Some(path)) = (self.ignore_file_explicit, &self.ignore_file) {
            if !path.is_file() {
                return Err(ProjectMdError::PathNotFound(format!(
                    "Ignore file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
