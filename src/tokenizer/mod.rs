//! Tokenizer module for estimating how much context a document uses
//!
//! Two strategies sit behind the [`Tokenizer`] trait: a subword BPE encoder
//! and a whitespace word count. The strategy is chosen once, at startup, by
//! [`create_tokenizer`].

mod encoding;
mod error;
mod provider;

// Re-exports for public API
pub use encoding::{Encoding, TokenizerChoice};
pub use error::{TokenizerError, TokenizerResult};
pub use provider::tiktoken::TiktokenTokenizer;
pub use provider::whitespace::WhitespaceTokenizer;

use std::fmt;

use tracing::{debug, warn};

/// How a token count was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMethod {
    /// Exact count from a subword encoding
    Subword(Encoding),
    /// Whitespace-separated word count, an approximation
    Whitespace,
}

impl CountMethod {
    /// Whether counts from this method are only estimates
    pub fn is_approximate(&self) -> bool {
        matches!(self, CountMethod::Whitespace)
    }
}

impl fmt::Display for CountMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountMethod::Subword(encoding) => write!(f, "{}", encoding),
            CountMethod::Whitespace => write!(f, "approximate, whitespace word count"),
        }
    }
}

/// Trait defining the interface for tokenizers
pub trait Tokenizer: Send + Sync {
    /// Count tokens in the given text
    fn count_tokens(&self, text: &str) -> usize;

    /// How this tokenizer counts
    fn method(&self) -> CountMethod;
}

/// Pick the token counting strategy
///
/// With [`TokenizerChoice::Auto`] the subword encoder is used unless it fails
/// to load, in which case word counting takes over.
pub fn create_tokenizer(choice: TokenizerChoice, encoding: Encoding) -> Box<dyn Tokenizer> {
    match choice {
        TokenizerChoice::Whitespace => {
            debug!("Using whitespace token counting");
            Box::new(WhitespaceTokenizer)
        }
        TokenizerChoice::Auto => match TiktokenTokenizer::new(encoding) {
            Ok(tokenizer) => {
                debug!("Using {} token counting", encoding);
                Box::new(tokenizer)
            }
            Err(e) => {
                warn!("{}; falling back to whitespace word count", e);
                Box::new(WhitespaceTokenizer)
            }
        },
    }
}
