//! Error types for the tokenizer module

use thiserror::Error;

/// Result type for tokenizer operations
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Errors that can occur while setting up a tokenizer
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The subword encoding could not be loaded
    #[error("Failed to load encoding {encoding}: {reason}")]
    EncodingUnavailable { encoding: String, reason: String },
}
