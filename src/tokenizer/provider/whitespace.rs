//! Approximate token counting by whitespace-separated words
//!
//! Used when no subword encoder is available. Word counts undercount real
//! model tokens, so the result is an estimate.

use crate::tokenizer::{CountMethod, Tokenizer};

#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    fn method(&self) -> CountMethod {
        CountMethod::Whitespace
    }
}
