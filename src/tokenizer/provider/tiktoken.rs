//! Subword token counting using tiktoken

use tiktoken_rs::CoreBPE;

use crate::tokenizer::encoding::Encoding;
use crate::tokenizer::error::{TokenizerError, TokenizerResult};
use crate::tokenizer::{CountMethod, Tokenizer};

/// BPE tokenizer backed by tiktoken-rs
pub struct TiktokenTokenizer {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Load the given encoding
    pub fn new(encoding: Encoding) -> TokenizerResult<Self> {
        let bpe = match encoding {
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        }
        .map_err(|e| TokenizerError::EncodingUnavailable {
            encoding: encoding.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { encoding, bpe })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn method(&self) -> CountMethod {
        CountMethod::Subword(self.encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_subword_tokens() {
        let tokenizer = TiktokenTokenizer::new(Encoding::Cl100kBase).unwrap();
        assert_eq!(tokenizer.count_tokens(""), 0);
        let count = tokenizer.count_tokens("Hello, world!");
        assert!(count > 0 && count < 13);
        assert_eq!(tokenizer.method(), CountMethod::Subword(Encoding::Cl100kBase));
    }
}
