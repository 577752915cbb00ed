//! Encoding definitions for subword token counting

use clap::ValueEnum;
use strum::{Display, EnumIter};

/// Byte-pair encodings understood by the subword tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display, ValueEnum)]
pub enum Encoding {
    /// GPT-4 / GPT-3.5 encoding
    #[default]
    #[strum(serialize = "cl100k_base")]
    #[value(name = "cl100k-base")]
    Cl100kBase,

    /// GPT-4o encoding
    #[strum(serialize = "o200k_base")]
    #[value(name = "o200k-base")]
    O200kBase,

    /// Codex encoding
    #[strum(serialize = "p50k_base")]
    #[value(name = "p50k-base")]
    P50kBase,

    /// GPT-3 encoding
    #[strum(serialize = "r50k_base")]
    #[value(name = "r50k-base")]
    R50kBase,
}

/// How tokens are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
pub enum TokenizerChoice {
    /// Subword encoder, falling back to word counting if it cannot load
    #[default]
    #[strum(serialize = "auto")]
    Auto,

    /// Whitespace-separated word count only
    #[strum(serialize = "whitespace")]
    Whitespace,
}
