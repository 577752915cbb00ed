//! Token counting strategies

pub mod tiktoken;
pub mod whitespace;
