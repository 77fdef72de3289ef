//! Token types and utilities for text analysis.
//!
//! A [`Token`] is the unit that flows from the tokenizer through the token
//! filters of an analysis pipeline. [`TokenStream`] is the boxed iterator
//! passed between stages.
//!
//! # Examples
//!
//! ```
//! use vietsent::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("sản phẩm", 1, 4, 15).with_token_type(TokenType::Compound);
//! assert_eq!(token.text, "sản phẩm");
//! assert_eq!(token.token_type, TokenType::Compound);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single linguistic unit after segmentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the analyzed text
    pub start_offset: usize,

    /// The byte offset where this token ends in the analyzed text
    pub end_offset: usize,

    /// Classification of the token content
    pub token_type: TokenType,

    /// The text before a filter rewrote it, if any filter did
    pub original_text: Option<String>,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// A single syllable or word made of letters and digits
    Word,
    /// Several syllables joined into one lexical unit by the segmenter
    Compound,
    /// Numeric values
    Num,
    /// Punctuation and symbol runs
    Punctuation,
    /// Other/unknown token types
    Other,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            token_type: TokenType::Other,
            original_text: None,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Replace the text, remembering the first pre-rewrite form.
    pub fn rewrite<S: Into<String>>(mut self, text: S) -> Self {
        let text = text.into();
        if text != self.text {
            let previous = std::mem::replace(&mut self.text, text);
            self.original_text.get_or_insert(previous);
        }
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("tốt", 0);
        assert_eq!(token.text, "tốt");
        assert_eq!(token.position, 0);
        assert_eq!(token.token_type, TokenType::Other);
        assert!(token.original_text.is_none());
    }

    #[test]
    fn test_rewrite_keeps_first_original() {
        let token = Token::new("SP", 0).rewrite("sp").rewrite("sản phẩm");
        assert_eq!(token.text, "sản phẩm");
        assert_eq!(token.original_text.as_deref(), Some("SP"));

        let unchanged = Token::new("tốt", 0).rewrite("tốt");
        assert!(unchanged.original_text.is_none());
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("rất", 0), Token::new("tốt", 1)];
        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(format!("{}", collected[1]), "tốt");
    }
}
