//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split the char-filtered string into tokens. Two are provided:
//!
//! - [`regex::RegexTokenizer`] - Splits into word runs and punctuation runs
//! - [`vietnamese_word::VietnameseWordTokenizer`] - Syllable splitting followed by
//!   dictionary-driven joining of multi-syllable words
//!
//! # Examples
//!
//! ```
//! use vietsent::analysis::tokenizer::Tokenizer;
//! use vietsent::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("tốt quá!").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so analyzers can be shared across
/// concurrent `analyze` calls.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod vietnamese_word;
