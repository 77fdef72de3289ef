//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::{Result, VietsentError};

/// Word runs (letters, digits, underscore) or runs of anything else that is
/// not whitespace. Punctuation survives as its own tokens.
pub const DEFAULT_PATTERN: &str = r"\w+|[^\w\s]+";

/// A regex-based tokenizer that extracts tokens using regular expressions.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`DEFAULT_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| VietsentError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub(crate) fn detect_token_type(word: &str) -> TokenType {
        if word.is_empty() {
            TokenType::Other
        } else if word.chars().all(|c| c.is_numeric()) {
            TokenType::Num
        } else if word.chars().all(|c| c.is_alphanumeric() || c == '_') {
            TokenType::Word
        } else if word.chars().all(|c| !c.is_alphanumeric()) {
            TokenType::Punctuation
        } else {
            TokenType::Other
        }
    }

    /// Tokenize into a vector, for callers that post-process the tokens.
    pub(crate) fn tokenize_vec(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
                    .with_token_type(Self::detect_token_type(mat.as_str()))
            })
            .collect()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.tokenize_vec(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
