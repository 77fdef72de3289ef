//! Abbreviation filter implementation.
//!
//! Replaces informal abbreviations and borrowed words (`sp`, `ko`, `ok`,
//! `thanks`) with their full Vietnamese form. Lookup is case-insensitive;
//! tokens without an entry are lower-cased and otherwise left alone.
//!
//! # Examples
//!
//! ```
//! use vietsent::analysis::token_filter::Filter;
//! use vietsent::analysis::token_filter::abbreviation::AbbreviationFilter;
//! use vietsent::analysis::token::Token;
//!
//! let filter = AbbreviationFilter::from_pairs([("sp", "sản phẩm"), ("ko", "không")]);
//! let tokens = vec![Token::new("SP", 0), Token::new("Ko", 1), Token::new("Tốt", 2)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(result, vec!["sản phẩm", "không", "tốt"]);
//! ```

use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that expands abbreviations through a lookup table.
#[derive(Clone, Debug)]
pub struct AbbreviationFilter {
    table: Arc<AHashMap<String, String>>,
}

impl AbbreviationFilter {
    /// Create a filter over an existing table. Keys are expected lower-cased.
    pub fn new(table: Arc<AHashMap<String, String>>) -> Self {
        AbbreviationFilter { table }
    }

    /// Create a filter from `(abbreviation, expansion)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let table = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        Self::new(Arc::new(table))
    }

    /// Expansion for a single word, or the lower-cased word itself.
    pub fn expand(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        match self.table.get(&lowered) {
            Some(full) => full.clone(),
            None => lowered,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Filter for AbbreviationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filter = self.clone();
        Ok(Box::new(tokens.map(move |token| {
            let expanded = filter.expand(&token.text);
            token.rewrite(expanded)
        })))
    }

    fn name(&self) -> &'static str {
        "abbreviation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_expand() {
        let filter = AbbreviationFilter::from_pairs([("dc", "được"), ("K", "không")]);

        assert_eq!(filter.expand("DC"), "được");
        assert_eq!(filter.expand("k"), "không");
        assert_eq!(filter.expand("Hay"), "hay");
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_filter_records_original() {
        let filter = AbbreviationFilter::from_pairs([("sp", "sản phẩm")]);
        let tokens = vec![Token::new("sp", 0), Token::new("này", 1)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "sản phẩm");
        assert_eq!(result[0].original_text.as_deref(), Some("sp"));
        assert_eq!(result[1].text, "này");
        assert!(result[1].original_text.is_none());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(AbbreviationFilter::from_pairs(Vec::<(String, String)>::new()).name(), "abbreviation");
    }
}
