//! Pipeline analyzer that combines char filters, a tokenizer and filters.
//!
//! Processing order:
//! 1. Char Filters: applied to the raw string in the order they were added
//! 2. Tokenizer: splits the filtered string into tokens
//! 3. Token Filters: applied sequentially in the order they were added
//!
//! Token offsets refer to the char-filtered string.
//!
//! # Examples
//!
//! ```
//! use vietsent::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use vietsent::analysis::char_filter::whitespace::WhitespaceCollapseCharFilter;
//! use vietsent::analysis::tokenizer::regex::RegexTokenizer;
//! use vietsent::analysis::token_filter::lowercase::LowercaseFilter;
//! use std::sync::Arc;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
//!     .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .with_name("example");
//!
//! let tokens: Vec<_> = analyzer.analyze("  Rất   TỐT ").unwrap().map(|t| t.text).collect();
//! assert_eq!(tokens, vec!["rất", "tốt"]);
//! ```

use std::sync::Arc;

use log::trace;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The configured name of this analyzer.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Run only the char filters.
    pub fn apply_char_filters(&self, text: &str) -> String {
        let mut filtered = text.to_string();
        for char_filter in &self.char_filters {
            filtered = char_filter.filter(&filtered);
            trace!("{} -> {:?}", char_filter.name(), filtered);
        }
        filtered
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let filtered_text = self.apply_char_filters(text);

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::mapping::MappingCharFilter;
    use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::abbreviation::AbbreviationFilter;
    use crate::analysis::tokenizer::regex::RegexTokenizer;

    #[test]
    fn test_pipeline_analyzer() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(AbbreviationFilter::from_pairs([("ko", "không")])));

        let tokens: Vec<Token> = analyzer.analyze("KO thích").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "không");
        assert_eq!(tokens[1].text, "thích");
    }

    #[test]
    fn test_char_filters_run_in_order() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        // The mapping only knows the lower-case key, so it must run after normalization.
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(UnicodeNormalizationCharFilter::composed_lowercase()))
            .add_char_filter(Arc::new(
                MappingCharFilter::new([("spnay", "sản phẩm này")], false).unwrap(),
            ));

        let texts: Vec<String> = analyzer
            .analyze("SPNAY")
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["sản", "phẩm", "này"]);
    }

    #[test]
    fn test_debug_lists_stages() {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
            .add_filter(Arc::new(AbbreviationFilter::from_pairs([("k", "không")])))
            .with_name("standardizer");

        let debug = format!("{analyzer:?}");
        assert!(debug.contains("standardizer"));
        assert!(debug.contains("abbreviation"));
        assert_eq!(analyzer.pipeline_name(), "standardizer");
    }
}
