//! Vietnamese text standardization.
//!
//! [`TextStandardizer`] turns free-form (restored) text into the canonical
//! string fed to the sentiment classifier. It is a [`PipelineAnalyzer`]
//! assembled in a fixed order:
//!
//! 1. NFC composition and lower-casing
//! 2. whitespace collapsing and trimming
//! 3. emoticon/emoji substitution (leftmost-longest, padded with spaces)
//! 4. joined-word splitting (leftmost-longest)
//! 5. word segmentation
//! 6. abbreviation expansion, case-insensitive, then lower-casing of the
//!    expansions
//! 7. tokens re-joined with single spaces
//!
//! # Examples
//!
//! ```
//! use vietsent::standardizer::TextStandardizer;
//!
//! let standardizer = TextStandardizer::new().unwrap();
//! let text = standardizer.standardize("toithich sp nay :)");
//! assert_eq!(text, "tôi thích sản phẩm nay tích_cực");
//! ```

use std::sync::Arc;

use log::{debug, warn};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::mapping::MappingCharFilter;
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
use crate::analysis::char_filter::whitespace::WhitespaceCollapseCharFilter;
use crate::analysis::token_filter::abbreviation::AbbreviationFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::vietnamese_word::VietnameseWordTokenizer;
use crate::error::Result;
use crate::lexicon::StandardizationTables;

/// Deterministic lexical normalizer for Vietnamese text.
#[derive(Clone, Debug)]
pub struct TextStandardizer {
    analyzer: PipelineAnalyzer,
}

impl TextStandardizer {
    /// Create a standardizer over the built-in tables.
    pub fn new() -> Result<Self> {
        Self::with_tables(&StandardizationTables::default())
    }

    /// Create a standardizer over custom tables.
    pub fn with_tables(tables: &StandardizationTables) -> Result<Self> {
        tables.validate()?;

        let emoticons = MappingCharFilter::new(tables.emoticons.clone(), true)?
            .with_padding(true)
            .with_name("emoticon");
        let joined_words =
            MappingCharFilter::new(tables.joined_words.clone(), false)?.with_name("joined_word");
        let segmenter = VietnameseWordTokenizer::new(&tables.compound_words)?;
        let abbreviations = AbbreviationFilter::from_pairs(tables.abbreviations.iter());

        let analyzer = PipelineAnalyzer::new(Arc::new(segmenter))
            .add_char_filter(Arc::new(UnicodeNormalizationCharFilter::composed_lowercase()))
            .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()))
            .add_char_filter(Arc::new(emoticons))
            .add_char_filter(Arc::new(joined_words))
            .add_filter(Arc::new(abbreviations))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("vietnamese_standardizer");

        Ok(Self { analyzer })
    }

    /// The underlying analysis pipeline.
    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }

    /// Standardize `text`. Never fails: on an analysis error the
    /// lower-cased, whitespace-collapsed input is returned instead.
    pub fn standardize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        match self.try_standardize(text) {
            Ok(standardized) => {
                debug!("standardized {text:?} -> {standardized:?}");
                standardized
            }
            Err(e) => {
                warn!("standardization degraded to plain normalization: {e}");
                text.split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase()
            }
        }
    }

    /// Standardize optional input; a missing value yields an empty string.
    pub fn standardize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.standardize(t)).unwrap_or_default()
    }

    fn try_standardize(&self, text: &str) -> Result<String> {
        let words: Vec<String> = self.analyzer.analyze(text)?.map(|t| t.text).collect();
        // Table entries may carry their own spacing; normalize the final string once more.
        Ok(words
            .iter()
            .flat_map(|w| w.split_whitespace())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
