//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw string before it is handed to the
//! tokenizer. The standardization pipeline uses them for Unicode/case
//! normalization, whitespace collapsing and literal pattern substitution.
//!
//! # Available Filters
//!
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - Unicode normalization and case folding
//! - [`whitespace::WhitespaceCollapseCharFilter`] - Collapses whitespace runs and trims
//! - [`mapping::MappingCharFilter`] - Literal pattern replacement, longest match first
//!
//! # Examples
//!
//! ```
//! use vietsent::analysis::char_filter::CharFilter;
//! use vietsent::analysis::char_filter::whitespace::WhitespaceCollapseCharFilter;
//!
//! let filter = WhitespaceCollapseCharFilter::new();
//! assert_eq!(filter.filter("  rất \t tốt  "), "rất tốt");
//! ```

/// Trait for character filters that transform text before tokenization.
///
/// Filters are total: every well-formed string maps to a string.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod mapping;
pub mod unicode_normalize;
pub mod whitespace;
