//! Text analysis building blocks.
//!
//! Char filters, tokenizers and token filters composed by
//! [`analyzer::PipelineAnalyzer`]. The text standardizer is one such pipeline.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use char_filter::CharFilter;
pub use token::{Token, TokenStream, TokenType};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
