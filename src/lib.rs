//! # vietsent
//!
//! Sentiment analysis core for Vietnamese text.
//!
//! ## Features
//!
//! - Diacritic restoration driven by a sub-token classifier and a tag table
//! - Deterministic text standardization (emoticons, joined words, abbreviations)
//! - Canonical positive/negative/neutral aggregation of classifier output
//! - Thread-safe pipeline with a bounded async service front
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use vietsent::pipeline::SentimentPipeline;
//! use vietsent::sentiment::{KeywordSentimentClassifier, SentimentLabel};
//! use vietsent::standardizer::TextStandardizer;
//!
//! let pipeline = SentimentPipeline::new(
//!     TextStandardizer::new().unwrap(),
//!     Arc::new(KeywordSentimentClassifier::new().unwrap()),
//! );
//! let result = pipeline.analyze("sp nay tot qua :)").unwrap();
//! assert_eq!(result.top_label, SentimentLabel::Positive);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod diacritic;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod sentiment;
pub mod service;
pub mod standardizer;

pub mod prelude {
    pub use crate::config::{PipelineConfig, ServiceConfig};
    pub use crate::diacritic::{DiacriticRestorer, SubToken, TagTable, TokenClassifier};
    pub use crate::error::{Result, VietsentError};
    pub use crate::pipeline::{AnalysisRecord, AnalysisResult, SentimentPipeline};
    pub use crate::sentiment::{RawLabelScore, SentimentAggregator, SentimentLabel, SequenceClassifier};
    pub use crate::service::AnalysisService;
    pub use crate::standardizer::TextStandardizer;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
