//! Sentiment classification and aggregation.

pub mod aggregator;
pub mod classifier;
pub mod label;

pub use aggregator::{
    Aggregation, DEFAULT_PROBABILITY_TOLERANCE, ScoreMap, SentimentAggregator,
};
pub use classifier::{KeywordSentimentClassifier, RawLabelScore, SequenceClassifier};
pub use label::SentimentLabel;
