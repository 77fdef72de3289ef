//! End-to-end sentiment analysis.
//!
//! [`SentimentPipeline`] runs restoration, standardization, classification
//! and aggregation in that order. All of its resources are immutable after
//! construction and shared behind `Arc`, so one pipeline can serve any number
//! of threads.

use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::diacritic::{DiacriticRestorer, TagTable, TokenClassifier};
use crate::error::{Result, VietsentError};
use crate::lexicon::StandardizationTables;
use crate::sentiment::{
    Aggregation, RawLabelScore, ScoreMap, SentimentAggregator, SentimentLabel,
    SequenceClassifier,
};
use crate::standardizer::TextStandardizer;

/// Timestamp layout of persisted analysis records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of analyzing one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub original_text: String,
    /// Text after restoration and standardization, as seen by the classifier.
    pub processed_text: String,
    pub top_label: SentimentLabel,
    pub confidence: f64,
    pub scores: ScoreMap,
}

/// Row shape accepted by the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub timestamp: String,
}

impl AnalysisResult {
    fn from_aggregation(original_text: String, processed_text: String, agg: Aggregation) -> Self {
        AnalysisResult {
            original_text,
            processed_text,
            top_label: agg.top_label,
            confidence: agg.confidence,
            scores: agg.scores,
        }
    }

    /// Record stamped with the current local time.
    pub fn to_record(&self) -> AnalysisRecord {
        self.to_record_at(Local::now())
    }

    pub fn to_record_at(&self, at: DateTime<Local>) -> AnalysisRecord {
        AnalysisRecord {
            text: self.original_text.clone(),
            sentiment: self.top_label,
            confidence: self.confidence,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Restoration → standardization → classification → aggregation.
#[derive(Clone)]
pub struct SentimentPipeline {
    restorer: Option<DiacriticRestorer>,
    standardizer: Arc<TextStandardizer>,
    classifier: Arc<dyn SequenceClassifier>,
    aggregator: SentimentAggregator,
}

impl SentimentPipeline {
    /// Pipeline without diacritic restoration.
    pub fn new(standardizer: TextStandardizer, classifier: Arc<dyn SequenceClassifier>) -> Self {
        SentimentPipeline {
            restorer: None,
            standardizer: Arc::new(standardizer),
            classifier,
            aggregator: SentimentAggregator::new(),
        }
    }

    pub fn with_restorer(mut self, restorer: DiacriticRestorer) -> Self {
        self.restorer = Some(restorer);
        self
    }

    pub fn with_aggregator(mut self, aggregator: SentimentAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Build a pipeline from configuration and injected models.
    ///
    /// Restoration is enabled when both a tag table path and a token
    /// classifier are given; supplying only one of them is an error.
    pub fn from_config(
        config: &PipelineConfig,
        token_classifier: Option<Arc<dyn TokenClassifier>>,
        sequence_classifier: Arc<dyn SequenceClassifier>,
    ) -> Result<Self> {
        config.validate()?;

        let tables = match &config.lexicon_path {
            Some(path) => StandardizationTables::from_json_file(path)?,
            None => StandardizationTables::default(),
        };
        let mut pipeline = Self::new(TextStandardizer::with_tables(&tables)?, sequence_classifier)
            .with_aggregator(
                SentimentAggregator::new().with_tolerance(config.probability_tolerance),
            );

        match (&config.tag_table_path, token_classifier) {
            (Some(path), Some(token_classifier)) => {
                let table = Arc::new(TagTable::from_path(path)?);
                let restorer = DiacriticRestorer::new(table, token_classifier)?
                    .with_candidate_order(config.candidate_order);
                pipeline = pipeline.with_restorer(restorer);
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(VietsentError::config(
                    "tag_table_path is set but no token classifier was supplied",
                ));
            }
            (None, Some(_)) => {
                return Err(VietsentError::config(
                    "a token classifier was supplied without a tag_table_path",
                ));
            }
        }

        info!(
            "Sentiment pipeline ready (classifier: {}, restoration: {})",
            pipeline.classifier.name(),
            pipeline.restorer.is_some()
        );
        Ok(pipeline)
    }

    pub fn restorer(&self) -> Option<&DiacriticRestorer> {
        self.restorer.as_ref()
    }

    pub fn standardizer(&self) -> &TextStandardizer {
        &self.standardizer
    }

    pub fn classifier(&self) -> &Arc<dyn SequenceClassifier> {
        &self.classifier
    }

    pub fn aggregator(&self) -> &SentimentAggregator {
        &self.aggregator
    }

    /// Analyze one text.
    ///
    /// Blank input is rejected. Classifier failures are returned as-is; no
    /// default verdict is substituted.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let processed = self.preprocess(text)?;
        let raw_scores = self.classifier.classify(&processed)?;
        self.assemble(text, processed, &raw_scores)
    }

    /// Analyze many texts in parallel. Results keep input order.
    pub fn analyze_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Result<AnalysisResult>> {
        texts
            .par_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect()
    }

    /// Restoration and standardization: everything before the classifier.
    pub fn preprocess(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(VietsentError::invalid_argument("cannot analyze blank text"));
        }

        let restored = match &self.restorer {
            Some(restorer) => restorer.restore(text)?,
            None => text.to_string(),
        };
        let processed = self.standardizer.standardize(&restored);
        debug!("preprocessed {text:?} -> {processed:?}");
        Ok(processed)
    }

    /// Aggregate classifier output into the final result.
    pub fn assemble(
        &self,
        original_text: &str,
        processed_text: String,
        raw_scores: &[RawLabelScore],
    ) -> Result<AnalysisResult> {
        let aggregation = self.aggregator.aggregate_distribution(raw_scores)?;
        Ok(AnalysisResult::from_aggregation(
            original_text.to_string(),
            processed_text,
            aggregation,
        ))
    }
}

impl std::fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("restorer", &self.restorer)
            .field("classifier", &self.classifier.name())
            .field("aggregator", &self.aggregator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClassifier(Vec<RawLabelScore>);

    impl SequenceClassifier for FixedClassifier {
        fn classify(&self, _text: &str) -> Result<Vec<RawLabelScore>> {
            Ok(self.0.clone())
        }
    }

    struct FailingClassifier;

    impl SequenceClassifier for FailingClassifier {
        fn classify(&self, _text: &str) -> Result<Vec<RawLabelScore>> {
            Err(VietsentError::classifier("model unavailable"))
        }
    }

    fn pipeline(classifier: Arc<dyn SequenceClassifier>) -> SentimentPipeline {
        SentimentPipeline::new(TextStandardizer::new().unwrap(), classifier)
    }

    #[test]
    fn test_analyze_without_restorer() {
        let classifier = Arc::new(FixedClassifier(vec![
            RawLabelScore::new("POS", 0.7),
            RawLabelScore::new("NEG", 0.2),
            RawLabelScore::new("NEU", 0.1),
        ]));
        let result = pipeline(classifier).analyze("toithich sp nay :)").unwrap();

        assert_eq!(result.original_text, "toithich sp nay :)");
        assert_eq!(result.processed_text, "tôi thích sản phẩm nay tích_cực");
        assert_eq!(result.top_label, SentimentLabel::Positive);
        assert!((result.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let result = pipeline(Arc::new(FailingClassifier)).analyze("hay quá");
        assert!(matches!(result, Err(VietsentError::Classifier(_))));
    }

    #[test]
    fn test_malformed_distribution_is_failure() {
        let classifier = Arc::new(FixedClassifier(vec![RawLabelScore::new("POS", 0.3)]));
        assert!(pipeline(classifier).analyze("hay quá").is_err());

        let classifier = Arc::new(FixedClassifier(Vec::new()));
        assert!(pipeline(classifier).analyze("hay quá").is_err());
    }

    #[test]
    fn test_blank_input_rejected() {
        let classifier = Arc::new(FixedClassifier(vec![RawLabelScore::new("NEU", 1.0)]));
        assert!(matches!(
            pipeline(classifier).analyze("   "),
            Err(VietsentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_analyze_batch_keeps_order() {
        let classifier = Arc::new(FixedClassifier(vec![RawLabelScore::new("NEU", 1.0)]));
        let pipeline = pipeline(classifier);
        let texts = ["một", "", "ba"];
        let results = pipeline.analyze_batch(&texts[..]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().original_text, "một");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().top_label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_to_record() {
        let result = AnalysisResult {
            original_text: "tốt".to_string(),
            processed_text: "tốt".to_string(),
            top_label: SentimentLabel::Positive,
            confidence: 0.8,
            scores: ScoreMap {
                positive: 0.8,
                negative: 0.1,
                neutral: 0.1,
            },
        };
        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let record = result.to_record_at(at);

        assert_eq!(record.timestamp, "2024-03-05 14:07:09");
        assert_eq!(record.sentiment, SentimentLabel::Positive);
        assert_eq!(record.text, "tốt");
    }

    #[test]
    fn test_from_config_requires_both_restoration_inputs() {
        let config = PipelineConfig::default().with_tag_table_path("tags.txt");
        let classifier = Arc::new(FixedClassifier(vec![RawLabelScore::new("NEU", 1.0)]));
        assert!(matches!(
            SentimentPipeline::from_config(&config, None, classifier.clone()),
            Err(VietsentError::Config(_))
        ));

        let pipeline =
            SentimentPipeline::from_config(&PipelineConfig::default(), None, classifier).unwrap();
        assert!(pipeline.restorer().is_none());
    }
}
