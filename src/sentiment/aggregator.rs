//! Collapse classifier output into one canonical verdict.

use log::trace;
use serde::{Deserialize, Serialize};

use super::classifier::RawLabelScore;
use super::label::SentimentLabel;
use crate::error::{Result, VietsentError};

/// Default slack allowed when checking that a distribution sums to one.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-4;

/// Scores of the three canonical classes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreMap {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl ScoreMap {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    fn slot(&mut self, label: SentimentLabel) -> &mut f64 {
        match label {
            SentimentLabel::Positive => &mut self.positive,
            SentimentLabel::Negative => &mut self.negative,
            SentimentLabel::Neutral => &mut self.neutral,
        }
    }

    /// Entries in tie-break priority order.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, f64)> + '_ {
        SentimentLabel::PRIORITY
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Highest-scoring class. Ties go to the earlier class in
    /// [`SentimentLabel::PRIORITY`].
    pub fn top(&self) -> (SentimentLabel, f64) {
        let mut best = (SentimentLabel::Positive, self.positive);
        for (label, score) in self.iter().skip(1) {
            if score > best.1 {
                best = (label, score);
            }
        }
        best
    }
}

/// Aggregated verdict for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub top_label: SentimentLabel,
    pub confidence: f64,
    pub scores: ScoreMap,
}

/// Maps native classifier labels onto the canonical classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentAggregator {
    tolerance: f64,
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAggregator {
    pub fn new() -> Self {
        SentimentAggregator {
            tolerance: DEFAULT_PROBABILITY_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Aggregate a full distribution when one is given, otherwise fall back
    /// to the single top label and its confidence.
    ///
    /// An empty distribution counts as absent.
    pub fn aggregate(
        &self,
        raw_scores: Option<&[RawLabelScore]>,
        fallback_label: &str,
        fallback_confidence: f64,
    ) -> Result<Aggregation> {
        match raw_scores {
            Some(scores) if !scores.is_empty() => self.aggregate_distribution(scores),
            _ => self.aggregate_fallback(fallback_label, fallback_confidence),
        }
    }

    /// Full mode: sum scores per canonical class.
    ///
    /// The distribution must be non-empty, every score finite and within
    /// `[0, 1]`, and the total within tolerance of one. Slightly negative
    /// scores count as zero, and the accepted map is rescaled to sum to one.
    pub fn aggregate_distribution(&self, raw_scores: &[RawLabelScore]) -> Result<Aggregation> {
        if raw_scores.is_empty() {
            return Err(VietsentError::classifier("empty label distribution"));
        }

        let mut scores = ScoreMap::default();
        let mut total = 0.0;
        for raw in raw_scores {
            if !raw.score.is_finite()
                || raw.score < -self.tolerance
                || raw.score > 1.0 + self.tolerance
            {
                return Err(VietsentError::classifier(format!(
                    "score {} for label {:?} is not a probability",
                    raw.score, raw.label
                )));
            }
            let score = raw.score.max(0.0);
            *scores.slot(SentimentLabel::canonicalize(&raw.label)) += score;
            total += score;
        }

        if total <= 0.0 || (total - 1.0).abs() > self.tolerance {
            return Err(VietsentError::classifier(format!(
                "label distribution sums to {total}, expected 1"
            )));
        }
        scores.positive /= total;
        scores.negative /= total;
        scores.neutral /= total;

        let (top_label, confidence) = scores.top();
        trace!("full distribution {scores:?} -> {top_label} ({confidence:.4})");
        Ok(Aggregation {
            top_label,
            confidence,
            scores,
        })
    }

    /// Fallback mode: the predicted label takes `confidence` and the two
    /// other classes split the remainder evenly.
    ///
    /// The verdict is read off the resulting map, so below a confidence of
    /// one third the predicted label loses to the other classes.
    pub fn aggregate_fallback(&self, label: &str, confidence: f64) -> Result<Aggregation> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(VietsentError::invalid_argument(format!(
                "confidence {confidence} is outside [0, 1]"
            )));
        }

        let predicted = SentimentLabel::canonicalize(label);
        let rest = (1.0 - confidence) / 2.0;
        let mut scores = ScoreMap {
            positive: rest,
            negative: rest,
            neutral: rest,
        };
        *scores.slot(predicted) = confidence;

        let (top_label, confidence) = scores.top();
        trace!("fallback {label:?} -> {top_label} ({confidence:.4})");
        Ok(Aggregation {
            top_label,
            confidence,
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fallback_mode() {
        let aggregator = SentimentAggregator::new();
        let result = aggregator.aggregate(None, "POSITIVE", 0.9).unwrap();

        assert_eq!(result.top_label, SentimentLabel::Positive);
        assert!(approx(result.confidence, 0.9));
        assert!(approx(result.scores.positive, 0.9));
        assert!(approx(result.scores.negative, 0.05));
        assert!(approx(result.scores.neutral, 0.05));
    }

    #[test]
    fn test_fallback_unknown_label_is_neutral() {
        let result = SentimentAggregator::new()
            .aggregate_fallback("LABEL_7", 0.6)
            .unwrap();
        assert_eq!(result.top_label, SentimentLabel::Neutral);
        assert!(approx(result.scores.neutral, 0.6));
        assert!(approx(result.scores.sum(), 1.0));
    }

    #[test]
    fn test_fallback_rejects_bad_confidence() {
        let aggregator = SentimentAggregator::new();
        assert!(matches!(
            aggregator.aggregate_fallback("POS", 1.5),
            Err(VietsentError::InvalidArgument(_))
        ));
        assert!(aggregator.aggregate_fallback("POS", f64::NAN).is_err());
    }

    #[test]
    fn test_full_mode() {
        let raw = vec![
            RawLabelScore::new("POS", 0.7),
            RawLabelScore::new("NEG", 0.2),
            RawLabelScore::new("NEU", 0.1),
        ];
        let result = SentimentAggregator::new()
            .aggregate(Some(&raw), "ignored", 0.0)
            .unwrap();

        assert_eq!(result.top_label, SentimentLabel::Positive);
        assert!(approx(result.confidence, 0.7));
        assert!(approx(result.scores.negative, 0.2));
        assert!(approx(result.scores.neutral, 0.1));
    }

    #[test]
    fn test_full_mode_sums_labels_of_same_class() {
        let raw = vec![
            RawLabelScore::new("very_negative", 0.3),
            RawLabelScore::new("NEG", 0.3),
            RawLabelScore::new("POS", 0.4),
        ];
        let result = SentimentAggregator::new().aggregate_distribution(&raw).unwrap();
        assert_eq!(result.top_label, SentimentLabel::Negative);
        assert!(approx(result.confidence, 0.6));
        assert_eq!(result.scores.neutral, 0.0);
    }

    #[test]
    fn test_tie_prefers_positive_then_negative() {
        let raw = vec![
            RawLabelScore::new("POS", 0.4),
            RawLabelScore::new("NEG", 0.4),
            RawLabelScore::new("NEU", 0.2),
        ];
        let result = SentimentAggregator::new().aggregate_distribution(&raw).unwrap();
        assert_eq!(result.top_label, SentimentLabel::Positive);

        let raw = vec![
            RawLabelScore::new("NEU", 0.45),
            RawLabelScore::new("NEG", 0.45),
            RawLabelScore::new("POS", 0.1),
        ];
        let result = SentimentAggregator::new().aggregate_distribution(&raw).unwrap();
        assert_eq!(result.top_label, SentimentLabel::Negative);
    }

    #[test]
    fn test_malformed_distribution_rejected() {
        let aggregator = SentimentAggregator::new();

        assert!(aggregator.aggregate_distribution(&[]).is_err());
        assert!(
            aggregator
                .aggregate_distribution(&[RawLabelScore::new("POS", 0.5)])
                .is_err()
        );
        assert!(
            aggregator
                .aggregate_distribution(&[
                    RawLabelScore::new("POS", 1.5),
                    RawLabelScore::new("NEG", -0.5),
                ])
                .is_err()
        );
        assert!(
            aggregator
                .aggregate_distribution(&[RawLabelScore::new("POS", f64::NAN)])
                .is_err()
        );
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let raw = [
            RawLabelScore::new("POS", 0.5),
            RawLabelScore::new("NEG", 0.49),
        ];
        assert!(SentimentAggregator::new().aggregate_distribution(&raw).is_err());

        let result = SentimentAggregator::new()
            .with_tolerance(0.05)
            .aggregate_distribution(&raw)
            .unwrap();
        assert!((result.scores.sum() - 1.0).abs() < 1e-6);
        assert!(approx(result.confidence, 0.5 / 0.99));
    }

    #[test]
    fn test_near_one_distribution_is_rescaled() {
        let raw = [
            RawLabelScore::new("POS", 0.70005),
            RawLabelScore::new("NEG", 0.2),
            RawLabelScore::new("NEU", 0.1),
        ];
        let result = SentimentAggregator::new().aggregate_distribution(&raw).unwrap();

        assert!((result.scores.sum() - 1.0).abs() < 1e-6);
        assert_eq!(result.top_label, SentimentLabel::Positive);
        assert_eq!(result.confidence, result.scores.positive);
        assert!(approx(result.confidence, 0.70005 / 1.00005));
    }

    #[test]
    fn test_slightly_negative_score_counts_as_zero() {
        let raw = [
            RawLabelScore::new("POS", 1.0),
            RawLabelScore::new("NEG", -0.00005),
        ];
        let result = SentimentAggregator::new().aggregate_distribution(&raw).unwrap();

        assert_eq!(result.scores.negative, 0.0);
        assert!(approx(result.scores.positive, 1.0));
    }

    #[test]
    fn test_zero_total_rejected_under_loose_tolerance() {
        let raw = [RawLabelScore::new("POS", 0.0)];
        assert!(
            SentimentAggregator::new()
                .with_tolerance(1.0)
                .aggregate_distribution(&raw)
                .is_err()
        );
    }

    #[test]
    fn test_low_confidence_fallback_follows_score_map() {
        let result = SentimentAggregator::new().aggregate(None, "POS", 0.2).unwrap();

        assert!(approx(result.scores.positive, 0.2));
        assert!(approx(result.scores.negative, 0.4));
        assert!(approx(result.scores.neutral, 0.4));
        // negative and neutral tie; negative comes first
        assert_eq!(result.top_label, SentimentLabel::Negative);
        assert!(approx(result.confidence, 0.4));
    }

    #[test]
    fn test_score_map_serializes_as_object() {
        let map = ScoreMap {
            positive: 0.5,
            negative: 0.25,
            neutral: 0.25,
        };
        let json = serde_json::to_value(map).unwrap();
        assert_eq!(json["positive"], 0.5);
        assert_eq!(json["neutral"], 0.25);
    }
}
