//! The sequence classifier seam and a lexicon-based fallback classifier.

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VietsentError};

/// One `(label, probability)` pair from a sequence classifier's native label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabelScore {
    pub label: String,
    pub score: f64,
}

impl RawLabelScore {
    pub fn new<S: Into<String>>(label: S, score: f64) -> Self {
        RawLabelScore {
            label: label.into(),
            score,
        }
    }
}

/// External whole-text sentiment model.
///
/// Returns a probability distribution over the model's own label names.
/// Calls may block; implementations must be shareable across threads.
pub trait SequenceClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Vec<RawLabelScore>>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str {
        "sequence_classifier"
    }
}

const POSITIVE_PHRASES: &[&str] = &[
    "tích_cực",
    "rất_tích_cực",
    "yêu_thích",
    "vui",
    "tốt",
    "thích",
    "hài lòng",
    "tuyệt vời",
    "đáng tiền",
    "ủng hộ",
    "cảm ơn",
    "đẹp",
    "nhanh",
];

const NEGATIVE_PHRASES: &[&str] = &[
    "tiêu_cực",
    "buồn",
    "lo_lắng",
    "tức_giận",
    "rất_tức_giận",
    "thất_vọng",
    "thất vọng",
    "khóc",
    "khóc_nhiều",
    "không_hài_lòng",
    "không hài lòng",
    "không tốt",
    "không thích",
    "chán",
    "tệ",
    "ghét",
    "kém",
    "chậm",
    "mỉa_mai",
];

/// Keyword-counting classifier over standardized text.
///
/// Counts positive and negative phrase hits (leftmost-longest, so
/// `không hài lòng` is one negative hit rather than a positive one) and
/// turns the counts into a `POS`/`NEG`/`NEU` distribution with a neutral
/// prior. Useful when no pretrained model is wired in.
pub struct KeywordSentimentClassifier {
    matcher: AhoCorasick,
    polarity: Vec<bool>,
    neutral_prior: f64,
}

impl KeywordSentimentClassifier {
    /// Classifier over the built-in phrase lists.
    pub fn new() -> Result<Self> {
        Self::with_phrases(POSITIVE_PHRASES, NEGATIVE_PHRASES)
    }

    pub fn with_phrases<P: AsRef<str>, N: AsRef<str>>(positive: &[P], negative: &[N]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(positive.len() + negative.len());
        let mut polarity = Vec::with_capacity(positive.len() + negative.len());
        for phrase in positive {
            patterns.push(phrase.as_ref().to_string());
            polarity.push(true);
        }
        for phrase in negative {
            patterns.push(phrase.as_ref().to_string());
            polarity.push(false);
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                VietsentError::classifier(format!("Failed to build sentiment matcher: {e}"))
            })?;

        Ok(Self {
            matcher,
            polarity,
            neutral_prior: 0.5,
        })
    }

    /// Pseudo-count given to the neutral class.
    pub fn with_neutral_prior(mut self, prior: f64) -> Self {
        self.neutral_prior = prior.max(f64::EPSILON);
        self
    }
}

impl SequenceClassifier for KeywordSentimentClassifier {
    fn classify(&self, text: &str) -> Result<Vec<RawLabelScore>> {
        let (mut positive, mut negative) = (0.0, 0.0);
        for m in self.matcher.find_iter(&text.to_lowercase()) {
            if self.polarity[m.pattern().as_usize()] {
                positive += 1.0;
            } else {
                negative += 1.0;
            }
        }

        let total = positive + negative + self.neutral_prior;
        Ok(vec![
            RawLabelScore::new("NEG", negative / total),
            RawLabelScore::new("POS", positive / total),
            RawLabelScore::new("NEU", self.neutral_prior / total),
        ])
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

impl std::fmt::Debug for KeywordSentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordSentimentClassifier")
            .field("phrases", &self.polarity.len())
            .field("neutral_prior", &self.neutral_prior)
            .finish()
    }
}
