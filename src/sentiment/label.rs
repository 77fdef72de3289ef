//! Canonical sentiment classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VietsentError;

/// One of the three canonical sentiment classes, independent of any
/// model's native label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Tie-break priority: earlier entries win equal scores.
    pub const PRIORITY: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Map a model label name onto a canonical class.
    ///
    /// Case-insensitive: names containing `POS` are positive, names containing
    /// `NEG` are negative, anything else is neutral.
    ///
    /// ```
    /// use vietsent::sentiment::SentimentLabel;
    ///
    /// assert_eq!(SentimentLabel::canonicalize("POS"), SentimentLabel::Positive);
    /// assert_eq!(SentimentLabel::canonicalize("negative"), SentimentLabel::Negative);
    /// assert_eq!(SentimentLabel::canonicalize("LABEL_1"), SentimentLabel::Neutral);
    /// ```
    pub fn canonicalize(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if upper.contains("POS") {
            SentimentLabel::Positive
        } else if upper.contains("NEG") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Display name used by Vietnamese front ends.
    pub fn vietnamese_name(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Tích cực",
            SentimentLabel::Negative => "Tiêu cực",
            SentimentLabel::Neutral => "Trung tính",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = VietsentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(VietsentError::invalid_argument(format!(
                "unknown sentiment label {other:?}"
            ))),
        }
    }
}
