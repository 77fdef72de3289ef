//! The token classifier seam of the diacritic restorer.
//!
//! A token classifier is an external model that splits surface words into
//! sub-tokens and predicts one tag-table label per sub-token. Only its
//! contract lives here; inference backends implement [`TokenClassifier`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, VietsentError};

/// Prefix SentencePiece tokenizers put on the first piece of every word.
pub const WORD_PREFIX: char = '\u{2581}';

/// A word fragment as segmented by the token classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubToken {
    /// Fragment text, without any word-start marker.
    pub text: String,
    /// True for the first fragment of a word.
    pub word_start: bool,
    /// Predicted tag-table label.
    pub label: usize,
}

impl SubToken {
    pub fn new<S: Into<String>>(text: S, word_start: bool, label: usize) -> Self {
        SubToken {
            text: text.into(),
            word_start,
            label,
        }
    }

    /// Pair SentencePiece-style pieces with their predicted labels.
    ///
    /// `pieces` and `labels` must already exclude the two boundary sentinels
    /// and have the same length. A leading [`WORD_PREFIX`] marks a word start
    /// and is stripped from the text.
    pub fn from_word_pieces<S: AsRef<str>>(pieces: &[S], labels: &[usize]) -> Result<Vec<Self>> {
        if pieces.len() != labels.len() {
            return Err(VietsentError::classifier(format!(
                "{} sub-tokens but {} labels",
                pieces.len(),
                labels.len()
            )));
        }

        Ok(pieces
            .iter()
            .zip(labels)
            .map(|(piece, &label)| {
                let piece = piece.as_ref();
                match piece.strip_prefix(WORD_PREFIX) {
                    Some(rest) => SubToken::new(rest, true, label),
                    None => SubToken::new(piece, false, label),
                }
            })
            .collect())
    }
}

/// External per-sub-token label predictor.
///
/// Implementations must be shareable across threads; the restorer never
/// mutates them.
pub trait TokenClassifier: Send + Sync {
    /// Size of the label space. Must equal the tag table length.
    fn num_labels(&self) -> usize;

    /// Label the sub-tokens of the given whitespace-delimited words, in order.
    fn classify(&self, words: &[&str]) -> Result<Vec<SubToken>>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str {
        "token_classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word_pieces() {
        let pieces = ["▁toi", "thi", "ch", "▁sp"];
        let tokens = SubToken::from_word_pieces(&pieces, &[1, 0, 2, 0]).unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], SubToken::new("toi", true, 1));
        assert_eq!(tokens[1], SubToken::new("thi", false, 0));
        assert_eq!(tokens[3], SubToken::new("sp", true, 0));
    }

    #[test]
    fn test_from_word_pieces_length_mismatch() {
        let result = SubToken::from_word_pieces(&["▁a", "b"], &[0]);
        assert!(matches!(result, Err(VietsentError::Classifier(_))));
    }
}
