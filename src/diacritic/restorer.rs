//! Diacritic restoration for unaccented Vietnamese text.
//!
//! The token classifier labels every sub-token with a tag-table rule. The
//! restorer folds sub-tokens back into whole words, then rewrites each word
//! with the first of its candidate rules whose bare substring occurs in it.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::tag_table::TagTable;
use super::token_classifier::{SubToken, TokenClassifier};
use crate::error::{Result, VietsentError};

/// Order in which a word's candidate labels are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    /// Order of first appearance among the word's sub-tokens.
    #[default]
    SubTokenPosition,
    /// Ascending label index.
    LowestLabelIndex,
}

/// A surface word rebuilt from one or more sub-tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedWord {
    /// Concatenated fragment texts.
    pub text: String,
    /// Distinct labels of the fragments, in sub-token order.
    pub labels: Vec<usize>,
    /// Ordinal of the word in the sentence.
    pub position: usize,
}

/// Outcome of restoring one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoredWord {
    pub original: String,
    pub restored: String,
    /// Label whose rule rewrote the word, if any did.
    pub applied_label: Option<usize>,
    pub position: usize,
}

/// Fold sub-tokens into words.
///
/// A word-start fragment opens a new word; other fragments extend the current
/// word. Fragments without a word-start flag that precede the first word-start
/// each form a word by themselves.
pub fn merge_sub_tokens(sub_tokens: &[SubToken]) -> Vec<MergedWord> {
    let mut words: Vec<MergedWord> = Vec::new();
    let mut started = false;

    for sub_token in sub_tokens {
        started |= sub_token.word_start;
        match words.last_mut() {
            Some(word) if started && !sub_token.word_start => {
                word.text.push_str(&sub_token.text);
                if !word.labels.contains(&sub_token.label) {
                    word.labels.push(sub_token.label);
                }
            }
            _ => words.push(MergedWord {
                text: sub_token.text.clone(),
                labels: vec![sub_token.label],
                position: words.len(),
            }),
        }
    }

    words
}

/// Restores omitted diacritics using an external token classifier.
#[derive(Clone)]
pub struct DiacriticRestorer {
    table: Arc<TagTable>,
    classifier: Arc<dyn TokenClassifier>,
    candidate_order: CandidateOrder,
}

impl DiacriticRestorer {
    /// Pair a tag table with a token classifier.
    ///
    /// Fails when the table does not have exactly one rule per classifier label.
    pub fn new(table: Arc<TagTable>, classifier: Arc<dyn TokenClassifier>) -> Result<Self> {
        table.validate_label_count(classifier.num_labels())?;
        Ok(DiacriticRestorer {
            table,
            classifier,
            candidate_order: CandidateOrder::default(),
        })
    }

    pub fn with_candidate_order(mut self, order: CandidateOrder) -> Self {
        self.candidate_order = order;
        self
    }

    pub fn tag_table(&self) -> &TagTable {
        &self.table
    }

    /// Restore diacritics and return the words joined by single spaces.
    pub fn restore(&self, text: &str) -> Result<String> {
        let words = self.restore_detailed(text)?;
        Ok(words
            .iter()
            .map(|w| w.restored.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Restore diacritics and report what happened to every word.
    pub fn restore_detailed(&self, text: &str) -> Result<Vec<RestoredWord>> {
        let surface: Vec<&str> = text.split_whitespace().collect();
        if surface.is_empty() {
            return Ok(Vec::new());
        }

        let sub_tokens = self.classifier.classify(&surface)?;
        for sub_token in &sub_tokens {
            if sub_token.label >= self.table.len() {
                return Err(VietsentError::LabelOutOfRange {
                    index: sub_token.label,
                    size: self.table.len(),
                });
            }
        }

        let restored = merge_sub_tokens(&sub_tokens)
            .iter()
            .map(|word| self.rewrite(word))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "{} restored {} words, {} rewritten",
            self.classifier.name(),
            restored.len(),
            restored.iter().filter(|w| w.applied_label.is_some()).count()
        );
        Ok(restored)
    }

    fn rewrite(&self, word: &MergedWord) -> Result<RestoredWord> {
        let mut candidates = word.labels.clone();
        if self.candidate_order == CandidateOrder::LowestLabelIndex {
            candidates.sort_unstable();
        }

        for label in candidates {
            if let Some(restored) = self.table.rule(label)?.apply(&word.text) {
                return Ok(RestoredWord {
                    original: word.text.clone(),
                    restored,
                    applied_label: Some(label),
                    position: word.position,
                });
            }
        }

        Ok(RestoredWord {
            original: word.text.clone(),
            restored: word.text.clone(),
            applied_label: None,
            position: word.position,
        })
    }
}

impl std::fmt::Debug for DiacriticRestorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiacriticRestorer")
            .field("rules", &self.table.len())
            .field("classifier", &self.classifier.name())
            .field("candidate_order", &self.candidate_order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::diacritic::tag_table::TagRule;

    /// Returns canned sub-tokens for each known word.
    struct ScriptedClassifier {
        labels: usize,
        script: HashMap<&'static str, Vec<(&'static str, usize)>>,
        calls: AtomicUsize,
    }

    impl ScriptedClassifier {
        fn new(labels: usize, script: Vec<(&'static str, Vec<(&'static str, usize)>)>) -> Self {
            Self {
                labels,
                script: script.into_iter().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TokenClassifier for ScriptedClassifier {
        fn num_labels(&self) -> usize {
            self.labels
        }

        fn classify(&self, words: &[&str]) -> Result<Vec<SubToken>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out = Vec::new();
            for word in words {
                match self.script.get(*word) {
                    Some(pieces) => {
                        for (i, (text, label)) in pieces.iter().enumerate() {
                            out.push(SubToken::new(*text, i == 0, *label));
                        }
                    }
                    None => out.push(SubToken::new(*word, true, 0)),
                }
            }
            Ok(out)
        }
    }

    fn table() -> Arc<TagTable> {
        Arc::new(
            TagTable::from_rules(vec![
                TagRule::new("", ""),
                TagRule::new("oi", "ôi"),
                TagRule::new("ich", "ích"),
                TagRule::new("i", "í"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_merge_sub_tokens() {
        let sub_tokens = vec![
            SubToken::new("toi", true, 1),
            SubToken::new("thi", true, 0),
            SubToken::new("ch", false, 2),
            SubToken::new("x", false, 2),
            SubToken::new("sp", true, 0),
        ];
        let words = merge_sub_tokens(&sub_tokens);

        assert_eq!(words.len(), 3);
        assert_eq!(words[1].text, "thichx");
        assert_eq!(words[1].labels, vec![0, 2]);
        assert_eq!(words[2].position, 2);
    }

    #[test]
    fn test_leading_continuations_form_their_own_words() {
        let words = merge_sub_tokens(&[
            SubToken::new("ng", false, 0),
            SubToken::new("a", false, 3),
            SubToken::new("b", true, 1),
            SubToken::new("c", false, 2),
        ]);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();

        assert_eq!(texts, ["ng", "a", "bc"]);
        assert_eq!(words[1].labels, vec![3]);
        assert_eq!(words[2].labels, vec![1, 2]);
        assert_eq!(words[2].position, 2);
    }

    #[test]
    fn test_restore_joined_word() {
        let classifier = Arc::new(ScriptedClassifier::new(
            4,
            vec![("toithich", vec![("toi", 1), ("th", 0), ("ich", 0)])],
        ));
        let restorer = DiacriticRestorer::new(table(), classifier).unwrap();

        let restored = restorer.restore("hom nay toithich lam").unwrap();
        assert_eq!(restored, "hom nay tôithich lam");
        assert_eq!(restored.matches("ôi").count(), 1);
    }

    #[test]
    fn test_first_matching_candidate_wins() {
        // labels seen in order 3, 2: "i" -> "í" applies before "ich" -> "ích"
        let classifier = Arc::new(ScriptedClassifier::new(
            4,
            vec![("thich", vec![("th", 3), ("ich", 2)])],
        ));
        let restorer = DiacriticRestorer::new(table(), classifier.clone()).unwrap();
        assert_eq!(restorer.restore("thich").unwrap(), "thích");

        let by_index = DiacriticRestorer::new(table(), classifier)
            .unwrap()
            .with_candidate_order(CandidateOrder::LowestLabelIndex);
        let detailed = by_index.restore_detailed("thich").unwrap();
        assert_eq!(detailed[0].restored, "thích");
        assert_eq!(detailed[0].applied_label, Some(2));
    }

    #[test]
    fn test_non_matching_labels_leave_word() {
        let classifier = Arc::new(ScriptedClassifier::new(4, vec![("ban", vec![("ban", 1)])]));
        let restorer = DiacriticRestorer::new(table(), classifier).unwrap();

        let detailed = restorer.restore_detailed("ban").unwrap();
        assert_eq!(detailed[0].restored, "ban");
        assert_eq!(detailed[0].applied_label, None);
    }

    #[test]
    fn test_empty_input_skips_classifier() {
        let classifier = Arc::new(ScriptedClassifier::new(4, vec![]));
        let restorer = DiacriticRestorer::new(table(), classifier.clone()).unwrap();

        assert_eq!(restorer.restore("   ").unwrap(), "");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_label_count_mismatch_is_fatal() {
        let classifier = Arc::new(ScriptedClassifier::new(5, vec![]));
        assert!(matches!(
            DiacriticRestorer::new(table(), classifier),
            Err(VietsentError::TagTable(_))
        ));
    }

    #[test]
    fn test_out_of_range_label_fails_loudly() {
        let classifier = Arc::new(ScriptedClassifier::new(4, vec![("toi", vec![("toi", 9)])]));
        let restorer = DiacriticRestorer::new(table(), classifier).unwrap();

        match restorer.restore("toi") {
            Err(VietsentError::LabelOutOfRange { index, size }) => {
                assert_eq!(index, 9);
                assert_eq!(size, 4);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
