//! Diacritic (accent mark) restoration.
//!
//! - [`tag_table`] - label index → `bare → accented` rewrite rules
//! - [`token_classifier`] - the external sub-token labeling model contract
//! - [`restorer`] - sub-token merging and per-word rewriting

pub mod restorer;
pub mod tag_table;
pub mod token_classifier;

pub use restorer::{CandidateOrder, DiacriticRestorer, MergedWord, RestoredWord, merge_sub_tokens};
pub use tag_table::{TagRule, TagTable};
pub use token_classifier::{SubToken, TokenClassifier, WORD_PREFIX};
