//! Vietnamese word segmentation.
//!
//! Vietnamese writes one syllable per space-separated unit, while many words
//! span two or more syllables (`sản phẩm`, `bình thường`). The tokenizer
//! first splits syllables and punctuation with a [`RegexTokenizer`], then
//! greedily joins the longest run of adjacent syllables that forms a known
//! multi-syllable word. Joined tokens keep a single internal space.

use ahash::AHashSet;

use super::Tokenizer;
use super::regex::RegexTokenizer;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// Dictionary-driven longest-match word segmenter.
#[derive(Clone, Debug)]
pub struct VietnameseWordTokenizer {
    syllables: RegexTokenizer,
    words: AHashSet<String>,
    max_syllables: usize,
}

impl VietnameseWordTokenizer {
    /// Create a segmenter over the given multi-syllable words.
    ///
    /// Entries are whitespace-normalized and lower-cased; single-syllable
    /// entries are ignored since they never join anything.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: AHashSet<String> = words
            .into_iter()
            .map(|w| {
                w.as_ref()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase()
            })
            .filter(|w| w.contains(' '))
            .collect();
        let max_syllables = words
            .iter()
            .map(|w| w.split(' ').count())
            .max()
            .unwrap_or(1);

        Ok(Self {
            syllables: RegexTokenizer::new()?,
            words,
            max_syllables,
        })
    }

    /// Number of multi-syllable words known to the segmenter.
    pub fn vocabulary_size(&self) -> usize {
        self.words.len()
    }

    fn segment(&self, text: &str) -> Vec<Token> {
        let syllables = self.syllables.tokenize_vec(text);
        let mut tokens = Vec::with_capacity(syllables.len());
        let mut i = 0;

        while i < syllables.len() {
            let joined = self.longest_word_at(&syllables, i);
            let span = &syllables[i..i + joined];

            let token = if joined > 1 {
                let word: Vec<&str> = span.iter().map(|t| t.text.as_str()).collect();
                Token::with_offsets(
                    word.join(" "),
                    tokens.len(),
                    span[0].start_offset,
                    span[joined - 1].end_offset,
                )
                .with_token_type(TokenType::Compound)
            } else {
                let mut token = span[0].clone();
                token.position = tokens.len();
                token
            };

            tokens.push(token);
            i += joined;
        }

        tokens
    }

    /// Length (in syllables) of the longest dictionary word starting at `start`,
    /// or 1 when none does.
    fn longest_word_at(&self, syllables: &[Token], start: usize) -> usize {
        let limit = self.max_syllables.min(syllables.len() - start);

        for len in (2..=limit).rev() {
            let span = &syllables[start..start + len];
            if span.iter().any(|t| t.token_type != TokenType::Word) {
                continue;
            }
            let candidate = span
                .iter()
                .map(|t| t.text.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            if self.words.contains(&candidate) {
                return len;
            }
        }

        1
    }
}

impl Tokenizer for VietnameseWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.segment(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "vietnamese_word"
    }
}
