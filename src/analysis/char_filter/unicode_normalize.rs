use unicode_normalization::UnicodeNormalization;

use super::CharFilter;

/// A char filter that composes text to Unicode NFC and, optionally,
/// lower-cases the result.
///
/// Vietnamese input frequently mixes precomposed letters with combining tone
/// marks (`e` + U+0301 vs `é`); NFC folds both spellings onto one form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeNormalizationCharFilter {
    lowercase: bool,
}

impl UnicodeNormalizationCharFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composed and lower-cased, the form the standardizer works on.
    pub fn composed_lowercase() -> Self {
        Self::new().with_lowercase(true)
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl CharFilter for UnicodeNormalizationCharFilter {
    fn filter(&self, input: &str) -> String {
        if !self.lowercase {
            return input.nfc().collect();
        }

        // Lower-casing can emit decomposed sequences for a few code points,
        // so the text is composed again afterwards.
        input.nfc().collect::<String>().to_lowercase().nfc().collect()
    }

    fn name(&self) -> &'static str {
        "unicode_normalization"
    }
}
