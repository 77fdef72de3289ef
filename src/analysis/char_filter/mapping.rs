use aho_corasick::{AhoCorasick, MatchKind};

use super::CharFilter;
use crate::error::{Result, VietsentError};

/// Replaces literal patterns with their mapped phrases in a single pass.
///
/// Matching is leftmost-longest: scanning left to right, the longest pattern
/// starting at the earliest position wins, so overlapping entries such as
/// `:)` and `:-)` or `toithich` and `toiratthich` resolve the same way no
/// matter how the mapping was ordered when it was built.
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
    pad: bool,
    name: &'static str,
}

impl MappingCharFilter {
    /// Build a filter from `(pattern, replacement)` pairs.
    ///
    /// Empty patterns are ignored. With `ascii_case_insensitive`, ASCII letters
    /// in patterns match either case (`:D` also matches `:d`).
    pub fn new<I, K, V>(mapping: I, ascii_case_insensitive: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut pairs: Vec<(String, String)> = mapping
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        pairs.sort();
        pairs.dedup_by(|a, b| a.0 == b.0);

        let (keys, replacements): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .ascii_case_insensitive(ascii_case_insensitive)
            .build(&keys)
            .map_err(|e| VietsentError::Anyhow(anyhow::Error::from(e)))?;

        Ok(Self {
            ac,
            replacements,
            pad: false,
            name: "mapping",
        })
    }

    /// Surround every replacement with single spaces so it never fuses with
    /// neighbouring characters.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Number of patterns this filter knows.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> String {
        if self.replacements.is_empty() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            let replacement = &self.replacements[m.pattern().as_usize()];

            output.push_str(&input[last_match_end..m.start()]);
            if self.pad {
                output.push(' ');
                output.push_str(replacement);
                output.push(' ');
            } else {
                output.push_str(replacement);
            }

            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        output
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for MappingCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingCharFilter")
            .field("name", &self.name)
            .field("patterns", &self.replacements.len())
            .field("pad", &self.pad)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_char_filter() {
        let filter = MappingCharFilter::new([("sp", "sản phẩm"), ("dc", "được")], false).unwrap();
        assert_eq!(filter.filter("sp dc"), "sản phẩm được");
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_mapping_overlap_prefers_longest() {
        let filter = MappingCharFilter::new(
            [
                ("toithich", "tôi thích"),
                ("ratthich", "rất thích"),
                ("toiratthich", "tôi rất thích"),
            ],
            false,
        )
        .unwrap();

        assert_eq!(filter.filter("toiratthich"), "tôi rất thích");
        assert_eq!(filter.filter("toithich"), "tôi thích");
    }

    #[test]
    fn test_mapping_order_independent() {
        let forward = MappingCharFilter::new([(":)", "a"), (":-)", "b")], false).unwrap();
        let backward = MappingCharFilter::new([(":-)", "b"), (":)", "a")], false).unwrap();
        let input = "x :-) y :) z";

        assert_eq!(forward.filter(input), "x b y a z");
        assert_eq!(forward.filter(input), backward.filter(input));
    }

    #[test]
    fn test_mapping_padding_and_case() {
        let filter = MappingCharFilter::new([(":D", "rất_tích_cực")], true)
            .unwrap()
            .with_padding(true);
        assert_eq!(filter.filter("hay:d"), "hay rất_tích_cực ");
    }

    #[test]
    fn test_mapping_multibyte() {
        let filter = MappingCharFilter::new([("👍", "tốt")], false)
            .unwrap()
            .with_padding(true);
        assert_eq!(filter.filter("ok👍👍"), "ok tốt  tốt ");
    }

    #[test]
    fn test_empty_mapping_is_identity() {
        let filter = MappingCharFilter::new(Vec::<(String, String)>::new(), false).unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.filter("không đổi"), "không đổi");
    }
}
