use std::sync::LazyLock;

use regex::Regex;

use super::CharFilter;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Whitespace pattern should be valid"));

/// Collapses every whitespace run to a single space and trims both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCollapseCharFilter;

impl WhitespaceCollapseCharFilter {
    pub fn new() -> Self {
        WhitespaceCollapseCharFilter
    }
}

impl CharFilter for WhitespaceCollapseCharFilter {
    fn filter(&self, input: &str) -> String {
        WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
    }

    fn name(&self) -> &'static str {
        "whitespace_collapse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_trim() {
        let filter = WhitespaceCollapseCharFilter::new();
        assert_eq!(filter.filter("\n  sản \t\t phẩm   tốt \r\n"), "sản phẩm tốt");
        assert_eq!(filter.filter("   "), "");
        assert_eq!(filter.filter(""), "");
    }

    #[test]
    fn test_unicode_whitespace() {
        let filter = WhitespaceCollapseCharFilter::new();
        // no-break space and ideographic space
        assert_eq!(filter.filter("rất\u{00a0}\u{3000}tốt"), "rất tốt");
    }
}
