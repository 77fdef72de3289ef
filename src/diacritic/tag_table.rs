//! Tag table: the label index → rewrite rule lookup of the accent model.
//!
//! The resource is line oriented. Each non-blank line is one rule written
//! `bare-accented` (for example `oi-ôi`), and the n-th non-blank line is the
//! rule for label `n`. A rule with an empty bare part (`-`) is the "leave the
//! word alone" label and never matches.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::{Result, VietsentError};

/// One `bare → accented` substring rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub bare: String,
    pub accented: String,
}

impl TagRule {
    pub fn new<B: Into<String>, A: Into<String>>(bare: B, accented: A) -> Self {
        TagRule {
            bare: bare.into(),
            accented: accented.into(),
        }
    }

    /// Parse a `bare-accented` line. Exactly one `-` separator is allowed.
    pub fn parse(line: &str) -> Result<Self> {
        Self::parse_parts(line).map_err(VietsentError::tag_table)
    }

    fn parse_parts(line: &str) -> std::result::Result<Self, String> {
        let (bare, accented) = line
            .split_once('-')
            .ok_or_else(|| format!("missing '-' separator in {line:?}"))?;
        if accented.contains('-') {
            return Err(format!("more than one '-' separator in {line:?}"));
        }
        Ok(TagRule::new(bare, accented))
    }

    /// Whether this rule can ever change a word.
    pub fn is_noop(&self) -> bool {
        self.bare.is_empty()
    }

    /// Rewrite the first occurrence of the bare substring, if present.
    pub fn apply(&self, word: &str) -> Option<String> {
        if self.is_noop() || !word.contains(self.bare.as_str()) {
            return None;
        }
        Some(word.replacen(self.bare.as_str(), &self.accented, 1))
    }
}

/// Ordered rule list indexed by classifier label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    rules: Vec<TagRule>,
}

impl TagTable {
    /// Build a table from rules already in label order.
    pub fn from_rules(rules: Vec<TagRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(VietsentError::tag_table("tag table has no rules"));
        }
        Ok(TagTable { rules })
    }

    /// Parse a table from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rules = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let rule = TagRule::parse_parts(line)
                .map_err(|e| VietsentError::tag_table(format!("line {}: {e}", line_no + 1)))?;
            rules.push(rule);
        }
        Self::from_rules(rules)
    }

    /// Load a table from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            VietsentError::tag_table(format!("cannot open {}: {e}", path.display()))
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} tag rules from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule for `label`; an unknown label is a model/table version mismatch.
    pub fn rule(&self, label: usize) -> Result<&TagRule> {
        self.rules.get(label).ok_or(VietsentError::LabelOutOfRange {
            index: label,
            size: self.rules.len(),
        })
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// Fail unless the table has exactly one rule per classifier label.
    pub fn validate_label_count(&self, num_labels: usize) -> Result<()> {
        if self.rules.len() != num_labels {
            return Err(VietsentError::tag_table(format!(
                "tag table has {} rules but the token classifier predicts {} labels",
                self.rules.len(),
                num_labels
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_rule() {
        assert_eq!(TagRule::parse("oi-ôi").unwrap(), TagRule::new("oi", "ôi"));
        assert!(TagRule::parse("-").unwrap().is_noop());
        assert!(TagRule::parse("oi").is_err());
        assert!(TagRule::parse("o-i-ôi").is_err());
    }

    #[test]
    fn test_apply_replaces_first_occurrence_only() {
        let rule = TagRule::new("a", "á");
        assert_eq!(rule.apply("banana").as_deref(), Some("bánana"));
        assert_eq!(rule.apply("xyz"), None);
        assert_eq!(TagRule::new("", "x").apply("abc"), None);
    }

    #[test]
    fn test_from_reader_skips_blank_lines() {
        let table = TagTable::from_reader(Cursor::new("-\n\n oi-ôi \nich-ích\n\n")).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rule(1).unwrap(), &TagRule::new("oi", "ôi"));
        assert_eq!(table.rule(2).unwrap().accented, "ích");
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = TagTable::from_reader(Cursor::new("-\noi-ôi\nbroken\n")).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(TagTable::from_reader(Cursor::new("\n\n")).is_err());
    }

    #[test]
    fn test_label_out_of_range() {
        let table = TagTable::from_rules(vec![TagRule::new("", "")]).unwrap();
        match table.rule(5) {
            Err(VietsentError::LabelOutOfRange { index, size }) => {
                assert_eq!(index, 5);
                assert_eq!(size, 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_label_count() {
        let table = TagTable::from_reader(Cursor::new("-\noi-ôi\n")).unwrap();
        assert!(table.validate_label_count(2).is_ok());
        assert!(matches!(
            table.validate_label_count(3),
            Err(VietsentError::TagTable(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-").unwrap();
        writeln!(file, "uong-ương").unwrap();

        let table = TagTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(TagTable::from_path("/nonexistent/tags.txt").is_err());
    }
}
