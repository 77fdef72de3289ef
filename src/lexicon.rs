//! Standardization tables for Vietnamese text.
//!
//! Four immutable lookups drive the standardizer:
//!
//! - abbreviations: informal token → full word (`sp` → `sản phẩm`)
//! - joined words: words typed without spaces → spaced phrase (`toithich` → `tôi thích`)
//! - emoticons: emoticon or emoji → sentiment-bearing phrase (`:)` → `tích_cực`)
//! - compound words: multi-syllable words the segmenter keeps together
//!
//! [`StandardizationTables::default`] carries the built-in Vietnamese tables.
//! A JSON file may replace any of them; tables missing from the file keep
//! their built-in values.
//!
//! ```
//! use vietsent::lexicon::StandardizationTables;
//!
//! let tables: StandardizationTables =
//!     serde_json::from_str(r#"{ "abbreviations": { "ship": "giao hàng" } }"#).unwrap();
//! assert_eq!(tables.abbreviations["ship"], "giao hàng");
//! assert_eq!(tables.joined_words["toithich"], "tôi thích");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VietsentError};

const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("sp", "sản phẩm"),
    ("dk", "được"),
    ("dc", "được"),
    ("ko", "không"),
    ("k", "không"),
    ("bt", "bình thường"),
    ("ok", "tốt"),
    ("oke", "tốt"),
    ("okela", "tốt"),
    ("sg", "sài gòn"),
    ("hn", "hà nội"),
    ("tks", "cảm ơn"),
    ("thank", "cảm ơn"),
    ("thanks", "cảm ơn"),
    ("please", "làm ơn"),
    ("good", "tốt"),
    ("bad", "tệ"),
    ("very", "rất"),
    ("like", "thích"),
    ("hate", "ghét"),
    ("du", "đủ"),
];

const DEFAULT_JOINED_WORDS: &[(&str, &str)] = &[
    ("toithich", "tôi thích"),
    ("toimuon", "tôi muốn"),
    ("toicamthay", "tôi cảm thấy"),
    ("ratthich", "rất thích"),
    ("quathich", "quá thích"),
    ("thichqua", "thích quá"),
    ("banthat", "bạn thật"),
    ("spnay", "sản phẩm này"),
    ("dichvunay", "dịch vụ này"),
    ("toikhong", "tôi không"),
    ("toiko", "tôi không"),
    ("toicung", "tôi cũng"),
    ("toiratthich", "tôi rất thích"),
];

const DEFAULT_EMOTICONS: &[(&str, &str)] = &[
    // positive
    (":)", "tích_cực"),
    (":-)", "tích_cực"),
    ("=)", "tích_cực"),
    (":D", "rất_tích_cực"),
    (":-D", "rất_tích_cực"),
    ("=D", "rất_tích_cực"),
    ("😊", "tích_cực"),
    ("😍", "rất_tích_cực"),
    ("🤩", "rất_tích_cực"),
    ("👍", "tốt"),
    ("❤️", "yêu_thích"),
    ("💖", "yêu_thích"),
    ("😘", "yêu_thích"),
    ("🥰", "yêu_thích"),
    ("😁", "vui"),
    ("😄", "vui"),
    ("😆", "vui"),
    ("😂", "vui"),
    // negative
    (":(", "tiêu_cực"),
    (":-(", "tiêu_cực"),
    ("=(", "tiêu_cực"),
    (":'(", "buồn"),
    ("😞", "buồn"),
    ("😔", "buồn"),
    ("😟", "lo_lắng"),
    ("😠", "tức_giận"),
    ("😡", "rất_tức_giận"),
    ("🤬", "rất_tức_giận"),
    ("👎", "tệ"),
    ("💔", "thất_vọng"),
    ("😢", "khóc"),
    ("😭", "khóc_nhiều"),
    // neutral and sarcastic
    (":|", "bình_thường"),
    (":-|", "bình_thường"),
    ("😐", "bình_thường"),
    ("😑", "không_hài_lòng"),
    ("🤨", "nghi_ngờ"),
    ("😒", "chán"),
    ("🙄", "mắt_đảo"),
    ("😏", "mỉa_mai"),
];

const DEFAULT_COMPOUND_WORDS: &[&str] = &[
    "sản phẩm",
    "dịch vụ",
    "bình thường",
    "cảm ơn",
    "làm ơn",
    "cảm thấy",
    "sài gòn",
    "hà nội",
    "hài lòng",
    "không hài lòng",
    "thất vọng",
    "tuyệt vời",
    "chất lượng",
    "giao hàng",
    "đặt hàng",
    "cửa hàng",
    "khách hàng",
    "nhân viên",
    "giá cả",
    "đóng gói",
    "nhanh chóng",
    "thân thiện",
    "tin tưởng",
    "đáng tiền",
    "ủng hộ",
    "vui vẻ",
    "tức giận",
    "lo lắng",
    "sử dụng",
    "trải nghiệm",
    "hướng dẫn",
    "kém chất lượng",
];

/// The lexical tables used by the text standardizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizationTables {
    /// Informal token → full word, keyed in lower case.
    pub abbreviations: BTreeMap<String, String>,

    /// Concatenated words → spaced phrase.
    pub joined_words: BTreeMap<String, String>,

    /// Emoticon or emoji → sentiment phrase (unpadded).
    pub emoticons: BTreeMap<String, String>,

    /// Multi-syllable words kept as one token during segmentation.
    pub compound_words: Vec<String>,
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for StandardizationTables {
    fn default() -> Self {
        Self {
            abbreviations: to_map(DEFAULT_ABBREVIATIONS),
            joined_words: to_map(DEFAULT_JOINED_WORDS),
            emoticons: to_map(DEFAULT_EMOTICONS),
            compound_words: DEFAULT_COMPOUND_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl StandardizationTables {
    /// Tables with no entries at all.
    pub fn empty() -> Self {
        Self {
            abbreviations: BTreeMap::new(),
            joined_words: BTreeMap::new(),
            emoticons: BTreeMap::new(),
            compound_words: Vec::new(),
        }
    }

    /// Load tables from a JSON file; tables absent from the file keep their
    /// built-in values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut tables: Self = serde_json::from_str(&content)?;
        tables.normalize_keys();
        tables.validate()?;
        info!(
            "Loaded standardization tables from {}: {} abbreviations, {} joined words, {} emoticons, {} compound words",
            path.display(),
            tables.abbreviations.len(),
            tables.joined_words.len(),
            tables.emoticons.len(),
            tables.compound_words.len()
        );
        Ok(tables)
    }

    /// Lower-case lookup keys that are matched against lower-cased text.
    fn normalize_keys(&mut self) {
        self.abbreviations = std::mem::take(&mut self.abbreviations)
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        self.joined_words = std::mem::take(&mut self.joined_words)
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
    }

    /// Reject entries that can never match.
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("abbreviations", &self.abbreviations),
            ("joined_words", &self.joined_words),
            ("emoticons", &self.emoticons),
        ];
        for (name, table) in tables {
            if let Some((key, _)) = table.iter().find(|(k, _)| k.trim().is_empty()) {
                return Err(VietsentError::config(format!(
                    "{name} contains a blank pattern {key:?}"
                )));
            }
        }
        Ok(())
    }
}
