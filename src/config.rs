//! Configuration for the analysis pipeline and the async service.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::diacritic::CandidateOrder;
use crate::error::{Result, VietsentError};
use crate::sentiment::DEFAULT_PROBABILITY_TOLERANCE;

/// Configuration for the async analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Maximum number of analyses running at once.
    pub max_concurrent_tasks: usize,

    /// Deadline for one sequence classifier call.
    pub classifier_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: num_cpus::get(),
            classifier_timeout: Duration::from_secs(30),
        }
    }
}

impl ServiceConfig {
    pub fn with_max_concurrent_tasks(mut self, tasks: usize) -> Self {
        self.max_concurrent_tasks = tasks;
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_tasks == 0 {
            return Err(VietsentError::config("max_concurrent_tasks must be at least 1"));
        }
        if self.classifier_timeout.is_zero() {
            return Err(VietsentError::config("classifier_timeout must be non-zero"));
        }
        Ok(())
    }
}

/// Configuration for building a sentiment pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Tag table resource for diacritic restoration.
    /// If None, restoration is skipped.
    pub tag_table_path: Option<PathBuf>,

    /// JSON file overriding the built-in standardization tables.
    pub lexicon_path: Option<PathBuf>,

    /// Order in which a word's candidate labels are tried.
    pub candidate_order: CandidateOrder,

    /// Allowed deviation of a classifier distribution's sum from one.
    pub probability_tolerance: f64,

    pub service: ServiceConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tag_table_path: None,
            lexicon_path: None,
            candidate_order: CandidateOrder::default(),
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
            service: ServiceConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VietsentError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded pipeline configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_tag_table_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.tag_table_path = Some(path.into());
        self
    }

    pub fn with_lexicon_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    pub fn with_candidate_order(mut self, order: CandidateOrder) -> Self {
        self.candidate_order = order;
        self
    }

    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = tolerance;
        self
    }

    pub fn with_service(mut self, service: ServiceConfig) -> Self {
        self.service = service;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.probability_tolerance.is_finite()
            || !(0.0..1.0).contains(&self.probability_tolerance)
        {
            return Err(VietsentError::config(format!(
                "probability_tolerance {} must be in [0, 1)",
                self.probability_tolerance
            )));
        }
        self.service.validate()
    }
}
