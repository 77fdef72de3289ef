//! Async front for serving analyses.
//!
//! Each request takes a permit from a bounded semaphore, runs the CPU-bound
//! stages on the blocking pool and puts a deadline on the sequence classifier
//! call only. A classifier call that misses its deadline is detached, not
//! aborted: it runs to completion in the background and its output is dropped.
//! The detached call keeps its request's permit until it returns, so slow
//! calls still count against the concurrency bound.

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, spawn_blocking};

use crate::config::ServiceConfig;
use crate::error::{Result, VietsentError};
use crate::pipeline::{AnalysisResult, SentimentPipeline};

fn worker_failed(e: JoinError) -> VietsentError {
    VietsentError::analysis(format!("analysis worker failed: {e}"))
}

/// Bounded, timeout-aware executor around a [`SentimentPipeline`].
#[derive(Debug, Clone)]
pub struct AnalysisService {
    pipeline: Arc<SentimentPipeline>,
    semaphore: Arc<Semaphore>,
    config: ServiceConfig,
}

impl AnalysisService {
    pub fn new(pipeline: Arc<SentimentPipeline>, config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        Ok(AnalysisService {
            pipeline,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_tasks)),
            config,
        })
    }

    pub fn pipeline(&self) -> &SentimentPipeline {
        &self.pipeline
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Number of analyses that could start right now.
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Stop accepting work. Requests already past a stage boundary finish
    /// the stage they are in and then fail with a cancellation error.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    /// Analyze one text.
    pub async fn analyze(&self, text: String) -> Result<AnalysisResult> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| VietsentError::cancelled("analysis service is closed"))?;

        let pipeline = Arc::clone(&self.pipeline);
        let input = text.clone();
        let processed = spawn_blocking(move || pipeline.preprocess(&input))
            .await
            .map_err(worker_failed)??;
        self.check_open()?;

        let classifier = Arc::clone(self.pipeline.classifier());
        let classifier_input = processed.clone();
        let call = spawn_blocking(move || {
            let scores = classifier.classify(&classifier_input);
            (scores, permit)
        });
        let (raw_scores, _permit) =
            match tokio::time::timeout(self.config.classifier_timeout, call).await {
                Ok(joined) => joined.map_err(worker_failed)?,
                Err(_) => {
                    warn!(
                        "{} did not answer within {:?}",
                        self.pipeline.classifier().name(),
                        self.config.classifier_timeout
                    );
                    return Err(VietsentError::timeout(format!(
                        "sequence classifier exceeded {:?}",
                        self.config.classifier_timeout
                    )));
                }
            };
        let raw_scores = raw_scores?;
        self.check_open()?;

        let result = self.pipeline.assemble(&text, processed, &raw_scores)?;
        debug!("analyzed {:?} -> {}", text, result.top_label);
        Ok(result)
    }

    /// Analyze several texts concurrently, bounded by the permit count.
    /// Results keep input order.
    pub async fn analyze_many(&self, texts: Vec<String>) -> Vec<Result<AnalysisResult>> {
        join_all(texts.into_iter().map(|text| self.analyze(text))).await
    }

    fn check_open(&self) -> Result<()> {
        if self.semaphore.is_closed() {
            return Err(VietsentError::cancelled("analysis service closed between stages"));
        }
        Ok(())
    }
}
