//! Command implementations for the vietsent CLI.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::diacritic::TagTable;
use crate::error::{Result, VietsentError};
use crate::lexicon::StandardizationTables;
use crate::pipeline::SentimentPipeline;
use crate::sentiment::{Aggregation, KeywordSentimentClassifier, RawLabelScore, SentimentAggregator};
use crate::standardizer::TextStandardizer;

/// Execute a CLI command.
pub fn execute_command(args: VietsentArgs) -> Result<()> {
    match &args.command {
        Command::Standardize(standardize_args) => standardize_text(standardize_args, &args),
        Command::Aggregate(aggregate_args) => aggregate_scores(aggregate_args, &args),
        Command::CheckTags(check_args) => check_tags(check_args, &args),
        Command::Classify(classify_args) => classify_texts(classify_args, &args),
    }
}

fn load_config(cli_args: &VietsentArgs) -> Result<PipelineConfig> {
    match &cli_args.config {
        Some(path) => PipelineConfig::from_json_file(path),
        None => Ok(PipelineConfig::default()),
    }
}

/// Standardize one text.
fn standardize_text(args: &StandardizeArgs, cli_args: &VietsentArgs) -> Result<()> {
    let lexicon = args
        .lexicon
        .clone()
        .or(load_config(cli_args)?.lexicon_path);
    let tables = match lexicon {
        Some(path) => StandardizationTables::from_json_file(path)?,
        None => StandardizationTables::default(),
    };
    let standardizer = TextStandardizer::with_tables(&tables)?;

    output_result(
        "Standardized text",
        &StandardizationResult {
            original: args.text.clone(),
            standardized: standardizer.standardize(&args.text),
        },
        cli_args,
    )
}

/// Parse `--scores` as a list of label/score objects or a label → score map.
pub fn parse_scores(json: &str) -> Result<Vec<RawLabelScore>> {
    if let Ok(scores) = serde_json::from_str::<Vec<RawLabelScore>>(json) {
        return Ok(scores);
    }
    let map: BTreeMap<String, f64> = serde_json::from_str(json).map_err(|e| {
        VietsentError::invalid_argument(format!(
            "scores must be a list of {{\"label\", \"score\"}} objects or a label map: {e}"
        ))
    })?;
    Ok(map
        .into_iter()
        .map(|(label, score)| RawLabelScore::new(label, score))
        .collect())
}

/// Aggregate a distribution or a single label.
fn aggregate_scores(args: &AggregateArgs, cli_args: &VietsentArgs) -> Result<()> {
    let tolerance = match args.tolerance {
        Some(tolerance) => tolerance,
        None => load_config(cli_args)?.probability_tolerance,
    };
    let aggregation = aggregate_args(args, &SentimentAggregator::new().with_tolerance(tolerance))?;
    output_aggregation(&aggregation, cli_args)
}

fn aggregate_args(args: &AggregateArgs, aggregator: &SentimentAggregator) -> Result<Aggregation> {
    match (&args.scores, &args.label, args.confidence) {
        (Some(json), _, _) => {
            let raw_scores = parse_scores(json)?;
            if raw_scores.is_empty() {
                return Err(VietsentError::invalid_argument("--scores is empty"));
            }
            aggregator.aggregate_distribution(&raw_scores)
        }
        (None, Some(label), Some(confidence)) => aggregator.aggregate_fallback(label, confidence),
        _ => Err(VietsentError::invalid_argument(
            "either --scores or --label with --confidence is required",
        )),
    }
}

/// Load a tag table and report on it.
fn check_tags(args: &CheckTagsArgs, cli_args: &VietsentArgs) -> Result<()> {
    let table = TagTable::from_path(&args.file)?;
    if let Some(labels) = args.labels {
        table.validate_label_count(labels)?;
    }

    output_result(
        "Tag table is valid",
        &TagTableReport {
            path: args.file.to_string_lossy().to_string(),
            rules: table.len(),
            noop_rules: table.rules().iter().filter(|r| r.is_noop()).count(),
            expected_labels: args.labels,
        },
        cli_args,
    )
}

/// Standardize and classify texts with the keyword classifier.
fn classify_texts(args: &ClassifyArgs, cli_args: &VietsentArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    if config.tag_table_path.is_some() {
        info!("No token classifier is available from the CLI; diacritic restoration is skipped");
    }
    let config = PipelineConfig {
        tag_table_path: None,
        ..config
    };

    let classifier = Arc::new(KeywordSentimentClassifier::new()?);
    let pipeline = SentimentPipeline::from_config(&config, None, classifier)?;

    let start = Instant::now();
    let results = pipeline
        .analyze_batch(args.texts.as_slice())
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    debug!("Classified {} texts in {:?}", results.len(), start.elapsed());

    output_analyses(&results, cli_args)
}
