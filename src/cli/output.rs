//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, VietsentArgs};
use crate::error::Result;
use crate::pipeline::AnalysisResult;
use crate::sentiment::{Aggregation, ScoreMap};

/// Result structure for text standardization.
#[derive(Debug, Serialize, Deserialize)]
pub struct StandardizationResult {
    pub original: String,
    pub standardized: String,
}

/// Result structure for tag table validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagTableReport {
    pub path: String,
    pub rules: usize,
    pub noop_rules: usize,
    pub expected_labels: Option<usize>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &VietsentArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output an aggregation.
pub fn output_aggregation(aggregation: &Aggregation, args: &VietsentArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(aggregation, args),
        OutputFormat::Human => {
            println!(
                "{} ({}) {:.1}%",
                aggregation.top_label,
                aggregation.top_label.vietnamese_name(),
                aggregation.confidence * 100.0
            );
            print_scores(&aggregation.scores);
            Ok(())
        }
    }
}

/// Output analysis results, one block per text.
pub fn output_analyses(results: &[AnalysisResult], args: &VietsentArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(&results, args),
        OutputFormat::Human => {
            for (i, result) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("Text: {}", result.original_text);
                if args.verbosity() > 1 {
                    println!("Processed: {}", result.processed_text);
                }
                println!(
                    "Sentiment: {} ({}) {:.1}%",
                    result.top_label,
                    result.top_label.vietnamese_name(),
                    result.confidence * 100.0
                );
                print_scores(&result.scores);
            }
            Ok(())
        }
    }
}

fn print_scores(scores: &ScoreMap) {
    for (label, score) in scores.iter() {
        println!("  {:<10} {:.4}", label.as_str(), score);
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &VietsentArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(&val));
            }
        }
        other => println!("{}", format_value(&other)),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VietsentArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
