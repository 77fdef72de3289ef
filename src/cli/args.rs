//! Command line argument parsing for the vietsent CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// vietsent - Vietnamese text standardization and sentiment analysis
#[derive(Parser, Debug, Clone)]
#[command(name = "vietsent")]
#[command(about = "Vietnamese text standardization and sentiment analysis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VietsentArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "VIETSENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VietsentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Standardize text the way it is fed to the sentiment classifier
    Standardize(StandardizeArgs),

    /// Aggregate classifier scores into a canonical verdict
    Aggregate(AggregateArgs),

    /// Validate a tag table file
    #[command(name = "check-tags")]
    CheckTags(CheckTagsArgs),

    /// Standardize and classify text with the keyword classifier
    Classify(ClassifyArgs),
}

/// Arguments for standardizing text
#[derive(Parser, Debug, Clone)]
pub struct StandardizeArgs {
    /// Text to standardize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Standardization tables overriding the built-in ones (JSON)
    #[arg(short, long, value_name = "LEXICON_FILE")]
    pub lexicon: Option<PathBuf>,
}

/// Arguments for aggregating scores
#[derive(Parser, Debug, Clone)]
pub struct AggregateArgs {
    /// Full label distribution as JSON, either `[{"label": "POS", "score": 0.7}, ...]`
    /// or `{"POS": 0.7, ...}`
    #[arg(short, long, value_name = "JSON", conflicts_with_all = ["label", "confidence"])]
    pub scores: Option<String>,

    /// Predicted label when no distribution is available
    #[arg(short, long, requires = "confidence")]
    pub label: Option<String>,

    /// Confidence of the predicted label
    #[arg(short = 'c', long, requires = "label")]
    pub confidence: Option<f64>,

    /// Allowed deviation of the distribution's sum from one
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Arguments for checking a tag table
#[derive(Parser, Debug, Clone)]
pub struct CheckTagsArgs {
    /// Path to the tag table
    #[arg(value_name = "TAG_FILE")]
    pub file: PathBuf,

    /// Expected number of token classifier labels
    #[arg(short = 'n', long)]
    pub labels: Option<usize>,
}

/// Arguments for classifying text
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Texts to classify
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
