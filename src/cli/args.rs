//! Command line argument parsing for the finsift CLI using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_ISO_DATETIME;
use crate::predict::DEFAULT_TOP_K;

/// finsift - transaction category classification
#[derive(Parser, Debug, Clone)]
#[command(name = "finsift")]
#[command(about = "Train and query a transaction-category classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FinsiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FinsiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model on synthetic data and persist the artifact
    Train(TrainArgs),

    /// Classify one transaction using a persisted model
    Predict(PredictArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Where to write the model artifact
    #[arg(short = 'p', long = "model-path", default_value = "model.json")]
    pub model_path: PathBuf,

    /// Samples to generate per category (defaults to the built-in setting)
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Random seed override
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Merchant name
    #[arg(short, long, default_value = "Tesco")]
    pub merchant: String,

    /// Transaction description
    #[arg(short, long, default_value = "groceries")]
    pub description: String,

    /// Transaction amount
    #[arg(short, long, default_value_t = 43.0, allow_hyphen_values = true)]
    pub amount: f64,

    /// ISO datetime of the transaction
    #[arg(short = 't', long = "time", default_value = DEFAULT_ISO_DATETIME)]
    pub iso_datetime: String,

    /// How many top categories to show
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub topk: usize,

    /// Path to the model artifact
    #[arg(short = 'p', long = "model-path", default_value = "model.json")]
    pub model_path: PathBuf,
}
