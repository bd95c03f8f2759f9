//! Command implementations for the finsift CLI.
//!
//! Thin shims only: both commands delegate to the library and never carry
//! pipeline logic of their own.

use std::sync::Arc;

use crate::cli::args::{Command, FinsiftArgs, PredictArgs, TrainArgs};
use crate::cli::output;
use crate::config::Settings;
use crate::error::Result;
use crate::model::{self, artifact};
use crate::predict::{PredictRequest, Predictor};

/// Execute a CLI command.
pub fn execute_command(args: FinsiftArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
    }
}

/// Train on synthetic data and persist the model artifact.
fn train(args: TrainArgs, cli_args: &FinsiftArgs) -> Result<()> {
    let mut settings = Settings::default();
    if let Some(samples) = args.samples {
        settings.samples_per_category = samples;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    if cli_args.verbosity() > 1 {
        println!(
            "training with seed {} ({} samples per category)",
            settings.seed, settings.samples_per_category
        );
    }

    let (model, report) = model::train(&settings)?;
    artifact::save(&model, &args.model_path)?;

    if cli_args.verbosity() > 0 {
        output::print_train_report(&report);
        println!("saved: {}", args.model_path.display());
    }
    Ok(())
}

/// Load the persisted model and classify one transaction.
fn predict(args: PredictArgs, _cli_args: &FinsiftArgs) -> Result<()> {
    let settings = Settings::default();
    let model = artifact::load(&args.model_path, &settings.categories)?;

    let predictor = Predictor::new(Arc::new(model), &settings.default_timestamp)?;
    let request = PredictRequest {
        merchant: args.merchant,
        description: args.description,
        amount: args.amount,
        timestamp: args.iso_datetime,
        topk: args.topk,
    };

    let response = predictor.predict(&request)?;
    output::print_prediction(request, response)
}
