//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::TrainReport;
use crate::predict::{PredictRequest, PredictResponse};

/// JSON shape printed by the predict command: the echoed input plus the
/// ranked output.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictOutput {
    pub input: PredictRequest,
    #[serde(flatten)]
    pub response: PredictResponse,
}

/// Print the prediction result as pretty JSON.
pub fn print_prediction(input: PredictRequest, response: PredictResponse) -> Result<()> {
    let output = PredictOutput { input, response };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the training report as an aligned per-category table.
pub fn print_train_report(report: &TrainReport) {
    println!(
        "trained on {} records, evaluated on {} (feature width {})",
        report.train_size, report.test_size, report.feature_width
    );
    if !report.converged {
        println!(
            "note: solver stopped at its {}-iteration budget without converging",
            report.iterations
        );
    }
    println!();
    println!(
        "{:<20} {:>9} {:>9} {:>9} {:>8}",
        "category", "precision", "recall", "f1", "support"
    );
    for metrics in &report.categories {
        println!(
            "{:<20} {:>9.3} {:>9.3} {:>9.3} {:>8}",
            metrics.category, metrics.precision, metrics.recall, metrics.f1, metrics.support
        );
    }
    println!();
    println!("accuracy: {:.3}", report.accuracy);
}
