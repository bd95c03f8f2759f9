//! Inference over a fitted pipeline.
//!
//! [`Predictor`] runs one raw input through the feature builder, the fitted
//! transform (apply only, never refit), and the classifier, returning the
//! top-1 category and the top-k categories sorted descending by
//! probability. Ties break on configured category order, so repeated calls
//! rank identically.
//!
//! Request validation happens before any inference: `topk` must be within
//! `1..=20`, and merchant/description must be non-empty. A malformed
//! timestamp is recovered locally via the configured fallback.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{FinsiftError, Result};
use crate::features::{self, RawTransaction};
use crate::model::TrainedModel;

/// Smallest accepted `topk`.
pub const MIN_TOP_K: usize = 1;
/// Largest accepted `topk`.
pub const MAX_TOP_K: usize = 20;
/// Default `topk` when the caller does not specify one.
pub const DEFAULT_TOP_K: usize = 3;

/// One raw inference input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Merchant name (non-empty).
    pub merchant: String,
    /// Transaction description (non-empty).
    pub description: String,
    /// Signed transaction amount.
    pub amount: f64,
    /// ISO-8601 timestamp; falls back to the configured default on parse
    /// failure.
    pub timestamp: String,
    /// How many ranked categories to return, `1..=20`.
    pub topk: usize,
}

/// One ranked category with its calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub category: String,
    pub probability: f64,
}

/// The ranked output for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Highest-probability category.
    pub top1: PredictionResult,
    /// Top-k categories, descending by probability.
    pub topk: Vec<PredictionResult>,
}

/// Stateless inference wrapper over a loaded model.
///
/// The model is read-only after construction; predictions can run
/// concurrently from multiple threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: Arc<TrainedModel>,
    default_timestamp: NaiveDateTime,
}

impl Predictor {
    /// Create a predictor over a loaded model.
    ///
    /// # Errors
    ///
    /// Fails if the configured fallback timestamp itself does not parse.
    pub fn new(model: Arc<TrainedModel>, default_timestamp: &str) -> Result<Self> {
        let default_timestamp = default_timestamp.parse::<NaiveDateTime>().map_err(|e| {
            FinsiftError::config(format!(
                "default timestamp '{default_timestamp}' is not ISO-8601: {e}"
            ))
        })?;
        Ok(Predictor {
            model,
            default_timestamp,
        })
    }

    /// Classify one input and return the ranked top-k categories.
    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse> {
        validate(request)?;

        let raw = RawTransaction {
            merchant: request.merchant.clone(),
            description: request.description.clone(),
            amount: request.amount,
            timestamp: features::parse_timestamp_or_default(
                &request.timestamp,
                self.default_timestamp,
            ),
            category: None,
        };
        let record = features::build(&raw);

        let probabilities = self.model.predict_probabilities(&record);
        if probabilities.is_empty() {
            // Probability output unavailable: degrade to the single
            // predicted label with an implied probability of 1.
            let label = self.model.predict_label(&record)?;
            let top1 = PredictionResult {
                category: label.to_string(),
                probability: 1.0,
            };
            return Ok(PredictResponse {
                topk: vec![top1.clone()],
                top1,
            });
        }

        let ranked = rank(self.model.labels(), &probabilities, request.topk);
        Ok(PredictResponse {
            top1: ranked[0].clone(),
            topk: ranked,
        })
    }
}

fn validate(request: &PredictRequest) -> Result<()> {
    if !(MIN_TOP_K..=MAX_TOP_K).contains(&request.topk) {
        return Err(FinsiftError::invalid_argument(format!(
            "topk must be within {MIN_TOP_K}..={MAX_TOP_K}, got {}",
            request.topk
        )));
    }
    if request.merchant.trim().is_empty() {
        return Err(FinsiftError::invalid_argument("merchant must not be empty"));
    }
    if request.description.trim().is_empty() {
        return Err(FinsiftError::invalid_argument(
            "description must not be empty",
        ));
    }
    Ok(())
}

/// Sort category indices descending by probability, ties broken by the
/// original (configured) category order, and take the first `topk`.
fn rank(labels: &[String], probabilities: &[f64], topk: usize) -> Vec<PredictionResult> {
    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    order.sort_by(|&a, &b| {
        probabilities[b]
            .partial_cmp(&probabilities[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });

    order
        .into_iter()
        .take(topk.min(labels.len()))
        .map(|i| PredictionResult {
            category: labels[i].clone(),
            probability: probabilities[i],
        })
        .collect()
}
