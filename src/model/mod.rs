//! Training orchestration and the fitted pipeline.
//!
//! [`train`] is the single entry point of a training run: generate the
//! synthetic corpus, build features, split, fit the transform, fit the
//! classifier, and evaluate. The result is a [`TrainedModel`]: the fitted
//! transform, the fitted classifier, and the label set as one atomic,
//! immutable unit. Both halves always come from the same fit call; a
//! transform fitted on one vocabulary is never mixed with a classifier
//! trained on another.

pub mod artifact;
pub mod handle;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::classifier::{SoftmaxRegression, SolverOptions};
use crate::config::Settings;
use crate::error::{FinsiftError, Result};
use crate::features::{self, EngineeredRecord};
use crate::synth;
use crate::transform::FittedTransform;

/// The fitted pipeline: transform + classifier + label set, one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    transform: FittedTransform,
    classifier: SoftmaxRegression,
    labels: Vec<String>,
}

impl TrainedModel {
    /// The label set this model was trained against, in configured order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Probability distribution over the label set for one record.
    ///
    /// Empty when the classifier cannot produce probabilities for the
    /// input; callers fall back to [`TrainedModel::predict_label`].
    pub fn predict_probabilities(&self, record: &EngineeredRecord) -> Vec<f64> {
        self.classifier
            .predict_probabilities(&self.transform.apply(record))
    }

    /// Single best label, used when probability output is unavailable.
    pub fn predict_label(&self, record: &EngineeredRecord) -> Result<&str> {
        let scores = self.classifier.decision_scores(&self.transform.apply(record));
        let best = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .ok_or_else(|| FinsiftError::training("classifier produced no scores"))?;
        Ok(&self.labels[best])
    }

    /// Width of the fitted feature space.
    pub fn feature_width(&self) -> usize {
        self.transform.width()
    }
}

/// Per-category evaluation metrics, one row of the training report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub category: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of held-out samples for this category.
    pub support: usize,
}

/// Summary of one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
    pub converged: bool,
    pub iterations: usize,
    pub feature_width: usize,
    pub categories: Vec<CategoryMetrics>,
}

/// Run a full training pass: generate, fit, evaluate.
pub fn train(settings: &Settings) -> Result<(TrainedModel, TrainReport)> {
    settings.validate()?;

    let raw = synth::generate(settings)?;
    let records = features::build_all(&raw);

    let (train_records, test_records) = split(settings, &records);
    log::info!(
        "training on {} records, holding out {}",
        train_records.len(),
        test_records.len()
    );

    let transform = FittedTransform::fit(&settings.model, &train_records)?;
    let train_features = transform.apply_batch(&train_records);
    let train_labels = label_indices(settings, &train_records)?;

    let classifier = SoftmaxRegression::fit(
        &train_features,
        &train_labels,
        settings.categories.len(),
        &SolverOptions::from(&settings.model),
    )?;

    let model = TrainedModel {
        transform,
        classifier,
        labels: settings.categories.clone(),
    };

    let report = evaluate(settings, &model, train_records.len(), &test_records)?;
    log::info!(
        "evaluation accuracy {:.3} on {} held-out records",
        report.accuracy,
        report.test_size
    );

    Ok((model, report))
}

/// Deterministic per-category split: every category contributes its
/// proportional share of held-out records after a seeded shuffle.
fn split(
    settings: &Settings,
    records: &[EngineeredRecord],
) -> (Vec<EngineeredRecord>, Vec<EngineeredRecord>) {
    // The split draws from its own stream so corpus generation stays
    // byte-stable regardless of the split configuration.
    let mut rng = StdRng::seed_from_u64(settings.seed.wrapping_add(1));

    let mut train = Vec::new();
    let mut test = Vec::new();

    for category in &settings.categories {
        let mut indices: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.category.as_deref() == Some(category.as_str()))
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(&mut rng);

        let total = indices.len();
        let mut test_count = (total as f64 * settings.model.test_size).round() as usize;
        if test_count >= total {
            test_count = total.saturating_sub(1);
        }
        if test_count == 0 && total > 0 {
            log::warn!("category '{category}' is too small for the split; no held-out samples");
        }

        for (position, index) in indices.into_iter().enumerate() {
            if position < test_count {
                test.push(records[index].clone());
            } else {
                train.push(records[index].clone());
            }
        }
    }

    (train, test)
}

fn label_indices(settings: &Settings, records: &[EngineeredRecord]) -> Result<Vec<usize>> {
    records
        .iter()
        .map(|record| {
            let category = record
                .category
                .as_deref()
                .ok_or_else(|| FinsiftError::training("training record without a label"))?;
            settings.category_index(category).ok_or_else(|| {
                FinsiftError::training(format!("label '{category}' is not a configured category"))
            })
        })
        .collect()
}

/// Accuracy plus per-category precision/recall/f1 on the held-out records.
fn evaluate(
    settings: &Settings,
    model: &TrainedModel,
    train_size: usize,
    test_records: &[EngineeredRecord],
) -> Result<TrainReport> {
    let n_categories = settings.categories.len();
    let mut true_positives = vec![0usize; n_categories];
    let mut predicted_counts = vec![0usize; n_categories];
    let mut support = vec![0usize; n_categories];
    let mut correct = 0usize;

    for record in test_records {
        let actual = label_indices(settings, std::slice::from_ref(record))?[0];
        let probabilities = model.predict_probabilities(record);
        let predicted = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .ok_or_else(|| FinsiftError::training("no probabilities during evaluation"))?;

        support[actual] += 1;
        predicted_counts[predicted] += 1;
        if predicted == actual {
            true_positives[actual] += 1;
            correct += 1;
        }
    }

    let categories = settings
        .categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let precision = ratio(true_positives[i], predicted_counts[i]);
            let recall = ratio(true_positives[i], support[i]);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            CategoryMetrics {
                category: category.clone(),
                precision,
                recall,
                f1,
                support: support[i],
            }
        })
        .collect();

    Ok(TrainReport {
        train_size,
        test_size: test_records.len(),
        accuracy: if test_records.is_empty() {
            0.0
        } else {
            correct as f64 / test_records.len() as f64
        },
        converged: model.classifier.converged(),
        iterations: model.classifier.iterations(),
        feature_width: model.feature_width(),
        categories,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_settings() -> Settings {
        let mut settings = Settings::default();
        settings.samples_per_category = 16;
        settings.per_category_overrides.clear();
        settings.min_samples_per_category = 8;
        settings.model.max_iter = 150;
        settings.model.char_max_features = 512;
        settings
    }

    #[test]
    fn test_split_is_proportional_and_deterministic() {
        let settings = quick_settings();
        let raw = synth::generate(&settings).unwrap();
        let records = features::build_all(&raw);

        let (train_a, test_a) = split(&settings, &records);
        let (train_b, test_b) = split(&settings, &records);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(train_a.len() + test_a.len(), records.len());
        assert!(!test_a.is_empty());
    }

    #[test]
    fn test_train_produces_atomic_model() {
        let settings = quick_settings();
        let (model, report) = train(&settings).unwrap();

        assert_eq!(model.labels(), settings.categories.as_slice());
        assert_eq!(report.categories.len(), settings.categories.len());
        assert_eq!(report.feature_width, model.feature_width());
        assert!(report.test_size > 0);
        // Synthetic data is strongly separable; even a short run should
        // beat random assignment by a wide margin.
        assert!(report.accuracy > 0.5, "accuracy {}", report.accuracy);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = quick_settings();
        settings.categories.clear();
        assert!(train(&settings).is_err());
    }
}
