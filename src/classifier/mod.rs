//! Multinomial softmax classifier.
//!
//! One joint softmax over all categories (not one-vs-rest), trained with
//! batch gradient descent and class weights inversely proportional to class
//! frequency. Running past the iteration budget without meeting the
//! tolerance is a warning, not an error: the model is still usable, just
//! potentially underfit.

use serde::{Deserialize, Serialize};

use crate::config::ModelSettings;
use crate::error::{FinsiftError, Result};

/// Solver options for [`SoftmaxRegression::fit`].
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// L2 regularization strength, bias excluded.
    pub l2_penalty: f64,
    /// Iteration budget.
    pub max_iter: usize,
    /// Absolute loss-change threshold counted as convergence.
    pub tolerance: f64,
}

impl From<&ModelSettings> for SolverOptions {
    fn from(model: &ModelSettings) -> Self {
        SolverOptions {
            learning_rate: model.learning_rate,
            l2_penalty: model.l2_penalty,
            max_iter: model.max_iter,
            tolerance: model.tolerance,
        }
    }
}

/// A fitted multinomial logistic regression model.
///
/// Weights are laid out per class with a trailing bias term. The fitted
/// model is immutable: prediction never mutates state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    /// Per-class weights, `[n_classes][n_features + 1]`; the last entry of
    /// each row is the bias.
    weights: Vec<Vec<f64>>,
    n_classes: usize,
    n_features: usize,
    /// Whether the solver met the tolerance within its iteration budget.
    converged: bool,
    /// Iterations actually run.
    iterations: usize,
}

impl SoftmaxRegression {
    /// Fit the model on feature vectors and class indices.
    ///
    /// Class weights are balanced: each sample is weighted by
    /// `n_samples / (n_classes * count(class))`, so residual imbalance in
    /// the corpus does not dominate the loss.
    ///
    /// # Errors
    ///
    /// Fails on an empty corpus, mismatched lengths, inconsistent feature
    /// widths, or a label outside `0..n_classes`.
    pub fn fit(
        features: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        options: &SolverOptions,
    ) -> Result<Self> {
        let n_samples = features.len();
        if n_samples == 0 {
            return Err(FinsiftError::training("cannot fit on an empty corpus"));
        }
        if labels.len() != n_samples {
            return Err(FinsiftError::training(format!(
                "feature/label length mismatch: {} vs {}",
                n_samples,
                labels.len()
            )));
        }
        if n_classes < 2 {
            return Err(FinsiftError::training("need at least two classes"));
        }
        let n_features = features[0].len();
        if features.iter().any(|row| row.len() != n_features) {
            return Err(FinsiftError::training(
                "feature rows have inconsistent widths",
            ));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(FinsiftError::training(format!(
                "label index {bad} outside 0..{n_classes}"
            )));
        }

        let sample_weights = balanced_sample_weights(labels, n_classes);

        let mut weights = vec![vec![0.0; n_features + 1]; n_classes];
        let mut previous_loss = f64::INFINITY;
        let mut converged = false;
        let mut iterations = 0;

        for iteration in 0..options.max_iter {
            iterations = iteration + 1;

            let mut gradients = vec![vec![0.0; n_features + 1]; n_classes];
            let mut loss = 0.0;

            for (i, row) in features.iter().enumerate() {
                let probabilities = softmax(&scores(&weights, row));
                let weight = sample_weights[i];
                loss -= weight * probabilities[labels[i]].max(1e-300).ln();

                for (class, class_gradient) in gradients.iter_mut().enumerate() {
                    let indicator = if labels[i] == class { 1.0 } else { 0.0 };
                    let error = weight * (probabilities[class] - indicator);
                    for (j, &value) in row.iter().enumerate() {
                        class_gradient[j] += error * value;
                    }
                    class_gradient[n_features] += error;
                }
            }

            let scale = 1.0 / n_samples as f64;
            loss *= scale;
            for class_weights in &weights {
                for &w in &class_weights[..n_features] {
                    loss += 0.5 * options.l2_penalty * w * w;
                }
            }

            for (class_weights, class_gradient) in weights.iter_mut().zip(gradients.iter()) {
                for j in 0..n_features {
                    let regularized =
                        class_gradient[j] * scale + options.l2_penalty * class_weights[j];
                    class_weights[j] -= options.learning_rate * regularized;
                }
                class_weights[n_features] -=
                    options.learning_rate * class_gradient[n_features] * scale;
            }

            if (previous_loss - loss).abs() < options.tolerance {
                converged = true;
                log::debug!("solver converged after {iterations} iterations (loss {loss:.6})");
                break;
            }
            previous_loss = loss;
        }

        if !converged {
            // Degraded-quality model, not a failure.
            log::warn!(
                "solver did not converge within {} iterations (last loss change tolerance {}); \
                 the model may be underfit",
                options.max_iter,
                options.tolerance
            );
        }

        Ok(SoftmaxRegression {
            weights,
            n_classes,
            n_features,
            converged,
            iterations,
        })
    }

    /// Raw linear decision scores for one feature vector.
    ///
    /// Returns an empty vector when the input width does not match the
    /// fitted width; callers treat that as "no probability output".
    pub fn decision_scores(&self, features: &[f64]) -> Vec<f64> {
        if features.len() != self.n_features {
            return Vec::new();
        }
        scores(&self.weights, features)
    }

    /// Probability distribution over all classes, summing to 1.
    ///
    /// Empty when the input width does not match the fitted width.
    pub fn predict_probabilities(&self, features: &[f64]) -> Vec<f64> {
        let scores = self.decision_scores(features);
        if scores.is_empty() {
            return scores;
        }
        softmax(&scores)
    }

    /// Number of classes the model was fit on.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Whether the solver met its tolerance within the iteration budget.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Iterations the solver actually ran.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Balanced per-sample weights: `n_samples / (n_classes * count(class))`.
fn balanced_sample_weights(labels: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n_classes];
    for &label in labels {
        counts[label] += 1;
    }
    let n = labels.len() as f64;
    labels
        .iter()
        .map(|&label| n / (n_classes as f64 * counts[label] as f64))
        .collect()
}

fn scores(weights: &[Vec<f64>], features: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .map(|class_weights| {
            let bias = class_weights[class_weights.len() - 1];
            class_weights[..features.len()]
                .iter()
                .zip(features.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + bias
        })
        .collect()
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SolverOptions {
        SolverOptions {
            learning_rate: 0.5,
            l2_penalty: 1e-4,
            max_iter: 500,
            tolerance: 1e-9,
        }
    }

    /// Three well-separated clusters in two dimensions.
    fn clustered_data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        let centers = [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)];
        for (class, &(cx, cy)) in centers.iter().enumerate() {
            for i in 0..10 {
                let jitter = (i as f64) * 0.05;
                features.push(vec![cx + jitter, cy - jitter]);
                labels.push(class);
            }
        }
        (features, labels)
    }

    #[test]
    fn test_fit_and_predict_clusters() {
        let (features, labels) = clustered_data();
        let model = SoftmaxRegression::fit(&features, &labels, 3, &options()).unwrap();

        for (row, &label) in features.iter().zip(labels.iter()) {
            let probabilities = model.predict_probabilities(row);
            let predicted = probabilities
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(predicted, label);
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, labels) = clustered_data();
        let model = SoftmaxRegression::fit(&features, &labels, 3, &options()).unwrap();

        let probabilities = model.predict_probabilities(&[1.0, 1.0]);
        assert_eq!(probabilities.len(), 3);
        let sum: f64 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_width_mismatch_yields_empty() {
        let (features, labels) = clustered_data();
        let model = SoftmaxRegression::fit(&features, &labels, 3, &options()).unwrap();

        assert!(model.predict_probabilities(&[1.0, 2.0, 3.0]).is_empty());
        assert!(model.decision_scores(&[1.0]).is_empty());
    }

    #[test]
    fn test_balanced_weights() {
        // Two samples of class 0, one of class 1.
        let weights = balanced_sample_weights(&[0, 0, 1], 2);
        assert!((weights[0] - 0.75).abs() < 1e-12);
        assert!((weights[2] - 1.5).abs() < 1e-12);
        // Total weight equals the sample count.
        assert!((weights.iter().sum::<f64>() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_imbalanced_classes_still_learned() {
        // 30 samples of class 0, 3 of class 1; balancing keeps the minority
        // class predictable at its own cluster.
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..30 {
            features.push(vec![0.0 + (i as f64) * 0.01]);
            labels.push(0);
        }
        for i in 0..3 {
            features.push(vec![3.0 + (i as f64) * 0.01]);
            labels.push(1);
        }
        let model = SoftmaxRegression::fit(&features, &labels, 2, &options()).unwrap();

        let probabilities = model.predict_probabilities(&[3.0]);
        assert!(probabilities[1] > 0.5);
    }

    #[test]
    fn test_validation_errors() {
        assert!(SoftmaxRegression::fit(&[], &[], 2, &options()).is_err());
        assert!(SoftmaxRegression::fit(&[vec![1.0]], &[0, 1], 2, &options()).is_err());
        assert!(SoftmaxRegression::fit(&[vec![1.0]], &[5], 2, &options()).is_err());
        assert!(SoftmaxRegression::fit(&[vec![1.0]], &[0], 1, &options()).is_err());
    }

    #[test]
    fn test_non_convergence_is_not_fatal() {
        let (features, labels) = clustered_data();
        let starved = SolverOptions {
            max_iter: 2,
            tolerance: 0.0,
            ..options()
        };
        let model = SoftmaxRegression::fit(&features, &labels, 3, &starved).unwrap();
        assert!(!model.converged());
        assert_eq!(model.iterations(), 2);
        // Still usable for prediction.
        assert_eq!(model.predict_probabilities(&features[0]).len(), 3);
    }
}
