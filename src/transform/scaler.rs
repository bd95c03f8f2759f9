//! Variance scaling for the numeric feature branch.
//!
//! Scales each column by its fit-time standard deviation without mean
//! centering, keeping the branch sparse-friendly and on a magnitude
//! comparable to the L2-normalized text branches. Statistics are computed
//! once at fit time and frozen.

use serde::{Deserialize, Serialize};

use crate::error::{FinsiftError, Result};

/// Per-column standard deviation scaler (no mean centering).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column standard deviation, frozen at fit time. Zero-variance
    /// columns store 1.0 so they pass through unchanged.
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Compute per-column scales from the training rows.
    ///
    /// # Errors
    ///
    /// Fails on an empty corpus or rows of inconsistent width.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(FinsiftError::training(
                "cannot fit scaler on an empty corpus",
            ));
        };
        let width = first.len();
        if rows.iter().any(|row| row.len() != width) {
            return Err(FinsiftError::training(
                "numeric rows have inconsistent widths",
            ));
        }

        let n = rows.len() as f64;
        let mut scale = Vec::with_capacity(width);
        for column in 0..width {
            let mean = rows.iter().map(|row| row[column]).sum::<f64>() / n;
            let variance = rows
                .iter()
                .map(|row| (row[column] - mean).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            scale.push(if std > 0.0 { std } else { 1.0 });
        }

        Ok(StandardScaler { scale })
    }

    /// Scale one row using the frozen fit-time statistics.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.scale.iter())
            .map(|(value, std)| value / std)
            .collect()
    }

    /// Number of columns this scaler was fit on.
    pub fn width(&self) -> usize {
        self.scale.len()
    }
}
