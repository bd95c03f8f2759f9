//! Persistence for the fitted pipeline.
//!
//! The trained model is serialized as one JSON document so the transform,
//! the classifier, and the label set travel (and are replaced) atomically.
//! The loader fails clearly when the artifact is missing, unparsable, or
//! was fit against a different category set than currently configured.

use std::fs;
use std::path::Path;

use crate::error::{FinsiftError, Result};
use crate::model::TrainedModel;

/// Persist a trained model to `path`.
pub fn save(model: &TrainedModel, path: &Path) -> Result<()> {
    let json = serde_json::to_string(model)?;
    fs::write(path, json)?;
    log::info!("saved model artifact to {}", path.display());
    Ok(())
}

/// Load a trained model from `path`, verifying it against the currently
/// configured category set.
///
/// # Errors
///
/// - missing or unreadable file,
/// - payload that does not parse as a model artifact,
/// - artifact label set differing from `expected_categories`.
pub fn load(path: &Path, expected_categories: &[String]) -> Result<TrainedModel> {
    let payload = fs::read_to_string(path).map_err(|e| {
        FinsiftError::artifact(format!("cannot read artifact at {}: {e}", path.display()))
    })?;

    let model: TrainedModel = serde_json::from_str(&payload).map_err(|e| {
        FinsiftError::artifact(format!(
            "artifact at {} is corrupt or truncated: {e}",
            path.display()
        ))
    })?;

    if model.labels() != expected_categories {
        return Err(FinsiftError::artifact(format!(
            "artifact at {} was fit against a different category set \
             ({} labels vs {} configured)",
            path.display(),
            model.labels().len(),
            expected_categories.len()
        )));
    }

    log::info!("loaded model artifact from {}", path.display());
    Ok(model)
}
