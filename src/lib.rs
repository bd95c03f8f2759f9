//! # finsift
//!
//! Transaction-category classification for short free-text financial
//! records (merchant, description, amount, timestamp).
//!
//! ## Features
//!
//! - Deterministic synthetic training data, seeded and reproducible
//! - Three-branch feature transform: word tf-idf, word-boundary character
//!   tf-idf, and scaled numerics
//! - Multinomial softmax classifier with balanced class weights
//! - Calibrated, ranked top-k predictions
//! - Single-file model artifact with atomic load/swap for serving
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use finsift::config::Settings;
//! use finsift::model;
//! use finsift::predict::{PredictRequest, Predictor};
//!
//! # fn main() -> finsift::error::Result<()> {
//! let mut settings = Settings::default();
//! # settings.samples_per_category = 12;
//! # settings.per_category_overrides.clear();
//! # settings.min_samples_per_category = 8;
//! # settings.model.max_iter = 60;
//! # settings.model.char_max_features = 256;
//! let (model, report) = model::train(&settings)?;
//! println!("accuracy: {:.3}", report.accuracy);
//!
//! let predictor = Predictor::new(Arc::new(model), &settings.default_timestamp)?;
//! let response = predictor.predict(&PredictRequest {
//!     merchant: "McCafe".to_string(),
//!     description: "Lunch".to_string(),
//!     amount: 8.99,
//!     timestamp: "2025-08-21T12:00:00".to_string(),
//!     topk: 3,
//! })?;
//! println!("{} ({:.2})", response.top1.category, response.top1.probability);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod predict;
pub mod synth;
pub mod transform;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
