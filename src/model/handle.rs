//! Process-wide handle to the loaded model.
//!
//! The serving layer owns one [`ModelHandle`] and injects it into the
//! inference path. Its lifecycle is uninitialized -> loaded -> (optionally
//! swapped on reload); readers only ever see a complete model or none at
//! all, so inference requests can run concurrently without locking beyond
//! the cheap handle read.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::TrainedModel;

/// An explicitly owned, read-only handle to the currently loaded model.
#[derive(Debug, Default)]
pub struct ModelHandle {
    inner: RwLock<Option<Arc<TrainedModel>>>,
}

impl ModelHandle {
    /// Create an uninitialized handle (liveness reports "not loaded").
    pub fn new() -> Self {
        ModelHandle {
            inner: RwLock::new(None),
        }
    }

    /// Install a model, atomically replacing any previous one.
    ///
    /// In-flight requests holding the previous `Arc` finish against the old
    /// model; new requests see the new one.
    pub fn install(&self, model: TrainedModel) {
        *self.inner.write() = Some(Arc::new(model));
    }

    /// The currently loaded model, if any.
    pub fn get(&self) -> Option<Arc<TrainedModel>> {
        self.inner.read().clone()
    }

    /// Whether a model is loaded. Backs the liveness check.
    pub fn is_loaded(&self) -> bool {
        self.inner.read().is_some()
    }
}
