//! Model Module - AI/ML Inference Engine
//!
//! Tách logic inference khỏi form handling.
//! Model được load một lần trong `main` và sống trong Tauri managed state.

pub mod inference;
pub mod loader;

use parking_lot::{Mutex, MutexGuard};

// Re-export common types
pub use inference::{InferenceError, InferenceStats, StressClassifier};
pub use loader::{load_model, sha256_hex, LoadedModel, ModelError, ModelMetadata};

// ============================================================================
// ENGINE STATE
// ============================================================================

/// Process-wide engine state, constructed once in `main` and handed to
/// `tauri::Builder::manage`. Commands receive it as `State<'_, EngineState>`;
/// nothing else can reach the session.
pub struct EngineState {
    model: Mutex<LoadedModel>,
    stats: InferenceStats,
}

impl EngineState {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: Mutex::new(model),
            stats: InferenceStats::new(),
        }
    }

    /// Metadata snapshot recorded at load time
    pub fn metadata(&self) -> ModelMetadata {
        self.model.lock().metadata().clone()
    }

    /// Lock the model for a single prediction call
    pub fn lock_model(&self) -> MutexGuard<'_, LoadedModel> {
        self.model.lock()
    }

    /// Re-verify the on-disk artifact against the loaded digest
    pub fn verify_checksum(&self) -> Result<bool, ModelError> {
        self.model.lock().verify_checksum()
    }

    pub fn stats(&self) -> &InferenceStats {
        &self.stats
    }
}
