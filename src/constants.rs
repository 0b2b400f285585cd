//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the model location, only edit this file.

use std::path::PathBuf;

/// Default model artifact filename
pub const DEFAULT_MODEL_FILE: &str = "stress_trained.onnx";

/// Default model directory (relative fallback when no data dir exists)
pub const DEFAULT_MODEL_DIR: &str = "models";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Stress Predictor";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
///
/// Resolution order:
/// 1. `STRESS_MODEL_PATH` env var (absolute path to the .onnx file)
/// 2. `<user data dir>/StressPredictor/models/stress_trained.onnx`
/// 3. `models/stress_trained.onnx` relative to the working directory
pub fn get_model_path() -> PathBuf {
    if let Ok(path) = std::env::var("STRESS_MODEL_PATH") {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        return data_dir
            .join("StressPredictor")
            .join(DEFAULT_MODEL_DIR)
            .join(DEFAULT_MODEL_FILE);
    }

    PathBuf::from(DEFAULT_MODEL_DIR).join(DEFAULT_MODEL_FILE)
}
