//! Model Loader - One-shot ONNX Artifact Load
//!
//! Load model đúng một lần lúc khởi động. Không retry, không reload,
//! không hot-swap. Process không có model thì không chạy được.

use chrono::{DateTime, Utc};
use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Startup-fatal load failures. NotFound is kept separate from Load because
/// the operator remedies differ (fix the path vs. re-export the artifact).
#[derive(Debug)]
pub enum ModelError {
    /// Artifact missing at the configured path
    NotFound(PathBuf),
    /// Artifact present but unreadable or undeserializable
    Load(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::NotFound(path) => write!(
                f,
                "Model file not found at path: {}. Please check the file path.",
                path.display()
            ),
            ModelError::Load(reason) => {
                write!(f, "An error occurred while loading the model: {}", reason)
            }
        }
    }
}

impl std::error::Error for ModelError {}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata recorded at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// The deserialized model handle. Built once in `main`, owned by the
/// engine state for the process lifetime, never rebuilt.
pub struct LoadedModel {
    pub(crate) session: Session,
    metadata: ModelMetadata,
}

impl LoadedModel {
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Re-read the artifact and compare digests.
    ///
    /// The in-memory session stays untouched either way; a mismatch only
    /// means the file on disk is no longer the one that was loaded.
    pub fn verify_checksum(&self) -> Result<bool, ModelError> {
        let path = Path::new(&self.metadata.model_path);
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let bytes =
            std::fs::read(path).map_err(|e| ModelError::Load(format!("checksum read: {}", e)))?;
        let current = sha256_hex(&bytes);

        let matches = current == self.metadata.sha256;
        if !matches {
            log::warn!(
                "Model checksum mismatch: loaded {} but file is now {}",
                self.metadata.sha256,
                current
            );
        }

        Ok(matches)
    }
}

// ============================================================================
// HASHING
// ============================================================================

/// SHA-256 digest as lowercase hex
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ============================================================================
// MODEL LOADING
// ============================================================================

/// Load ONNX model từ file
pub fn load_model(model_path: &Path) -> Result<LoadedModel, ModelError> {
    log::info!("Loading ONNX model from: {}", model_path.display());

    if !model_path.exists() {
        return Err(ModelError::NotFound(model_path.to_path_buf()));
    }

    let bytes = std::fs::read(model_path)
        .map_err(|e| ModelError::Load(format!("Failed to read model file: {}", e)))?;

    let sha256 = sha256_hex(&bytes);

    // Create ONNX Runtime session
    let session = Session::builder()
        .map_err(|e| ModelError::Load(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ModelError::Load(format!("Failed to set optimization: {}", e)))?
        .commit_from_memory(&bytes)
        .map_err(|e| ModelError::Load(format!("Failed to load model: {}", e)))?;

    log::info!(
        "ONNX model loaded successfully ({} bytes, sha256 {})",
        bytes.len(),
        &sha256[..12]
    );

    Ok(LoadedModel {
        session,
        metadata: ModelMetadata {
            model_path: model_path.display().to_string(),
            size_bytes: bytes.len() as u64,
            sha256,
            loaded_at: Utc::now(),
        },
    })
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_path_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_model.onnx");

        let err = load_model(&path).unwrap_err();
        match &err {
            ModelError::NotFound(p) => assert_eq!(p, &path),
            other => panic!("expected NotFound, got {:?}", other),
        }

        // Rendered message names the path, per the startup-fatal contract
        let msg = err.to_string();
        assert!(msg.contains("Model file not found at path"));
        assert!(msg.contains("no_such_model.onnx"));
    }

    #[test]
    fn test_sha256_hex_known_digest() {
        // sha256("abc")
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_distinguishes_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.bin");

        std::fs::write(&path, b"model-v1").unwrap();
        let first = sha256_hex(&std::fs::read(&path).unwrap());

        std::fs::write(&path, b"model-v2").unwrap();
        let second = sha256_hex(&std::fs::read(&path).unwrap());

        assert_ne!(first, second);
    }
}
