//! Inference Engine - ONNX Runtime Integration
//!
//! Chạy classification trên một hàng input duy nhất.
//! Tách trait khỏi ONNX implementation để test với stub model.

use ndarray::Array2;
use ort::value::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use super::loader::LoadedModel;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait cho classifiers (ONNX thật hoặc stub trong tests).
///
/// `&mut self` because `ort` sessions require it to run.
pub trait StressClassifier {
    /// Return the raw integer class code for a single feature row
    fn class_of(&mut self, features: &FeatureVector) -> Result<i64, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

impl StressClassifier for LoadedModel {
    fn class_of(&mut self, features: &FeatureVector) -> Result<i64, InferenceError> {
        // Create input tensor: shape (1, features) - a single row
        let input_array = Array2::<f32>::from_shape_vec(
            (1, FEATURE_COUNT),
            features.as_array().to_vec(),
        )
        .map_err(|e| InferenceError(format!("Failed to create array: {}", e)))?;

        // Get output name BEFORE run to avoid borrow conflict
        let output_name = self
            .session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Failed to create tensor: {}", e)))?;

        let outputs = self
            .session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError("No output from model".to_string()))?;

        // sklearn-exported classifiers emit the label as an int64 tensor;
        // other exporters emit per-class scores. Try the label tensor first,
        // fall back to argmax over scores.
        if let Ok(label_tensor) = output.try_extract_tensor::<i64>() {
            let data = label_tensor.1; // (shape, data) tuple
            return data
                .first()
                .copied()
                .ok_or_else(|| InferenceError("Empty label tensor".to_string()));
        }

        let score_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Failed to extract output: {}", e)))?;

        let data = score_tensor.1;
        if data.is_empty() {
            return Err(InferenceError("Empty score tensor".to_string()));
        }

        let mut best = 0usize;
        for (i, &score) in data.iter().enumerate() {
            if score > data[best] {
                best = i;
            }
        }

        Ok(best as i64)
    }
}

// ============================================================================
// LATENCY STATS
// ============================================================================

/// Cumulative inference counters for the status surface
#[derive(Debug, Default)]
pub struct InferenceStats {
    latency_sum_us: AtomicU64,
    count: AtomicU64,
}

impl InferenceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, latency_us: u64) {
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn avg_latency_ms(&self) -> f32 {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.count.load(Ordering::Relaxed);
        if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        }
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
