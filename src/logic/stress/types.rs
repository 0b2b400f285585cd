//! Stress Types
//!
//! Core types cho stress classification.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// STRESS LEVEL
// ============================================================================

/// Stress classification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressLevel {
    /// Mức thấp, không cần chú ý
    Low,
    /// Mức trung bình, nên theo dõi
    Medium,
    /// Mức cao, cần nghỉ ngơi
    High,
}

impl StressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "LOW",
            StressLevel::Medium => "MEDIUM",
            StressLevel::High => "HIGH",
        }
    }

    /// The rendered result-panel string
    pub fn label(&self) -> String {
        format!("Stress Level: {}", self.as_str())
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            StressLevel::Low => 0,
            StressLevel::Medium => 1,
            StressLevel::High => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StressLevel::Low => "#10b981",    // Green
            StressLevel::Medium => "#f59e0b", // Yellow
            StressLevel::High => "#ef4444",   // Red
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PREDICTION OUTCOME
// ============================================================================

/// Result of one form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub level: StressLevel,
    pub label: String,
    pub class_code: i64,
    pub inference_time_us: u64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Request-recoverable failures. The caller decides how to surface them;
/// the process and the loaded model stay usable for the next submission.
#[derive(Debug)]
pub enum PredictError {
    /// Input could not be coerced into the feature vector
    InvalidInput(String),
    /// The model call itself failed
    Inference(String),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::InvalidInput(reason) => write!(f, "Invalid input data: {}", reason),
            PredictError::Inference(reason) => {
                write!(f, "An error occurred during prediction: {}", reason)
            }
        }
    }
}

impl std::error::Error for PredictError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_fixed_strings() {
        assert_eq!(StressLevel::Low.label(), "Stress Level: LOW");
        assert_eq!(StressLevel::Medium.label(), "Stress Level: MEDIUM");
        assert_eq!(StressLevel::High.label(), "Stress Level: HIGH");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(StressLevel::Low.severity_level() < StressLevel::Medium.severity_level());
        assert!(StressLevel::Medium.severity_level() < StressLevel::High.severity_level());
    }

    #[test]
    fn test_error_messages() {
        let invalid = PredictError::InvalidInput("bad step_count".to_string());
        assert!(invalid.to_string().starts_with("Invalid input data:"));

        let failed = PredictError::Inference("session died".to_string());
        assert!(failed
            .to_string()
            .starts_with("An error occurred during prediction:"));
    }
}
