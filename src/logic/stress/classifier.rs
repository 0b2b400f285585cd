//! Stress Classifier
//!
//! CHỈ chứa logic classify - không có types, không có UI.
//! Input: ba giá trị thô từ form
//! Output: PredictionOutcome hoặc PredictError

use serde_json::Value;

use super::types::{PredictError, PredictionOutcome, StressLevel};
use crate::logic::features::{coerce_feature, FeatureVectorBuilder};
use crate::logic::model::StressClassifier;

// ============================================================================
// CLASS CODE MAPPING
// ============================================================================

/// Map the model's raw class code to a stress level.
///
/// The trained artifact emits {0, 1, 2}; everything outside {0, 1} maps to
/// HIGH so an unexpected code still yields an answer, but it is logged
/// because it usually means the wrong artifact is installed.
pub fn level_from_class(class_code: i64) -> StressLevel {
    match class_code {
        0 => StressLevel::Low,
        1 => StressLevel::Medium,
        other => {
            if other != 2 {
                log::warn!("Unexpected class code {} from model, mapping to HIGH", other);
            }
            StressLevel::High
        }
    }
}

// ============================================================================
// MAIN PREDICTION FUNCTION
// ============================================================================

/// Run one prediction over the three form values.
///
/// Stateless: nothing persists between calls except the loaded model, so
/// identical inputs against an unchanged model give identical outcomes.
pub fn predict<C: StressClassifier>(
    classifier: &mut C,
    humidity: &Value,
    temperature: &Value,
    step_count: &Value,
) -> Result<PredictionOutcome, PredictError> {
    // Coerce raw form values (numbers or numeric text) to floats
    let humidity = coerce_feature("humidity", humidity).map_err(PredictError::InvalidInput)?;
    let temperature =
        coerce_feature("body_temperature", temperature).map_err(PredictError::InvalidInput)?;
    let step_count = coerce_feature("step_count", step_count).map_err(PredictError::InvalidInput)?;

    // Fixed-order single row, matching the training column order
    let features = FeatureVectorBuilder::new()
        .humidity(humidity)
        .body_temperature(temperature)
        .step_count(step_count)
        .build();

    features
        .validate_ranges()
        .map_err(PredictError::InvalidInput)?;

    let start_time = std::time::Instant::now();

    let class_code = classifier
        .class_of(&features)
        .map_err(|e| PredictError::Inference(e.0))?;

    let inference_time_us = start_time.elapsed().as_micros() as u64;

    let level = level_from_class(class_code);

    Ok(PredictionOutcome {
        level,
        label: level.label(),
        class_code,
        inference_time_us,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FeatureVector;
    use crate::logic::model::InferenceError;
    use serde_json::json;

    /// Stub model returning a fixed class code
    struct StubClassifier(i64);

    impl StressClassifier for StubClassifier {
        fn class_of(&mut self, _features: &FeatureVector) -> Result<i64, InferenceError> {
            Ok(self.0)
        }
    }

    /// Stub model whose call always fails
    struct BrokenClassifier;

    impl StressClassifier for BrokenClassifier {
        fn class_of(&mut self, _features: &FeatureVector) -> Result<i64, InferenceError> {
            Err(InferenceError("session poisoned".to_string()))
        }
    }

    fn default_inputs() -> (Value, Value, Value) {
        (json!(40.0), json!(98.6), json!(5000))
    }

    #[test]
    fn test_class_zero_is_low() {
        let (h, t, s) = default_inputs();
        let outcome = predict(&mut StubClassifier(0), &h, &t, &s).unwrap();
        assert_eq!(outcome.level, StressLevel::Low);
        assert_eq!(outcome.label, "Stress Level: LOW");
        assert_eq!(outcome.class_code, 0);
    }

    #[test]
    fn test_class_one_is_medium() {
        let (h, t, s) = default_inputs();
        let outcome = predict(&mut StubClassifier(1), &h, &t, &s).unwrap();
        assert_eq!(outcome.label, "Stress Level: MEDIUM");
    }

    #[test]
    fn test_class_two_is_high() {
        let (h, t, s) = default_inputs();
        let outcome = predict(&mut StubClassifier(2), &h, &t, &s).unwrap();
        assert_eq!(outcome.label, "Stress Level: HIGH");
    }

    #[test]
    fn test_out_of_range_codes_are_high() {
        assert_eq!(level_from_class(7), StressLevel::High);
        assert_eq!(level_from_class(-1), StressLevel::High);
        assert_eq!(level_from_class(i64::MAX), StressLevel::High);
    }

    #[test]
    fn test_every_in_range_input_yields_a_known_label() {
        let labels = [
            "Stress Level: LOW",
            "Stress Level: MEDIUM",
            "Stress Level: HIGH",
        ];

        for humidity in [10.0, 40.0, 100.0] {
            for temperature in [60.0, 98.6, 100.0] {
                for steps in [0, 5000, 25_000] {
                    for code in 0..3 {
                        let outcome = predict(
                            &mut StubClassifier(code),
                            &json!(humidity),
                            &json!(temperature),
                            &json!(steps),
                        )
                        .unwrap();
                        assert!(labels.contains(&outcome.label.as_str()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let outcome = predict(
            &mut StubClassifier(0),
            &json!("40.0"),
            &json!("98.6"),
            &json!("5000"),
        )
        .unwrap();
        assert_eq!(outcome.level, StressLevel::Low);
    }

    #[test]
    fn test_text_step_count_is_invalid_input() {
        let err = predict(
            &mut StubClassifier(0),
            &json!(40.0),
            &json!(98.6),
            &json!("ten thousand"),
        )
        .unwrap_err();

        match &err {
            PredictError::InvalidInput(reason) => assert!(reason.contains("step_count")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert!(err.to_string().starts_with("Invalid input data:"));
    }

    #[test]
    fn test_out_of_bounds_humidity_is_invalid_input() {
        let err = predict(
            &mut StubClassifier(0),
            &json!(5.0),
            &json!(98.6),
            &json!(5000),
        )
        .unwrap_err();

        assert!(matches!(err, PredictError::InvalidInput(_)));
    }

    #[test]
    fn test_model_failure_is_inference_error() {
        let (h, t, s) = default_inputs();
        let err = predict(&mut BrokenClassifier, &h, &t, &s).unwrap_err();

        match &err {
            PredictError::Inference(reason) => assert!(reason.contains("session poisoned")),
            other => panic!("expected Inference, got {:?}", other),
        }
        assert!(err
            .to_string()
            .starts_with("An error occurred during prediction:"));
    }

    #[test]
    fn test_identical_inputs_are_idempotent() {
        let (h, t, s) = default_inputs();
        let mut stub = StubClassifier(1);

        let first = predict(&mut stub, &h, &t, &s).unwrap();
        let second = predict(&mut stub, &h, &t, &s).unwrap();

        assert_eq!(first.level, second.level);
        assert_eq!(first.label, second.label);
        assert_eq!(first.class_code, second.class_code);
    }
}
