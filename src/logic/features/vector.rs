//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Bounds checking against the training ranges

use serde::{Deserialize, Serialize};

use super::layout::{layout_hash, FEATURE_COUNT, FEATURE_FIELDS, FEATURE_VERSION};

// ============================================================================
// INPUT COERCION
// ============================================================================

/// Coerce a raw form value into f32.
///
/// The form submits JSON, so a field may arrive as a number or as numeric
/// text. Anything else is rejected with the offending field named.
pub fn coerce_feature(name: &str, value: &serde_json::Value) -> Result<f32, String> {
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| format!("value for '{}' is not a finite number", name)),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f32>()
            .map_err(|_| format!("could not convert string to float: '{}' for '{}'", s, name)),
        other => Err(format!(
            "expected a number for '{}', got {}",
            name,
            json_type_name(other)
        )),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// This struct MUST be used for all feature data.
/// Never pass raw `[f32; N]` into the model directly!
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).map(|i| self.values[i])
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.values[index] = value;
            true
        } else {
            false
        }
    }

    /// Check every value against the bounds the model was trained on.
    ///
    /// The form's bounded controls should make this unreachable, but the core
    /// re-checks because the command boundary accepts arbitrary JSON.
    pub fn validate_ranges(&self) -> Result<(), String> {
        for (field, &value) in FEATURE_FIELDS.iter().zip(self.values.iter()) {
            if !value.is_finite() {
                return Err(format!("value for '{}' is not a finite number", field.name));
            }
            if value < field.min || value > field.max {
                return Err(format!(
                    "value {} for '{}' is outside the allowed range [{}, {}]",
                    value, field.name, field.min, field.max
                ));
            }
        }
        Ok(())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self {
            vector: FeatureVector::new(),
        }
    }

    pub fn humidity(mut self, value: f32) -> Self {
        self.vector.set_by_name("humidity", value);
        self
    }

    pub fn body_temperature(mut self, value: f32) -> Self {
        self.vector.set_by_name("body_temperature", value);
        self
    }

    pub fn step_count(mut self, value: f32) -> Self {
        self.vector.set_by_name("step_count", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f32) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_vector_builder() {
        let vector = FeatureVectorBuilder::new()
            .humidity(40.0)
            .body_temperature(98.6)
            .step_count(5000.0)
            .build();

        assert_eq!(vector.get_by_name("humidity"), Some(40.0));
        assert_eq!(vector.get_by_name("body_temperature"), Some(98.6));
        assert_eq!(vector.get_by_name("step_count"), Some(5000.0));
        assert_eq!(vector.values, [40.0, 98.6, 5000.0]);
    }

    #[test]
    fn test_feature_vector_set_by_name() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("humidity", 42.0));
        assert_eq!(vector.get_by_name("humidity"), Some(42.0));

        assert!(!vector.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_validate_ranges_accepts_defaults() {
        let vector = FeatureVectorBuilder::new()
            .humidity(40.0)
            .body_temperature(98.6)
            .step_count(5000.0)
            .build();

        assert!(vector.validate_ranges().is_ok());
    }

    #[test]
    fn test_validate_ranges_rejects_out_of_bounds() {
        let vector = FeatureVectorBuilder::new()
            .humidity(5.0) // below the slider minimum of 10.0
            .body_temperature(98.6)
            .step_count(5000.0)
            .build();

        let err = vector.validate_ranges().unwrap_err();
        assert!(err.contains("humidity"));
    }

    #[test]
    fn test_validate_ranges_rejects_negative_steps() {
        let vector = FeatureVectorBuilder::new()
            .humidity(40.0)
            .body_temperature(98.6)
            .step_count(-100.0)
            .build();

        assert!(vector.validate_ranges().is_err());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_feature("humidity", &json!(40.0)), Ok(40.0));
        assert_eq!(coerce_feature("step_count", &json!(5000)), Ok(5000.0));
    }

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(coerce_feature("humidity", &json!("40.5")), Ok(40.5));
        assert_eq!(coerce_feature("step_count", &json!(" 5000 ")), Ok(5000.0));
    }

    #[test]
    fn test_coerce_rejects_text() {
        let err = coerce_feature("step_count", &json!("a lot")).unwrap_err();
        assert!(err.contains("step_count"));
    }

    #[test]
    fn test_coerce_rejects_non_numbers() {
        assert!(coerce_feature("humidity", &json!(true)).is_err());
        assert!(coerce_feature("humidity", &json!(null)).is_err());
        assert!(coerce_feature("humidity", &json!([40.0])).is_err());
    }
}
