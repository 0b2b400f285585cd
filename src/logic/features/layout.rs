//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The trained model was fit on exactly this column order. A vector built in
//! any other order produces garbage predictions without any runtime error.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: &[&str] = &[
    "humidity",         // 0: Relative humidity percent
    "body_temperature", // 1: Body temperature in °F
    "step_count",       // 2: Steps counted over the measurement window
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 3;

// ============================================================================
// FEATURE BOUNDS & FORM DEFAULTS
// ============================================================================

/// Per-feature input field definition, in FEATURE_LAYOUT order.
///
/// Bounds match what the model saw during training; the form renders its
/// controls from this table so UI and core never disagree.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub step: f32,
}

/// Input field table, one entry per feature
pub const FEATURE_FIELDS: &[FeatureField] = &[
    FeatureField {
        name: "humidity",
        label: "Humidity (%)",
        min: 10.0,
        max: 100.0,
        default: 40.0,
        step: 0.1,
    },
    FeatureField {
        name: "body_temperature",
        label: "Body Temperature (°F)",
        min: 60.0,
        max: 100.0,
        default: 98.6,
        step: 0.1,
    },
    FeatureField {
        name: "step_count",
        label: "Step Count",
        min: 0.0,
        max: f32::MAX,
        default: 5000.0,
        step: 500.0,
    },
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash (inputs are const, so this is stable for the build)
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for the status surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Get the field definition for a feature
pub fn feature_field(name: &str) -> Option<&'static FeatureField> {
    FEATURE_FIELDS.iter().find(|f| f.name == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 3);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_FIELDS.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_fields_match_layout_order() {
        for (i, field) in FEATURE_FIELDS.iter().enumerate() {
            assert_eq!(field.name, FEATURE_LAYOUT[i]);
        }
    }

    #[test]
    fn test_layout_hash_consistency() {
        // Hash should be consistent across calls
        let hash1 = compute_layout_hash();
        let hash2 = compute_layout_hash();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_layout_hash_non_zero() {
        let hash = layout_hash();
        assert_ne!(hash, 0);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("humidity"), Some(0));
        assert_eq!(feature_index("body_temperature"), Some(1));
        assert_eq!(feature_index("step_count"), Some(2));
        assert_eq!(feature_index("nonexistent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("humidity"));
        assert_eq!(feature_name(2), Some("step_count"));
        assert_eq!(feature_name(100), None);
    }

    #[test]
    fn test_feature_field_lookup() {
        let field = feature_field("humidity").unwrap();
        assert_eq!(field.min, 10.0);
        assert_eq!(field.max, 100.0);
        assert_eq!(field.default, 40.0);

        assert!(feature_field("heart_rate").is_none());
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
