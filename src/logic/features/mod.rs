//! Features Module - Form Input → Model Input
//!
//! Tách logic xây dựng feature vector khỏi inference.
//! Layout, bounds và coercion đều nằm ở đây.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{FeatureField, LayoutInfo, FEATURE_COUNT, FEATURE_FIELDS, FEATURE_VERSION};
pub use vector::{coerce_feature, FeatureVector, FeatureVectorBuilder};
