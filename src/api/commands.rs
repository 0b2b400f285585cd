//! Tauri Commands - API cho Frontend
//!
//! Form gửi ba giá trị thô, nhận về một nhãn stress level duy nhất.
//! Model status cho sidebar, form config cho sliders.

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::constants;
use crate::logic::features::{LayoutInfo, FEATURE_FIELDS};
use crate::logic::model::EngineState;
use crate::logic::stress;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Kết quả dự đoán cho Frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub label: String,
    pub level: String,
    pub severity: u8,
    pub color: String,
    pub class_code: i64,
    pub inference_time_us: u64,
}

/// Trạng thái engine cho sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,

    pub model: ModelStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub model_path: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub loaded_at: String,
    pub inference_device: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

/// Một control trên form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub min: f32,
    pub max: Option<f32>,
    pub default: f32,
    pub step: f32,
}

/// Toàn bộ cấu hình form (một nguồn duy nhất cho UI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub app_name: String,
    pub app_version: String,
    pub fields: Vec<FormField>,
}

// ============================================================================
// PREDICTION COMMANDS
// ============================================================================

/// Chạy dự đoán stress level trên ba giá trị từ form
///
/// Lỗi coercion hoặc lỗi model trả về Err(String) - form hiển thị inline,
/// process và model vẫn sống cho lần submit tiếp theo.
#[tauri::command]
pub async fn run_prediction(
    state: State<'_, EngineState>,
    humidity: serde_json::Value,
    temperature: serde_json::Value,
    step_count: serde_json::Value,
) -> Result<PredictionResponse, String> {
    let outcome = {
        let mut model = state.lock_model();
        stress::predict(&mut *model, &humidity, &temperature, &step_count)
            .map_err(|e| e.to_string())?
    };

    state.stats().record(outcome.inference_time_us);

    Ok(PredictionResponse {
        label: outcome.label,
        level: outcome.level.as_str().to_string(),
        severity: outcome.level.severity_level(),
        color: outcome.level.color().to_string(),
        class_code: outcome.class_code,
        inference_time_us: outcome.inference_time_us,
    })
}

// ============================================================================
// STATUS COMMANDS
// ============================================================================

/// Lấy trạng thái engine (model + feature layout) cho sidebar
#[tauri::command]
pub async fn get_engine_status(state: State<'_, EngineState>) -> Result<EngineStatus, String> {
    let metadata = state.metadata();
    let layout = LayoutInfo::current();

    Ok(EngineStatus {
        feature_version: layout.version,
        layout_hash: layout.hash,
        feature_count: layout.feature_count,
        model: ModelStatus {
            loaded: true,
            model_path: metadata.model_path,
            size_bytes: metadata.size_bytes,
            sha256: metadata.sha256,
            loaded_at: metadata.loaded_at.to_rfc3339(),
            inference_device: "ONNX Runtime (CPU)".to_string(),
            avg_latency_ms: state.stats().avg_latency_ms(),
            inference_count: state.stats().count(),
        },
    })
}

/// Xác minh checksum của model artifact trên disk
#[tauri::command]
pub async fn verify_model_checksum(state: State<'_, EngineState>) -> Result<bool, String> {
    state.verify_checksum().map_err(|e| e.to_string())
}

// ============================================================================
// FORM COMMANDS
// ============================================================================

/// Lấy cấu hình form (bounds, defaults, steps) từ feature layout
#[tauri::command]
pub async fn get_form_config() -> Result<FormConfig, String> {
    let fields = FEATURE_FIELDS
        .iter()
        .map(|f| FormField {
            name: f.name.to_string(),
            label: f.label.to_string(),
            min: f.min,
            // f32::MAX marks "unbounded" in the layout table; the form
            // renders that as a plain number input with no max attribute
            max: if f.max == f32::MAX { None } else { Some(f.max) },
            default: f.default,
            step: f.step,
        })
        .collect();

    Ok(FormConfig {
        app_name: constants::APP_NAME.to_string(),
        app_version: constants::APP_VERSION.to_string(),
        fields,
    })
}
