//! Stress Predictor Core - Main Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod logic;
pub mod constants;

use api::commands;
use logic::model::EngineState;

// --- Window Control Commands (Manual Implementation) ---
#[tauri::command]
async fn window_minimize(window: tauri::Window) {
    let _ = window.minimize();
}

#[tauri::command]
async fn window_toggle_maximize(window: tauri::Window) {
    if let Ok(is_max) = window.is_maximized() {
        if is_max {
            let _ = window.unmaximize();
        } else {
            let _ = window.maximize();
        }
    }
}

#[tauri::command]
async fn window_close(window: tauri::Window) {
    let _ = window.close();
}

#[tauri::command]
async fn window_start_drag(window: tauri::Window) {
    let _ = window.start_dragging();
}
// -----------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!(
        "Starting {} v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    // Exactly one load attempt per process lifetime. Prediction is impossible
    // without a model, so a failed load halts before any input is accepted.
    let model_path = constants::get_model_path();
    let model = match logic::model::load_model(&model_path) {
        Ok(model) => model,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(EngineState::new(model))
        .invoke_handler(tauri::generate_handler![
            // Window Controls (Manual)
            window_minimize,
            window_toggle_maximize,
            window_close,
            window_start_drag,

            // Prediction Commands
            commands::run_prediction,

            // Status Commands
            commands::get_engine_status,
            commands::verify_model_checksum,

            // Form Commands
            commands::get_form_config,
        ])
        .run(tauri::generate_context!())
        .expect("Lỗi khi khởi chạy ứng dụng Tauri");
}
