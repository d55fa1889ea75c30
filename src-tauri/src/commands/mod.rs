//! Tauri commands exposed to the frontend
//!
//! This module organizes commands into one submodule per tab:
//! - `session`: account sign-up/sign-in/sign-out
//! - `family`: bootstrap, state refresh, members
//! - `shopping`, `tasks`, `events`, `meals`, `routines`, `expenses`
//! - `dashboard`: headline counters

pub mod dashboard;
pub mod events;
pub mod expenses;
pub mod family;
pub mod meals;
pub mod routines;
pub mod session;
pub mod shopping;
pub mod tasks;

use crate::app::AppState;
use crate::error::Result;
use tauri::State;

// Re-export all commands for convenient registration in main.rs
pub use dashboard::*;
pub use events::*;
pub use expenses::*;
pub use family::*;
pub use meals::*;
pub use routines::*;
pub use session::*;
pub use shopping::*;
pub use tasks::*;

// ===== General Commands =====

/// Get application information
#[tauri::command]
pub async fn get_app_info(state: State<'_, AppState>) -> Result<AppInfo> {
    Ok(AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        app_data_dir: state.app_data_dir.to_string_lossy().to_string(),
    })
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub app_data_dir: String,
}
