//! Dashboard commands

use crate::app::AppState;
use crate::error::Result;
use crate::presentation::{dashboard_summary, DashboardSummary};
use chrono::Local;
use tauri::State;

/// Headline counters shown on the home tab
#[tauri::command]
pub async fn get_dashboard_summary(state: State<'_, AppState>) -> Result<DashboardSummary> {
    let snapshot = state.family_data.snapshot()?;
    Ok(dashboard_summary(&snapshot, Local::now().date_naive()))
}
