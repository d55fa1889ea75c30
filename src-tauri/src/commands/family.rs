//! Family bootstrap and state commands

use crate::app::AppState;
use crate::database::{FamilyMember, NewMember};
use crate::error::{AppError, Result};
use crate::services::FamilyState;
use tauri::State;

/// Resolve the signed-in account's family, creating it on first use,
/// then load all of its data
#[tauri::command]
pub async fn bootstrap_family(state: State<'_, AppState>) -> Result<FamilyState> {
    let identity = state
        .session
        .current_identity()
        .ok_or(AppError::NotSignedIn)?;

    let (family, member) = state.family.ensure_family(&identity).await?;
    state.family_data.activate(family, member)?;
    state.family_data.refresh().await
}

/// Re-read every entity list for the active family
#[tauri::command]
pub async fn refresh_family_data(state: State<'_, AppState>) -> Result<FamilyState> {
    state.family_data.refresh().await
}

/// Current in-memory state without touching the database
#[tauri::command]
pub async fn get_family_state(state: State<'_, AppState>) -> Result<FamilyState> {
    state.family_data.snapshot()
}

#[tauri::command]
pub async fn add_member(state: State<'_, AppState>, member: NewMember) -> Result<FamilyMember> {
    state.family_data.add_member(member).await
}
