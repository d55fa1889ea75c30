//! Session commands

use crate::app::AppState;
use crate::error::Result;
use crate::services::Identity;
use tauri::State;

#[tauri::command]
pub async fn sign_up(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<Identity> {
    state.session.sign_up(&email, &password).await
}

#[tauri::command]
pub async fn sign_in(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<Identity> {
    state.session.sign_in(&email, &password).await
}

/// Sign out and drop all cached family data
#[tauri::command]
pub async fn sign_out(state: State<'_, AppState>) -> Result<()> {
    state.session.sign_out().await?;
    state.family_data.deactivate()
}

#[tauri::command]
pub async fn current_identity(state: State<'_, AppState>) -> Result<Option<Identity>> {
    Ok(state.session.current_identity())
}
