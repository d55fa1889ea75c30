//! Child routine commands

use crate::app::AppState;
use crate::database::{ChildRoutine, NewRoutine};
use crate::error::Result;
use tauri::State;

#[tauri::command]
pub async fn add_routine(state: State<'_, AppState>, routine: NewRoutine) -> Result<ChildRoutine> {
    state.family_data.add_routine(routine).await
}

#[tauri::command]
pub async fn toggle_routine(
    state: State<'_, AppState>,
    id: String,
    completed: bool,
) -> Result<ChildRoutine> {
    state.family_data.toggle_routine(&id, completed).await
}

/// Today's routine entries, ascending by time
#[tauri::command]
pub async fn get_today_routines(state: State<'_, AppState>) -> Result<Vec<ChildRoutine>> {
    Ok(state.family_data.snapshot()?.child_routines)
}
