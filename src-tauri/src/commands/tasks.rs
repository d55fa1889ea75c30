//! House task commands

use crate::app::AppState;
use crate::database::{HouseTask, NewTask};
use crate::error::Result;
use crate::presentation::{partition_tasks, TaskBoard};
use tauri::State;

#[tauri::command]
pub async fn add_task(state: State<'_, AppState>, task: NewTask) -> Result<HouseTask> {
    state.family_data.add_task(task).await
}

#[tauri::command]
pub async fn toggle_task(
    state: State<'_, AppState>,
    id: String,
    completed: bool,
) -> Result<HouseTask> {
    state.family_data.toggle_task(&id, completed).await
}

/// Tasks split into pending and completed
#[tauri::command]
pub async fn get_task_board(state: State<'_, AppState>) -> Result<TaskBoard> {
    let snapshot = state.family_data.snapshot()?;
    Ok(partition_tasks(&snapshot.house_tasks))
}
