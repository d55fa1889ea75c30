//! Family agenda commands

use crate::app::AppState;
use crate::database::{FamilyEvent, NewEvent};
use crate::error::Result;
use crate::presentation::{partition_events, EventAgenda};
use chrono::Local;
use tauri::State;

#[tauri::command]
pub async fn add_event(state: State<'_, AppState>, event: NewEvent) -> Result<FamilyEvent> {
    state.family_data.add_event(event).await
}

/// Events split into today, tomorrow and the next few upcoming
#[tauri::command]
pub async fn get_event_agenda(state: State<'_, AppState>) -> Result<EventAgenda> {
    let snapshot = state.family_data.snapshot()?;
    Ok(partition_events(
        &snapshot.family_events,
        Local::now().date_naive(),
    ))
}
