//! House expense commands

use crate::app::AppState;
use crate::database::{HouseExpense, NewExpense};
use crate::error::Result;
use crate::presentation::overdue_expenses;
use chrono::Local;
use tauri::State;

#[tauri::command]
pub async fn add_expense(state: State<'_, AppState>, expense: NewExpense) -> Result<HouseExpense> {
    state.family_data.add_expense(expense).await
}

#[tauri::command]
pub async fn toggle_expense(
    state: State<'_, AppState>,
    id: String,
    paid: bool,
) -> Result<HouseExpense> {
    state.family_data.toggle_expense(&id, paid).await
}

/// Unpaid expenses whose due date has passed
#[tauri::command]
pub async fn get_overdue_expenses(state: State<'_, AppState>) -> Result<Vec<HouseExpense>> {
    let snapshot = state.family_data.snapshot()?;
    Ok(overdue_expenses(
        &snapshot.house_expenses,
        Local::now().date_naive(),
    ))
}
