//! Meal plan commands

use crate::app::AppState;
use crate::database::{Meal, NewMeal};
use crate::error::Result;
use tauri::State;

#[tauri::command]
pub async fn add_meal(state: State<'_, AppState>, meal: NewMeal) -> Result<Meal> {
    state.family_data.add_meal(meal).await
}

/// The week's planned meals, ascending by date
#[tauri::command]
pub async fn get_meal_plan(state: State<'_, AppState>) -> Result<Vec<Meal>> {
    Ok(state.family_data.snapshot()?.meals)
}
