//! Shopping list commands

use crate::app::AppState;
use crate::database::{NewShoppingItem, ShoppingItem};
use crate::error::Result;
use crate::presentation::{partition_shopping, ShoppingBoard};
use tauri::State;

#[tauri::command]
pub async fn add_shopping_item(
    state: State<'_, AppState>,
    item: NewShoppingItem,
) -> Result<ShoppingItem> {
    state.family_data.add_shopping_item(item).await
}

#[tauri::command]
pub async fn toggle_shopping_item(
    state: State<'_, AppState>,
    id: String,
    completed: bool,
) -> Result<ShoppingItem> {
    state.family_data.toggle_shopping_item(&id, completed).await
}

/// Shopping items split into pending and completed
#[tauri::command]
pub async fn get_shopping_board(state: State<'_, AppState>) -> Result<ShoppingBoard> {
    let snapshot = state.family_data.snapshot()?;
    Ok(partition_shopping(&snapshot.shopping_items))
}
