// FamilyHub - household organization desktop application
// Entry point and application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod commands;
mod config;
mod database;
mod error;
mod presentation;
mod services;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "familyhub=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FamilyHub application");

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            tracing::info!("Running app setup");
            app::setup(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_app_info,
            commands::sign_up,
            commands::sign_in,
            commands::sign_out,
            commands::current_identity,
            commands::bootstrap_family,
            commands::refresh_family_data,
            commands::get_family_state,
            commands::add_member,
            commands::add_shopping_item,
            commands::toggle_shopping_item,
            commands::get_shopping_board,
            commands::add_task,
            commands::toggle_task,
            commands::get_task_board,
            commands::add_event,
            commands::get_event_agenda,
            commands::add_meal,
            commands::get_meal_plan,
            commands::add_routine,
            commands::toggle_routine,
            commands::get_today_routines,
            commands::add_expense,
            commands::toggle_expense,
            commands::get_overdue_expenses,
            commands::get_dashboard_summary,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
