//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through AppState.

use crate::config;
use crate::database::{self, Repository};
use crate::error::Result;
use crate::services::{FamilyDataService, FamilyService, SessionService};
use std::path::PathBuf;
use tauri::{App, Manager};

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub session: SessionService,
    pub family: FamilyService,
    pub family_data: FamilyDataService,
}

/// Build the application state over a database in the given directory
pub async fn build_state(app_data_dir: PathBuf) -> Result<AppState> {
    let db_path = app_data_dir.join(config::DATABASE_FILE_NAME);
    let pool = database::create_pool(&db_path).await?;
    let repo = Repository::new(pool);

    let session = SessionService::new(repo.clone());
    if let Some(identity) = session.restore().await? {
        tracing::info!("Restored session for: {}", identity.email);
    }

    Ok(AppState {
        app_data_dir,
        session,
        family: FamilyService::new(repo.clone()),
        family_data: FamilyDataService::new(repo),
    })
}

/// Application setup - called once on startup
pub fn setup(app: &mut App) -> Result<()> {
    tracing::info!("Initializing application");

    // The data directory is the one required piece of environment;
    // failing to resolve it aborts startup.
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| crate::error::AppError::Generic(format!("Failed to get app data dir: {}", e)))?;

    tracing::info!("App data directory: {:?}", app_data_dir);

    std::fs::create_dir_all(&app_data_dir)?;

    let state = tauri::async_runtime::block_on(build_state(app_data_dir))?;

    // Cached family data must not outlive its session
    let mut identity_rx = state.session.subscribe();
    let family_data = state.family_data.clone();
    tauri::async_runtime::spawn(async move {
        while identity_rx.changed().await.is_ok() {
            if identity_rx.borrow_and_update().is_none() {
                if let Err(e) = family_data.deactivate() {
                    tracing::error!("Failed to clear family data on sign-out: {}", e);
                }
            }
        }
    });

    app.manage(state);

    tracing::info!("Application initialized successfully");

    Ok(())
}
