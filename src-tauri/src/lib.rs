//! Flow CRM Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use tauri::{Emitter, Manager};
use tracing::{error, info};

mod commands;
mod config;
mod domain;
mod repository;

use config::AppConfig;
use repository::{init_db, seed_demo_data, DbState, LeadRepository, TaskRepository, TicketRepository};

/// Event emitted once the database is open and migrated
pub const DB_INITIALIZED: &str = "db-initialized";

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub config: AppConfig,
    pub leads: LeadRepository,
    pub tasks: TaskRepository,
    pub tickets: TicketRepository,
}

impl AppState {
    pub fn new(db_state: DbState, config: AppConfig) -> Self {
        Self {
            leads: LeadRepository::new(db_state.conn.clone()),
            tasks: TaskRepository::new(db_state.conn.clone()),
            tickets: TicketRepository::new(db_state.conn.clone()),
            db_state,
            config,
        }
    }
}

/// Open the database in the background and hand the connection to the
/// already-managed state
async fn initialize_database(app_handle: tauri::AppHandle, db_state: DbState, config: AppConfig) {
    info!(path = %config.db_path.display(), "background DB initialization starting");

    match init_db(&config.db_path).await {
        Ok(initialized_state) => {
            {
                let mut conn_guard = db_state.conn.lock().await;
                *conn_guard = initialized_state.conn.lock().await.take();
            }
            let _ = rolling_logger::info("Async DB init success");

            if config.seed_demo_data {
                if let Err(e) = seed_demo_data(db_state.conn.clone()).await {
                    error!(error = %e, "demo data seeding failed");
                }
            }

            if let Err(e) = app_handle.emit(DB_INITIALIZED, ()) {
                error!(error = %e, "failed to emit {}", DB_INITIALIZED);
            }
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("Async DB init failed: {}", e));
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();
            let data_dir = app_handle.path().app_data_dir()?;
            let log_dir = app_handle.path().app_log_dir()?;
            std::fs::create_dir_all(&data_dir)?;

            let config = AppConfig::resolve(&data_dir, &log_dir);

            // Initialize logging
            rolling_logger::init_logger(&config.log_dir, "FlowCRM")?;
            info!(seed = config.seed_demo_data, "app setup starting");

            // Manage state immediately; commands fail with "Database not
            // initialized" until the background task finishes
            let db_state = DbState::new();
            app.manage(AppState::new(db_state.clone(), config.clone()));

            tauri::async_runtime::spawn(initialize_database(app_handle, db_state, config));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Leads
            commands::list_leads,
            commands::get_lead,
            commands::create_lead,
            commands::update_lead,
            commands::update_lead_status,
            commands::delete_lead,
            // Tasks
            commands::list_tasks,
            commands::get_task,
            commands::create_task,
            commands::update_task,
            commands::update_task_status,
            commands::delete_task,
            // Tickets
            commands::list_tickets,
            commands::get_ticket,
            commands::create_ticket,
            commands::update_ticket,
            commands::update_ticket_status,
            commands::delete_ticket,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
