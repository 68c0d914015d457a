//! Tauri Commands for Tasks

use tauri::{AppHandle, State};
use tracing::info;

use crate::domain::{DomainError, Task, TaskPriority, TaskStatus, WireValue};
use crate::repository::{Repository, StatusRepository};
use crate::AppState;
use super::{notify_changed, parse_or_default};

/// List all tasks, newest first
#[tauri::command]
pub async fn list_tasks(state: State<'_, AppState>) -> Result<Vec<Task>, String> {
    state.tasks.list().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_task(state: State<'_, AppState>, id: u32) -> Result<Task, String> {
    state.tasks.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("task {}", id)).to_string())
}

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn create_task(
    app: AppHandle,
    state: State<'_, AppState>,
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    assigned_to: Option<u32>,
) -> Result<Task, String> {
    let mut task = Task::new(0, title);
    task.description = description;
    task.due_date = due_date;
    task.priority = parse_or_default::<TaskPriority>(priority)?;
    task.status = parse_or_default::<TaskStatus>(status)?;
    task.assigned_to = assigned_to;

    let created = state.tasks.create(&task).await.map_err(|e| e.to_string())?;
    info!(id = created.id, "task created");
    notify_changed(&app, "task", "created", created.id);
    Ok(created)
}

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_task(
    app: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    assigned_to: Option<u32>,
) -> Result<Task, String> {
    let existing = state.tasks.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("task {}", id)).to_string())?;

    let updated = Task {
        title: title.unwrap_or(existing.title),
        description: description.or(existing.description),
        due_date: due_date.or(existing.due_date),
        priority: match priority {
            Some(p) => TaskPriority::parse(&p).map_err(|e| e.to_string())?,
            None => existing.priority,
        },
        status: match status {
            Some(s) => TaskStatus::parse(&s).map_err(|e| e.to_string())?,
            None => existing.status,
        },
        assigned_to: assigned_to.or(existing.assigned_to),
        ..existing
    };

    let saved = state.tasks.update(&updated).await.map_err(|e| e.to_string())?;
    notify_changed(&app, "task", "updated", saved.id);
    Ok(saved)
}

/// Move a task to another status column
#[tauri::command]
pub async fn update_task_status(
    app: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    status: String,
) -> Result<Task, String> {
    let task = state.tasks.update_status(id, &status).await.map_err(|e| e.to_string())?;
    info!(id, status = task.status.as_str(), "task status changed");
    notify_changed(&app, "task", "status", id);
    Ok(task)
}

#[tauri::command]
pub async fn delete_task(app: AppHandle, state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.tasks.delete(id).await.map_err(|e| e.to_string())?;
    notify_changed(&app, "task", "deleted", id);
    Ok(())
}
