//! Tauri Commands for Tickets

use tauri::{AppHandle, State};
use tracing::info;

use crate::domain::{DomainError, Ticket, TicketPriority, TicketStatus, WireValue};
use crate::repository::{Repository, StatusRepository};
use crate::AppState;
use super::{notify_changed, parse_or_default};

#[tauri::command]
pub async fn list_tickets(state: State<'_, AppState>) -> Result<Vec<Ticket>, String> {
    state.tickets.list().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_ticket(state: State<'_, AppState>, id: u32) -> Result<Ticket, String> {
    state.tickets.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("ticket {}", id)).to_string())
}

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn create_ticket(
    app: AppHandle,
    state: State<'_, AppState>,
    subject: String,
    client_id: u32,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assigned_to: Option<u32>,
) -> Result<Ticket, String> {
    let mut ticket = Ticket::new(0, subject, client_id);
    ticket.description = description.unwrap_or_default();
    ticket.status = parse_or_default::<TicketStatus>(status)?;
    ticket.priority = parse_or_default::<TicketPriority>(priority)?;
    ticket.assigned_to = assigned_to;

    let created = state.tickets.create(&ticket).await.map_err(|e| e.to_string())?;
    info!(id = created.id, client_id, "ticket created");
    notify_changed(&app, "ticket", "created", created.id);
    Ok(created)
}

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_ticket(
    app: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    subject: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    client_id: Option<u32>,
    assigned_to: Option<u32>,
) -> Result<Ticket, String> {
    let existing = state.tickets.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("ticket {}", id)).to_string())?;

    let updated = Ticket {
        subject: subject.unwrap_or(existing.subject),
        description: description.unwrap_or(existing.description),
        status: match status {
            Some(s) => TicketStatus::parse(&s).map_err(|e| e.to_string())?,
            None => existing.status,
        },
        priority: match priority {
            Some(p) => TicketPriority::parse(&p).map_err(|e| e.to_string())?,
            None => existing.priority,
        },
        client_id: client_id.unwrap_or(existing.client_id),
        assigned_to: assigned_to.or(existing.assigned_to),
        ..existing
    };

    let saved = state.tickets.update(&updated).await.map_err(|e| e.to_string())?;
    notify_changed(&app, "ticket", "updated", saved.id);
    Ok(saved)
}

/// Move a ticket to another status column
#[tauri::command]
pub async fn update_ticket_status(
    app: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    status: String,
) -> Result<Ticket, String> {
    let ticket = state.tickets.update_status(id, &status).await.map_err(|e| e.to_string())?;
    info!(id, status = ticket.status.as_str(), "ticket status changed");
    notify_changed(&app, "ticket", "status", id);
    Ok(ticket)
}

#[tauri::command]
pub async fn delete_ticket(app: AppHandle, state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.tickets.delete(id).await.map_err(|e| e.to_string())?;
    notify_changed(&app, "ticket", "deleted", id);
    Ok(())
}
