//! Tauri Commands for Leads
//!
//! Exposes Lead CRUD and the pipeline status move to the frontend.

use tauri::{AppHandle, State};
use tracing::info;

use crate::domain::{DomainError, Lead, LeadStatus, WireValue};
use crate::repository::{Repository, StatusRepository};
use crate::AppState;
use super::{notify_changed, parse_or_default};

/// List all leads, newest first
#[tauri::command]
pub async fn list_leads(state: State<'_, AppState>) -> Result<Vec<Lead>, String> {
    state.leads.list().await.map_err(|e| e.to_string())
}

/// Get lead by ID
#[tauri::command]
pub async fn get_lead(state: State<'_, AppState>, id: u32) -> Result<Lead, String> {
    state.leads.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("lead {}", id)).to_string())
}

/// Create a new lead
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn create_lead(
    app: AppHandle,
    state: State<'_, AppState>,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    status: Option<String>,
    source: Option<String>,
    value: Option<f64>,
    assigned_to: Option<u32>,
) -> Result<Lead, String> {
    let mut lead = Lead::new(0, name);
    lead.email = email;
    lead.phone = phone;
    lead.company = company;
    lead.status = parse_or_default::<LeadStatus>(status)?;
    lead.source = source;
    lead.value = value.unwrap_or(0.0);
    lead.assigned_to = assigned_to;

    let created = state.leads.create(&lead).await.map_err(|e| e.to_string())?;
    info!(id = created.id, "lead created");
    notify_changed(&app, "lead", "created", created.id);
    Ok(created)
}

/// Update lead fields; absent fields keep their current value
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_lead(
    app: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    status: Option<String>,
    source: Option<String>,
    value: Option<f64>,
    assigned_to: Option<u32>,
) -> Result<Lead, String> {
    let existing = state.leads.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("lead {}", id)).to_string())?;

    let updated = Lead {
        name: name.unwrap_or(existing.name),
        email: email.or(existing.email),
        phone: phone.or(existing.phone),
        company: company.or(existing.company),
        status: match status {
            Some(s) => LeadStatus::parse(&s).map_err(|e| e.to_string())?,
            None => existing.status,
        },
        source: source.or(existing.source),
        value: value.unwrap_or(existing.value),
        assigned_to: assigned_to.or(existing.assigned_to),
        ..existing
    };

    let saved = state.leads.update(&updated).await.map_err(|e| e.to_string())?;
    notify_changed(&app, "lead", "updated", saved.id);
    Ok(saved)
}

/// Move a lead to another pipeline stage (board drag-and-drop)
#[tauri::command]
pub async fn update_lead_status(
    app: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    status: String,
) -> Result<Lead, String> {
    let lead = state.leads.update_status(id, &status).await.map_err(|e| e.to_string())?;
    info!(id, status = lead.status.as_str(), "lead status changed");
    notify_changed(&app, "lead", "status", id);
    Ok(lead)
}

/// Delete lead
#[tauri::command]
pub async fn delete_lead(app: AppHandle, state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.leads.delete(id).await.map_err(|e| e.to_string())?;
    notify_changed(&app, "lead", "deleted", id);
    Ok(())
}
