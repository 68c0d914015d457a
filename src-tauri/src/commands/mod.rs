//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.
//! Every successful write broadcasts `crm-changed` so open boards refresh.

mod lead_cmd;
mod task_cmd;
mod ticket_cmd;

pub use lead_cmd::*;
pub use task_cmd::*;
pub use ticket_cmd::*;

use serde::Serialize;
use tauri::{AppHandle, Emitter};

/// Event name for data changes
pub const CRM_CHANGED: &str = "crm-changed";

/// Payload of `crm-changed`
#[derive(Debug, Clone, Serialize)]
pub struct CrmChanged {
    /// "lead", "task" or "ticket"
    pub entity: &'static str,
    /// "created", "updated", "status" or "deleted"
    pub action: &'static str,
    pub id: u32,
}

pub(crate) fn notify_changed(app: &AppHandle, entity: &'static str, action: &'static str, id: u32) {
    let payload = CrmChanged { entity, action, id };
    if let Err(e) = app.emit(CRM_CHANGED, &payload) {
        tracing::warn!(entity, action, id, error = %e, "failed to emit change event");
    }
}

/// Parse an optional wire value, falling back to the default
pub(crate) fn parse_or_default<T: crate::domain::WireValue + Default>(value: Option<String>) -> Result<T, String> {
    match value {
        Some(v) => T::parse(&v).map_err(|e| e.to_string()),
        None => Ok(T::default()),
    }
}
