//! Board Commands
//!
//! List and status-update bindings shared by every board. The command name
//! comes from the board kind, the payload type from the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{invoke, js_error};
use crate::models::BoardKind;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct UpdateStatusArgs<'a> {
    id: u32,
    status: &'a str,
}

// ========================
// Commands
// ========================

/// `list_leads` / `list_tasks` / `list_tickets`
pub async fn list_board_items<T: DeserializeOwned>(kind: BoardKind) -> Result<Vec<T>, String> {
    let result = invoke(&kind.list_command(), JsValue::NULL)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// `update_lead_status` / `update_task_status` / `update_ticket_status`
pub async fn update_board_item_status<T: DeserializeOwned>(
    kind: BoardKind,
    id: u32,
    status: &str,
) -> Result<T, String> {
    let js_args = serde_wasm_bindgen::to_value(&UpdateStatusArgs { id, status }).map_err(|e| e.to_string())?;
    let result = invoke(&kind.update_status_command(), js_args)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
