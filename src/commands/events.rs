//! Backend Events
//!
//! Subscriptions to events emitted by the Tauri backend. Listeners live for
//! the lifetime of the page.

use wasm_bindgen::prelude::*;

use super::js_error;
use crate::models::CrmChanged;

/// Emitted after any lead/task/ticket mutation
pub const CRM_CHANGED: &str = "crm-changed";
/// Emitted once the database is open and ready
pub const DB_INITIALIZED: &str = "db-initialized";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

fn event_payload(event: &JsValue) -> JsValue {
    js_sys::Reflect::get(event, &JsValue::from_str("payload")).unwrap_or(JsValue::UNDEFINED)
}

/// Call `on_change` for every `crm-changed` event. Malformed payloads are
/// logged and skipped.
pub async fn listen_crm_changed<F>(on_change: F) -> Result<(), String>
where
    F: Fn(CrmChanged) + 'static,
{
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match serde_wasm_bindgen::from_value::<CrmChanged>(event_payload(&event)) {
            Ok(change) => on_change(change),
            Err(e) => web_sys::console::warn_1(&format!("[EVENT] Bad {} payload: {}", CRM_CHANGED, e).into()),
        }
    });
    listen(CRM_CHANGED, &handler).await.map_err(js_error)?;
    handler.forget();
    Ok(())
}

/// Call `on_ready` when the backend reports the database is ready
pub async fn listen_db_initialized<F>(on_ready: F) -> Result<(), String>
where
    F: Fn() + 'static,
{
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| on_ready());
    listen(DB_INITIALIZED, &handler).await.map_err(js_error)?;
    handler.forget();
    Ok(())
}
