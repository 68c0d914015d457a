//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands and events.

mod board;
mod events;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    // Rejects with the command's error string
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Error text from a rejected invoke or listen
fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

// Re-export all public items
pub use board::*;
pub use events::*;
