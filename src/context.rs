//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::models::BoardKind;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Per-board reload counters, indexed by `BoardKind::index` - read
    pub reload_trigger: ReadSignal<[u32; 3]>,
    /// Per-board reload counters - write
    set_reload_trigger: WriteSignal<[u32; 3]>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<[u32; 3]>, WriteSignal<[u32; 3]>)) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Trigger a reload of one board
    pub fn reload(&self, kind: BoardKind) {
        self.set_reload_trigger.update(|v| v[kind.index()] += 1);
    }

    /// Trigger a reload of every board
    pub fn reload_all(&self) {
        self.set_reload_trigger.update(|v| v.iter_mut().for_each(|n| *n += 1));
    }

    /// Reload counter for one board (tracked)
    pub fn version(&self, kind: BoardKind) -> u32 {
        self.reload_trigger.with(|v| v[kind.index()])
    }
}
