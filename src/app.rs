//! Flow CRM Frontend App
//!
//! Tab bar over three kanban boards. All boards stay mounted so their drag
//! state and pending commits survive tab switches; inactive ones are hidden.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{BoardTabBar, LeadBoard, TaskBoard, TicketBoard};
use crate::context::AppContext;
use crate::models::{BoardKind, CrmChanged};
use crate::store::{AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let store = AppStore::new(AppState::new());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal([0u32; 3]);
    let ctx = AppContext::new((reload_trigger, set_reload_trigger));
    provide_context(ctx);

    // Backend events: reload the board a change belongs to
    spawn_local(async move {
        let on_change = move |change: CrmChanged| {
            web_sys::console::log_1(
                &format!("[APP] {} {} {}", change.entity, change.action, change.id).into(),
            );
            match BoardKind::from_entity(&change.entity) {
                Some(kind) => ctx.reload(kind),
                None => ctx.reload_all(),
            }
        };
        if let Err(e) = commands::listen_crm_changed(on_change).await {
            web_sys::console::error_1(&format!("[APP] listen crm-changed failed: {}", e).into());
        }

        let on_ready = move || {
            web_sys::console::log_1(&"[APP] Database ready".into());
            store.db_ready().set(true);
            ctx.reload_all();
        };
        if let Err(e) = commands::listen_db_initialized(on_ready).await {
            web_sys::console::error_1(&format!("[APP] listen db-initialized failed: {}", e).into());
        }
    });

    let display = move |kind: BoardKind| {
        move || if store.active_board().get() == kind { "block" } else { "none" }
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Flow CRM"</h1>
                <BoardTabBar />
                <Show when=move || !store.db_ready().get()>
                    <span class="db-pending">"Connecting..."</span>
                </Show>
            </header>
            <main class="main-content">
                <div class="board-slot" style:display=display(BoardKind::Leads)>
                    <LeadBoard />
                </div>
                <div class="board-slot" style:display=display(BoardKind::Tasks)>
                    <TaskBoard />
                </div>
                <div class="board-slot" style:display=display(BoardKind::Tickets)>
                    <TicketBoard />
                </div>
            </main>
        </div>
    }
}
