//! Board Tab Bar Component
//!
//! Tabs for switching between the Leads, Tasks and Tickets boards, each with
//! its card count.

use leptos::prelude::*;

use crate::models::BoardKind;
use crate::store::{store_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardTabBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="board-tab-bar">
            {BoardKind::ALL
                .into_iter()
                .map(|kind| {
                    let is_active = move || store.active_board().get() == kind;
                    let count = move || store_notice(&store, kind).card_count;
                    let has_error = move || store_notice(&store, kind).error.is_some();
                    view! {
                        <button
                            class="board-tab"
                            class:active=is_active
                            class:has-error=has_error
                            on:click=move |_| store.active_board().set(kind)
                        >
                            <span class="board-tab-label">{kind.label()}</span>
                            <span class="board-tab-count">{count}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
