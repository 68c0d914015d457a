//! Notice Bar Component
//!
//! Shows the board's last failure (dismissible), a stale-data warning with
//! retry, and a saving indicator while moves are committing.

use leptos::prelude::*;

use crate::models::BoardKind;
use crate::store::{store_notice, use_app_store};

#[component]
pub fn NoticeBar(kind: BoardKind, on_dismiss: Callback<()>, on_retry: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let notice = Memo::new(move |_| store_notice(&store, kind));

    view! {
        <div class="notice-bar">
            {move || notice.with(|n| n.error.clone()).map(|message| {
                let heading = if notice.with_untracked(|n| n.rolled_back) {
                    "Move failed, card returned:"
                } else {
                    "Could not load board:"
                };
                view! {
                    <div class="notice notice-error">
                        <span class="notice-heading">{heading}</span>
                        <span class="notice-message">{message}</span>
                        <button class="notice-dismiss" on:click=move |_| on_dismiss.run(())>"×"</button>
                    </div>
                }
            })}
            <Show when=move || notice.with(|n| n.stale)>
                <div class="notice notice-stale">
                    <span>"Showing saved data, the latest changes could not be loaded."</span>
                    <button class="notice-retry" on:click=move |_| on_retry.run(())>"Retry"</button>
                </div>
            </Show>
            <Show when=move || notice.with(|n| n.saving > 0)>
                <div class="notice notice-saving">
                    {move || format!("Saving {} move(s)...", notice.with(|n| n.saving))}
                </div>
            </Show>
        </div>
    }
}
