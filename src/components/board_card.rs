//! Board Card Component
//!
//! A single draggable card. The card face is precomputed by the board.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_card_mousemove, make_on_mousedown, DndSignals};

/// Render-ready card face
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardView {
    pub id: u32,
    pub title: String,
    pub detail: Option<String>,
    pub badge: Option<String>,
}

#[component]
pub fn BoardCard(card: CardView, column: usize, dnd: DndSignals) -> impl IntoView {
    let id = card.id;
    let on_mousedown = make_on_mousedown(dnd, id);
    let on_mousemove = make_on_card_mousemove(dnd, id, column);
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);

    view! {
        <div
            class="board-card"
            class:dragging=is_dragging
            on:mousedown=on_mousedown
            on:mousemove=on_mousemove
        >
            <div class="board-card-title">{card.title}</div>
            {card.detail.map(|detail| view! { <div class="board-card-detail">{detail}</div> })}
            {card.badge.map(|badge| view! { <span class="board-card-badge">{badge}</span> })}
        </div>
    }
}
