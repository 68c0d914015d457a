//! Board Column Component
//!
//! One status column: colored header with a count, then its cards. The
//! column body is a drop target for "end of column".

use leptos::prelude::*;
use leptos_dragdrop::{make_on_column_mousemove, make_on_mouseleave, DndSignals};

use super::board_card::{BoardCard, CardView};

/// Render-ready column
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnView {
    pub key: String,
    pub title: String,
    pub color: String,
    pub cards: Vec<CardView>,
}

#[component]
pub fn BoardColumn(index: usize, column: Memo<ColumnView>, dnd: DndSignals) -> impl IntoView {
    let on_mousemove = make_on_column_mousemove(dnd, index);
    let on_mouseleave = make_on_mouseleave(dnd);
    let is_target = move || dnd.drop_target_read.get().map(|t| t.column()) == Some(index);

    view! {
        <section
            class="board-column"
            class:drop-target=is_target
            on:mousemove=on_mousemove
            on:mouseleave=on_mouseleave
        >
            <header
                class="board-column-header"
                style:border-top-color=move || column.with(|c| c.color.clone())
            >
                <span class="board-column-title">{move || column.with(|c| c.title.clone())}</span>
                <span class="board-column-count">{move || column.with(|c| c.cards.len())}</span>
            </header>
            <div class="board-column-body">
                <For
                    each=move || column.with(|c| c.cards.clone())
                    // Whole face as key: a card re-renders when its content changes
                    key=|card| card.clone()
                    children=move |card| view! { <BoardCard card=card column=index dnd=dnd /> }
                />
            </div>
        </section>
    }
}
