//! Kanban Board Component
//!
//! Wires one `BoardSync` to the DOM: drag signals drive `begin_drag`,
//! `drag_over` and the drop, the synchronizer's snapshots drive rendering,
//! and the reload counter for this board triggers `load_board`.

use std::rc::Rc;

use board_sync::{BoardItem, BoardSnapshot, BoardSync, DropOutcome, HoverTarget, LoadOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DropTarget};

use super::board_card::CardView;
use super::board_column::{BoardColumn, ColumnView};
use super::notice_bar::NoticeBar;
use crate::boards::BoardEntity;
use crate::context::AppContext;
use crate::models::{Lead, Task, Ticket};
use crate::remote::{RemoteConfig, TauriCollection};
use crate::store::{store_set_notice, use_app_store, AppStateStoreFields, BoardNotice};

type TauriBoard<T> = BoardSync<TauriCollection<T>>;

fn log(message: String) {
    web_sys::console::log_1(&message.into());
}

fn columns_view<T: BoardEntity>(snapshot: &BoardSnapshot<T>) -> Vec<ColumnView> {
    snapshot
        .board
        .columns()
        .iter()
        .map(|column| ColumnView {
            key: column.key.clone(),
            title: column.title.clone(),
            color: column.color.clone(),
            cards: column
                .items
                .iter()
                .map(|item| CardView {
                    id: item.id(),
                    title: item.card_title(),
                    detail: item.card_detail(),
                    badge: item.card_badge(),
                })
                .collect(),
        })
        .collect()
}

/// Translate a DOM drop target into the synchronizer's hover target
fn hover_target(columns: &[ColumnView], target: DropTarget) -> Option<HoverTarget<u32>> {
    match target {
        DropTarget::Column(index) => columns
            .get(index)
            .map(|c| HoverTarget::Column(c.key.clone())),
        DropTarget::Card { id, after, .. } => Some(HoverTarget::Item {
            id,
            below_midpoint: after,
        }),
    }
}

/// Board for one entity type
fn kanban_board<T: BoardEntity>() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let kind = T::KIND;

    let config = match kind.config() {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::error_1(&format!("[BOARD] {} config invalid: {}", kind.label(), e).into());
            return view! { <div class="board-error">{e.to_string()}</div> }.into_any();
        }
    };
    let column_count = config.columns().len();

    let sync: Rc<TauriBoard<T>> = Rc::new(BoardSync::new(
        config,
        TauriCollection::new(RemoteConfig::default()),
    ));
    let snapshot = RwSignal::new(sync.snapshot());
    sync.on_change(move |snap| {
        snapshot.set(snap.clone());
        store_set_notice(&store, kind, BoardNotice::from_snapshot(snap));
    });
    let sync = StoredValue::new_local(sync);

    let columns = Memo::new(move |_| snapshot.with(columns_view));
    let dnd = create_dnd_signals();

    // Threshold crossed: the drag becomes real
    Effect::new(move |_| {
        if let Some(id) = dnd.dragging_id_read.get() {
            log(format!("[DND] {} drag start: {}", kind.label(), id));
            if let Err(e) = sync.get_value().begin_drag(id) {
                log(format!("[DND] begin_drag failed: {}", e));
            }
        }
    });

    // Live placement while hovering
    Effect::new(move |_| {
        let Some(target) = dnd.drop_target_read.get() else {
            return;
        };
        let Some(id) = dnd.dragging_id_read.get_untracked() else {
            return;
        };
        let Some(hover) = columns.with_untracked(|cols| hover_target(cols, target)) else {
            return;
        };
        if let Err(e) = sync.get_value().drag_over(id, &hover) {
            log(format!("[DND] drag_over failed: {}", e));
        }
    });

    bind_global_mouseup(dnd, move |id, target| {
        let sync = sync.get_value();
        let column = target.and_then(|t| {
            sync.config()
                .columns()
                .get(t.column())
                .map(|c| c.key.clone())
        });
        log(format!("[DND] {} drop: {} -> {:?}", kind.label(), id, column));

        match sync.stage_drop(id, column.as_deref()) {
            Ok(staged) => spawn_local(async move {
                match sync.commit(staged).await {
                    DropOutcome::Unchanged => {}
                    DropOutcome::Committed(item) => {
                        log(format!("[BOARD] {} {} saved as {}", kind.entity(), id, item.status()));
                    }
                    DropOutcome::RolledBack(e) => {
                        log(format!("[BOARD] {} {} rolled back: {}", kind.entity(), id, e));
                    }
                }
            }),
            Err(e) => {
                log(format!("[DND] drop ignored: {}", e));
                sync.cancel_drag();
            }
        }
    });

    // Initial load, then again whenever this board's reload counter moves
    Effect::new(move |_| {
        let version = ctx.version(kind);
        spawn_local(async move {
            match sync.get_value().load_board().await {
                LoadOutcome::Applied(count) => {
                    store.db_ready().set(true);
                    log(format!("[BOARD] {} loaded {} cards (v{})", kind.label(), count, version));
                }
                LoadOutcome::Superseded => {}
                LoadOutcome::Failed(e) => {
                    log(format!("[BOARD] {} load failed: {}", kind.label(), e));
                }
            }
        });
    });

    let on_dismiss = Callback::new(move |_| sync.get_value().dismiss_error());
    let on_retry = Callback::new(move |_| ctx.reload(kind));

    view! {
        <div class="kanban-board">
            <NoticeBar kind=kind on_dismiss=on_dismiss on_retry=on_retry />
            <div class="board-columns">
                {(0..column_count)
                    .map(|index| {
                        let column = Memo::new(move |_| {
                            columns.with(|cols| cols.get(index).cloned().unwrap_or_default())
                        });
                        view! { <BoardColumn index=index column=column dnd=dnd /> }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn LeadBoard() -> impl IntoView {
    kanban_board::<Lead>()
}

#[component]
pub fn TaskBoard() -> impl IntoView {
    kanban_board::<Task>()
}

#[component]
pub fn TicketBoard() -> impl IntoView {
    kanban_board::<Ticket>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnView> {
        ["TODO", "DONE"]
            .iter()
            .map(|key| ColumnView {
                key: key.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_hover_target_mapping() {
        let cols = columns();
        assert_eq!(
            hover_target(&cols, DropTarget::Column(1)),
            Some(HoverTarget::Column("DONE".to_string()))
        );
        assert_eq!(
            hover_target(&cols, DropTarget::Card { id: 7, column: 0, after: true }),
            Some(HoverTarget::Item { id: 7, below_midpoint: true })
        );
        assert_eq!(hover_target(&cols, DropTarget::Column(5)), None);
    }
}
