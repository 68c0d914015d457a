//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use board_sync::{BoardErrorKind, BoardItem, BoardSnapshot};

use crate::models::BoardKind;

/// What the chrome (tabs, notice bar) shows about one board
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardNotice {
    pub card_count: usize,
    /// Last failure message, until dismissed
    pub error: Option<String>,
    /// True when the failure was a commit that got rolled back
    pub rolled_back: bool,
    /// Last load failed; the board shows older data
    pub stale: bool,
    pub loading: bool,
    /// Moves committing or queued
    pub saving: usize,
}

impl BoardNotice {
    pub fn from_snapshot<T: BoardItem>(snapshot: &BoardSnapshot<T>) -> Self {
        let status = &snapshot.status;
        Self {
            card_count: snapshot.board.len(),
            error: status.error.as_ref().map(|e| e.message.clone()),
            rolled_back: matches!(&status.error, Some(e) if e.kind == BoardErrorKind::Commit),
            stale: status.stale,
            loading: status.loading,
            saving: snapshot.pending_moves,
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Board shown in the main area
    pub active_board: BoardKind,
    /// Set once the backend reports the database is open
    pub db_ready: bool,
    /// One entry per board, indexed by `BoardKind::index`
    pub notices: Vec<BoardNotice>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            notices: vec![BoardNotice::default(); BoardKind::ALL.len()],
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace a board's notice, skipping the write when nothing changed
pub fn store_set_notice(store: &AppStore, kind: BoardKind, notice: BoardNotice) {
    let unchanged = store
        .notices()
        .with_untracked(|notices| notices.get(kind.index()) == Some(&notice));
    if unchanged {
        return;
    }
    if let Some(slot) = store.notices().write().get_mut(kind.index()) {
        *slot = notice;
    }
}

/// Read a board's notice (tracked)
pub fn store_notice(store: &AppStore, kind: BoardKind) -> BoardNotice {
    store
        .notices()
        .with(|notices| notices.get(kind.index()).cloned())
        .unwrap_or_default()
}
