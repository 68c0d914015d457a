//! Board Synchronizer
//!
//! Owns the authoritative item list and the displayed board for one entity
//! type. Status moves are applied to the displayed board immediately,
//! committed to the remote one at a time, merged on success and rolled back
//! on failure. Every commit is followed by a full reload.
//!
//! The displayed board is always `group(authoritative)` plus the moves that
//! are in flight or queued, except for cosmetic ordering inside a column.
//! Moves are sent strictly in the order they were staged. A staged move whose
//! drop handle or commit future is dropped is withdrawn from the board.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use tokio::sync::{Mutex, Notify};
use tracing::{debug, warn};

use crate::board::Board;
use crate::config::BoardConfig;
use crate::drag::{apply_hover, ActiveDrag, HoverTarget};
use crate::error::{DragError, RemoteError};
use crate::item::BoardItem;
use crate::remote::RemoteCollection;

type ItemOf<R> = <R as RemoteCollection>::Item;
type IdOf<R> = <ItemOf<R> as BoardItem>::Id;

/// Which operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardErrorKind {
    Load,
    Commit,
}

/// Last recoverable failure, kept until dismissed or superseded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardError {
    pub kind: BoardErrorKind,
    pub message: String,
}

/// Board-level status flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStatus {
    /// A load is in progress
    pub loading: bool,
    /// The last load failed; the board shows older data
    pub stale: bool,
    pub error: Option<BoardError>,
}

/// Everything a view needs to render the board
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot<T: BoardItem> {
    pub board: Board<T>,
    pub status: BoardStatus,
    /// Moves committed or waiting to commit
    pub pending_moves: usize,
    pub dragging: Option<T::Id>,
}

/// Result of `load_board`
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The fetched list replaced the board
    Applied(usize),
    /// A newer load finished first; this result was discarded
    Superseded,
    /// Fetch failed; the previous board is kept
    Failed(RemoteError),
}

/// Result of a finished drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome<T> {
    /// Same column or dropped outside: nothing was sent
    Unchanged,
    /// The remote accepted the move
    Committed(T),
    /// The remote failed; the card went back
    RolledBack(RemoteError),
}

/// A move applied to the displayed board but not yet confirmed
#[derive(Debug, Clone)]
struct PendingMove<Id> {
    ticket: u64,
    id: Id,
    from: String,
    to: String,
}

struct SyncState<T: BoardItem> {
    authoritative: Vec<T>,
    displayed: Board<T>,
    drag: Option<ActiveDrag<T::Id>>,
    in_flight: Option<PendingMove<T::Id>>,
    queued: VecDeque<PendingMove<T::Id>>,
    status: BoardStatus,
    loads_running: u32,
    next_load: u64,
    applied_load: u64,
    next_ticket: u64,
}

impl<T: BoardItem> SyncState<T> {
    fn new(config: &BoardConfig) -> Self {
        Self {
            authoritative: Vec::new(),
            displayed: Board::empty(config),
            drag: None,
            in_flight: None,
            queued: VecDeque::new(),
            status: BoardStatus::default(),
            loads_running: 0,
            next_load: 0,
            applied_load: 0,
            next_ticket: 0,
        }
    }

    /// Rebuild the displayed board from authoritative data plus pending moves
    fn reproject(&mut self, config: &BoardConfig) {
        let mut board = Board::group(config, &self.authoritative);
        for mv in self.in_flight.iter().chain(self.queued.iter()) {
            if let Some(col) = config.column_index(&mv.to) {
                board.move_to_end(mv.id, col);
            }
        }
        self.displayed = board;
    }

    /// Put the dragged card back where the drag started
    fn return_to_origin(&mut self, drag: &ActiveDrag<T::Id>) {
        let Some((col, _)) = self.displayed.locate(drag.id) else {
            return;
        };
        if col == drag.origin_column {
            return;
        }
        if let Some((_, _, mut item)) = self.displayed.take(drag.id) {
            item.set_status(&drag.origin_status);
            self.displayed.insert(drag.origin_column, drag.origin_index, item);
        }
    }

    fn merge(&mut self, updated: T) {
        match self.authoritative.iter_mut().find(|i| i.id() == updated.id()) {
            Some(existing) => *existing = updated,
            None => self.authoritative.push(updated),
        }
    }

    fn pending_moves(&self) -> usize {
        self.queued.len() + usize::from(self.in_flight.is_some())
    }
}

type Observer<T> = Box<dyn Fn(&BoardSnapshot<T>)>;

/// State reachable from drop handles as well as from the synchronizer
struct Shared<T: BoardItem> {
    config: BoardConfig,
    state: RefCell<SyncState<T>>,
    observers: RefCell<Vec<Observer<T>>>,
    // Woken whenever the head of the commit queue may have changed
    turn: Notify,
}

impl<T: BoardItem> Shared<T> {
    fn snapshot(&self) -> BoardSnapshot<T> {
        let state = self.state.borrow();
        BoardSnapshot {
            board: state.displayed.clone(),
            status: state.status.clone(),
            pending_moves: state.pending_moves(),
            dragging: state.drag.as_ref().map(|d| d.id),
        }
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    /// Forget a staged or in-flight move and rebuild the board without it
    fn withdraw(&self, ticket: u64) {
        let changed = match self.state.try_borrow_mut() {
            Ok(mut state) => {
                let before = state.pending_moves();
                state.queued.retain(|m| m.ticket != ticket);
                if state.in_flight.as_ref().is_some_and(|m| m.ticket == ticket) {
                    state.in_flight = None;
                }
                let changed = state.pending_moves() != before;
                if changed {
                    debug!(board = self.config.name(), ticket, "move withdrawn");
                    state.reproject(&self.config);
                }
                changed
            }
            Err(_) => false,
        };
        if changed {
            self.notify();
        }
        self.turn.notify_waiters();
    }
}

/// A drop that has been applied to the displayed board.
///
/// A queued drop must be passed to [`BoardSync::commit`]; dropping it
/// instead withdraws the move and puts the card back.
#[must_use = "a queued drop is withdrawn when dropped without being committed"]
pub struct StagedDrop<T: BoardItem> {
    queued: Option<(u64, Rc<Shared<T>>)>,
}

impl<T: BoardItem> StagedDrop<T> {
    fn unchanged() -> Self {
        Self { queued: None }
    }

    /// True when the drop changed column and waits for a commit
    pub fn is_queued(&self) -> bool {
        self.queued.is_some()
    }

    pub fn ticket(&self) -> Option<u64> {
        self.queued.as_ref().map(|(ticket, _)| *ticket)
    }

    /// Hand the move over to a commit
    fn into_ticket(mut self) -> Option<u64> {
        self.queued.take().map(|(ticket, _)| ticket)
    }
}

impl<T: BoardItem> Drop for StagedDrop<T> {
    fn drop(&mut self) {
        if let Some((ticket, shared)) = self.queued.take() {
            shared.withdraw(ticket);
        }
    }
}

impl<T: BoardItem> fmt::Debug for StagedDrop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedDrop").field("ticket", &self.ticket()).finish()
    }
}

/// Withdraws the move if the commit future is dropped before it settles
struct CommitGuard<'a, T: BoardItem> {
    shared: &'a Shared<T>,
    ticket: u64,
    settled: bool,
}

impl<T: BoardItem> Drop for CommitGuard<'_, T> {
    fn drop(&mut self) {
        if self.settled {
            self.shared.turn.notify_waiters();
        } else {
            self.shared.withdraw(self.ticket);
        }
    }
}

/// Optimistic board over a remote collection.
///
/// Not `Sync`: one instance belongs to one board on one event loop. State is
/// kept in a `RefCell` that is never borrowed across an await.
pub struct BoardSync<R: RemoteCollection> {
    shared: Rc<Shared<ItemOf<R>>>,
    remote: R,
    // Held from the request until the follow-up reload has been applied
    commit_slot: Mutex<()>,
}

impl<R: RemoteCollection> BoardSync<R> {
    pub fn new(config: BoardConfig, remote: R) -> Self {
        let state = RefCell::new(SyncState::new(&config));
        Self {
            shared: Rc::new(Shared {
                config,
                state,
                observers: RefCell::new(Vec::new()),
                turn: Notify::new(),
            }),
            remote,
            commit_slot: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.shared.config
    }

    /// Register a callback run after every visible change.
    ///
    /// Callbacks may read the synchronizer but must not register further
    /// callbacks.
    pub fn on_change(&self, observer: impl Fn(&BoardSnapshot<ItemOf<R>>) + 'static) {
        self.shared.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn snapshot(&self) -> BoardSnapshot<ItemOf<R>> {
        self.shared.snapshot()
    }

    /// Last server-confirmed items
    pub fn authoritative(&self) -> Vec<ItemOf<R>> {
        self.shared.state.borrow().authoritative.clone()
    }

    pub fn displayed(&self) -> Board<ItemOf<R>> {
        self.shared.state.borrow().displayed.clone()
    }

    pub fn status(&self) -> BoardStatus {
        self.shared.state.borrow().status.clone()
    }

    pub fn dismiss_error(&self) {
        self.shared.state.borrow_mut().status.error = None;
        self.notify();
    }

    fn notify(&self) {
        self.shared.notify();
    }

    /// Fetch the full list and rebuild the board.
    ///
    /// Failures keep the current board and mark it stale. Results from a load
    /// that was overtaken by a newer one are discarded.
    pub async fn load_board(&self) -> LoadOutcome {
        let config = &self.shared.config;
        let seq = {
            let mut state = self.shared.state.borrow_mut();
            state.next_load += 1;
            state.loads_running += 1;
            state.status.loading = true;
            state.next_load
        };
        self.notify();

        let fetched = self.remote.list().await;

        let outcome = {
            let mut state = self.shared.state.borrow_mut();
            state.loads_running -= 1;
            state.status.loading = state.loads_running > 0;

            if seq < state.applied_load {
                debug!(board = config.name(), seq, "discarding superseded load");
                LoadOutcome::Superseded
            } else {
                state.applied_load = seq;
                match fetched {
                    Ok(items) => {
                        state.authoritative = items;
                        state.reproject(config);
                        state.status.stale = false;
                        if matches!(&state.status.error, Some(e) if e.kind == BoardErrorKind::Load) {
                            state.status.error = None;
                        }
                        debug!(board = config.name(), items = state.displayed.len(), "board loaded");
                        LoadOutcome::Applied(state.displayed.len())
                    }
                    Err(err) => {
                        warn!(board = config.name(), error = %err, "board load failed");
                        state.status.stale = true;
                        state.status.error = Some(BoardError {
                            kind: BoardErrorKind::Load,
                            message: err.to_string(),
                        });
                        LoadOutcome::Failed(err)
                    }
                }
            }
        };
        self.notify();
        outcome
    }

    /// Start dragging a card. The board is not changed.
    pub fn begin_drag(&self, item_id: IdOf<R>) -> Result<(), DragError> {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.displayed.locate(item_id).is_none() {
                return Err(DragError::UnknownItem(format!("{item_id:?}")));
            }

            if let Some(previous) = state.drag.take() {
                state.return_to_origin(&previous);
            }

            if let Some((col, pos)) = state.displayed.locate(item_id) {
                let origin_status = state.displayed.columns()[col].items[pos].status().to_string();
                state.drag = Some(ActiveDrag {
                    id: item_id,
                    origin_column: col,
                    origin_index: pos,
                    origin_status,
                });
            }
        }
        self.notify();
        Ok(())
    }

    /// Live placement while the pointer moves. Only the displayed board changes.
    pub fn drag_over(&self, item_id: IdOf<R>, target: &HoverTarget<IdOf<R>>) -> Result<(), DragError> {
        {
            let mut state = self.shared.state.borrow_mut();
            if !matches!(&state.drag, Some(d) if d.id == item_id) {
                return Err(DragError::NotDragging(format!("{item_id:?}")));
            }
            apply_hover(&mut state.displayed, &self.shared.config, item_id, target)?;
        }
        self.notify();
        Ok(())
    }

    /// Abandon the current drag, returning the card to its origin column
    pub fn cancel_drag(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if let Some(drag) = state.drag.take() {
                state.return_to_origin(&drag);
            }
        }
        self.notify();
    }

    /// Finish a drag on `target_column` (`None` = dropped outside any column).
    ///
    /// A drop on another column is applied to the displayed board before this
    /// returns and queued for commit; pass the result to [`BoardSync::commit`].
    pub fn stage_drop(
        &self,
        item_id: IdOf<R>,
        target_column: Option<&str>,
    ) -> Result<StagedDrop<ItemOf<R>>, DragError> {
        let config = &self.shared.config;
        let ticket = {
            let mut state = self.shared.state.borrow_mut();
            let drag = match &state.drag {
                Some(d) if d.id == item_id => d.clone(),
                _ => return Err(DragError::NotDragging(format!("{item_id:?}"))),
            };
            let target = match target_column {
                Some(key) => Some(
                    config
                        .column_index(key)
                        .ok_or_else(|| DragError::UnknownColumn(key.to_string()))?,
                ),
                None => None,
            };
            // A reload may have removed the card while it was being dragged
            let Some((current, _)) = state.displayed.locate(item_id) else {
                return Err(DragError::UnknownItem(format!("{item_id:?}")));
            };
            state.drag = None;

            match target {
                Some(to) if to != drag.origin_column => {
                    if current != to {
                        state.displayed.move_to_end(item_id, to);
                    }
                    let key = config.columns()[to].key.clone();

                    state.next_ticket += 1;
                    let ticket = state.next_ticket;
                    let from = config.columns()[drag.origin_column].key.clone();
                    debug!(board = config.name(), ?item_id, %from, to = %key, ticket, "move queued");
                    state.queued.push_back(PendingMove {
                        ticket,
                        id: item_id,
                        from,
                        to: key,
                    });
                    Some(ticket)
                }
                _ => {
                    state.return_to_origin(&drag);
                    None
                }
            }
        };
        self.notify();
        Ok(match ticket {
            Some(ticket) => StagedDrop {
                queued: Some((ticket, Rc::clone(&self.shared))),
            },
            None => StagedDrop::unchanged(),
        })
    }

    /// Send a staged move to the remote once every earlier move has finished.
    ///
    /// Moves go out in staging order regardless of the order their commits
    /// are awaited. On success the returned item is merged into the
    /// authoritative list; on failure the displayed board is rebuilt without
    /// this move. A full reload runs before the next queued move may start.
    pub async fn commit(&self, staged: StagedDrop<ItemOf<R>>) -> DropOutcome<ItemOf<R>> {
        let Some(ticket) = staged.into_ticket() else {
            return DropOutcome::Unchanged;
        };
        let config = &self.shared.config;
        let mut guard = CommitGuard {
            shared: &self.shared,
            ticket,
            settled: false,
        };

        // Wait until this move is at the head of the queue and the slot is free
        let _slot = loop {
            let turn = self.shared.turn.notified();
            let slot = self.commit_slot.lock().await;
            let position = {
                let state = self.shared.state.borrow();
                state.queued.iter().position(|m| m.ticket == ticket)
            };
            match position {
                Some(0) => break slot,
                Some(_) => {
                    drop(slot);
                    turn.await;
                }
                None => {
                    guard.settled = true;
                    return DropOutcome::Unchanged;
                }
            }
        };

        let mv = {
            let mut state = self.shared.state.borrow_mut();
            let Some(mv) = state.queued.pop_front() else {
                guard.settled = true;
                return DropOutcome::Unchanged;
            };
            state.in_flight = Some(mv.clone());
            mv
        };

        debug!(board = config.name(), item_id = ?mv.id, from = %mv.from, to = %mv.to, ticket, "committing move");
        let result = self.remote.update_status(mv.id, &mv.to).await;

        let outcome = {
            let mut state = self.shared.state.borrow_mut();
            state.in_flight = None;
            match result {
                Ok(updated) => {
                    state.merge(updated.clone());
                    DropOutcome::Committed(updated)
                }
                Err(err) => {
                    warn!(board = config.name(), item_id = ?mv.id, error = %err, "move rejected, rolling back");
                    state.reproject(config);
                    state.status.error = Some(BoardError {
                        kind: BoardErrorKind::Commit,
                        message: err.to_string(),
                    });
                    DropOutcome::RolledBack(err)
                }
            }
        };
        guard.settled = true;
        self.notify();

        self.load_board().await;
        outcome
    }

    /// Stage and commit in one call.
    ///
    /// The optimistic move happens before the future is first polled; the
    /// future carries the network round trip. Dropping the future unfinished
    /// withdraws the move.
    pub fn end_drag(
        &self,
        item_id: IdOf<R>,
        target_column: Option<&str>,
    ) -> impl Future<Output = Result<DropOutcome<ItemOf<R>>, DragError>> + '_ {
        let staged = self.stage_drop(item_id, target_column);
        async move { Ok(self.commit(staged?).await) }
    }
}
