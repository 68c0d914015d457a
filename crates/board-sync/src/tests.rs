//! Board Synchronizer Scenario Tests
//!
//! Drives `BoardSync` against an in-memory remote.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::{
    BoardConfig, BoardErrorKind, BoardItem, BoardSync, ColumnDef, DragError, DropOutcome,
    HoverTarget, LoadOutcome, RemoteCollection, RemoteError,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Card {
    pub id: u32,
    pub title: String,
    pub status: String,
}

impl BoardItem for Card {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

pub(crate) fn card(id: u32, status: &str) -> Card {
    Card {
        id,
        title: format!("Card {}", id),
        status: status.to_string(),
    }
}

/// In-memory remote that records calls
#[derive(Default)]
struct StubRemote {
    items: RefCell<Vec<Card>>,
    reject_updates: Cell<bool>,
    fail_lists: Cell<bool>,
    /// Per-call yield counts for `list`, consumed in call order
    list_yields: RefCell<VecDeque<usize>>,
    /// Yield this many times inside each update to let other futures run
    update_yields: Cell<usize>,
    list_calls: Cell<usize>,
    update_calls: RefCell<Vec<(u32, String)>>,
    updates_running: Cell<usize>,
    max_updates_running: Cell<usize>,
}

impl StubRemote {
    fn with_items(items: Vec<Card>) -> Rc<Self> {
        let remote = Self::default();
        *remote.items.borrow_mut() = items;
        Rc::new(remote)
    }
}

#[async_trait(?Send)]
impl RemoteCollection for StubRemote {
    type Item = Card;

    async fn list(&self) -> Result<Vec<Card>, RemoteError> {
        self.list_calls.set(self.list_calls.get() + 1);
        let items = self.items.borrow().clone();
        let yields = self.list_yields.borrow_mut().pop_front().unwrap_or(0);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }
        if self.fail_lists.get() {
            return Err(RemoteError::Transport("connection refused".into()));
        }
        Ok(items)
    }

    async fn update_status(&self, id: u32, status: &str) -> Result<Card, RemoteError> {
        self.update_calls.borrow_mut().push((id, status.to_string()));
        self.updates_running.set(self.updates_running.get() + 1);
        self.max_updates_running
            .set(self.max_updates_running.get().max(self.updates_running.get()));

        for _ in 0..self.update_yields.get() {
            tokio::task::yield_now().await;
        }
        self.updates_running.set(self.updates_running.get() - 1);

        if self.reject_updates.get() {
            return Err(RemoteError::Rejected(format!("status '{}' refused", status)));
        }
        let mut items = self.items.borrow_mut();
        let item = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RemoteError::NotFound(format!("card {}", id)))?;
        item.status = status.to_string();
        Ok(item.clone())
    }
}

fn lead_config() -> BoardConfig {
    BoardConfig::new(
        "leads",
        vec![
            ColumnDef::new("NEW", "New", "#3b82f6"),
            ColumnDef::new("CONTACTED", "Contacted", "#eab308"),
            ColumnDef::new("WON", "Won", "#22c55e"),
        ],
        "NEW",
    )
    .unwrap()
}

async fn setup(items: Vec<Card>) -> (Rc<StubRemote>, BoardSync<Rc<StubRemote>>) {
    let remote = StubRemote::with_items(items);
    let sync = BoardSync::new(lead_config(), remote.clone());
    assert!(matches!(sync.load_board().await, LoadOutcome::Applied(_)));
    (remote, sync)
}

fn status_of(sync: &BoardSync<Rc<StubRemote>>, id: u32) -> Option<String> {
    sync.authoritative()
        .into_iter()
        .find(|c| c.id == id)
        .map(|c| c.status)
}

#[tokio::test]
async fn test_load_groups_by_status() {
    let (remote, sync) = setup(vec![
        card(1, "NEW"),
        card(2, "won"),
        card(3, "PROPOSAL SENT"),
        card(4, "CONTACTED"),
    ])
    .await;

    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![1, 3]);
    assert_eq!(board.ids("CONTACTED"), vec![4]);
    assert_eq!(board.ids("WON"), vec![2]);
    assert_eq!(board.len(), 4);
    assert_eq!(remote.list_calls.get(), 1);
    assert!(!sync.status().stale);
}

#[tokio::test]
async fn test_move_commits_on_success() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;

    sync.begin_drag(1).unwrap();
    sync.drag_over(1, &HoverTarget::Column("CONTACTED".into())).unwrap();
    let outcome = sync.end_drag(1, Some("CONTACTED")).await.unwrap();

    assert!(matches!(outcome, DropOutcome::Committed(ref c) if c.status == "CONTACTED"));
    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![2]);
    assert_eq!(board.ids("CONTACTED"), vec![1]);
    assert_eq!(status_of(&sync, 1).as_deref(), Some("CONTACTED"));
    assert_eq!(*remote.update_calls.borrow(), vec![(1, "CONTACTED".to_string())]);
    // Initial load plus the refresh after the commit
    assert_eq!(remote.list_calls.get(), 2);
    assert!(sync.status().error.is_none());
}

#[tokio::test]
async fn test_move_rolls_back_on_failure() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;
    remote.reject_updates.set(true);

    sync.begin_drag(1).unwrap();
    sync.drag_over(1, &HoverTarget::Column("CONTACTED".into())).unwrap();
    let outcome = sync.end_drag(1, Some("CONTACTED")).await.unwrap();

    assert!(matches!(outcome, DropOutcome::RolledBack(RemoteError::Rejected(_))));
    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![1, 2]);
    assert_eq!(board.ids("CONTACTED"), Vec::<u32>::new());
    assert_eq!(status_of(&sync, 1).as_deref(), Some("NEW"));

    let error = sync.status().error.expect("commit error should be surfaced");
    assert_eq!(error.kind, BoardErrorKind::Commit);
    sync.dismiss_error();
    assert!(sync.status().error.is_none());
}

#[tokio::test]
async fn test_rollback_restores_authoritative_before_refresh() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "WON")]).await;
    remote.reject_updates.set(true);
    remote.fail_lists.set(true);

    sync.begin_drag(2).unwrap();
    let outcome = sync.end_drag(2, Some("NEW")).await.unwrap();

    assert!(matches!(outcome, DropOutcome::RolledBack(_)));
    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![1]);
    assert_eq!(board.ids("WON"), vec![2]);
    // The refresh failed too, which leaves the board stale
    let status = sync.status();
    assert!(status.stale);
    assert_eq!(status.error.map(|e| e.kind), Some(BoardErrorKind::Load));
}

#[tokio::test]
async fn test_same_column_drop_is_a_noop() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "CONTACTED")]).await;
    let before = sync.displayed();

    sync.begin_drag(1).unwrap();
    let outcome = sync.end_drag(1, Some("NEW")).await.unwrap();

    assert_eq!(outcome, DropOutcome::Unchanged);
    assert_eq!(sync.displayed(), before);
    assert!(remote.update_calls.borrow().is_empty());
    assert_eq!(remote.list_calls.get(), 1);
    assert_eq!(sync.snapshot().dragging, None);
}

#[tokio::test]
async fn test_drop_back_on_origin_after_hovering_elsewhere() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW"), card(3, "WON")]).await;
    let before = sync.displayed();

    sync.begin_drag(1).unwrap();
    sync.drag_over(1, &HoverTarget::Item { id: 3, below_midpoint: true }).unwrap();
    assert_eq!(sync.displayed().ids("WON"), vec![3, 1]);

    let outcome = sync.end_drag(1, Some("NEW")).await.unwrap();
    assert_eq!(outcome, DropOutcome::Unchanged);
    assert_eq!(sync.displayed(), before);
    assert!(remote.update_calls.borrow().is_empty());
}

#[tokio::test]
async fn test_drop_outside_cancels() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "CONTACTED")]).await;
    let before = sync.displayed();

    sync.begin_drag(1).unwrap();
    sync.drag_over(1, &HoverTarget::Column("CONTACTED".into())).unwrap();
    let outcome = sync.end_drag(1, None).await.unwrap();

    assert_eq!(outcome, DropOutcome::Unchanged);
    assert_eq!(sync.displayed(), before);
    assert!(remote.update_calls.borrow().is_empty());
}

#[tokio::test]
async fn test_cancel_drag_restores_origin() {
    let (_remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;
    let before = sync.displayed();

    sync.begin_drag(2).unwrap();
    sync.drag_over(2, &HoverTarget::Column("WON".into())).unwrap();
    sync.cancel_drag();

    assert_eq!(sync.displayed(), before);
    assert_eq!(
        sync.end_drag(2, Some("WON")).await,
        Err(DragError::NotDragging("2".into()))
    );
}

#[tokio::test]
async fn test_drop_without_hover_moves_card() {
    let (_remote, sync) = setup(vec![card(1, "NEW"), card(2, "CONTACTED")]).await;

    sync.begin_drag(1).unwrap();
    let staged = sync.stage_drop(1, Some("CONTACTED")).unwrap();
    assert!(staged.is_queued());

    // Optimistic move is visible before the commit runs
    let snapshot = sync.snapshot();
    assert_eq!(snapshot.board.ids("CONTACTED"), vec![2, 1]);
    assert_eq!(snapshot.board.get(1).unwrap().status, "CONTACTED");
    assert_eq!(snapshot.pending_moves, 1);
    assert_eq!(status_of(&sync, 1).as_deref(), Some("NEW"));

    assert!(matches!(sync.commit(staged).await, DropOutcome::Committed(_)));
    assert_eq!(sync.snapshot().pending_moves, 0);
}

#[tokio::test]
async fn test_hover_twice_matches_hover_once() {
    let (_remote, sync) = setup(vec![card(1, "NEW"), card(2, "CONTACTED"), card(3, "CONTACTED")]).await;
    let target = HoverTarget::Item { id: 2, below_midpoint: true };

    sync.begin_drag(1).unwrap();
    sync.drag_over(1, &target).unwrap();
    let once = sync.displayed();
    sync.drag_over(1, &target).unwrap();

    assert_eq!(sync.displayed(), once);
    assert_eq!(once.ids("CONTACTED"), vec![2, 1, 3]);
}

#[tokio::test]
async fn test_commits_are_serialized() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW"), card(3, "WON")]).await;
    remote.update_yields.set(3);

    sync.begin_drag(1).unwrap();
    let first = sync.end_drag(1, Some("CONTACTED"));

    sync.begin_drag(2).unwrap();
    let second = sync.end_drag(2, Some("WON"));

    // Both optimistic moves are visible while neither has committed
    let board = sync.displayed();
    assert_eq!(board.ids("CONTACTED"), vec![1]);
    assert_eq!(board.ids("WON"), vec![3, 2]);
    assert_eq!(sync.snapshot().pending_moves, 2);

    let (first, second) = tokio::join!(first, second);
    assert!(matches!(first, Ok(DropOutcome::Committed(_))));
    assert!(matches!(second, Ok(DropOutcome::Committed(_))));

    assert_eq!(remote.max_updates_running.get(), 1);
    assert_eq!(
        *remote.update_calls.borrow(),
        vec![(1, "CONTACTED".to_string()), (2, "WON".to_string())]
    );
    assert_eq!(status_of(&sync, 1).as_deref(), Some("CONTACTED"));
    assert_eq!(status_of(&sync, 2).as_deref(), Some("WON"));
    assert_eq!(sync.snapshot().pending_moves, 0);
}

#[tokio::test]
async fn test_queued_move_survives_rollback_of_earlier_move() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;
    remote.update_yields.set(2);

    sync.begin_drag(1).unwrap();
    let first = sync.stage_drop(1, Some("WON")).unwrap();
    sync.begin_drag(2).unwrap();
    let second = sync.stage_drop(2, Some("CONTACTED")).unwrap();

    remote.reject_updates.set(true);
    assert!(matches!(sync.commit(first).await, DropOutcome::RolledBack(_)));

    // Card 1 snapped back, card 2 still shows its queued move
    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![1]);
    assert_eq!(board.ids("CONTACTED"), vec![2]);

    remote.reject_updates.set(false);
    assert!(matches!(sync.commit(second).await, DropOutcome::Committed(_)));
    assert_eq!(sync.displayed().ids("CONTACTED"), vec![2]);
}

#[tokio::test]
async fn test_commits_go_out_in_staging_order() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;
    remote.update_yields.set(2);

    sync.begin_drag(1).unwrap();
    let first = sync.stage_drop(1, Some("CONTACTED")).unwrap();
    sync.begin_drag(2).unwrap();
    let second = sync.stage_drop(2, Some("WON")).unwrap();

    // The later move is polled first and still waits its turn
    let (second, first) = tokio::join!(sync.commit(second), sync.commit(first));
    assert!(matches!(first, DropOutcome::Committed(_)));
    assert!(matches!(second, DropOutcome::Committed(_)));

    assert_eq!(
        *remote.update_calls.borrow(),
        vec![(1, "CONTACTED".to_string()), (2, "WON".to_string())]
    );
    assert_eq!(remote.max_updates_running.get(), 1);
    assert_eq!(sync.snapshot().pending_moves, 0);
}

#[tokio::test]
async fn test_dropped_end_drag_withdraws_move() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "WON")]).await;

    sync.begin_drag(1).unwrap();
    let pending = sync.end_drag(1, Some("WON"));
    assert_eq!(sync.displayed().ids("WON"), vec![2, 1]);
    drop(pending);

    assert_eq!(sync.displayed().ids("NEW"), vec![1]);
    assert_eq!(sync.snapshot().pending_moves, 0);

    // A reload does not bring the abandoned move back
    sync.load_board().await;
    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![1]);
    assert_eq!(board.ids("WON"), vec![2]);
    assert_eq!(sync.snapshot().pending_moves, 0);
    assert!(remote.update_calls.borrow().is_empty());
}

#[tokio::test]
async fn test_dropped_staged_move_unblocks_later_commits() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;

    sync.begin_drag(1).unwrap();
    let first = sync.stage_drop(1, Some("WON")).unwrap();
    sync.begin_drag(2).unwrap();
    let second = sync.stage_drop(2, Some("CONTACTED")).unwrap();

    drop(first);
    assert_eq!(sync.displayed().ids("NEW"), vec![1]);
    assert!(matches!(sync.commit(second).await, DropOutcome::Committed(_)));

    assert_eq!(*remote.update_calls.borrow(), vec![(2, "CONTACTED".to_string())]);
    assert_eq!(status_of(&sync, 1).as_deref(), Some("NEW"));
    assert_eq!(sync.snapshot().pending_moves, 0);
}

#[tokio::test]
async fn test_commit_cancelled_mid_request_clears_pending_move() {
    let (remote, sync) = setup(vec![card(1, "NEW")]).await;
    remote.update_yields.set(5);

    sync.begin_drag(1).unwrap();
    let staged = sync.stage_drop(1, Some("WON")).unwrap();
    {
        let commit = sync.commit(staged);
        tokio::pin!(commit);
        // Abandon the commit once the request has started
        tokio::select! {
            biased;
            _ = &mut commit => panic!("commit should still be waiting on the remote"),
            _ = tokio::task::yield_now() => {}
        }
        assert_eq!(remote.update_calls.borrow().len(), 1);
        assert_eq!(sync.snapshot().pending_moves, 1);
    }

    assert_eq!(sync.snapshot().pending_moves, 0);
    sync.load_board().await;
    // The request never finished, so the remote still has the old status
    assert_eq!(sync.displayed().ids("NEW"), vec![1]);
    assert_eq!(status_of(&sync, 1).as_deref(), Some("NEW"));
    assert_eq!(sync.snapshot().pending_moves, 0);
}

#[tokio::test]
async fn test_load_failure_keeps_last_board() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "WON")]).await;
    let before = sync.displayed();

    remote.fail_lists.set(true);
    remote.items.borrow_mut().clear();
    let outcome = sync.load_board().await;

    assert!(matches!(outcome, LoadOutcome::Failed(RemoteError::Transport(_))));
    assert_eq!(sync.displayed(), before);
    let status = sync.status();
    assert!(status.stale);
    assert!(!status.loading);
    assert_eq!(status.error.map(|e| e.kind), Some(BoardErrorKind::Load));

    // A successful retry clears the stale flag and the load error
    remote.fail_lists.set(false);
    assert_eq!(sync.load_board().await, LoadOutcome::Applied(0));
    let status = sync.status();
    assert!(!status.stale);
    assert!(status.error.is_none());
}

#[tokio::test]
async fn test_overtaken_load_is_discarded() {
    let (remote, sync) = setup(vec![card(1, "NEW")]).await;
    remote.list_yields.borrow_mut().extend([3, 0]);

    let slow = sync.load_board();
    let fast = async {
        remote.items.borrow_mut().push(card(9, "WON"));
        sync.load_board().await
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(fast, LoadOutcome::Applied(2));
    assert_eq!(slow, LoadOutcome::Superseded);
    assert_eq!(sync.displayed().ids("WON"), vec![9]);
    assert!(!sync.status().loading);
}

#[tokio::test]
async fn test_refresh_picks_up_remote_changes() {
    let (remote, sync) = setup(vec![card(1, "NEW")]).await;
    remote.items.borrow_mut().push(card(7, "CONTACTED"));

    sync.begin_drag(1).unwrap();
    sync.end_drag(1, Some("WON")).await.unwrap();

    let board = sync.displayed();
    assert_eq!(board.ids("CONTACTED"), vec![7]);
    assert_eq!(board.ids("WON"), vec![1]);
}

#[tokio::test]
async fn test_missing_item_rolls_back() {
    let (remote, sync) = setup(vec![card(1, "NEW"), card(2, "NEW")]).await;
    remote.items.borrow_mut().retain(|c| c.id != 1);

    sync.begin_drag(1).unwrap();
    let outcome = sync.end_drag(1, Some("WON")).await.unwrap();

    assert!(matches!(outcome, DropOutcome::RolledBack(RemoteError::NotFound(_))));
    // The refresh then drops the deleted card entirely
    let board = sync.displayed();
    assert_eq!(board.ids("NEW"), vec![2]);
    assert_eq!(board.len(), 1);
}

#[tokio::test]
async fn test_contract_violations() {
    let (remote, sync) = setup(vec![card(1, "NEW")]).await;

    assert_eq!(sync.begin_drag(42), Err(DragError::UnknownItem("42".into())));
    assert_eq!(
        sync.drag_over(1, &HoverTarget::Column("WON".into())),
        Err(DragError::NotDragging("1".into()))
    );

    sync.begin_drag(1).unwrap();
    assert_eq!(
        sync.drag_over(1, &HoverTarget::Column("LOST".into())),
        Err(DragError::UnknownColumn("LOST".into()))
    );
    assert_eq!(
        sync.stage_drop(1, Some("LOST")).err(),
        Some(DragError::UnknownColumn("LOST".into()))
    );
    // The drag is still usable after a rejected call
    let staged = sync.stage_drop(1, Some("NEW")).unwrap();
    assert!(!staged.is_queued());
    assert_eq!(staged.ticket(), None);
    assert!(remote.update_calls.borrow().is_empty());
}

#[tokio::test]
async fn test_observers_see_optimistic_and_final_state() {
    let (_remote, sync) = setup(vec![card(1, "NEW")]).await;
    let seen: Rc<RefCell<Vec<Vec<u32>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    sync.on_change(move |snapshot| sink.borrow_mut().push(snapshot.board.ids("WON")));

    sync.begin_drag(1).unwrap();
    sync.end_drag(1, Some("WON")).await.unwrap();

    let seen = seen.borrow();
    assert!(seen.len() >= 3);
    assert_eq!(seen.last(), Some(&vec![1]));
    assert!(seen.iter().skip(1).all(|ids| ids == &vec![1]));
}
