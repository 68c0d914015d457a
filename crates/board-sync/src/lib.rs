//! Board Sync
//!
//! Groups remote items into status columns and keeps the remote `status`
//! field in step with drag-and-drop moves.
//!
//! - config: column definitions and status resolution
//! - board: the column grouping itself
//! - drag: hover targets and in-board card movement
//! - remote: the collection the board reads from and writes to
//! - sync: optimistic commits, rollback and refresh

mod board;
mod config;
mod drag;
mod error;
mod item;
mod remote;
mod sync;

#[cfg(test)]
mod tests;

pub use board::{Board, Column};
pub use config::{BoardConfig, ColumnDef};
pub use drag::HoverTarget;
pub use error::{ConfigError, DragError, RemoteError};
pub use item::BoardItem;
pub use remote::RemoteCollection;
pub use sync::{
    BoardError, BoardErrorKind, BoardSnapshot, BoardStatus, BoardSync, DropOutcome, LoadOutcome,
    StagedDrop,
};
