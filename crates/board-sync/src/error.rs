//! Error types for board synchronization

use thiserror::Error;

/// Failure reported by a remote collection.
///
/// Every variant is recoverable from the board's point of view: a failed
/// commit is rolled back and a failed load keeps the last good board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The item no longer exists on the remote
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote refused the change (validation)
    #[error("rejected: {0}")]
    Rejected(String),

    /// Network or server failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The request did not complete within the client's timeout
    #[error("request timed out after {0} ms")]
    Timeout(u64),
}

/// Drag calls that break the board's contract.
///
/// These indicate a caller bug (a stale id, an unknown column) and are
/// returned before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("item {0} is not on the board")]
    UnknownItem(String),

    #[error("column '{0}' is not on the board")]
    UnknownColumn(String),

    #[error("no drag in progress for item {0}")]
    NotDragging(String),
}

/// Invalid board configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board '{0}' has no columns")]
    NoColumns(String),

    #[error("duplicate column key '{0}'")]
    DuplicateColumn(String),

    #[error("default column '{0}' is not defined")]
    UnknownDefault(String),
}
