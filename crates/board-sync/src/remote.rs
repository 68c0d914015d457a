//! Remote Collection
//!
//! The backend of record as seen by a board. Implementations are expected
//! to be stateless so one client can back several boards.

use async_trait::async_trait;
use std::rc::Rc;

use crate::error::RemoteError;
use crate::item::BoardItem;

/// List and status-update access to a remote collection.
///
/// Futures are not required to be `Send`: boards run on a single-threaded
/// event loop (including the browser).
#[async_trait(?Send)]
pub trait RemoteCollection {
    type Item: BoardItem;

    /// Fetch the full current collection
    async fn list(&self) -> Result<Vec<Self::Item>, RemoteError>;

    /// Persist a status change and return the canonical updated item
    async fn update_status(
        &self,
        id: <Self::Item as BoardItem>::Id,
        status: &str,
    ) -> Result<Self::Item, RemoteError>;
}

#[async_trait(?Send)]
impl<R: RemoteCollection + ?Sized> RemoteCollection for Rc<R> {
    type Item = R::Item;

    async fn list(&self) -> Result<Vec<Self::Item>, RemoteError> {
        (**self).list().await
    }

    async fn update_status(
        &self,
        id: <Self::Item as BoardItem>::Id,
        status: &str,
    ) -> Result<Self::Item, RemoteError> {
        (**self).update_status(id, status).await
    }
}
