//! Tauri Remote Collection
//!
//! Backs a board with the Tauri commands for its entity. Every request is
//! bounded by a timeout and backend error strings are mapped onto
//! `RemoteError` by their prefix.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use board_sync::{RemoteCollection, RemoteError};
use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;

use crate::boards::BoardEntity;
use crate::commands;

/// Request settings shared by every board
#[derive(Debug, Clone, Copy)]
pub struct RemoteConfig {
    pub timeout_ms: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// Stateless client for one entity's commands
pub struct TauriCollection<T> {
    config: RemoteConfig,
    _entity: PhantomData<fn() -> T>,
}

impl<T> TauriCollection<T> {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            _entity: PhantomData,
        }
    }
}

/// Map a backend error string onto a remote failure
pub fn classify(message: &str) -> RemoteError {
    let message = message.trim();
    if let Some(rest) = message.strip_prefix("Not found:") {
        RemoteError::NotFound(rest.trim().to_string())
    } else if let Some(rest) = message
        .strip_prefix("Invalid input:")
        .or_else(|| message.strip_prefix("Conflict:"))
    {
        RemoteError::Rejected(rest.trim().to_string())
    } else {
        RemoteError::Transport(message.to_string())
    }
}

async fn with_timeout<F, T>(timeout_ms: u32, request: F) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, String>>,
{
    race_timer(request, TimeoutFuture::new(timeout_ms), timeout_ms).await
}

/// Whichever of the request and the timer finishes first decides the result
async fn race_timer<F, W, T>(request: F, timer: W, timeout_ms: u32) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, String>>,
    W: Future<Output = ()>,
{
    match future::select(Box::pin(request), Box::pin(timer)).await {
        Either::Left((result, _)) => result.map_err(|e| classify(&e)),
        Either::Right(_) => Err(RemoteError::Timeout(u64::from(timeout_ms))),
    }
}

#[async_trait(?Send)]
impl<T: BoardEntity> RemoteCollection for TauriCollection<T> {
    type Item = T;

    async fn list(&self) -> Result<Vec<T>, RemoteError> {
        with_timeout(self.config.timeout_ms, commands::list_board_items::<T>(T::KIND)).await
    }

    async fn update_status(&self, id: u32, status: &str) -> Result<T, RemoteError> {
        with_timeout(
            self.config.timeout_ms,
            commands::update_board_item_status::<T>(T::KIND, id, status),
        )
        .await
    }
}
