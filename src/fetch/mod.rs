//! Loading/success/error state around one network read.
//!
//! A [`Fetcher`] spawns each request on the tokio runtime and receives the
//! result through a channel it owns, the same way the rest of the client hands
//! async results back to its owner. Results are applied only when the owner
//! calls [`Fetcher::handle_updates`] or awaits [`Fetcher::settle`], so state
//! never changes behind the owner's back.
//!
//! Every request gets a [`RequestId`]; only the newest one may change state.
//! Dropping a fetcher drops its receiver and late results go nowhere.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::Result;

/// Fetchers bound to each backend resource
pub mod resources;

pub use resources::{
    ClubFetcher, NewsFetcher, ParticipantsFetcher, ProfileFetcher, Resource, ResourceFetcher,
    TrainingsFetcher,
};

/// Where a fetcher is in its request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight; previous data stays visible
    Loading,
    /// The latest request succeeded
    Success,
    /// The latest request failed; previous data stays visible
    Error,
}

/// Observable state of a fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    /// Request cycle position
    pub status: FetchStatus,
    /// Last successfully fetched snapshot
    pub data: Option<T>,
    /// User-facing message of the last failure
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// A request is in flight
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// The snapshot, if any request ever succeeded
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

/// Monotonically increasing id of one request on one fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

struct Completion<T> {
    id: RequestId,
    result: Result<T>,
}

/// Generic request/state core shared by every resource fetcher
pub struct Fetcher<T> {
    label: &'static str,
    state: FetchState<T>,
    latest: RequestId,
    tx: mpsc::Sender<Completion<T>>,
    rx: mpsc::Receiver<Completion<T>>,
}

impl<T: Send + 'static> Fetcher<T> {
    /// Create an idle fetcher; `label` names it in logs
    pub fn new(label: &'static str) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            label,
            state: FetchState::default(),
            latest: RequestId(0),
            tx,
            rx,
        }
    }

    /// Current state
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Id of the newest request issued
    pub const fn latest(&self) -> RequestId {
        self.latest
    }

    /// Start a new request cycle without sending anything.
    ///
    /// Status becomes `Loading`, the previous error is cleared and the
    /// previous data stays. Any request issued earlier is now stale.
    pub fn begin(&mut self) -> RequestId {
        self.latest = RequestId(self.latest.0 + 1);
        self.state.status = FetchStatus::Loading;
        self.state.error = None;
        tracing::debug!(fetcher = self.label, request = self.latest.0, "request started");
        self.latest
    }

    /// Apply the result of request `id`.
    ///
    /// Returns `true` only when a success replaced the data. Results of stale
    /// requests are dropped.
    pub fn apply(&mut self, id: RequestId, result: Result<T>) -> bool {
        if id != self.latest {
            tracing::debug!(
                fetcher = self.label,
                request = id.0,
                latest = self.latest.0,
                "discarding stale response"
            );
            return false;
        }

        match result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.status = FetchStatus::Success;
                self.state.error = None;
                true
            }
            Err(e) => {
                tracing::warn!(fetcher = self.label, request = id.0, "request failed: {}", e);
                self.state.status = FetchStatus::Error;
                self.state.error = Some(e.user_message());
                false
            }
        }
    }

    /// Begin a request and run it on a spawned task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn refresh<F>(&mut self, request: F) -> RequestId
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let id = self.begin();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            // Fails only when the fetcher is gone; nothing left to update.
            let _ = tx.send(Completion { id, result }).await;
        });
        id
    }

    /// Apply every completed request without waiting.
    ///
    /// Returns `true` if a success was applied.
    pub fn handle_updates(&mut self) -> bool {
        let mut applied = false;
        loop {
            match self.rx.try_recv() {
                Ok(Completion { id, result }) => applied |= self.apply(id, result),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Wait until the newest request has been applied.
    ///
    /// Returns immediately when nothing is loading. Only requests started with
    /// [`Fetcher::refresh`] ever complete on their own.
    pub async fn settle(&mut self) -> bool {
        let mut applied = false;
        while self.state.is_loading() {
            match self.rx.recv().await {
                Some(Completion { id, result }) => applied |= self.apply(id, result),
                None => break,
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::constants::text;
    use crate::error::Error;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[test]
    fn starts_idle_and_empty() {
        let fetcher: Fetcher<Vec<u32>> = Fetcher::new("test");
        assert_eq!(fetcher.state().status, FetchStatus::Idle);
        assert_eq!(fetcher.state().data(), None);
    }

    #[test]
    fn stale_results_never_overwrite_newer_ones() {
        let mut fetcher = Fetcher::new("test");
        let first = fetcher.begin();
        let second = fetcher.begin();
        assert!(first < second);

        assert!(fetcher.apply(second, Ok(vec![2])));
        assert!(!fetcher.apply(first, Ok(vec![1])));
        assert_eq!(fetcher.state().data(), Some(&vec![2]));
        assert_eq!(fetcher.state().status, FetchStatus::Success);

        // A stale failure must not flip the status either.
        assert!(!fetcher.apply(first, Err(Error::Network("late".into()))));
        assert_eq!(fetcher.state().status, FetchStatus::Success);
    }

    #[tokio::test]
    async fn failure_keeps_previous_data() {
        let mut fetcher = Fetcher::new("test");
        fetcher.refresh(async { Ok(vec![1, 2, 3]) });
        assert!(fetcher.settle().await);

        fetcher.refresh(async { Err(Error::Network("offline".into())) });
        assert!(!fetcher.settle().await);

        let state = fetcher.state();
        assert_eq!(state.status, FetchStatus::Error);
        assert_eq!(state.data(), Some(&vec![1, 2, 3]));
        assert_eq!(state.error.as_deref(), Some(text::NETWORK_ERROR));
    }

    #[tokio::test]
    async fn loading_keeps_data_visible_and_clears_error() {
        let mut fetcher = Fetcher::new("test");
        fetcher.refresh(async { Ok(vec![1]) });
        fetcher.settle().await;
        fetcher.refresh(async { Err(Error::server(500, "")) });
        fetcher.settle().await;
        assert!(fetcher.state().error.is_some());

        let (done, pending) = oneshot::channel::<Vec<u32>>();
        fetcher.refresh(async move { Ok(pending.await.unwrap_or_default()) });
        assert!(fetcher.state().is_loading());
        assert_eq!(fetcher.state().data(), Some(&vec![1]));
        assert_eq!(fetcher.state().error, None);

        done.send(vec![9]).unwrap();
        assert!(fetcher.settle().await);
        assert_eq!(fetcher.state().data(), Some(&vec![9]));
    }

    #[tokio::test]
    async fn newest_request_wins_whatever_the_arrival_order() {
        let mut fetcher = Fetcher::new("test");
        let (old_done, old_pending) = oneshot::channel::<Vec<u32>>();
        let (new_done, new_pending) = oneshot::channel::<Vec<u32>>();
        fetcher.refresh(async move { Ok(old_pending.await.unwrap_or_default()) });
        fetcher.refresh(async move { Ok(new_pending.await.unwrap_or_default()) });

        new_done.send(vec![2]).unwrap();
        old_done.send(vec![1]).unwrap();
        fetcher.settle().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        fetcher.handle_updates();

        assert_eq!(fetcher.state().data(), Some(&vec![2]));
        assert_eq!(fetcher.state().status, FetchStatus::Success);
    }

    #[tokio::test]
    async fn handle_updates_is_non_blocking() {
        let mut fetcher: Fetcher<Vec<u32>> = Fetcher::new("test");
        assert!(!fetcher.handle_updates());

        let (_done, pending) = oneshot::channel::<Vec<u32>>();
        fetcher.refresh(async move { Ok(pending.await.unwrap_or_default()) });
        assert!(!fetcher.handle_updates());
        assert!(fetcher.state().is_loading());
    }
}
