//! Fetchers for each backend resource.
//!
//! A [`Resource`] describes how to load one thing given the backend and the
//! current session; [`ResourceFetcher`] pairs it with a [`Fetcher`]. The token
//! and ids are captured when `refresh` is called, so a later logout cannot leak
//! into a request already in flight.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use super::{FetchState, Fetcher, RequestId};
use crate::api::types::{ClubProfile, NewsItem, ParticipantRoster, TrainingSession, UserProfile};
use crate::api::ClubBackend;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::types::TrainingId;

/// Something a fetcher can load.
pub trait Resource: Send + Sync + 'static {
    /// Snapshot type published by the fetcher.
    type Output: Send + 'static;

    /// Name used in logs.
    const LABEL: &'static str;

    /// Build the request for the current session.
    fn load(
        &self,
        backend: Arc<dyn ClubBackend>,
        session: &SessionStore,
    ) -> BoxFuture<'static, Result<Self::Output>>;
}

/// All training sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trainings;

impl Resource for Trainings {
    type Output = Vec<TrainingSession>;
    const LABEL: &'static str = "trainings";

    fn load(
        &self,
        backend: Arc<dyn ClubBackend>,
        session: &SessionStore,
    ) -> BoxFuture<'static, Result<Self::Output>> {
        let token = session.token().map(str::to_owned);
        async move { backend.list_trainings(token.as_deref()).await }.boxed()
    }
}

/// Roster of one training session.
#[derive(Debug, Clone, Copy)]
pub struct Participants {
    /// Session whose roster is loaded.
    pub training: TrainingId,
}

impl Resource for Participants {
    type Output = ParticipantRoster;
    const LABEL: &'static str = "participants";

    fn load(
        &self,
        backend: Arc<dyn ClubBackend>,
        session: &SessionStore,
    ) -> BoxFuture<'static, Result<Self::Output>> {
        let token = session.token().map(str::to_owned);
        let training = self.training;
        async move { backend.list_participants(training, token.as_deref()).await }.boxed()
    }
}

/// All news items.
#[derive(Debug, Clone, Copy, Default)]
pub struct News;

impl Resource for News {
    type Output = Vec<NewsItem>;
    const LABEL: &'static str = "news";

    fn load(
        &self,
        backend: Arc<dyn ClubBackend>,
        session: &SessionStore,
    ) -> BoxFuture<'static, Result<Self::Output>> {
        let token = session.token().map(str::to_owned);
        async move { backend.list_news(token.as_deref()).await }.boxed()
    }
}

/// Profile of the logged-in member.
#[derive(Debug, Clone, Copy, Default)]
pub struct Profile;

impl Resource for Profile {
    type Output = UserProfile;
    const LABEL: &'static str = "profile";

    fn load(
        &self,
        backend: Arc<dyn ClubBackend>,
        session: &SessionStore,
    ) -> BoxFuture<'static, Result<Self::Output>> {
        let Some(user) = session.user_id() else {
            return future::ready(Err(Error::not_logged_in())).boxed();
        };
        let token = session.token().map(str::to_owned);
        async move { backend.get_profile(user, token.as_deref()).await }.boxed()
    }
}

/// Club of the logged-in member.
#[derive(Debug, Clone, Copy, Default)]
pub struct Club;

impl Resource for Club {
    type Output = ClubProfile;
    const LABEL: &'static str = "club";

    fn load(
        &self,
        backend: Arc<dyn ClubBackend>,
        session: &SessionStore,
    ) -> BoxFuture<'static, Result<Self::Output>> {
        let Some(club) = session.club_id() else {
            return future::ready(Err(Error::not_logged_in())).boxed();
        };
        let token = session.token().map(str::to_owned);
        async move { backend.get_club(club, token.as_deref()).await }.boxed()
    }
}

/// A [`Fetcher`] bound to one resource and backend.
pub struct ResourceFetcher<R: Resource> {
    backend: Arc<dyn ClubBackend>,
    resource: R,
    inner: Fetcher<R::Output>,
}

/// Fetcher for all training sessions.
pub type TrainingsFetcher = ResourceFetcher<Trainings>;
/// Fetcher for one session's roster; build a new one per session.
pub type ParticipantsFetcher = ResourceFetcher<Participants>;
/// Fetcher for all news items.
pub type NewsFetcher = ResourceFetcher<News>;
/// Fetcher for the logged-in member's profile.
pub type ProfileFetcher = ResourceFetcher<Profile>;
/// Fetcher for the logged-in member's club.
pub type ClubFetcher = ResourceFetcher<Club>;

impl<R: Resource> ResourceFetcher<R> {
    /// Create an idle fetcher for `resource`
    pub fn with_resource(backend: Arc<dyn ClubBackend>, resource: R) -> Self {
        Self {
            backend,
            resource,
            inner: Fetcher::new(R::LABEL),
        }
    }

    /// The resource this fetcher loads
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Current state
    pub const fn state(&self) -> &FetchState<R::Output> {
        self.inner.state()
    }

    /// Start loading with the session's current credentials
    pub fn refresh(&mut self, session: &SessionStore) -> RequestId {
        let request = self.resource.load(Arc::clone(&self.backend), session);
        self.inner.refresh(request)
    }

    /// Apply completed requests without waiting
    pub fn handle_updates(&mut self) -> bool {
        self.inner.handle_updates()
    }

    /// Wait for the newest request to be applied
    pub async fn settle(&mut self) -> bool {
        self.inner.settle().await
    }
}

impl<R: Resource + Default> ResourceFetcher<R> {
    /// Create an idle fetcher
    pub fn new(backend: Arc<dyn ClubBackend>) -> Self {
        Self::with_resource(backend, R::default())
    }
}

impl ResourceFetcher<Participants> {
    /// Create an idle roster fetcher for one training session
    pub fn for_training(backend: Arc<dyn ClubBackend>, training: TrainingId) -> Self {
        Self::with_resource(backend, Participants { training })
    }

    /// Session whose roster this fetcher loads
    pub const fn training(&self) -> TrainingId {
        self.resource.training
    }
}

impl ResourceFetcher<Profile> {
    /// Apply completed requests and merge a new profile into the session.
    ///
    /// Returns `true` when the session was updated.
    pub fn sync_session(&mut self, store: &mut SessionStore) -> bool {
        self.handle_updates() && self.merge_into(store)
    }

    /// Wait for the newest request, then merge a new profile into the session.
    pub async fn settle_into(&mut self, store: &mut SessionStore) -> bool {
        self.settle().await && self.merge_into(store)
    }

    fn merge_into(&self, store: &mut SessionStore) -> bool {
        self.state()
            .data()
            .is_some_and(|profile| store.update_profile(profile))
    }
}
