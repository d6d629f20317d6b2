//! Client context tying the session, auth flow and home screen together.

use std::sync::Arc;

use crate::api::types::{NewsItem, Registration, TrainingSession};
use crate::api::{ApiClient, ClubBackend};
use crate::auth::{AuthFlow, AuthState};
use crate::config::Config;
use crate::fetch::{
    ClubFetcher, NewsFetcher, ParticipantsFetcher, ProfileFetcher, TrainingsFetcher,
};
use crate::session::SessionStore;
use crate::types::TrainingId;
use crate::views::{self, ShowMore, TrainingFilter};

/// Everything a running client holds: config, backend, session and the
/// home screen's fetchers.
///
/// The context is the single owner of the [`SessionStore`]; fetchers built
/// from it borrow the session only when they start a request.
pub struct ClubContext {
    /// Settings the context was built from
    pub config: Config,
    backend: Arc<dyn ClubBackend>,
    session: SessionStore,
    auth: AuthFlow,
    /// Home screen training list
    pub trainings: TrainingsFetcher,
    /// Home screen news feed
    pub news: NewsFetcher,
    /// Room or type selection applied to the training list
    pub filter: TrainingFilter,
    /// Expander of the training list
    pub show_more: ShowMore,
    /// Expander of the news feed
    pub news_more: ShowMore,
}

impl ClubContext {
    /// Context talking to the configured backend over HTTP
    pub fn new(config: Config) -> Self {
        let backend: Arc<dyn ClubBackend> = Arc::new(ApiClient::new(&config));
        Self::with_backend(config, backend)
    }

    /// Context over any backend implementation
    pub fn with_backend(config: Config, backend: Arc<dyn ClubBackend>) -> Self {
        Self {
            config,
            auth: AuthFlow::new(Arc::clone(&backend)),
            trainings: TrainingsFetcher::new(Arc::clone(&backend)),
            news: NewsFetcher::new(Arc::clone(&backend)),
            session: SessionStore::new(),
            filter: TrainingFilter::All,
            show_more: ShowMore::trainings(),
            news_more: ShowMore::news(),
            backend,
        }
    }

    /// Shared handle to the backend
    pub fn backend(&self) -> Arc<dyn ClubBackend> {
        Arc::clone(&self.backend)
    }

    /// The session every fetch reads its token from
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Login and registration state
    pub const fn auth(&self) -> &AuthFlow {
        &self.auth
    }

    /// Start a login without waiting
    pub fn submit_login(&mut self, email: impl Into<String>, password: impl Into<String>) {
        self.auth.submit_login(email, password);
    }

    /// Log in and wait for the outcome
    pub async fn login(
        &mut self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> &AuthState {
        self.auth.login(&mut self.session, email, password).await
    }

    /// Register and wait for the outcome; never logs in
    pub async fn register(&mut self, registration: Registration) -> &AuthState {
        self.auth.register(&mut self.session, registration).await
    }

    /// Registration form prefilled with the configured club
    pub fn registration(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Registration {
        Registration {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            club_id: self.config.default_club_id,
        }
    }

    /// Clear the session and reset everything that depended on it.
    ///
    /// Home fetchers are replaced, so results still in flight go nowhere.
    pub fn logout(&mut self) {
        self.session.logout();
        self.auth.reset();
        self.trainings = TrainingsFetcher::new(self.backend());
        self.news = NewsFetcher::new(self.backend());
        self.filter = TrainingFilter::All;
        self.show_more = ShowMore::trainings();
        self.news_more = ShowMore::news();
    }

    /// Apply whatever finished since the last call
    pub fn handle_updates(&mut self) -> bool {
        let auth = self.auth.handle_updates(&mut self.session);
        let trainings = self.trainings.handle_updates();
        let news = self.news.handle_updates();
        auth || trainings || news
    }

    /// Refresh trainings and news together and wait for both
    pub async fn load_home(&mut self) {
        self.trainings.refresh(&self.session);
        self.news.refresh(&self.session);
        let (trainings, news) = futures::join!(self.trainings.settle(), self.news.settle());
        tracing::debug!(trainings, news, "home screen loaded");
    }

    /// Trainings on the home screen: filtered, by start time, paginated
    pub fn visible_trainings(&self) -> Vec<&TrainingSession> {
        let all = self.trainings.state().data().map_or(&[][..], Vec::as_slice);
        let sorted = views::sorted_by_start_time(views::filtered_trainings(all, &self.filter));
        self.show_more.visible(&sorted).to_vec()
    }

    /// News on the home screen: newest first, paginated
    pub fn visible_news(&self) -> Vec<&NewsItem> {
        let all = self.news.state().data().map_or(&[][..], Vec::as_slice);
        let sorted = views::sorted_news_by_recency(all);
        self.news_more.visible(&sorted).to_vec()
    }

    /// Standalone training list fetcher
    pub fn trainings_fetcher(&self) -> TrainingsFetcher {
        TrainingsFetcher::new(self.backend())
    }

    /// Standalone news fetcher
    pub fn news_fetcher(&self) -> NewsFetcher {
        NewsFetcher::new(self.backend())
    }

    /// Roster fetcher for a detail screen
    pub fn participants_fetcher(&self, training: TrainingId) -> ParticipantsFetcher {
        ParticipantsFetcher::for_training(self.backend(), training)
    }

    /// Member profile fetcher
    pub fn profile_fetcher(&self) -> ProfileFetcher {
        ProfileFetcher::new(self.backend())
    }

    /// Club profile fetcher
    pub fn club_fetcher(&self) -> ClubFetcher {
        ClubFetcher::new(self.backend())
    }

    /// Load the member profile and merge it into the session
    pub async fn refresh_profile(&mut self) -> bool {
        let mut fetcher = self.profile_fetcher();
        fetcher.refresh(&self.session);
        fetcher.settle_into(&mut self.session).await
    }
}
