//! Backend trait abstraction.
//!
//! Fetchers and the auth flow talk to the club backend through [`ClubBackend`]
//! so they can be driven by a stub in tests. [`crate::api::ApiClient`] is the
//! production implementation.

use async_trait::async_trait;

use crate::api::types::{
    ClubProfile, Credentials, LoginResponse, NewsItem, ParticipantRoster, Registration,
    TrainingSession, UserProfile,
};
use crate::error::Result;
use crate::types::{ClubId, TrainingId, UserId};

/// Operations offered by the club backend.
///
/// `token` is the bearer token of the current session, `None` before login.
#[async_trait]
pub trait ClubBackend: Send + Sync {
    /// List all training sessions
    async fn list_trainings(&self, token: Option<&str>) -> Result<Vec<TrainingSession>>;

    /// Roster of one training session
    async fn list_participants(
        &self,
        training: TrainingId,
        token: Option<&str>,
    ) -> Result<ParticipantRoster>;

    /// List all news items, in whatever order the backend chooses
    async fn list_news(&self, token: Option<&str>) -> Result<Vec<NewsItem>>;

    /// Profile of one member
    async fn get_profile(&self, user: UserId, token: Option<&str>) -> Result<UserProfile>;

    /// Contact card of one club
    async fn get_club(&self, club: ClubId, token: Option<&str>) -> Result<ClubProfile>;

    /// Exchange credentials for a session token and identity
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Create an account; returns the confirmation message
    async fn register(&self, registration: &Registration) -> Result<String>;
}
