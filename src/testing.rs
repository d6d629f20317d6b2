//! In-memory backend and sample data for unit tests.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{
    ClubProfile, Credentials, LoginResponse, LoginUser, NewsItem, Participant, ParticipantRoster,
    Registration, TrainingSession, UserProfile,
};
use crate::api::ClubBackend;
use crate::constants::text;
use crate::error::{Error, Result};
use crate::types::{ClubId, NewsId, RoomId, TrainingId, UserId};

/// Backend serving fixed data, with a switch to make every call fail.
#[derive(Default)]
pub struct StubBackend {
    pub trainings: Vec<TrainingSession>,
    pub news: Vec<NewsItem>,
    pub roster: Option<ParticipantRoster>,
    pub profile: Option<UserProfile>,
    pub club: Option<ClubProfile>,
    pub login: Option<LoginResponse>,
    pub failure: Mutex<Option<(u16, String)>>,
    pub tokens: Mutex<Vec<Option<String>>>,
    pub trainings_asked: Mutex<Vec<TrainingId>>,
}

impl StubBackend {
    /// Make every following call fail with `status` and an empty body.
    pub fn fail_with(&self, status: Option<u16>) {
        *self.failure.lock().unwrap() = status.map(|s| (s, String::new()));
    }

    /// Make every following call fail with `status` and `message`.
    pub fn fail_with_message(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    /// Tokens passed to resource calls, in call order.
    pub fn seen_tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }

    /// Training ids passed to roster calls, in call order.
    pub fn seen_trainings(&self) -> Vec<TrainingId> {
        self.trainings_asked.lock().unwrap().clone()
    }

    fn record(&self, token: Option<&str>) -> Result<()> {
        self.tokens.lock().unwrap().push(token.map(str::to_owned));
        self.check()
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(Error::server(status, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClubBackend for StubBackend {
    async fn list_trainings(&self, token: Option<&str>) -> Result<Vec<TrainingSession>> {
        self.record(token)?;
        Ok(self.trainings.clone())
    }

    async fn list_participants(
        &self,
        training: TrainingId,
        token: Option<&str>,
    ) -> Result<ParticipantRoster> {
        self.trainings_asked.lock().unwrap().push(training);
        self.record(token)?;
        Ok(self.roster.clone().unwrap_or(ParticipantRoster {
            count: 0,
            participants: Vec::new(),
        }))
    }

    async fn list_news(&self, token: Option<&str>) -> Result<Vec<NewsItem>> {
        self.record(token)?;
        Ok(self.news.clone())
    }

    async fn get_profile(&self, user: UserId, token: Option<&str>) -> Result<UserProfile> {
        self.record(token)?;
        self.profile
            .clone()
            .filter(|p| p.id == user)
            .ok_or_else(|| Error::server(404, ""))
    }

    async fn get_club(&self, _club: ClubId, token: Option<&str>) -> Result<ClubProfile> {
        self.record(token)?;
        self.club.clone().ok_or_else(|| Error::server(404, ""))
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.check()?;
        self.login
            .clone()
            .filter(|r| r.user.email == credentials.email)
            .ok_or_else(|| Error::server(401, "Hibás email vagy jelszó"))
    }

    async fn register(&self, _registration: &Registration) -> Result<String> {
        self.check()?;
        Ok(text::REGISTRATION_OK.to_string())
    }
}

pub fn training(id: i64, name: &str, room: i64, start: &str) -> TrainingSession {
    TrainingSession {
        id: TrainingId(id),
        name: name.to_string(),
        start_timestamp: start.to_string(),
        room_id: RoomId(room),
        club_id: ClubId(2),
        closed: false,
        note: None,
        coach_id: None,
    }
}

pub fn news(id: i64, created_at: &str) -> NewsItem {
    NewsItem {
        id: NewsId(id),
        title: format!("Hír {id}"),
        body: "Edzésszünet a nyári szünetben.".to_string(),
        image_url: None,
        club_id: ClubId(2),
        created_at: created_at.to_string(),
    }
}

/// Roster whose backend count is `count` with `listed` entries.
pub fn roster(count: u32, listed: i64) -> ParticipantRoster {
    ParticipantRoster {
        count,
        participants: (1..=listed)
            .map(|i| Participant {
                user_id: UserId(100 + i),
                name: format!("Tag {i}"),
                phone: String::new(),
                avatar_url: String::new(),
                attended: i % 2 == 0,
                registered_at: "2024-05-30T10:00:00.000Z".to_string(),
            })
            .collect(),
    }
}

pub fn profile(id: i64, club: ClubId) -> UserProfile {
    UserProfile {
        id: UserId(id),
        name: "Kovács Anna".to_string(),
        email: "a@b.com".to_string(),
        phone: Some("+36 30 123 4567".to_string()),
        budopass: None,
        belt_rank: Some("2. kyu".to_string()),
        other_info: None,
        club_id: club,
        registered_at: "2023-09-01T10:00:00.000Z".to_string(),
        is_coach: false,
        avatar_url: None,
    }
}

/// Login of member 7, "Anna", club 2, not a coach.
pub fn login_response(token: &str) -> LoginResponse {
    LoginResponse {
        token: token.to_string(),
        user: LoginUser {
            id: UserId(7),
            name: "Anna".to_string(),
            email: "a@b.com".to_string(),
            club_id: ClubId(2),
            is_coach: false,
        },
    }
}
