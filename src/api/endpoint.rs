//! Fixed backend endpoint templates.

use reqwest::Method;

use crate::types::{ClubId, TrainingId, UserId};

/// Every request the client can make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// List all training sessions
    Trainings,
    /// Roster of one training session
    Participants(TrainingId),
    /// List all news items
    News,
    /// Member profile
    User(UserId),
    /// Club contact card
    Club(ClubId),
    /// Exchange credentials for a token
    Login,
    /// Create a member account
    Register,
}

impl Endpoint {
    /// HTTP method of the endpoint
    pub fn method(self) -> Method {
        match self {
            Self::Login | Self::Register => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path relative to the backend base URL
    pub fn path(self) -> String {
        match self {
            Self::Trainings => "/api/edzesek".to_string(),
            Self::Participants(id) => format!("/api/edzesek/{id}/jelentkezok"),
            Self::News => "/api/hirek".to_string(),
            Self::User(id) => format!("/api/felhasznalok/{id}"),
            Self::Club(id) => format!("/api/klubok/{id}"),
            Self::Login => "/api/auth/login".to_string(),
            Self::Register => "/api/auth/register".to_string(),
        }
    }

    /// Whether the bearer token is sent with this endpoint
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn paths_follow_backend_templates() {
        assert_eq!(Endpoint::Participants(TrainingId(5)).path(), "/api/edzesek/5/jelentkezok");
        assert_eq!(Endpoint::User(UserId(7)).path(), "/api/felhasznalok/7");
        assert_eq!(Endpoint::Club(ClubId(2)).path(), "/api/klubok/2");
        assert_eq!(Endpoint::Register.method(), Method::POST);
        assert_eq!(Endpoint::News.method(), Method::GET);
    }

    #[test]
    fn auth_endpoints_never_carry_token() {
        assert!(!Endpoint::Login.is_authenticated());
        assert!(!Endpoint::Register.is_authenticated());
        assert!(Endpoint::Trainings.is_authenticated());
    }
}
