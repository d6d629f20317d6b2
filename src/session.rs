//! Authenticated session state.
//!
//! [`SessionStore`] is an owned value: whoever owns the client context owns
//! the store and lends it out. A store either holds a complete [`Session`] or
//! nothing, so a token without an identity cannot exist.

use crate::api::types::{LoginResponse, UserProfile};
use crate::types::{ClubId, UserId};

/// Profile fields that only arrive with a profile fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    /// Phone number.
    pub phone: Option<String>,
    /// Budo passport number.
    pub budopass: Option<String>,
    /// Belt rank.
    pub belt_rank: Option<String>,
    /// Free-form extra information.
    pub other_info: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Registration date as sent by the backend.
    pub registered_at: Option<String>,
}

/// The logged-in member.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Member id.
    pub user_id: UserId,
    /// Name shown in the header.
    pub display_name: String,
    /// Login email.
    pub email: String,
    /// Club the member belongs to.
    pub club_id: ClubId,
    /// Whether the member is a coach.
    pub is_coach: bool,
    /// Extra profile fields.
    pub profile: ProfileDetails,
    token: String,
}

impl Session {
    /// Build a session from a successful login response.
    pub fn from_login(response: LoginResponse) -> Self {
        let LoginResponse { token, user } = response;
        Self {
            user_id: user.id,
            display_name: user.name,
            email: user.email,
            club_id: user.club_id,
            is_coach: user.is_coach,
            profile: ProfileDetails::default(),
            token,
        }
    }

    /// Bearer token of this session.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("club_id", &self.club_id)
            .field("is_coach", &self.is_coach)
            .field("profile", &self.profile)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Holder of the current session.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<Session>,
    generation: u64,
}

impl SessionStore {
    /// Create a logged-out store.
    pub const fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// The current session, if logged in.
    pub const fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Whether a member is logged in.
    pub const fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(Session::token)
    }

    /// Id of the logged-in member.
    pub fn user_id(&self) -> Option<UserId> {
        self.current.as_ref().map(|s| s.user_id)
    }

    /// Club of the logged-in member.
    pub fn club_id(&self) -> Option<ClubId> {
        self.current.as_ref().map(|s| s.club_id)
    }

    /// Bumped on every login and logout.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Install a freshly authenticated session, replacing any previous one.
    pub fn complete_login(&mut self, session: Session) {
        tracing::info!(user = %session.user_id, club = %session.club_id, "logged in");
        self.current = Some(session);
        self.generation += 1;
    }

    /// Drop the session.
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            tracing::info!(user = %session.user_id, "logged out");
        }
        self.generation += 1;
    }

    /// Merge a fetched profile into the session.
    ///
    /// Token and login state are never touched. Returns `false` when there is
    /// no session or the profile belongs to someone else.
    pub fn update_profile(&mut self, profile: &UserProfile) -> bool {
        let Some(session) = self.current.as_mut() else {
            tracing::debug!("profile arrived after logout, ignoring");
            return false;
        };
        if session.user_id != profile.id {
            tracing::warn!(
                session_user = %session.user_id,
                profile_user = %profile.id,
                "profile belongs to another member, ignoring"
            );
            return false;
        }

        session.display_name.clone_from(&profile.name);
        session.email.clone_from(&profile.email);
        session.club_id = profile.club_id;
        session.is_coach = profile.is_coach;
        session.profile = ProfileDetails {
            phone: profile.phone.clone(),
            budopass: profile.budopass.clone(),
            belt_rank: profile.belt_rank.clone(),
            other_info: profile.other_info.clone(),
            avatar_url: profile.avatar_url.clone(),
            registered_at: Some(profile.registered_at.clone()),
        };
        true
    }
}
