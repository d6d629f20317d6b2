//! Backend data types.
//!
//! These types mirror the JSON the club backend sends and accepts. Field names
//! on the wire are the backend's; the Rust names describe what they hold.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{ClubId, NewsId, RoomId, TrainingId, UserId};

/// A scheduled training session ("edzés")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Backend id
    pub id: TrainingId,
    /// Display name, which also names the training type
    #[serde(rename = "megnevezes")]
    pub name: String,
    /// Raw wire timestamp; parse with [`crate::dates::parse_timestamp`]
    #[serde(rename = "idopont")]
    pub start_timestamp: String,
    /// Room the session is held in
    #[serde(rename = "terem_id")]
    pub room_id: RoomId,
    /// Owning club
    #[serde(rename = "klub_id")]
    pub club_id: ClubId,
    /// Registration is closed
    #[serde(rename = "lezart")]
    pub closed: bool,
    /// Coach's note
    #[serde(rename = "megjegyzes", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Coach leading the session, when assigned
    #[serde(rename = "edzo_id", default, skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<UserId>,
}

/// A member signed up for a training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Member id
    #[serde(rename = "id")]
    pub user_id: UserId,
    /// Full name
    #[serde(rename = "nev")]
    pub name: String,
    /// Phone number, possibly empty
    #[serde(rename = "telefon")]
    pub phone: String,
    /// Profile picture URL, possibly empty
    #[serde(rename = "profil_kep")]
    pub avatar_url: String,
    /// Attendance as recorded by the coach; read-only on this client
    #[serde(rename = "ottvolt")]
    pub attended: bool,
    /// Raw wire timestamp of the signup
    #[serde(rename = "resztvetel_datum")]
    pub registered_at: String,
}

impl Participant {
    /// First letter of the name, for avatar placeholders.
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next().map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

/// Participants of one session.
///
/// `count` is authoritative; the backend may cap `participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRoster {
    /// Total signups
    #[serde(rename = "resztvevok_szama")]
    pub count: u32,
    /// Listed signups
    #[serde(rename = "resztvevok")]
    pub participants: Vec<Participant>,
}

impl ParticipantRoster {
    /// Participants the backend counted but did not list.
    pub fn hidden_count(&self) -> usize {
        (self.count as usize).saturating_sub(self.participants.len())
    }

    /// Listed participants marked as attended.
    pub fn attended_count(&self) -> usize {
        self.participants.iter().filter(|p| p.attended).count()
    }
}

/// A club news item ("hír")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Backend id
    pub id: NewsId,
    /// Headline
    #[serde(rename = "cim")]
    pub title: String,
    /// Plain text body; may contain links
    #[serde(rename = "tartalom")]
    pub body: String,
    /// Header image
    #[serde(rename = "kep", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Publishing club
    #[serde(rename = "klub_id")]
    pub club_id: ClubId,
    /// Raw wire timestamp
    #[serde(rename = "letrehozas_datum")]
    pub created_at: String,
}

impl NewsItem {
    /// First http(s) link in the body, trailing punctuation stripped.
    #[allow(clippy::unwrap_used)]
    pub fn first_link(&self) -> Option<&str> {
        lazy_static! {
            static ref LINK_RE: Regex = Regex::new(r"https?://[^\s<>]+").unwrap();
        }
        LINK_RE
            .find(&self.body)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ')', ';', '!', '?']))
    }
}

/// Full member profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Member id
    pub id: UserId,
    /// Full name
    #[serde(rename = "nev")]
    pub name: String,
    /// Login email
    pub email: String,
    /// Phone number
    #[serde(rename = "telefon", default)]
    pub phone: Option<String>,
    /// Budopass card number
    #[serde(default)]
    pub budopass: Option<String>,
    /// Belt rank, e.g. "2. kyu"
    #[serde(rename = "ovfokozat", default)]
    pub belt_rank: Option<String>,
    /// Free-form notes
    #[serde(rename = "egyeb_adatok", default)]
    pub other_info: Option<String>,
    /// Home club
    #[serde(rename = "klub_id")]
    pub club_id: ClubId,
    /// Raw wire timestamp of registration
    #[serde(rename = "regisztracio_datum")]
    pub registered_at: String,
    /// Coach role
    #[serde(rename = "edzo")]
    pub is_coach: bool,
    /// Profile picture URL
    #[serde(rename = "profil_kep", default)]
    pub avatar_url: Option<String>,
}

/// Club contact card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubProfile {
    /// Club name
    #[serde(rename = "nev")]
    pub name: String,
    /// Postal address
    #[serde(rename = "cim")]
    pub address: String,
    /// Contact phone
    #[serde(rename = "telefon")]
    pub phone: String,
    /// Name of the head coach
    #[serde(rename = "edzoNev", alias = "edzo_nev")]
    pub head_coach_name: String,
}

/// Login credentials
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Login email
    pub email: String,
    /// Password as typed
    #[serde(rename = "jelszo")]
    pub password: String,
}

impl Credentials {
    /// Build credentials from form input, unvalidated.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form
#[derive(Clone, Serialize)]
pub struct Registration {
    /// Full name
    #[serde(rename = "nev")]
    pub name: String,
    /// Login email
    pub email: String,
    /// Password as typed
    #[serde(rename = "jelszo")]
    pub password: String,
    /// Club to join
    #[serde(rename = "klub_id")]
    pub club_id: ClubId,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("club_id", &self.club_id)
            .finish()
    }
}

/// Identity part of a login response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginUser {
    /// Member id
    pub id: UserId,
    /// Display name
    #[serde(rename = "nev")]
    pub name: String,
    /// Login email
    pub email: String,
    /// Home club
    #[serde(rename = "klub_id")]
    pub club_id: ClubId,
    /// Coach role
    #[serde(rename = "edzo")]
    pub is_coach: bool,
}

/// Successful login response
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for later requests
    pub token: String,
    /// Who logged in
    pub user: LoginUser,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_training_with_optional_fields_missing() {
        let training: TrainingSession = serde_json::from_value(json!({
            "id": 1,
            "megnevezes": "Reggeli Jóga",
            "idopont": "2024-06-01T08:00:00.000Z",
            "terem_id": 3,
            "klub_id": 2,
            "lezart": false
        }))
        .unwrap();
        assert_eq!(training.room_id, RoomId(3));
        assert_eq!(training.note, None);
        assert_eq!(training.coach_id, None);
    }

    #[test]
    fn decodes_roster_and_keeps_authoritative_count() {
        let roster: ParticipantRoster = serde_json::from_value(json!({
            "resztvevok_szama": 12,
            "resztvevok": [{
                "id": 7, "nev": "Kiss Éva", "telefon": "+36301234567",
                "profil_kep": "", "ottvolt": true,
                "resztvetel_datum": "2024-05-30T10:00:00.000Z"
            }]
        }))
        .unwrap();
        assert_eq!(roster.count, 12);
        assert_eq!(roster.hidden_count(), 11);
        assert_eq!(roster.attended_count(), 1);
        assert_eq!(roster.participants[0].initial(), Some('K'));
    }

    #[test]
    fn club_profile_accepts_both_coach_keys() {
        let camel: ClubProfile = serde_json::from_value(json!({
            "nev": "Castrum SC", "cim": "Budapest", "telefon": "+36 30 999 8888",
            "edzoNev": "Pantelics Péter"
        }))
        .unwrap();
        let snake: ClubProfile = serde_json::from_value(json!({
            "nev": "Castrum SC", "cim": "Budapest", "telefon": "+36 30 999 8888",
            "edzo_nev": "Pantelics Péter"
        }))
        .unwrap();
        assert_eq!(camel, snake);
    }

    #[test]
    fn credentials_serialize_with_wire_names_and_hide_password() {
        let creds = Credentials::new("a@b.com", "x");
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            json!({"email": "a@b.com", "jelszo": "x"})
        );
        assert!(!format!("{creds:?}").contains("\"x\""));

        let reg = Registration {
            name: "Anna".into(),
            email: "a@b.com".into(),
            password: "x".into(),
            club_id: ClubId(1),
        };
        assert_eq!(
            serde_json::to_value(&reg).unwrap(),
            json!({"nev": "Anna", "email": "a@b.com", "jelszo": "x", "klub_id": 1})
        );
    }

    #[test]
    fn first_link_strips_trailing_punctuation() {
        let news = NewsItem {
            id: NewsId(1),
            title: "Nyári tábor".into(),
            body: "Jelentkezés itt: https://castrum.hu/tabor. Várunk!".into(),
            image_url: None,
            club_id: ClubId(2),
            created_at: "2024-06-01T08:00:00.000Z".into(),
        };
        assert_eq!(news.first_link(), Some("https://castrum.hu/tabor"));

        let plain = NewsItem { body: "Nincs link".into(), ..news };
        assert_eq!(plain.first_link(), None);
    }
}
