use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::backend::ClubBackend;
use crate::api::endpoint::Endpoint;
use crate::api::types::{
    ClubProfile, Credentials, LoginResponse, NewsItem, ParticipantRoster, Registration,
    TrainingSession, UserProfile,
};
use crate::config::Config;
use crate::constants::text;
use crate::error::{Error, Result};
use crate::types::{ClubId, TrainingId, UserId};

/// Longest plain-text body that is passed on as a server message.
const MAX_PLAIN_MESSAGE: usize = 200;

/// Client for the club backend.
///
/// One request per call, no retries; a caller that wants a retry calls again.
/// Timeouts are reqwest's defaults.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    /// Create a client for an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, endpoint.path());
        Url::parse(&raw).map_err(|e| Error::InvalidRequest(format!("{raw}: {e}")))
    }

    /// Send one request and read the whole body.
    ///
    /// Only transport failures are errors here; the status is returned as is.
    async fn send(
        &self,
        endpoint: Endpoint,
        body: Option<Vec<u8>>,
        token: Option<&str>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let url = self.url(endpoint)?;
        let path = endpoint.path();
        let method = endpoint.method();
        tracing::debug!(%method, %path, "sending request");

        let mut request = self.client.request(method, url);
        if let (true, Some(token)) = (endpoint.is_authenticated(), token) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Reading response from {path} failed: {e}")))?;
        tracing::debug!(%path, status = status.as_u16(), len = bytes.len(), "response received");

        Ok((status, bytes.to_vec()))
    }

    /// GET an endpoint and decode its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
    ) -> Result<T> {
        let (status, body) = self.send(endpoint, None, token).await?;
        if !status.is_success() {
            return Err(Error::server(status.as_u16(), server_message(&body)));
        }
        decode(endpoint, &body)
    }
}

fn encode<B: Serialize>(endpoint: Endpoint, body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| {
        Error::InvalidRequest(format!("Cannot encode body for {}: {e}", endpoint.path()))
    })
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::decode(endpoint.path(), e.to_string()))
}

/// Best-effort message from an error body.
///
/// JSON bodies are searched for a known message key; short plain-text bodies
/// are used verbatim. Anything else yields an empty string.
fn server_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(msg) = value.as_str() {
            return msg.trim().to_string();
        }
        return ["message", "error", "hiba", "uzenet"]
            .iter()
            .filter_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .unwrap_or_default()
            .to_string();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.len() > MAX_PLAIN_MESSAGE || text.starts_with('<') {
        String::new()
    } else {
        text.to_string()
    }
}

#[async_trait]
impl ClubBackend for ApiClient {
    async fn list_trainings(&self, token: Option<&str>) -> Result<Vec<TrainingSession>> {
        self.get_json(Endpoint::Trainings, token).await
    }

    async fn list_participants(
        &self,
        training: TrainingId,
        token: Option<&str>,
    ) -> Result<ParticipantRoster> {
        self.get_json(Endpoint::Participants(training), token).await
    }

    async fn list_news(&self, token: Option<&str>) -> Result<Vec<NewsItem>> {
        self.get_json(Endpoint::News, token).await
    }

    async fn get_profile(&self, user: UserId, token: Option<&str>) -> Result<UserProfile> {
        self.get_json(Endpoint::User(user), token).await
    }

    async fn get_club(&self, club: ClubId, token: Option<&str>) -> Result<ClubProfile> {
        self.get_json(Endpoint::Club(club), token).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let body = encode(Endpoint::Login, credentials)?;
        let (status, body) = self.send(Endpoint::Login, Some(body), None).await?;
        if !status.is_success() {
            return Err(Error::server(status.as_u16(), server_message(&body)));
        }
        decode(Endpoint::Login, &body)
    }

    async fn register(&self, registration: &Registration) -> Result<String> {
        let body = encode(Endpoint::Register, registration)?;
        let (status, body) = self.send(Endpoint::Register, Some(body), None).await?;
        let message = server_message(&body);
        if status != StatusCode::CREATED {
            return Err(Error::server(status.as_u16(), message));
        }
        if message.is_empty() {
            Ok(text::REGISTRATION_OK.to_string())
        } else {
            Ok(message)
        }
    }
}
