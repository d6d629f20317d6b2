//! Client error types.
//!
//! Every failure the client can hit is classified into one of a handful of
//! kinds. Fetchers and the auth flow turn them into user-facing messages with
//! [`Error::user_message`]; nothing here is ever fatal to the process.

use thiserror::Error;

use crate::constants::text;

/// Client result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Client error kinds with enough context to act on
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built (bad URL, unserializable body, missing session).
    /// Nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No response reached the client (offline, refused, timed out, body cut short)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a status outside 200-299
    #[error("Server error {status}: {message}")]
    Server {
        /// Message derived from the response body, or a generic description.
        message: String,
        /// HTTP status code.
        status: u16,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// The backend answered 2xx but the body did not match the expected schema
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode {
        /// Path of the endpoint whose body failed to decode.
        endpoint: String,
        /// Decoder diagnostic.
        message: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

impl Error {
    /// Create a server error, attaching a hint for well-known statuses
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        let hint = match status {
            400 => Some("Check the submitted fields"),
            401 => Some("Log in again"),
            403 => Some("Your account may lack the required permissions"),
            404 => Some("The requested resource was not found"),
            409 => Some("An account with this email may already exist"),
            500..=599 => Some("Server error - try again later"),
            _ => None,
        };
        Self::Server {
            message: message.into(),
            status,
            hint,
        }
    }

    /// Create a decode error for the given endpoint path
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config {
            message: message.into(),
            hint,
        }
    }

    /// Error for requests that need a logged-in session when there is none
    pub fn not_logged_in() -> Self {
        Self::InvalidRequest("no active session".to_string())
    }

    /// HTTP status of a server error, if this is one
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the member.
    ///
    /// Server errors prefer the message the backend put in the body.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(_) => text::INVALID_REQUEST.to_string(),
            Self::Network(_) => text::NETWORK_ERROR.to_string(),
            Self::Server { message, status, .. } => {
                if message.is_empty() {
                    format!("{} ({status})", text::SERVER_ERROR)
                } else {
                    message.clone()
                }
            }
            Self::Decode { .. } => text::DECODE_ERROR.to_string(),
            Self::Config { message, .. } => message.clone(),
        }
    }
}
