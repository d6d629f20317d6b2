//! Login and registration flow.
//!
//! Works like a fetcher: each submit spawns one request tagged with an attempt
//! id, and results are applied to the [`SessionStore`] only when the owner calls
//! [`AuthFlow::handle_updates`] or awaits [`AuthFlow::settle`]. Only the newest
//! attempt can change state.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::types::{Credentials, LoginResponse, Registration};
use crate::api::ClubBackend;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::Result;
use crate::session::{Session, SessionStore};

/// Where the auth form is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No session and nothing pending
    #[default]
    Anonymous,
    /// A login or registration request is in flight
    Authenticating,
    /// A session is installed
    Authenticated,
    /// Last attempt failed; holds the message to show
    AuthFailed(String),
}

enum Outcome {
    LoggedIn(LoginResponse),
    Registered(String),
}

struct Completion {
    attempt: u64,
    result: Result<Outcome>,
}

/// Drives login and registration against the backend
pub struct AuthFlow {
    backend: Arc<dyn ClubBackend>,
    state: AuthState,
    notice: Option<String>,
    attempt: u64,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
}

impl AuthFlow {
    /// Idle flow over `backend`
    pub fn new(backend: Arc<dyn ClubBackend>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            backend,
            state: AuthState::Anonymous,
            notice: None,
            attempt: 0,
            tx,
            rx,
        }
    }

    /// Current form state
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    /// Confirmation left by a successful registration
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Message of the last failure
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            AuthState::AuthFailed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Whether an attempt is waiting for the backend
    pub fn is_busy(&self) -> bool {
        self.state == AuthState::Authenticating
    }

    fn begin(&mut self, kind: &'static str) -> u64 {
        self.attempt += 1;
        self.state = AuthState::Authenticating;
        self.notice = None;
        tracing::debug!(attempt = self.attempt, kind, "auth request started");
        self.attempt
    }

    /// Start a login. Input is sent as typed, empty fields included.
    pub fn submit_login(&mut self, email: impl Into<String>, password: impl Into<String>) {
        let credentials = Credentials::new(email, password);
        let attempt = self.begin("login");
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.login(&credentials).await.map(Outcome::LoggedIn);
            let _ = tx.send(Completion { attempt, result }).await;
        });
    }

    /// Start a registration. Success does not log in.
    pub fn submit_register(&mut self, registration: Registration) {
        let attempt = self.begin("register");
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.register(&registration).await.map(Outcome::Registered);
            let _ = tx.send(Completion { attempt, result }).await;
        });
    }

    fn apply(&mut self, completion: Completion, store: &mut SessionStore) -> bool {
        let Completion { attempt, result } = completion;
        if attempt != self.attempt {
            tracing::debug!(attempt, latest = self.attempt, "discarding stale auth response");
            return false;
        }

        match result {
            Ok(Outcome::LoggedIn(response)) => {
                store.complete_login(Session::from_login(response));
                self.state = AuthState::Authenticated;
            }
            Ok(Outcome::Registered(message)) => {
                tracing::info!("registration accepted");
                self.state = if store.is_logged_in() {
                    AuthState::Authenticated
                } else {
                    AuthState::Anonymous
                };
                self.notice = Some(message);
            }
            Err(e) => {
                tracing::warn!(attempt, "auth request failed: {}", e);
                self.state = AuthState::AuthFailed(e.user_message());
            }
        }
        true
    }

    /// Apply finished attempts without waiting. Returns `true` if state changed.
    pub fn handle_updates(&mut self, store: &mut SessionStore) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion, store);
        }
        changed
    }

    /// Wait for the current attempt to finish and apply it
    pub async fn settle(&mut self, store: &mut SessionStore) -> bool {
        let mut changed = false;
        while self.is_busy() {
            match self.rx.recv().await {
                Some(completion) => changed |= self.apply(completion, store),
                None => break,
            }
        }
        changed
    }

    /// Log in and wait for the outcome
    pub async fn login(
        &mut self,
        store: &mut SessionStore,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> &AuthState {
        self.submit_login(email, password);
        self.settle(store).await;
        &self.state
    }

    /// Register and wait for the outcome
    pub async fn register(
        &mut self,
        store: &mut SessionStore,
        registration: Registration,
    ) -> &AuthState {
        self.submit_register(registration);
        self.settle(store).await;
        &self.state
    }

    /// Back to the empty form; any attempt in flight is abandoned.
    pub fn reset(&mut self) {
        self.attempt += 1;
        self.state = AuthState::Anonymous;
        self.notice = None;
    }
}
