//! Explicit session state with an event channel.
//!
//! Holders of a [`Session`] mutate it through its methods; every change is
//! broadcast as a [`SessionEvent`] so views can react without sharing state.

use secrecy::SecretString;
use tokio::sync::broadcast;

use crate::api_error::{ApiError, ErrorDisposition};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Loaded { username: String },
    Disconnected,
    /// A message to show to the user.
    Notice(String),
}

#[derive(Debug)]
pub struct Session {
    username: Option<String>,
    token: Option<SecretString>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            username: None,
            token: None,
            events,
        }
    }

    /// Session restored from previously persisted credentials.
    pub fn restore(username: Option<String>, token: Option<SecretString>) -> Self {
        Self {
            username,
            token,
            ..Self::new()
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Token to send as the `Authorization` header.
    pub fn authorization(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn load(&mut self, username: String, token: SecretString) {
        #[cfg(feature = "tracing")]
        tracing::info!(%username, "session loaded");
        self.username = Some(username.clone());
        self.token = Some(token);
        self.emit(SessionEvent::Loaded { username });
    }

    /// Drops the token. The username is kept to prefill the login form.
    pub fn disconnect(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::info!("session disconnected");
        self.token = None;
        self.emit(SessionEvent::Disconnected);
    }

    /// Applies the reaction an unexpected API error calls for.
    pub fn report(&mut self, error: &ApiError) {
        #[cfg(feature = "tracing")]
        tracing::warn!("API error: {}", error);
        match error.disposition() {
            ErrorDisposition::SessionExpired => self.disconnect(),
            ErrorDisposition::Notice(message) => self.emit(SessionEvent::Notice(message)),
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}
