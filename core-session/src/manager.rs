//! # Session Manager
//!
//! Orchestrates sign-in, sign-out and restore-on-start against the REST API,
//! persisting every session mutation to durable local storage and emitting
//! session events on the bus.
//!
//! ## Overview
//!
//! The manager owns the current [`SessionSnapshot`] behind an async lock and
//! mutates it exclusively through the pure transition functions on the
//! snapshot, at request-resolution points. The snapshot's credential is the
//! ambient bearer token the catalog layer reads.
//!
//! ## Restore flow
//!
//! ```text
//! restore()            persisted credential + identity -> Authenticated
//!                      persisted credential only       -> Authenticating
//! confirm_identity()   server confirms                 -> Authenticated
//!                      server rejects                  -> Anonymous (cleared)
//! ```

use crate::error::{Result, SessionError};
use crate::store::SessionStore;
use crate::types::{Credentials, SessionSnapshot, SessionState, UserAccount};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use url::Url;

const SIGN_IN_PATH: &str = "auth/login";
const IDENTITY_PATH: &str = "auth/me";

/// Fallback message when the server supplies none.
const GENERIC_FAILURE: &str = "Erreur de communication avec le serveur";

/// Wire shape of the sign-in response payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInData {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserAccount,
}

/// Standard response envelope of the consumed API.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Session orchestrator: sign-in/sign-out, restore, credential access.
pub struct SessionManager {
    http: Arc<dyn HttpClient>,
    base_url: Url,
    store: SessionStore,
    event_bus: EventBus,
    current: RwLock<SessionSnapshot>,
}

impl SessionManager {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: Url,
        store: SessionStore,
        event_bus: EventBus,
    ) -> Self {
        Self {
            http,
            base_url,
            store,
            event_bus,
            current: RwLock::new(SessionSnapshot::anonymous()),
        }
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        self.base_url
            .join(path)
            .map(|u| u.to_string())
            .map_err(|e| SessionError::Transport(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Extract a user-readable failure message from a non-2xx response body,
    /// falling back to the generic message.
    fn failure_message(response: &HttpResponse) -> String {
        response
            .json::<Envelope<serde_json::Value>>()
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }

    /// Restore a persisted session at process start.
    ///
    /// Returns the resulting state. `Authenticating` means a credential was
    /// restored without a confirmed identity; the caller should follow up
    /// with [`SessionManager::confirm_identity`]. Navigation must not
    /// redirect to sign-in while in that window.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<SessionState> {
        let Some(credentials) = self.store.load_credentials().await? else {
            info!("No persisted session");
            let _ = self.event_bus.emit(CoreEvent::Session(SessionEvent::Restored {
                authenticated: false,
            }));
            return Ok(SessionState::Anonymous);
        };

        let identity = self.store.load_identity().await?;
        let snapshot = SessionSnapshot::apply_restore(credentials, identity);
        let state = snapshot.state;

        {
            let mut current = self.current.write().await;
            *current = snapshot;
        }

        info!(state = %state, "Persisted session restored");
        let _ = self.event_bus.emit(CoreEvent::Session(SessionEvent::Restored {
            authenticated: true,
        }));
        Ok(state)
    }

    /// Confirm the identity record for a restored credential.
    ///
    /// On server rejection the credential is invalid: the session is cleared
    /// back to `Anonymous`. On transport failure the session stays in
    /// `Authenticating` so navigation does not bounce the operator to
    /// sign-in over a flaky network.
    #[instrument(skip(self))]
    pub async fn confirm_identity(&self) -> Result<SessionState> {
        let token = self
            .access_token()
            .await
            .ok_or(SessionError::NotAuthenticated)?;

        let url = self.endpoint(IDENTITY_PATH)?;
        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(token);

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Identity confirmation unreachable");
                return Err(SessionError::Transport(GENERIC_FAILURE.to_string()));
            }
        };

        if !response.is_success() {
            let message = Self::failure_message(&response);
            warn!(status = response.status, message = %message, "Restored credential rejected");
            self.sign_out().await?;
            return Err(SessionError::IdentityRejected(message));
        }

        let envelope: Envelope<UserAccount> = response
            .json()
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        if !envelope.success {
            let message = envelope.message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
            self.sign_out().await?;
            return Err(SessionError::IdentityRejected(message));
        }

        let identity = envelope
            .data
            .ok_or_else(|| SessionError::Transport("Empty identity payload".to_string()))?;

        self.store.save_identity(&identity).await?;

        {
            let mut current = self.current.write().await;
            *current = std::mem::take(&mut *current).apply_identity_confirmed(identity);
        }

        info!("Identity confirmed");
        Ok(SessionState::Authenticated)
    }

    /// Sign in with operator credentials.
    ///
    /// On success the session becomes `Authenticated`, all session material
    /// is persisted, and a `SignedIn` event is emitted.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserAccount> {
        let url = self.endpoint(SIGN_IN_PATH)?;
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });
        let request = HttpRequest::new(HttpMethod::Post, url)
            .json(&body)
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        info!("Submitting sign-in");
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Sign-in request failed");
                let _ = self
                    .event_bus
                    .emit(CoreEvent::Session(SessionEvent::SessionError {
                        message: GENERIC_FAILURE.to_string(),
                    }));
                return Err(SessionError::Transport(GENERIC_FAILURE.to_string()));
            }
        };

        if !response.is_success() {
            let message = Self::failure_message(&response);
            warn!(status = response.status, message = %message, "Sign-in rejected");
            let _ = self
                .event_bus
                .emit(CoreEvent::Session(SessionEvent::SessionError {
                    message: message.clone(),
                }));
            return Err(SessionError::SignInFailed { message });
        }

        let envelope: Envelope<SignInData> = response
            .json()
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        if !envelope.success {
            let message = envelope.message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(message = %message, "Sign-in rejected by application");
            let _ = self
                .event_bus
                .emit(CoreEvent::Session(SessionEvent::SessionError {
                    message: message.clone(),
                }));
            return Err(SessionError::SignInFailed { message });
        }

        let data = envelope
            .data
            .ok_or_else(|| SessionError::Transport("Empty sign-in payload".to_string()))?;

        let credentials = Credentials::new(data.access_token, data.refresh_token, data.expires_in);
        let identity = data.user;

        // Persist before exposing the new state; a crash between the two
        // writes restores as Authenticating and re-confirms.
        self.store.save_credentials(&credentials).await?;
        self.store.save_identity(&identity).await?;

        {
            let mut current = self.current.write().await;
            *current =
                std::mem::take(&mut *current).apply_sign_in(credentials, identity.clone());
        }

        info!(user_id = %identity.id, "Sign-in completed");
        let _ = self.event_bus.emit(CoreEvent::Session(SessionEvent::SignedIn {
            user_id: identity.id.clone(),
        }));
        Ok(identity)
    }

    /// Sign out: clear the in-memory session and every persisted session key.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        self.store.clear().await?;

        {
            let mut current = self.current.write().await;
            *current = std::mem::take(&mut *current).apply_sign_out();
        }

        info!("Signed out");
        let _ = self
            .event_bus
            .emit(CoreEvent::Session(SessionEvent::SignedOut));
        Ok(())
    }

    /// Current session snapshot (cloned).
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.current.read().await.clone()
    }

    /// Current gate state.
    pub async fn state(&self) -> SessionState {
        self.current.read().await.state
    }

    /// The ambient bearer credential, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .access_token()
            .map(|t| t.to_string())
    }
}
