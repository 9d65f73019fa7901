//! # API Client
//!
//! Thin authenticated wrapper over the bridge [`HttpClient`] shared by every
//! remote collection: joins endpoint paths onto the base URL, injects the
//! ambient bearer credential from the session, decodes the standard
//! `{ success, data, message }` envelope, and normalizes failures into the
//! [`CatalogError`] taxonomy.

use crate::error::{CatalogError, Result, GENERIC_FAILURE_MESSAGE};
use crate::resource::EncodedBody;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use core_session::SessionManager;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Standard response envelope of the consumed API.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error bodies on non-2xx responses carry at most a message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated API access shared by the remote collections.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    base_url: Url,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: Url, session: Arc<SessionManager>) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    /// The credential precondition: every operation checks this before any
    /// state change or network traffic.
    pub(crate) async fn ensure_credential(&self) -> Result<String> {
        self.session
            .access_token()
            .await
            .ok_or(CatalogError::MissingCredential)
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        self.base_url
            .join(path)
            .map(|u| u.to_string())
            .map_err(|e| CatalogError::Encoding(format!("invalid path {}: {}", path, e)))
    }

    /// Execute a request, mapping transport failures and non-2xx statuses
    /// into the failure taxonomy. An HTTP failure whose body carries a
    /// `message` surfaces that message; anything else falls back to the
    /// generic message.
    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        let response = self.http.execute(request).await.map_err(|e| {
            warn!(url = %url, error = %e, "Transport failure");
            CatalogError::Transport
        })?;

        if !response.is_success() {
            let message = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.message);
            debug!(url = %url, status = response.status, "Request failed");
            return Err(match message {
                Some(message) => CatalogError::Api { message },
                None => CatalogError::Transport,
            });
        }

        Ok(response)
    }

    /// GET a collection endpoint and decode its data payload.
    pub(crate) async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let token = self.ensure_credential().await?;
        let request = HttpRequest::new(HttpMethod::Get, self.endpoint(path)?).bearer_token(token);

        let response = self.dispatch(request).await?;
        let envelope: ApiEnvelope<Vec<T>> =
            response.json().map_err(|e| {
                warn!(path = path, error = %e, "Undecodable list response");
                CatalogError::Transport
            })?;

        if !envelope.success {
            return Err(CatalogError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            });
        }

        Ok(envelope.data.unwrap_or_default())
    }

    /// Send a mutating request. The mutation's data payload, if any, is
    /// discarded: collections resynchronize by refetch, not by merging the
    /// response.
    pub(crate) async fn send_command(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<EncodedBody>,
    ) -> Result<()> {
        let token = self.ensure_credential().await?;
        let mut request = HttpRequest::new(method, self.endpoint(path)?).bearer_token(token);

        request = match body {
            Some(EncodedBody::Json(value)) => request
                .json(&value)
                .map_err(|e| CatalogError::Encoding(e.to_string()))?,
            Some(EncodedBody::Multipart(form)) => request.multipart(form),
            None => request,
        };

        let response = self.dispatch(request).await?;
        let envelope: ApiEnvelope<serde_json::Value> =
            response.json().map_err(|e| {
                warn!(path = path, error = %e, "Undecodable command response");
                CatalogError::Transport
            })?;

        if !envelope.success {
            return Err(CatalogError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            });
        }

        Ok(())
    }
}
