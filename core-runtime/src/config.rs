//! # Core Configuration Module
//!
//! Configuration for the back-office core, built with a fail-fast builder:
//! every required bridge must be provided before initialization succeeds.
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - all server communication
//! - `SecureStore` - credential persistence
//! - `SettingsStore` - durable local storage for the identity record
//!
//! ## Optional Dependencies
//!
//! - `AuditTrailViewer` / `AuthorizationViewer` - external host screens
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .api_base_url("https://api.agence.example/v1/")
//!     .http_client(Arc::new(ReqwestHttpClient::new()))
//!     .secure_store(Arc::new(KeyringSecureStore::new()))
//!     .settings_store(Arc::new(settings))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{AuditTrailViewer, AuthorizationViewer, HttpClient, SecureStore, SettingsStore};
use std::sync::Arc;
use url::Url;

/// Default buffer capacity of the event bus.
const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Profile name required to enter administrative areas.
const DEFAULT_ADMIN_ROLE: &str = "ADMINISTRATEUR";

/// Core configuration for the back-office client.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Base URL of the REST API, with a trailing slash.
    pub api_base_url: Url,

    /// HTTP client for all server communication (required)
    pub http_client: Arc<dyn HttpClient>,

    /// Secure credential storage (required)
    pub secure_store: Arc<dyn SecureStore>,

    /// Durable key-value storage for non-secret session material (required)
    pub settings_store: Arc<dyn SettingsStore>,

    /// Profile name granting access to administrative areas
    pub admin_role: String,

    /// Event bus buffer capacity
    pub event_capacity: usize,

    /// External audit/history screen (optional)
    pub audit_viewer: Option<Arc<dyn AuditTrailViewer>>,

    /// External module-privilege screen (optional)
    pub authorization_viewer: Option<Arc<dyn AuthorizationViewer>>,
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Builder for [`CoreConfig`] with fail-fast validation.
#[derive(Default)]
pub struct CoreConfigBuilder {
    api_base_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
    settings_store: Option<Arc<dyn SettingsStore>>,
    admin_role: Option<String>,
    event_capacity: Option<usize>,
    audit_viewer: Option<Arc<dyn AuditTrailViewer>>,
    authorization_viewer: Option<Arc<dyn AuthorizationViewer>>,
}

impl CoreConfigBuilder {
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    pub fn admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = Some(role.into());
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    pub fn audit_viewer(mut self, viewer: Arc<dyn AuditTrailViewer>) -> Self {
        self.audit_viewer = Some(viewer);
        self
    }

    pub fn authorization_viewer(mut self, viewer: Arc<dyn AuthorizationViewer>) -> Self {
        self.authorization_viewer = Some(viewer);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// - `Error::Config` when the base URL is missing or unparseable
    /// - `Error::CapabilityMissing` when a required bridge was not provided
    pub fn build(self) -> Result<CoreConfig> {
        let raw_url = self
            .api_base_url
            .ok_or_else(|| Error::Config("api_base_url is required".to_string()))?;

        // A trailing slash keeps Url::join from swallowing the last path
        // segment of the base.
        let normalized = if raw_url.ends_with('/') {
            raw_url
        } else {
            format!("{}/", raw_url)
        };
        let api_base_url = Url::parse(&normalized)
            .map_err(|e| Error::Config(format!("Invalid api_base_url: {}", e)))?;

        let http_client = self.http_client.ok_or_else(|| Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "No HTTP client implementation provided. \
                      Desktop: use bridge_desktop::ReqwestHttpClient. \
                      Tests: inject a scripted double."
                .to_string(),
        })?;

        let secure_store = self.secure_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "SecureStore".to_string(),
            message: "No secure store implementation provided. \
                      Desktop: use bridge_desktop::KeyringSecureStore."
                .to_string(),
        })?;

        let settings_store = self.settings_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "SettingsStore".to_string(),
            message: "No settings store implementation provided. \
                      Desktop: use bridge_desktop::SqliteSettingsStore."
                .to_string(),
        })?;

        Ok(CoreConfig {
            api_base_url,
            http_client,
            secure_store,
            settings_store,
            admin_role: self
                .admin_role
                .unwrap_or_else(|| DEFAULT_ADMIN_ROLE.to_string()),
            event_capacity: self.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY),
            audit_viewer: self.audit_viewer,
            authorization_viewer: self.authorization_viewer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bridge_traits::BridgeError;

    struct NullHttpClient;

    #[async_trait]
    impl HttpClient for NullHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Err(BridgeError::NotAvailable("null client".to_string()))
        }
    }

    struct NullSecureStore;

    #[async_trait]
    impl SecureStore for NullSecureStore {
        async fn set_secret(&self, _key: &str, _value: &[u8]) -> BridgeResult<()> {
            Ok(())
        }
        async fn get_secret(&self, _key: &str) -> BridgeResult<Option<Vec<u8>>> {
            Ok(None)
        }
        async fn delete_secret(&self, _key: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            Ok(vec![])
        }
        async fn clear_all(&self) -> BridgeResult<()> {
            Ok(())
        }
    }

    struct NullSettingsStore;

    #[async_trait]
    impl SettingsStore for NullSettingsStore {
        async fn set_string(&self, _key: &str, _value: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn get_string(&self, _key: &str) -> BridgeResult<Option<String>> {
            Ok(None)
        }
        async fn delete(&self, _key: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn has_key(&self, _key: &str) -> BridgeResult<bool> {
            Ok(false)
        }
        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            Ok(vec![])
        }
        async fn clear_all(&self) -> BridgeResult<()> {
            Ok(())
        }
    }

    fn full_builder() -> CoreConfigBuilder {
        CoreConfig::builder()
            .api_base_url("https://api.agence.example/v1")
            .http_client(Arc::new(NullHttpClient))
            .secure_store(Arc::new(NullSecureStore))
            .settings_store(Arc::new(NullSettingsStore))
    }

    #[test]
    fn test_build_complete_config() {
        let config = full_builder().build().unwrap();
        assert_eq!(config.admin_role, "ADMINISTRATEUR");
        assert_eq!(config.event_capacity, 100);
        // Trailing slash is normalized in
        assert!(config.api_base_url.as_str().ends_with('/'));
    }

    #[test]
    fn test_missing_http_client() {
        let result = CoreConfig::builder()
            .api_base_url("https://api.agence.example")
            .secure_store(Arc::new(NullSecureStore))
            .settings_store(Arc::new(NullSettingsStore))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "HttpClient");
            }
            other => panic!("Expected CapabilityMissing, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_missing_base_url() {
        let result = CoreConfigBuilder::default()
            .http_client(Arc::new(NullHttpClient))
            .secure_store(Arc::new(NullSecureStore))
            .settings_store(Arc::new(NullSettingsStore))
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = full_builder().api_base_url("not a url").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_custom_role_and_capacity() {
        let config = full_builder()
            .admin_role("SUPERVISEUR")
            .event_capacity(8)
            .build()
            .unwrap();

        assert_eq!(config.admin_role, "SUPERVISEUR");
        assert_eq!(config.event_capacity, 8);
    }
}
