//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP, secure
//! storage, settings storage) into the back-office core: one event bus, one
//! session manager, one catalog store, constructed once at process start
//! from a validated [`CoreConfig`] and handed to the hosting UI.

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use core_catalog::{ApiClient, CatalogStore};
use core_runtime::events::{CoreEvent, EventBus};
use core_runtime::CoreConfig;
use core_session::gate::{decide, GateDecision, RouteClass};
use core_session::{SessionError, SessionManager, SessionState, SessionStore, UserAccount};
use tracing::info;

/// Primary façade exposed to host applications.
pub struct BackOfficeCore {
    config: CoreConfig,
    event_bus: EventBus,
    session: Arc<SessionManager>,
    catalog: Arc<CatalogStore>,
}

impl BackOfficeCore {
    /// Wire the core from a validated configuration.
    pub fn new(config: CoreConfig) -> Self {
        let event_bus = EventBus::new(config.event_capacity);

        let session_store =
            SessionStore::new(config.secure_store.clone(), config.settings_store.clone());
        let session = Arc::new(SessionManager::new(
            config.http_client.clone(),
            config.api_base_url.clone(),
            session_store,
            event_bus.clone(),
        ));

        let client = ApiClient::new(
            config.http_client.clone(),
            config.api_base_url.clone(),
            session.clone(),
        );
        let catalog = Arc::new(CatalogStore::new(client, event_bus.clone()));

        info!("Back-office core initialized");
        Self {
            config,
            event_bus,
            session,
            catalog,
        }
    }

    /// Restore a persisted session and, when only a credential was
    /// restored, confirm the identity record.
    ///
    /// Identity rejection resolves to `Anonymous` (the session was already
    /// cleared); a transport failure leaves the `Authenticating` window open
    /// so an offline start does not bounce the operator to sign-in.
    pub async fn start(&self) -> Result<SessionState> {
        let state = self.session.restore().await?;
        if state != SessionState::Authenticating {
            return Ok(state);
        }

        match self.session.confirm_identity().await {
            Ok(confirmed) => Ok(confirmed),
            Err(SessionError::IdentityRejected(_)) => Ok(SessionState::Anonymous),
            Err(SessionError::Transport(_)) => Ok(SessionState::Authenticating),
            Err(e) => Err(e.into()),
        }
    }

    /// Sign the operator in.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserAccount> {
        Ok(self.session.sign_in(username, password).await?)
    }

    /// Sign out and tear the reference-data caches down with the session.
    pub async fn sign_out(&self) -> Result<()> {
        self.session.sign_out().await?;
        self.catalog.clear().await;
        Ok(())
    }

    /// Gate check for a navigation target against the current session.
    pub async fn check_route(&self, target: &RouteClass) -> GateDecision {
        decide(&self.session.snapshot().await, target)
    }

    /// The route class of the administrative area, per the configured role.
    pub fn admin_route(&self) -> RouteClass {
        RouteClass::restricted(self.config.admin_role.clone())
    }

    /// Open the external audit/history screen for an entity, when the host
    /// provided one.
    pub fn open_history(&self, resource: &str, entity_id: &str) {
        if let Some(viewer) = &self.config.audit_viewer {
            viewer.open_history(resource, entity_id);
        }
    }

    /// Open the external module-privilege screen, when the host provided
    /// one.
    pub fn open_module_privileges(&self, module_name: &str) {
        if let Some(viewer) = &self.config.authorization_viewer {
            viewer.open_module_privileges(module_name);
        }
    }

    /// The session manager.
    pub fn session(&self) -> Arc<SessionManager> {
        self.session.clone()
    }

    /// The reference-data collections.
    pub fn catalog(&self) -> Arc<CatalogStore> {
        self.catalog.clone()
    }

    /// Subscribe to core events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CoreEvent> {
        self.event_bus.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
    use bridge_traits::{AuditTrailViewer, BridgeError, SecureStore, SettingsStore};
    use bytes::Bytes;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;

    struct MemorySecureStore {
        storage: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemorySecureStore {
        fn new() -> Self {
            Self {
                storage: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SecureStore for MemorySecureStore {
        async fn set_secret(&self, key: &str, value: &[u8]) -> BridgeResult<()> {
            self.storage
                .lock()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn get_secret(&self, key: &str) -> BridgeResult<Option<Vec<u8>>> {
            Ok(self.storage.lock().await.get(key).cloned())
        }

        async fn delete_secret(&self, key: &str) -> BridgeResult<()> {
            self.storage.lock().await.remove(key);
            Ok(())
        }

        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            Ok(self.storage.lock().await.keys().cloned().collect())
        }

        async fn clear_all(&self) -> BridgeResult<()> {
            self.storage.lock().await.clear();
            Ok(())
        }
    }

    struct MemorySettingsStore {
        storage: Mutex<HashMap<String, String>>,
    }

    impl MemorySettingsStore {
        fn new() -> Self {
            Self {
                storage: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SettingsStore for MemorySettingsStore {
        async fn set_string(&self, key: &str, value: &str) -> BridgeResult<()> {
            self.storage
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get_string(&self, key: &str) -> BridgeResult<Option<String>> {
            Ok(self.storage.lock().await.get(key).cloned())
        }

        async fn delete(&self, key: &str) -> BridgeResult<()> {
            self.storage.lock().await.remove(key);
            Ok(())
        }

        async fn has_key(&self, key: &str) -> BridgeResult<bool> {
            Ok(self.storage.lock().await.contains_key(key))
        }

        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            Ok(self.storage.lock().await.keys().cloned().collect())
        }

        async fn clear_all(&self) -> BridgeResult<()> {
            self.storage.lock().await.clear();
            Ok(())
        }
    }

    struct ScriptedHttpClient {
        responses: Mutex<VecDeque<HttpResponse>>,
    }

    impl ScriptedHttpClient {
        fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
            }
        }

        async fn push_json(&self, status: u16, body: serde_json::Value) {
            self.responses.lock().await.push_back(HttpResponse {
                status,
                headers: HashMap::new(),
                body: Bytes::from(body.to_string()),
            });
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            self.responses.lock().await.pop_front().ok_or_else(|| {
                BridgeError::OperationFailed("no scripted response".to_string())
            })
        }
    }

    struct RecordingAuditViewer {
        opened: StdMutex<Vec<(String, String)>>,
    }

    impl RecordingAuditViewer {
        fn new() -> Self {
            Self {
                opened: StdMutex::new(Vec::new()),
            }
        }
    }

    impl AuditTrailViewer for RecordingAuditViewer {
        fn open_history(&self, resource: &str, entity_id: &str) {
            self.opened
                .lock()
                .expect("audit log poisoned")
                .push((resource.to_string(), entity_id.to_string()));
        }
    }

    fn core_with(http: Arc<ScriptedHttpClient>, audit: Arc<RecordingAuditViewer>) -> BackOfficeCore {
        let config = CoreConfig::builder()
            .api_base_url("https://api.agence.example/v1/")
            .http_client(http)
            .secure_store(Arc::new(MemorySecureStore::new()))
            .settings_store(Arc::new(MemorySettingsStore::new()))
            .audit_viewer(audit)
            .build()
            .unwrap();
        BackOfficeCore::new(config)
    }

    fn sign_in_body() -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "data": {
                "accessToken": "tok-1",
                "refreshToken": "ref-1",
                "expiresIn": 3600,
                "user": {
                    "id": "u-1",
                    "username": "c.dupont",
                    "profileAssignments": [{
                        "status": "ACTIF",
                        "profile": {"name": "ADMINISTRATEUR"}
                    }]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_start_with_empty_storage_is_anonymous() {
        let core = core_with(
            Arc::new(ScriptedHttpClient::new()),
            Arc::new(RecordingAuditViewer::new()),
        );
        assert_eq!(core.start().await.unwrap(), SessionState::Anonymous);
        assert_eq!(
            core.check_route(&core.admin_route()).await,
            GateDecision::RedirectToSignIn
        );
    }

    #[tokio::test]
    async fn test_sign_in_list_sign_out_cycle() {
        let http = Arc::new(ScriptedHttpClient::new());
        let core = core_with(http.clone(), Arc::new(RecordingAuditViewer::new()));

        http.push_json(200, sign_in_body()).await;
        core.sign_in("c.dupont", "secret").await.unwrap();
        assert_eq!(
            core.check_route(&core.admin_route()).await,
            GateDecision::Allow
        );

        http.push_json(
            200,
            serde_json::json!({
                "success": true,
                "data": [{"id": "1", "code": "SUP1", "libelle": "AF", "status": "ACTIF"}]
            }),
        )
        .await;
        core.catalog().suppliers.list().await.unwrap();
        assert_eq!(core.catalog().suppliers.items().await.len(), 1);

        core.sign_out().await.unwrap();
        // Caches torn down with the session
        assert!(core.catalog().suppliers.items().await.is_empty());
        assert_eq!(
            core.check_route(&core.admin_route()).await,
            GateDecision::RedirectToSignIn
        );
    }

    #[tokio::test]
    async fn test_sign_in_screen_redirects_once_authenticated() {
        let http = Arc::new(ScriptedHttpClient::new());
        let core = core_with(http.clone(), Arc::new(RecordingAuditViewer::new()));

        assert_eq!(
            core.check_route(&RouteClass::Public).await,
            GateDecision::Allow
        );

        http.push_json(200, sign_in_body()).await;
        core.sign_in("c.dupont", "secret").await.unwrap();

        assert_eq!(
            core.check_route(&RouteClass::Public).await,
            GateDecision::RedirectToLanding
        );
    }

    #[tokio::test]
    async fn test_audit_viewer_invoked_by_reference() {
        let audit = Arc::new(RecordingAuditViewer::new());
        let core = core_with(Arc::new(ScriptedHttpClient::new()), audit.clone());

        core.open_history("fournisseurs", "42");

        let opened = audit.opened.lock().unwrap();
        assert_eq!(
            opened.as_slice(),
            &[("fournisseurs".to_string(), "42".to_string())]
        );
    }
}
