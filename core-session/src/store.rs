//! Session Persistence
//!
//! Persists session material to durable local storage so a restart restores
//! the operator's session: credential material goes to the platform
//! [`SecureStore`], the identity record to the [`SettingsStore`].
//!
//! Every session mutation is written through immediately; sign-out deletes
//! every persisted session key.

use crate::error::{Result, SessionError};
use crate::types::{Credentials, UserAccount};
use bridge_traits::{SecureStore, SettingsStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Secure-store key holding the serialized credential set.
const CREDENTIALS_KEY: &str = "session:credentials";

/// Settings-store key holding the serialized identity record.
const IDENTITY_KEY: &str = "session:identity";

/// Durable storage for the session.
#[derive(Clone)]
pub struct SessionStore {
    secure_store: Arc<dyn SecureStore>,
    settings_store: Arc<dyn SettingsStore>,
}

impl SessionStore {
    pub fn new(secure_store: Arc<dyn SecureStore>, settings_store: Arc<dyn SettingsStore>) -> Self {
        debug!("Initializing SessionStore");
        Self {
            secure_store,
            settings_store,
        }
    }

    /// Persist the credential set.
    pub async fn save_credentials(&self, credentials: &Credentials) -> Result<()> {
        let json = serde_json::to_vec(credentials)
            .map_err(|e| SessionError::SerializationFailed(e.to_string()))?;

        self.secure_store
            .set_secret(CREDENTIALS_KEY, &json)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to persist credentials");
                SessionError::StorageUnavailable(e.to_string())
            })?;

        info!("Credentials persisted");
        Ok(())
    }

    /// Load the persisted credential set, if any.
    ///
    /// Corrupted data is deleted and treated as absent so a bad write can
    /// never wedge startup.
    pub async fn load_credentials(&self) -> Result<Option<Credentials>> {
        let data = self
            .secure_store
            .get_secret(CREDENTIALS_KEY)
            .await
            .map_err(|e| SessionError::StorageUnavailable(e.to_string()))?;

        let Some(data) = data else {
            debug!("No persisted credentials");
            return Ok(None);
        };

        match serde_json::from_slice::<Credentials>(&data) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                warn!(error = %e, "Persisted credentials corrupted, deleting");
                if let Err(delete_err) = self.secure_store.delete_secret(CREDENTIALS_KEY).await {
                    warn!(error = %delete_err, "Failed to delete corrupted credentials");
                }
                Ok(None)
            }
        }
    }

    /// Persist the identity record.
    pub async fn save_identity(&self, identity: &UserAccount) -> Result<()> {
        let json = serde_json::to_string(identity)
            .map_err(|e| SessionError::SerializationFailed(e.to_string()))?;

        self.settings_store
            .set_string(IDENTITY_KEY, &json)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to persist identity");
                SessionError::StorageUnavailable(e.to_string())
            })?;

        info!(user_id = %identity.id, "Identity persisted");
        Ok(())
    }

    /// Load the persisted identity record, if any.
    pub async fn load_identity(&self) -> Result<Option<UserAccount>> {
        let data = self
            .settings_store
            .get_string(IDENTITY_KEY)
            .await
            .map_err(|e| SessionError::StorageUnavailable(e.to_string()))?;

        let Some(data) = data else {
            debug!("No persisted identity");
            return Ok(None);
        };

        match serde_json::from_str::<UserAccount>(&data) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!(error = %e, "Persisted identity corrupted, deleting");
                if let Err(delete_err) = self.settings_store.delete(IDENTITY_KEY).await {
                    warn!(error = %delete_err, "Failed to delete corrupted identity");
                }
                Ok(None)
            }
        }
    }

    /// Delete every persisted session key. Idempotent.
    pub async fn clear(&self) -> Result<()> {
        self.secure_store
            .delete_secret(CREDENTIALS_KEY)
            .await
            .map_err(|e| SessionError::StorageUnavailable(e.to_string()))?;

        self.settings_store
            .delete(IDENTITY_KEY)
            .await
            .map_err(|e| SessionError::StorageUnavailable(e.to_string()))?;

        info!("Persisted session cleared");
        Ok(())
    }
}
