//! # Remote Collection Synchronizer
//!
//! One [`RemoteCollection`] manages the cached replica of a single
//! reference-data family. The server owns the data; the cache is read-only
//! from the UI's point of view and is rewritten only at request-resolution
//! points:
//!
//! - `list` replaces the cache wholesale with the server's collection, in
//!   server order.
//! - `create`/`update`/`activate`/`deactivate` re-run `list` after a
//!   successful write instead of merging locally. Consistency is preferred
//!   over latency here.
//! - `delete` is the exception: on confirmed success the item is removed
//!   from the cache directly by id, with no refetch.
//!
//! Every operation checks the ambient credential first and is rejected
//! locally, without any network traffic, when it is absent.
//!
//! Concurrent `list` calls are not suppressed or deduplicated: both run, and
//! the last response to resolve wins. A slow stale response can therefore
//! overwrite a faster fresh one.

use crate::client::ApiClient;
use crate::error::Result;
use crate::resource::ResourceDescriptor;
use bridge_traits::http::HttpMethod;
use core_runtime::events::{CatalogEvent, CoreEvent, EventBus, MutationKind};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Observable state of one cached collection.
///
/// `pending` is true only strictly between request dispatch and resolution.
/// `last_error` is cleared at the start of a list fetch; mutations leave a
/// prior error in place until they resolve.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    /// Cached replica, in server order.
    pub items: Vec<T>,
    /// A request is in flight.
    pub pending: bool,
    /// Human-readable message of the last failed operation.
    pub last_error: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending: false,
            last_error: None,
        }
    }
}

/// Generic synchronizer for one reference-data family.
pub struct RemoteCollection<R: ResourceDescriptor> {
    client: ApiClient,
    event_bus: EventBus,
    state: RwLock<CollectionState<R::Entity>>,
}

impl<R: ResourceDescriptor> RemoteCollection<R> {
    pub fn new(client: ApiClient, event_bus: EventBus) -> Self {
        Self {
            client,
            event_bus,
            state: RwLock::new(CollectionState::default()),
        }
    }

    /// Snapshot of the current state (cloned).
    pub async fn snapshot(&self) -> CollectionState<R::Entity> {
        self.state.read().await.clone()
    }

    /// Cached items, in server order.
    pub async fn items(&self) -> Vec<R::Entity> {
        self.state.read().await.items.clone()
    }

    /// Whether a request is currently in flight.
    pub async fn is_pending(&self) -> bool {
        self.state.read().await.pending
    }

    /// Message of the last failed operation, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Reset the cached state. Called when the session is torn down.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = CollectionState::default();
    }

    /// Record a failure without having dispatched anything.
    async fn reject_locally(&self, err: &crate::error::CatalogError) {
        let message = err.user_message();
        warn!(resource = R::NAME, message = %message, "Operation rejected locally");
        {
            let mut state = self.state.write().await;
            state.last_error = Some(message.clone());
        }
        let _ = self
            .event_bus
            .emit(CoreEvent::Catalog(CatalogEvent::OperationFailed {
                resource: R::NAME,
                message,
            }));
    }

    /// Record a failed request resolution.
    async fn resolve_failure(&self, err: &crate::error::CatalogError) {
        let message = err.user_message();
        warn!(resource = R::NAME, message = %message, "Operation failed");
        {
            let mut state = self.state.write().await;
            state.pending = false;
            state.last_error = Some(message.clone());
        }
        let _ = self
            .event_bus
            .emit(CoreEvent::Catalog(CatalogEvent::OperationFailed {
                resource: R::NAME,
                message,
            }));
    }

    /// Fetch the collection and replace the cache wholesale.
    ///
    /// Clears `last_error` at the start. On failure the cached items are
    /// left untouched. Concurrent calls are allowed; the last resolution
    /// wins.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn list(&self) -> Result<()> {
        if let Err(err) = self.client.ensure_credential().await {
            self.reject_locally(&err).await;
            return Err(err);
        }

        {
            let mut state = self.state.write().await;
            state.last_error = None;
            state.pending = true;
        }

        match self.client.fetch_list::<R::Entity>(R::COLLECTION_PATH).await {
            Ok(items) => {
                let count = items.len();
                {
                    let mut state = self.state.write().await;
                    state.items = items;
                    state.pending = false;
                }
                debug!(resource = R::NAME, count, "Collection replaced");
                let _ = self
                    .event_bus
                    .emit(CoreEvent::Catalog(CatalogEvent::Refreshed {
                        resource: R::NAME,
                        count,
                    }));
                Ok(())
            }
            Err(err) => {
                self.resolve_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Create an entity, then resynchronize by refetch.
    ///
    /// At most one request is issued per call; rapid repeated submissions
    /// are not deduplicated here, that is the UI's responsibility.
    #[instrument(skip(self, payload), fields(resource = R::NAME))]
    pub async fn create(&self, payload: &R::CreatePayload) -> Result<()> {
        let body = match R::encode_create(payload) {
            Ok(body) => body,
            Err(err) => {
                self.reject_locally(&err).await;
                return Err(err);
            }
        };
        self.mutate(
            MutationKind::Create,
            HttpMethod::Post,
            R::COLLECTION_PATH.to_string(),
            Some(body),
            None,
        )
        .await
    }

    /// Update an entity by id, then resynchronize by refetch.
    #[instrument(skip(self, payload), fields(resource = R::NAME, id = %id))]
    pub async fn update(&self, id: &str, payload: &R::UpdatePayload) -> Result<()> {
        let body = match R::encode_update(payload) {
            Ok(body) => body,
            Err(err) => {
                self.reject_locally(&err).await;
                return Err(err);
            }
        };
        self.mutate(
            MutationKind::Update,
            HttpMethod::Put,
            format!("{}/{}", R::COLLECTION_PATH, id),
            Some(body),
            Some(id.to_string()),
        )
        .await
    }

    /// Request the activate transition. The server is the authority on
    /// legal transitions; the current cached status is not checked.
    #[instrument(skip(self), fields(resource = R::NAME, id = %id))]
    pub async fn activate(&self, id: &str) -> Result<()> {
        self.mutate(
            MutationKind::Activate,
            HttpMethod::Patch,
            format!("{}/{}/activate", R::COLLECTION_PATH, id),
            None,
            Some(id.to_string()),
        )
        .await
    }

    /// Request the deactivate transition.
    #[instrument(skip(self), fields(resource = R::NAME, id = %id))]
    pub async fn deactivate(&self, id: &str) -> Result<()> {
        self.mutate(
            MutationKind::Deactivate,
            HttpMethod::Patch,
            format!("{}/{}/deactivate", R::COLLECTION_PATH, id),
            None,
            Some(id.to_string()),
        )
        .await
    }

    /// Delete an entity.
    ///
    /// Unlike the other mutations, a confirmed delete patches the cache
    /// directly: the matching item is removed by id, with no refetch. The
    /// UI is expected to have asked the operator for confirmation before
    /// calling this.
    #[instrument(skip(self), fields(resource = R::NAME, id = %id))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        if let Err(err) = self.client.ensure_credential().await {
            self.reject_locally(&err).await;
            return Err(err);
        }

        {
            let mut state = self.state.write().await;
            state.pending = true;
        }

        let path = format!("{}/{}", R::COLLECTION_PATH, id);
        match self
            .client
            .send_command(HttpMethod::Delete, &path, None)
            .await
        {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.pending = false;
                    state.items.retain(|entity| R::entity_id(entity) != id);
                }
                info!(resource = R::NAME, id = %id, "Entity deleted");
                let _ = self
                    .event_bus
                    .emit(CoreEvent::Catalog(CatalogEvent::Mutated {
                        resource: R::NAME,
                        kind: MutationKind::Delete,
                        entity_id: Some(id.to_string()),
                    }));
                Ok(())
            }
            Err(err) => {
                self.resolve_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Shared tail of the refetch-style mutations: dispatch the write, then
    /// on success re-run `list` to resynchronize. A failed refetch leaves
    /// the write in place server-side and surfaces the refetch error.
    async fn mutate(
        &self,
        kind: MutationKind,
        method: HttpMethod,
        path: String,
        body: Option<crate::resource::EncodedBody>,
        entity_id: Option<String>,
    ) -> Result<()> {
        if let Err(err) = self.client.ensure_credential().await {
            self.reject_locally(&err).await;
            return Err(err);
        }

        {
            let mut state = self.state.write().await;
            state.pending = true;
        }

        match self.client.send_command(method, &path, body).await {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.pending = false;
                }
                info!(resource = R::NAME, kind = ?kind, "Mutation accepted");
                let _ = self
                    .event_bus
                    .emit(CoreEvent::Catalog(CatalogEvent::Mutated {
                        resource: R::NAME,
                        kind,
                        entity_id,
                    }));
                self.list().await
            }
            Err(err) => {
                self.resolve_failure(&err).await;
                Err(err)
            }
        }
    }
}
