//! # Core Catalog
//!
//! Remote-collection synchronization for the back-office reference data.
//!
//! ## Overview
//!
//! Every reference-data family (suppliers, mile tiers, document templates,
//! functional modules, transaction rules) follows one lifecycle: the UI
//! triggers an intent, the module issues exactly one authenticated request,
//! and the cached replica is rewritten at the resolution point. Mutations
//! resynchronize by refetching the collection rather than merging locally;
//! delete alone patches the cache directly.
//!
//! The lifecycle lives once in [`RemoteCollection`]; families differ only in
//! their [`ResourceDescriptor`] (schema, collection path, payload encoding).
//!
//! ## Usage
//!
//! ```ignore
//! let client = ApiClient::new(http, base_url, session);
//! let catalog = CatalogStore::new(client, event_bus);
//!
//! catalog.suppliers.list().await?;
//! let state = catalog.suppliers.snapshot().await;
//! ```

pub mod client;
pub mod collection;
pub mod error;
pub mod resource;
pub mod resources;
pub mod store;
pub mod task;

pub use client::{ApiClient, ApiEnvelope};
pub use collection::{CollectionState, RemoteCollection};
pub use error::{CatalogError, Result, GENERIC_FAILURE_MESSAGE, MISSING_CREDENTIAL_MESSAGE};
pub use resource::{EncodedBody, ResourceDescriptor};
pub use store::CatalogStore;
pub use task::OpHandle;
