//! # Catalog Store
//!
//! The explicit application-state container for the reference data: one
//! [`RemoteCollection`] per family, constructed once at process start and
//! injected into whichever screen needs it. There are no ambient singletons;
//! tearing the session down clears every collection.

use crate::client::ApiClient;
use crate::collection::RemoteCollection;
use crate::resources::{
    DocumentTemplates, FunctionalModules, MileTiers, Suppliers, TransactionRules,
};
use core_runtime::events::EventBus;

/// All cached reference-data collections.
pub struct CatalogStore {
    pub suppliers: RemoteCollection<Suppliers>,
    pub mile_tiers: RemoteCollection<MileTiers>,
    pub templates: RemoteCollection<DocumentTemplates>,
    pub modules: RemoteCollection<FunctionalModules>,
    pub transaction_rules: RemoteCollection<TransactionRules>,
}

impl CatalogStore {
    pub fn new(client: ApiClient, event_bus: EventBus) -> Self {
        Self {
            suppliers: RemoteCollection::new(client.clone(), event_bus.clone()),
            mile_tiers: RemoteCollection::new(client.clone(), event_bus.clone()),
            templates: RemoteCollection::new(client.clone(), event_bus.clone()),
            modules: RemoteCollection::new(client.clone(), event_bus.clone()),
            transaction_rules: RemoteCollection::new(client, event_bus),
        }
    }

    /// Reset every cached collection. Called on sign-out.
    pub async fn clear(&self) {
        self.suppliers.clear().await;
        self.mile_tiers.clear().await;
        self.templates.clear().await;
        self.modules.clear().await;
        self.transaction_rules.clear().await;
    }
}
