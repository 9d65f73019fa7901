//! Suppliers: airlines and service providers referenced by sales.

use crate::error::Result;
use crate::resource::{encode_json, EncodedBody, ResourceDescriptor};
use serde::{Deserialize, Serialize};

/// A supplier as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    /// Short reference code (e.g. `SUP1`)
    pub code: String,
    /// Display label (e.g. `AF`)
    pub libelle: String,
    pub status: String,
}

/// Create/update payload. The server issues the id and owns the status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    pub code: String,
    pub libelle: String,
}

/// Descriptor binding suppliers to the generic synchronizer.
pub struct Suppliers;

impl ResourceDescriptor for Suppliers {
    type Entity = Supplier;
    type CreatePayload = SupplierPayload;
    type UpdatePayload = SupplierPayload;

    const NAME: &'static str = "fournisseurs";
    const COLLECTION_PATH: &'static str = "fournisseurs";

    fn entity_id(entity: &Self::Entity) -> &str {
        &entity.id
    }

    fn encode_create(payload: &Self::CreatePayload) -> Result<EncodedBody> {
        encode_json(payload)
    }

    fn encode_update(payload: &Self::UpdatePayload) -> Result<EncodedBody> {
        encode_json(payload)
    }
}
