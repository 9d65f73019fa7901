//! # Resource Descriptors
//!
//! The per-family configuration surface of the generic synchronizer. One
//! descriptor per reference-data family fixes the entity schema, the
//! collection path, and how create/update payloads are encoded; the
//! request/response lifecycle itself is shared in
//! [`RemoteCollection`](crate::collection::RemoteCollection).

use crate::error::{CatalogError, Result};
use bridge_traits::http::MultipartForm;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encoded request body for a create/update operation.
///
/// JSON for plain families; multipart for the file-bearing ones.
#[derive(Debug, Clone)]
pub enum EncodedBody {
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// Encode a payload as a JSON body.
pub fn encode_json<T: Serialize>(payload: &T) -> Result<EncodedBody> {
    serde_json::to_value(payload)
        .map(EncodedBody::Json)
        .map_err(|e| CatalogError::Encoding(e.to_string()))
}

/// Static description of one reference-data family.
///
/// The uniform endpoint set is derived from `COLLECTION_PATH`:
///
/// | Operation  | Request                                   |
/// |------------|-------------------------------------------|
/// | list       | `GET    {path}`                           |
/// | create     | `POST   {path}`                           |
/// | update     | `PUT    {path}/{id}`                      |
/// | activate   | `PATCH  {path}/{id}/activate`             |
/// | deactivate | `PATCH  {path}/{id}/deactivate`           |
/// | delete     | `DELETE {path}/{id}`                      |
pub trait ResourceDescriptor: Send + Sync + 'static {
    /// The cached entity type, exactly as the server returns it.
    type Entity: Clone + DeserializeOwned + Send + Sync + 'static;
    /// Payload accepted by the create endpoint.
    type CreatePayload: Send + Sync;
    /// Payload accepted by the update endpoint.
    type UpdatePayload: Send + Sync;

    /// Resource family name, used in logs and events.
    const NAME: &'static str;

    /// Collection path under the API base URL.
    const COLLECTION_PATH: &'static str;

    /// The server-issued id of an entity.
    fn entity_id(entity: &Self::Entity) -> &str;

    /// Encode a create payload.
    fn encode_create(payload: &Self::CreatePayload) -> Result<EncodedBody>;

    /// Encode an update payload.
    fn encode_update(payload: &Self::UpdatePayload) -> Result<EncodedBody>;
}
