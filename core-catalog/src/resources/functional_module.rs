//! Functional modules: the feature areas of the console that other
//! reference data (tiers, templates) points at.

use crate::error::Result;
use crate::resource::{encode_json, EncodedBody, ResourceDescriptor};
use serde::{Deserialize, Serialize};

/// A functional module as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalModule {
    pub id: String,
    pub code: String,
    pub libelle: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
}

/// Create/update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePayload {
    pub code: String,
    pub libelle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Descriptor binding functional modules to the generic synchronizer.
pub struct FunctionalModules;

impl ResourceDescriptor for FunctionalModules {
    type Entity = FunctionalModule;
    type CreatePayload = ModulePayload;
    type UpdatePayload = ModulePayload;

    const NAME: &'static str = "modules";
    const COLLECTION_PATH: &'static str = "modules";

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_omitted_when_absent() {
        let payload = ModulePayload {
            code: "BIL".to_string(),
            libelle: "Billetterie".to_string(),
            description: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_module_wire_shape() {
        let json = r#"{"id":"m-1","code":"BIL","libelle":"Billetterie","status":"ACTIF"}"#;
        let module: FunctionalModule = serde_json::from_str(json).unwrap();
        assert_eq!(module.code, "BIL");
        assert!(module.description.is_none());
    }
}
