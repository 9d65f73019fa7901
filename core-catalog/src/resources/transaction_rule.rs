//! Transaction-type workflow rules: which validation step applies to each
//! type of sale transaction.

use crate::error::Result;
use crate::resource::{encode_json, EncodedBody, ResourceDescriptor};
use serde::{Deserialize, Serialize};

/// A workflow rule as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRule {
    pub id: String,
    #[serde(rename = "typeTransaction")]
    pub transaction_type: String,
    pub libelle: String,
    #[serde(rename = "etapeValidation")]
    pub validation_step: String,
    pub status: String,
}

/// Create/update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRulePayload {
    #[serde(rename = "typeTransaction")]
    pub transaction_type: String,
    pub libelle: String,
    #[serde(rename = "etapeValidation")]
    pub validation_step: String,
}

/// Descriptor binding transaction rules to the generic synchronizer.
pub struct TransactionRules;

impl ResourceDescriptor for TransactionRules {
    type Entity = TransactionRule;
    type CreatePayload = TransactionRulePayload;
    type UpdatePayload = TransactionRulePayload;

    const NAME: &'static str = "regles-transaction";
    const COLLECTION_PATH: &'static str = "regles-transaction";

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
