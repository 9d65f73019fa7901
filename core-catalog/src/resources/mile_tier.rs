//! Loyalty-mile tiers: miles awarded per revenue range, scoped to a module.

use crate::error::Result;
use crate::resource::{encode_json, EncodedBody, ResourceDescriptor};
use serde::{Deserialize, Serialize};

/// A mile tier as returned by the server.
///
/// The revenue range is half-open: a revenue qualifies when
/// `floor <= revenue < ceiling`, so adjacent tiers sharing a bound never
/// overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileTier {
    pub id: String,
    pub module_id: String,
    #[serde(rename = "plancherRevenu")]
    pub revenue_floor: f64,
    #[serde(rename = "plafondRevenu")]
    pub revenue_ceiling: f64,
    #[serde(rename = "quantiteMiles")]
    pub miles_reward: i64,
    pub status: String,
}

impl MileTier {
    /// Whether `revenue` falls inside the tier's half-open range.
    pub fn contains(&self, revenue: f64) -> bool {
        revenue >= self.revenue_floor && revenue < self.revenue_ceiling
    }
}

/// Create/update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MileTierPayload {
    pub module_id: String,
    #[serde(rename = "plancherRevenu")]
    pub revenue_floor: f64,
    #[serde(rename = "plafondRevenu")]
    pub revenue_ceiling: f64,
    #[serde(rename = "quantiteMiles")]
    pub miles_reward: i64,
}

/// Descriptor binding mile tiers to the generic synchronizer.
pub struct MileTiers;

impl ResourceDescriptor for MileTiers {
    type Entity = MileTier;
    type CreatePayload = MileTierPayload;
    type UpdatePayload = MileTierPayload;

    const NAME: &'static str = "paliers-miles";
    const COLLECTION_PATH: &'static str = "paliers-miles";

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

    fn tier(floor: f64, ceiling: f64) -> MileTier {
        MileTier {
            id: "t-1".to_string(),
            module_id: "m-1".to_string(),
            revenue_floor: floor,
            revenue_ceiling: ceiling,
            miles_reward: 100,
            status: "ACTIF".to_string(),
        }
    }

    #[test]
    fn test_half_open_range() {
        let t = tier(0.0, 1000.0);
        assert!(t.contains(0.0));
        assert!(t.contains(999.99));
        assert!(!t.contains(1000.0));
        assert!(!t.contains(-0.01));
    }

    #[test]
    fn test_adjacent_tiers_do_not_overlap() {
        let low = tier(0.0, 1000.0);
        let high = tier(1000.0, 5000.0);
        assert!(!low.contains(1000.0));
        assert!(high.contains(1000.0));
    }

    #[test]
    fn test_wire_field_names() {
        let payload = MileTierPayload {
            module_id: "m-1".to_string(),
            revenue_floor: 0.0,
            revenue_ceiling: 1000.0,
            miles_reward: 100,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["moduleId"], "m-1");
        assert_eq!(value["plancherRevenu"], 0.0);
        assert_eq!(value["plafondRevenu"], 1000.0);
        assert_eq!(value["quantiteMiles"], 100);
    }
}
