use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One resource as reported by discovery: identity, type, and its raw tag map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResource {
    /// Stable identifier (ARN, instance id, bucket name); exclusion patterns match against it.
    pub id: String,

    /// Resource-type key used to select the applicable tag criteria (`ec2`, `s3`, ...).
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl InventoryResource {
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}
