use crate::model::InventoryResource;
use crate::policy::{EffectivePolicy, RegionScope, TagCriteria, TagValidation};
use std::collections::BTreeMap;
use tagguard_types::{ComplianceResult, Violation, ViolationKind};

pub fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn criteria(required: &[&str], minimum: u32) -> TagCriteria {
    TagCriteria {
        minimum_required_tags: minimum,
        required_tags: required.iter().map(|s| s.to_string()).collect(),
        ..TagCriteria::default()
    }
}

pub fn resource(id: &str, resource_type: &str, pairs: &[(&str, &str)]) -> InventoryResource {
    InventoryResource {
        id: id.to_string(),
        resource_type: resource_type.to_string(),
        region: None,
        tags: tags(pairs),
    }
}

pub fn policy(global: TagCriteria) -> EffectivePolicy {
    EffectivePolicy {
        version: "1.0".to_string(),
        global_enabled: true,
        global_criteria: global,
        resources: BTreeMap::new(),
        levels: BTreeMap::new(),
        validation: TagValidation::default(),
        regions: RegionScope::All,
        batch_size: 50,
    }
}

pub fn result_with(kinds: &[ViolationKind]) -> ComplianceResult {
    let violations: Vec<Violation> = kinds
        .iter()
        .map(|k| Violation::new(*k, "Tag", format!("{k} on Tag")))
        .collect();
    ComplianceResult {
        is_compliant: violations.is_empty(),
        resource_tags: BTreeMap::new(),
        violations,
        compliance_level: None,
    }
}
