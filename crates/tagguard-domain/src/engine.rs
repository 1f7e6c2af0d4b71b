use crate::checks::{self, CheckInput};
use crate::model::InventoryResource;
use crate::policy::{ComplianceLevel, EffectivePolicy, TagCriteria, TagValidation};
use crate::report::{Assessment, DomainReport, SkipReason};
use std::collections::BTreeMap;
use tagguard_types::{ComplianceResult, ExclusionEntry, ResourceEntry};

/// Evaluate one resource's tags against the criteria that apply to it.
///
/// Pure and deterministic: tag keys are visited in sorted order and violations are emitted in
/// stage order (required, forbidden, specific, allowed values, patterns, case).
pub fn evaluate(
    tags: &BTreeMap<String, String>,
    criteria: &TagCriteria,
    levels: &BTreeMap<String, ComplianceLevel>,
    validation: &TagValidation,
) -> ComplianceResult {
    let level = criteria
        .compliance_level
        .as_deref()
        .and_then(|name| levels.get(name));

    let input = CheckInput {
        tags,
        criteria,
        level,
        validation,
    };

    let mut violations = Vec::new();
    checks::run_all(&input, &mut violations);

    ComplianceResult {
        is_compliant: violations.is_empty(),
        resource_tags: tags.clone(),
        violations,
        compliance_level: criteria.compliance_level.clone(),
    }
}

/// Decide what happens to one inventory resource: region filter, exclusion, criteria selection,
/// then evaluation.
pub fn assess(resource: &InventoryResource, policy: &EffectivePolicy) -> Assessment {
    if !policy.regions.includes(resource.region()) {
        return Assessment::Skipped {
            resource_id: resource.id.clone(),
            reason: SkipReason::OutOfRegionScope,
        };
    }

    if let Some(exclusion) = policy.exclusion_for(&resource.resource_type, &resource.id) {
        return Assessment::Excluded(ExclusionEntry {
            resource_id: resource.id.clone(),
            resource_type: resource.resource_type.clone(),
            pattern: exclusion.pattern.clone(),
            reason: exclusion.reason.clone(),
        });
    }

    let Some(criteria) = policy.criteria_for(&resource.resource_type) else {
        return Assessment::Skipped {
            resource_id: resource.id.clone(),
            reason: SkipReason::NoCriteria,
        };
    };

    Assessment::Evaluated(ResourceEntry {
        resource_id: resource.id.clone(),
        resource_type: resource.resource_type.clone(),
        region: resource.region.clone(),
        result: evaluate(&resource.tags, criteria, &policy.levels, &policy.validation),
    })
}

/// Sequential batch evaluation.
pub fn evaluate_inventory(resources: &[InventoryResource], policy: &EffectivePolicy) -> DomainReport {
    let assessments = resources.iter().map(|r| assess(r, policy)).collect();
    DomainReport::from_assessments(assessments)
}
