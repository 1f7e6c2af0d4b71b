use crate::model::{PolicyDocumentV1, TagCriteriaConfig};
use crate::validate::{DEFAULT_BATCH_SIZE, PolicyError};
use std::collections::{BTreeMap, BTreeSet};
use tagguard_domain::compile_patterns;
use tagguard_domain::policy::{
    CaseRule, CaseStyle, ComplianceLevel, EffectivePolicy, Exclusion, ExclusionMatcher,
    RegionScope, ResourcePolicy, TagCriteria, TagValidation,
};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct ResolvedPolicy {
    /// The document after validation normalizations.
    pub document: PolicyDocumentV1,
    pub effective: EffectivePolicy,
}

/// Build the engine's policy from a validated document.
///
/// Compiles pattern rules and exclusion globs; nothing is evaluated against a document that
/// fails here.
pub fn resolve_policy(document: PolicyDocumentV1) -> Result<ResolvedPolicy, PolicyError> {
    let global_criteria = criteria("global.tag_criteria", &document.global.tag_criteria)?;

    // Disabled configs are not validated; their type falls back to global criteria.
    let mut resources = BTreeMap::new();
    for (resource_type, rc) in document.resources.iter().filter(|(_, rc)| rc.enabled) {
        let field = format!("resources.{resource_type}.tag_criteria");
        let exclusions = rc
            .excluded_resources
            .iter()
            .map(|ex| Exclusion {
                pattern: ex.pattern.clone(),
                reason: ex.reason.clone(),
            })
            .collect();
        let exclusions = ExclusionMatcher::new(exclusions).map_err(|err| {
            PolicyError::InvalidExclusionPattern {
                resource_type: resource_type.clone(),
                pattern: err.glob().unwrap_or_default().to_string(),
                reason: err.kind().to_string(),
            }
        })?;

        resources.insert(
            resource_type.clone(),
            ResourcePolicy {
                enabled: true,
                criteria: criteria(&field, &rc.tag_criteria)?,
                exclusions,
            },
        );
    }

    let levels = document
        .compliance_levels
        .iter()
        .map(|(name, level)| {
            (
                name.clone(),
                ComplianceLevel {
                    required_tags: level.required_tags.iter().cloned().collect(),
                    specific_tags: level.specific_tags.clone(),
                },
            )
        })
        .collect();

    let tv = &document.tag_validation;
    let patterns = compile_patterns(&tv.pattern_rules)?;
    debug!(patterns = patterns.len(), "compiled pattern rules");

    let mut case_rules = BTreeMap::new();
    for (tag, rule) in &tv.case_rules {
        let style = CaseStyle::parse(&rule.case).ok_or_else(|| PolicyError::InvalidCaseRule {
            tag: tag.clone(),
            case: rule.case.clone(),
        })?;
        case_rules.insert(
            tag.clone(),
            CaseRule {
                style,
                message: rule.message.clone(),
            },
        );
    }

    let regions = match document.aws.regions.mode.as_str() {
        "all" => RegionScope::All,
        "specific" => RegionScope::Specific(document.aws.regions.list.iter().cloned().collect()),
        other => {
            return Err(PolicyError::InvalidRegionMode {
                mode: other.to_string(),
            });
        }
    };

    let batch_size = document
        .aws
        .batch_size
        .or(document.global.batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);
    let batch_size = usize::try_from(batch_size)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| PolicyError::InvalidBatchSize {
            field: "aws.batch_size".to_string(),
            value: batch_size,
        })?;

    let effective = EffectivePolicy {
        version: document.version.clone(),
        global_enabled: document.global.enabled,
        global_criteria,
        resources,
        levels,
        validation: TagValidation {
            allowed_values: tv.allowed_values.clone(),
            patterns,
            case_rules,
        },
        regions,
        batch_size,
    };

    Ok(ResolvedPolicy {
        document,
        effective,
    })
}

fn criteria(field: &str, cfg: &TagCriteriaConfig) -> Result<TagCriteria, PolicyError> {
    let minimum_required_tags = u32::try_from(cfg.minimum_required_tags).map_err(|_| {
        PolicyError::NegativeMinimumRequiredTags {
            field: field.to_string(),
            minimum: cfg.minimum_required_tags,
        }
    })?;

    Ok(TagCriteria {
        minimum_required_tags,
        required_tags: cfg.required_tags.iter().cloned().collect::<BTreeSet<_>>(),
        forbidden_tags: cfg.forbidden_tags.iter().cloned().collect(),
        specific_tags: cfg.specific_tags.clone(),
        compliance_level: cfg.level_ref().map(str::to_string),
    })
}
