//! Policy document validation.
//!
//! An ordered pipeline of stages; the first failing stage aborts validation with one error.
//! The only mutations are the documented normalizations: an empty `specific` region list
//! becomes the default region, and absent batch sizes get the default batch size.

use crate::model::{
    AwsConfig, ComplianceLevelConfig, GlobalConfig, NotificationsConfig, PolicyDocumentV1,
    ResourceConfig, TagCriteriaConfig, TagValidationConfig,
};
use crate::regions::{self, DEFAULT_REGION};
use globset::Glob;
use std::collections::{BTreeMap, BTreeSet};
use tagguard_domain::InvalidPatternError;
use tagguard_domain::policy::CaseStyle;
use thiserror::Error;
use tracing::{debug, info};

pub const SUPPORTED_VERSION: &str = "1.0";
pub const DEFAULT_BATCH_SIZE: i64 = 50;
pub const COMPLIANCE_LEVEL_NAMES: &[&str] = &["high", "medium", "low", "standard"];
pub const EMAIL_FREQUENCIES: &[&str] = &["daily", "hourly", "weekly"];

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to parse policy document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported policy version '{found}' (expected '{SUPPORTED_VERSION}')")]
    UnsupportedVersion { found: String },

    #[error("{field} must be greater than 0, got {value}")]
    InvalidBatchSize { field: String, value: i64 },

    #[error("{field}.minimum_required_tags must not be negative, got {minimum}")]
    NegativeMinimumRequiredTags { field: String, minimum: i64 },

    #[error(
        "{field}.minimum_required_tags ({minimum}) exceeds the number of required tags ({required})"
    )]
    MinimumRequiredTags {
        field: String,
        minimum: i64,
        required: usize,
    },

    #[error("{field}.compliance_level '{level}' is not defined in compliance_levels")]
    UndefinedComplianceLevel { field: String, level: String },

    #[error(
        "{field}.compliance_level '{level}' is not a recognized level (expected high|medium|low|standard)"
    )]
    UnknownComplianceLevel { field: String, level: String },

    #[error("resources.{resource_type}.excluded_resources[{index}].pattern must not be empty")]
    EmptyExclusionPattern { resource_type: String, index: usize },

    #[error("resources.{resource_type}.excluded_resources[{index}].reason must not be empty")]
    EmptyExclusionReason { resource_type: String, index: usize },

    #[error("resources.{resource_type}.excluded_resources: invalid pattern '{pattern}': {reason}")]
    InvalidExclusionPattern {
        resource_type: String,
        pattern: String,
        reason: String,
    },

    #[error("compliance level name '{level}' is not recognized (expected high|medium|low|standard)")]
    InvalidComplianceLevelName { level: String },

    #[error("{field} contains an empty tag key")]
    EmptyRequiredTag { field: String },

    #[error("{field} must have a non-empty key and value (key '{key}')")]
    EmptySpecificTag { field: String, key: String },

    #[error("tag_validation.allowed_values.{tag} must list at least one value")]
    EmptyAllowedValues { tag: String },

    #[error("tag_validation.allowed_values.{tag} contains an empty value")]
    EmptyAllowedValue { tag: String },

    #[error("tag_validation.pattern_rules.{tag} must not be empty")]
    EmptyPatternRule { tag: String },

    #[error(
        "tag_validation.case_rules.{tag}.case '{case}' is not recognized (expected lowercase|uppercase|mixed)"
    )]
    InvalidCaseRule { tag: String, case: String },

    #[error("notifications.slack is enabled but no channels are configured")]
    SlackWithoutChannels,

    #[error("notifications.email is enabled but no recipients are configured")]
    EmailWithoutRecipients,

    #[error("notifications.email.frequency '{frequency}' is not recognized (expected daily|hourly|weekly)")]
    InvalidEmailFrequency { frequency: String },

    #[error("aws.regions.mode '{mode}' is not recognized (expected all|specific)")]
    InvalidRegionMode { mode: String },

    #[error("aws.regions.list contains unknown region '{region}'")]
    UnknownRegion { region: String },

    #[error(transparent)]
    InvalidPattern(#[from] InvalidPatternError),
}

impl PolicyError {
    /// Pipeline stage that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            PolicyError::Parse(_) => "parse",
            PolicyError::UnsupportedVersion { .. } => "version",
            PolicyError::InvalidBatchSize { field, .. } if field.starts_with("aws") => "aws",
            PolicyError::InvalidBatchSize { .. } => "global",
            PolicyError::NegativeMinimumRequiredTags { .. }
            | PolicyError::MinimumRequiredTags { .. }
            | PolicyError::UndefinedComplianceLevel { .. } => "tag_criteria",
            PolicyError::EmptyRequiredTag { field } if !field.starts_with("compliance_levels") => {
                "tag_criteria"
            }
            PolicyError::UnknownComplianceLevel { .. }
            | PolicyError::EmptyExclusionPattern { .. }
            | PolicyError::EmptyExclusionReason { .. }
            | PolicyError::InvalidExclusionPattern { .. } => "resources",
            PolicyError::InvalidComplianceLevelName { .. }
            | PolicyError::EmptyRequiredTag { .. }
            | PolicyError::EmptySpecificTag { .. } => "compliance_levels",
            PolicyError::EmptyAllowedValues { .. }
            | PolicyError::EmptyAllowedValue { .. }
            | PolicyError::EmptyPatternRule { .. }
            | PolicyError::InvalidCaseRule { .. } => "tag_validation",
            PolicyError::SlackWithoutChannels
            | PolicyError::EmailWithoutRecipients
            | PolicyError::InvalidEmailFrequency { .. } => "notifications",
            PolicyError::InvalidRegionMode { .. } | PolicyError::UnknownRegion { .. } => "aws",
            PolicyError::InvalidPattern(_) => "patterns",
        }
    }
}

/// Run every validation stage in order, stopping at the first failure.
pub fn validate_policy(doc: &mut PolicyDocumentV1) -> Result<(), PolicyError> {
    debug!(stage = "version", "validating policy");
    validate_version(&doc.version)?;

    debug!(stage = "global", "validating policy");
    validate_global(&doc.global, &doc.compliance_levels)?;

    debug!(stage = "resources", count = doc.resources.len(), "validating policy");
    validate_resources(&doc.resources, &doc.compliance_levels)?;

    debug!(stage = "compliance_levels", count = doc.compliance_levels.len(), "validating policy");
    validate_compliance_levels(&doc.compliance_levels)?;

    debug!(stage = "tag_validation", "validating policy");
    validate_tag_validation(&doc.tag_validation)?;

    debug!(stage = "notifications", "validating policy");
    validate_notifications(&doc.notifications)?;

    debug!(stage = "aws", "validating policy");
    validate_aws(&mut doc.aws)?;

    fill_default_batch_sizes(doc);

    info!(
        version = %doc.version,
        resource_types = doc.resources.len(),
        levels = doc.compliance_levels.len(),
        "policy validated"
    );
    Ok(())
}

fn validate_version(version: &str) -> Result<(), PolicyError> {
    if version != SUPPORTED_VERSION {
        return Err(PolicyError::UnsupportedVersion {
            found: version.to_string(),
        });
    }
    Ok(())
}

fn validate_global(
    global: &GlobalConfig,
    levels: &BTreeMap<String, ComplianceLevelConfig>,
) -> Result<(), PolicyError> {
    if let Some(value) = global.batch_size
        && value <= 0
    {
        return Err(PolicyError::InvalidBatchSize {
            field: "global.batch_size".to_string(),
            value,
        });
    }
    validate_tag_criteria("global.tag_criteria", &global.tag_criteria, levels)
}

fn validate_resources(
    resources: &BTreeMap<String, ResourceConfig>,
    levels: &BTreeMap<String, ComplianceLevelConfig>,
) -> Result<(), PolicyError> {
    for (resource_type, rc) in resources.iter().filter(|(_, rc)| rc.enabled) {
        let field = format!("resources.{resource_type}.tag_criteria");
        validate_tag_criteria(&field, &rc.tag_criteria, levels)?;

        for (index, ex) in rc.excluded_resources.iter().enumerate() {
            if ex.pattern.is_empty() {
                return Err(PolicyError::EmptyExclusionPattern {
                    resource_type: resource_type.clone(),
                    index,
                });
            }
            if ex.reason.is_empty() {
                return Err(PolicyError::EmptyExclusionReason {
                    resource_type: resource_type.clone(),
                    index,
                });
            }
            Glob::new(&ex.pattern).map_err(|err| PolicyError::InvalidExclusionPattern {
                resource_type: resource_type.clone(),
                pattern: ex.pattern.clone(),
                reason: err.kind().to_string(),
            })?;
        }

        if let Some(level) = rc.tag_criteria.level_ref()
            && !COMPLIANCE_LEVEL_NAMES.contains(&level)
        {
            return Err(PolicyError::UnknownComplianceLevel {
                field,
                level: level.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_compliance_levels(
    levels: &BTreeMap<String, ComplianceLevelConfig>,
) -> Result<(), PolicyError> {
    for (name, level) in levels {
        if !COMPLIANCE_LEVEL_NAMES.contains(&name.as_str()) {
            return Err(PolicyError::InvalidComplianceLevelName {
                level: name.clone(),
            });
        }
        if level.required_tags.iter().any(String::is_empty) {
            return Err(PolicyError::EmptyRequiredTag {
                field: format!("compliance_levels.{name}.required_tags"),
            });
        }
        if let Some((key, _)) = level
            .specific_tags
            .iter()
            .find(|(k, v)| k.is_empty() || v.is_empty())
        {
            return Err(PolicyError::EmptySpecificTag {
                field: format!("compliance_levels.{name}.specific_tags"),
                key: key.clone(),
            });
        }
    }
    Ok(())
}

fn validate_tag_validation(tv: &TagValidationConfig) -> Result<(), PolicyError> {
    for (tag, values) in &tv.allowed_values {
        if values.is_empty() {
            return Err(PolicyError::EmptyAllowedValues { tag: tag.clone() });
        }
        if values.iter().any(String::is_empty) {
            return Err(PolicyError::EmptyAllowedValue { tag: tag.clone() });
        }
    }
    // Compilability is checked by the pattern compiler during resolution.
    for (tag, pattern) in &tv.pattern_rules {
        if pattern.is_empty() {
            return Err(PolicyError::EmptyPatternRule { tag: tag.clone() });
        }
    }
    for (tag, rule) in &tv.case_rules {
        if CaseStyle::parse(&rule.case).is_none() {
            return Err(PolicyError::InvalidCaseRule {
                tag: tag.clone(),
                case: rule.case.clone(),
            });
        }
    }
    Ok(())
}

/// Shared by the global and per-resource stages.
fn validate_tag_criteria(
    field: &str,
    criteria: &TagCriteriaConfig,
    levels: &BTreeMap<String, ComplianceLevelConfig>,
) -> Result<(), PolicyError> {
    let minimum = criteria.minimum_required_tags;
    if minimum < 0 {
        return Err(PolicyError::NegativeMinimumRequiredTags {
            field: field.to_string(),
            minimum,
        });
    }
    for (list, keys) in [
        ("required_tags", &criteria.required_tags),
        ("forbidden_tags", &criteria.forbidden_tags),
    ] {
        if keys.iter().any(String::is_empty) {
            return Err(PolicyError::EmptyRequiredTag {
                field: format!("{field}.{list}"),
            });
        }
    }
    // Only distinct keys count toward the minimum.
    let required = criteria
        .required_tags
        .iter()
        .collect::<BTreeSet<_>>()
        .len();
    if minimum as u64 > required as u64 {
        return Err(PolicyError::MinimumRequiredTags {
            field: field.to_string(),
            minimum,
            required,
        });
    }
    if let Some(level) = criteria.level_ref()
        && !levels.contains_key(level)
    {
        return Err(PolicyError::UndefinedComplianceLevel {
            field: field.to_string(),
            level: level.to_string(),
        });
    }
    Ok(())
}

fn validate_notifications(n: &NotificationsConfig) -> Result<(), PolicyError> {
    if n.slack.enabled && n.slack.channels.is_empty() {
        return Err(PolicyError::SlackWithoutChannels);
    }
    if n.email.enabled {
        if n.email.recipients.is_empty() {
            return Err(PolicyError::EmailWithoutRecipients);
        }
        if let Some(frequency) = n.email.frequency.as_deref()
            && !EMAIL_FREQUENCIES.contains(&frequency)
        {
            return Err(PolicyError::InvalidEmailFrequency {
                frequency: frequency.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_aws(aws: &mut AwsConfig) -> Result<(), PolicyError> {
    match aws.regions.mode.as_str() {
        "all" | "specific" => {}
        other => {
            return Err(PolicyError::InvalidRegionMode {
                mode: other.to_string(),
            });
        }
    }

    if let Some(value) = aws.batch_size
        && value <= 0
    {
        return Err(PolicyError::InvalidBatchSize {
            field: "aws.batch_size".to_string(),
            value,
        });
    }

    if aws.regions.mode == "specific" {
        if let Some(region) = aws
            .regions
            .list
            .iter()
            .find(|r| !regions::is_known_region(r))
        {
            return Err(PolicyError::UnknownRegion {
                region: region.clone(),
            });
        }
        if aws.regions.list.is_empty() {
            debug!(region = DEFAULT_REGION, "empty specific region list, using default region");
            aws.regions.list.push(DEFAULT_REGION.to_string());
        }
    }
    Ok(())
}

/// Runs only once every stage has passed, so a rejected document is left as parsed.
fn fill_default_batch_sizes(doc: &mut PolicyDocumentV1) {
    doc.global.batch_size.get_or_insert(DEFAULT_BATCH_SIZE);
    doc.aws.batch_size.get_or_insert(DEFAULT_BATCH_SIZE);
}
