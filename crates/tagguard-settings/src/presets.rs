use crate::model::{
    AwsConfig, CaseRuleConfig, ComplianceLevelConfig, ExcludedResource, GlobalConfig,
    NotificationsConfig, PolicyDocumentV1, RegionsConfig, ResourceConfig, TagCriteriaConfig,
    TagValidationConfig,
};
use crate::validate::{DEFAULT_BATCH_SIZE, SUPPORTED_VERSION};
use std::collections::BTreeMap;

/// The starter policy written by `tagguard init`.
///
/// Keep this small and readable; it is meant to be edited. It must always validate.
pub fn default_policy() -> PolicyDocumentV1 {
    PolicyDocumentV1 {
        version: SUPPORTED_VERSION.to_string(),
        global: GlobalConfig {
            enabled: true,
            tag_criteria: TagCriteriaConfig {
                minimum_required_tags: 2,
                required_tags: strings(&["Environment", "Owner"]),
                forbidden_tags: strings(&["Temporary"]),
                specific_tags: BTreeMap::new(),
                compliance_level: Some("standard".to_string()),
            },
            batch_size: Some(DEFAULT_BATCH_SIZE),
        },
        resources: default_resources(),
        compliance_levels: default_levels(),
        tag_validation: default_tag_validation(),
        notifications: NotificationsConfig::default(),
        aws: AwsConfig {
            regions: RegionsConfig::default(),
            batch_size: Some(DEFAULT_BATCH_SIZE),
        },
    }
}

fn default_resources() -> BTreeMap<String, ResourceConfig> {
    let mut m = BTreeMap::new();

    m.insert(
        "ec2".to_string(),
        ResourceConfig {
            enabled: true,
            tag_criteria: TagCriteriaConfig {
                minimum_required_tags: 3,
                required_tags: strings(&["Environment", "Owner", "Project"]),
                forbidden_tags: strings(&["Temporary"]),
                specific_tags: BTreeMap::new(),
                compliance_level: Some("high".to_string()),
            },
            excluded_resources: Vec::new(),
        },
    );

    m.insert(
        "s3".to_string(),
        ResourceConfig {
            enabled: true,
            tag_criteria: TagCriteriaConfig {
                minimum_required_tags: 2,
                required_tags: strings(&["Environment", "Owner", "DataClassification"]),
                ..TagCriteriaConfig::default()
            },
            excluded_resources: vec![ExcludedResource {
                pattern: "aws-logs-*".to_string(),
                reason: "Service-managed log buckets".to_string(),
            }],
        },
    );

    m
}

fn default_levels() -> BTreeMap<String, ComplianceLevelConfig> {
    let mut m = BTreeMap::new();

    m.insert(
        "high".to_string(),
        ComplianceLevelConfig {
            required_tags: strings(&["Environment", "Owner", "Project", "CostCenter"]),
            specific_tags: BTreeMap::new(),
        },
    );
    m.insert(
        "standard".to_string(),
        ComplianceLevelConfig {
            required_tags: strings(&["Environment", "Owner"]),
            specific_tags: BTreeMap::new(),
        },
    );

    m
}

fn default_tag_validation() -> TagValidationConfig {
    let mut allowed_values = BTreeMap::new();
    allowed_values.insert(
        "Environment".to_string(),
        strings(&["dev", "staging", "prod"]),
    );

    let mut pattern_rules = BTreeMap::new();
    pattern_rules.insert("CostCenter".to_string(), "^[0-9]{4,6}$".to_string());

    let mut case_rules = BTreeMap::new();
    case_rules.insert(
        "Environment".to_string(),
        CaseRuleConfig {
            case: "lowercase".to_string(),
            message: "Environment tag must be lowercase".to_string(),
        },
    );

    TagValidationConfig {
        allowed_values,
        pattern_rules,
        case_rules,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
