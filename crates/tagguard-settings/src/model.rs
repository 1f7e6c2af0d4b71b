use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

fn default_region_mode() -> String {
    "all".to_string()
}

/// Tagging policy document, schema v1.
///
/// This is a *user-facing* model: numeric fields are signed and enumerations are strings so
/// that out-of-range values reach the validator with a precise error instead of failing in
/// the YAML parser.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyDocumentV1 {
    /// Must equal the supported schema version (`1.0`).
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub global: GlobalConfig,

    /// Map of resource type (`ec2`, `s3`, ...) -> resource-specific config.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,

    /// Map of level name (`high|medium|low|standard`) -> level requirements.
    #[serde(default)]
    pub compliance_levels: BTreeMap<String, ComplianceLevelConfig>,

    #[serde(default)]
    pub tag_validation: TagValidationConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub aws: AwsConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GlobalConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub tag_criteria: TagCriteriaConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i64>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tag_criteria: TagCriteriaConfig::default(),
            batch_size: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagCriteriaConfig {
    #[serde(default)]
    pub minimum_required_tags: i64,

    #[serde(default)]
    pub required_tags: Vec<String>,

    #[serde(default)]
    pub forbidden_tags: Vec<String>,

    /// Exact key -> value pairs.
    #[serde(default)]
    pub specific_tags: BTreeMap<String, String>,

    /// Reference into `compliance_levels`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_level: Option<String>,
}

impl TagCriteriaConfig {
    /// The referenced level, treating an empty string as unset.
    pub fn level_ref(&self) -> Option<&str> {
        self.compliance_level.as_deref().filter(|l| !l.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub tag_criteria: TagCriteriaConfig,

    #[serde(default)]
    pub excluded_resources: Vec<ExcludedResource>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExcludedResource {
    /// Glob matched against the resource identifier.
    #[serde(default)]
    pub pattern: String,

    #[serde(default)]
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceLevelConfig {
    #[serde(default)]
    pub required_tags: Vec<String>,

    #[serde(default)]
    pub specific_tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagValidationConfig {
    /// Tag key -> permitted values.
    #[serde(default)]
    pub allowed_values: BTreeMap<String, Vec<String>>,

    /// Tag key -> regular expression the value must match.
    #[serde(default)]
    pub pattern_rules: BTreeMap<String, String>,

    #[serde(default)]
    pub case_rules: BTreeMap<String, CaseRuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CaseRuleConfig {
    /// `lowercase`, `uppercase`, or `mixed`.
    pub case: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SlackConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Channel purpose (`alerts`, `reports`, ...) -> channel name.
    #[serde(default)]
    pub channels: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub recipients: Vec<String>,

    /// `daily`, `hourly`, or `weekly`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AwsConfig {
    #[serde(default)]
    pub regions: RegionsConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegionsConfig {
    /// `all` or `specific`.
    #[serde(default = "default_region_mode")]
    pub mode: String,

    #[serde(default)]
    pub list: Vec<String>,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            mode: default_region_mode(),
            list: Vec::new(),
        }
    }
}
