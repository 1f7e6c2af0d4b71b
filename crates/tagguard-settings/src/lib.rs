//! Policy document parsing, validation, defaults, and resolution.
//!
//! This crate is IO-free: it parses and resolves policy documents provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod regions;
mod resolve;
mod validate;

pub use model::{
    AwsConfig, CaseRuleConfig, ComplianceLevelConfig, EmailConfig, ExcludedResource,
    GlobalConfig, NotificationsConfig, PolicyDocumentV1, RegionsConfig, ResourceConfig,
    SlackConfig, TagCriteriaConfig, TagValidationConfig,
};
pub use presets::default_policy;
pub use regions::{DEFAULT_REGION, KNOWN_REGIONS, is_known_region};
pub use resolve::ResolvedPolicy;
pub use validate::{
    COMPLIANCE_LEVEL_NAMES, DEFAULT_BATCH_SIZE, EMAIL_FREQUENCIES, PolicyError,
    SUPPORTED_VERSION,
};

/// Parse a YAML policy document into the typed model. Does not validate.
pub fn parse_policy_yaml(input: &str) -> Result<PolicyDocumentV1, PolicyError> {
    let doc: PolicyDocumentV1 = serde_yaml::from_str(input)?;
    Ok(doc)
}

pub fn to_policy_yaml(doc: &PolicyDocumentV1) -> Result<String, PolicyError> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Run the validation pipeline, applying its normalizations in place.
pub fn validate_policy(doc: &mut PolicyDocumentV1) -> Result<(), PolicyError> {
    validate::validate_policy(doc)
}

/// Compile a validated document into the engine's effective policy.
pub fn resolve_policy(doc: PolicyDocumentV1) -> Result<ResolvedPolicy, PolicyError> {
    resolve::resolve_policy(doc)
}

/// Parse, validate, and resolve in one step.
pub fn load_policy(input: &str) -> Result<ResolvedPolicy, PolicyError> {
    let mut doc = parse_policy_yaml(input)?;
    validate_policy(&mut doc)?;
    resolve_policy(doc)
}

/// YAML text of the starter policy.
pub fn render_default_policy_yaml() -> Result<String, PolicyError> {
    to_policy_yaml(&default_policy())
}
