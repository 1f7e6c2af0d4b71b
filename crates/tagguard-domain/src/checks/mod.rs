use crate::policy::{ComplianceLevel, TagCriteria, TagValidation};
use std::collections::BTreeMap;
use tagguard_types::Violation;

mod allowed_values;
mod case_rules;
mod forbidden_tags;
mod pattern_format;
mod required_tags;
mod specific_tags;


/// Everything one resource evaluation reads. All borrowed, nothing mutated.
#[derive(Clone, Copy, Debug)]
pub struct CheckInput<'a> {
    pub tags: &'a BTreeMap<String, String>,
    pub criteria: &'a TagCriteria,
    /// The compliance level `criteria.compliance_level` resolves to, if any.
    pub level: Option<&'a ComplianceLevel>,
    pub validation: &'a TagValidation,
}

/// Run every stage in its fixed order. Stages never short-circuit each other.
pub fn run_all(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    required_tags::run(input, out);
    forbidden_tags::run(input, out);
    specific_tags::run(input, out);
    allowed_values::run(input, out);
    pattern_format::run(input, out);
    case_rules::run(input, out);
}
