use super::CheckInput;
use tagguard_types::{Violation, ViolationKind};

pub fn run(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    let case_rules = &input.validation.case_rules;
    if case_rules.is_empty() {
        return;
    }

    for (key, value) in input.tags {
        let Some(rule) = case_rules.get(key) else { continue };
        if rule.style.matches(value) {
            continue;
        }
        let message = if rule.message.is_empty() {
            format!(
                "tag '{key}' value '{value}' must be {}",
                rule.style.as_str()
            )
        } else {
            rule.message.clone()
        };
        out.push(Violation::new(ViolationKind::CaseMismatch, key, message));
    }
}
