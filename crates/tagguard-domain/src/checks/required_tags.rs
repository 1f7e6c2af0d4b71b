use super::CheckInput;
use std::collections::BTreeSet;
use tagguard_types::{Violation, ViolationKind};

pub fn run(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    let criteria = input.criteria;

    let mut required: BTreeSet<&str> = criteria.required_tags.iter().map(String::as_str).collect();
    if let Some(level) = input.level {
        required.extend(level.required_tags.iter().map(String::as_str));
    }

    for key in required {
        if !input.tags.contains_key(key) {
            out.push(Violation::new(
                ViolationKind::MissingRequiredTag,
                key,
                format!("missing required tag '{key}'"),
            ));
        }
    }

    // The count rule only reports what per-key violations above do not already explain.
    let present = criteria
        .required_tags
        .iter()
        .filter(|k| input.tags.contains_key(k.as_str()))
        .count();
    let minimum = criteria.minimum_required_tags as usize;
    let reported = criteria.required_tags.len() - present;
    if present < minimum && minimum - present > reported {
        out.push(Violation {
            kind: ViolationKind::MissingRequiredTag,
            message: format!(
                "only {present} required tag(s) present; at least {minimum} required"
            ),
            tag: None,
        });
    }
}
