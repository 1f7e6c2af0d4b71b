use super::CheckInput;
use tagguard_types::{Violation, ViolationKind};

pub fn run(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    for key in &input.criteria.forbidden_tags {
        if input.tags.contains_key(key) {
            out.push(Violation::new(
                ViolationKind::ForbiddenTagPresent,
                key,
                format!("forbidden tag '{key}' is present"),
            ));
        }
    }
}
