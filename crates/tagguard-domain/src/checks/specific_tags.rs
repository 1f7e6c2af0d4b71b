use super::CheckInput;
use std::collections::BTreeMap;
use tagguard_types::{Violation, ViolationKind};

pub fn run(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    // Criteria pins win over level pins for the same key.
    let mut expected: BTreeMap<&str, &str> = BTreeMap::new();
    if let Some(level) = input.level {
        expected.extend(
            level
                .specific_tags
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
    }
    expected.extend(
        input
            .criteria
            .specific_tags
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    for (key, want) in expected {
        let message = match input.tags.get(key) {
            Some(actual) if actual == want => continue,
            Some(actual) => format!("tag '{key}' must be '{want}' but is '{actual}'"),
            None => format!("tag '{key}' must be '{want}' but is missing"),
        };
        out.push(Violation::new(
            ViolationKind::SpecificTagMismatch,
            key,
            message,
        ));
    }
}
