use super::CheckInput;
use tagguard_types::{Violation, ViolationKind};

pub fn run(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    let patterns = &input.validation.patterns;
    if patterns.is_empty() {
        return;
    }

    for (key, value) in input.tags {
        let Some(pattern) = patterns.get(key) else { continue };
        if !pattern.is_match(value) {
            out.push(Violation::new(
                ViolationKind::InvalidFormat,
                key,
                format!(
                    "tag '{key}' value '{value}' does not match pattern '{}'",
                    pattern.as_str()
                ),
            ));
        }
    }
}
