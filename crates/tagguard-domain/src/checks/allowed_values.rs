use super::CheckInput;
use tagguard_types::{Violation, ViolationKind};

pub fn run(input: &CheckInput<'_>, out: &mut Vec<Violation>) {
    let allowed_values = &input.validation.allowed_values;
    if allowed_values.is_empty() {
        return;
    }

    for (key, value) in input.tags {
        let Some(allowed) = allowed_values.get(key) else { continue };
        if !allowed.iter().any(|a| a == value) {
            out.push(Violation::new(
                ViolationKind::InvalidValue,
                key,
                format!(
                    "tag '{key}' has value '{value}'; allowed values: {}",
                    allowed.join(", ")
                ),
            ));
        }
    }
}
