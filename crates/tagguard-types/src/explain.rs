//! Explain registry for violation kinds.
//!
//! Maps violation codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a violation code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the violation.
    pub title: &'static str,
    /// What the rule enforces and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Tags (or policy) that would trigger a violation.
    pub before: &'static str,
    /// Tags that pass the rule.
    pub after: &'static str,
}

/// Look up an explanation by violation code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CODE_MISSING_REQUIRED_TAG => Some(explain_missing_required_tag()),
        ids::CODE_FORBIDDEN_TAG_PRESENT => Some(explain_forbidden_tag_present()),
        ids::CODE_SPECIFIC_TAG_MISMATCH => Some(explain_specific_tag_mismatch()),
        ids::CODE_INVALID_VALUE => Some(explain_invalid_value()),
        ids::CODE_INVALID_FORMAT => Some(explain_invalid_format()),
        ids::CODE_CASE_MISMATCH => Some(explain_case_mismatch()),
        _ => None,
    }
}

/// List all known violation codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_REQUIRED_TAG,
        ids::CODE_FORBIDDEN_TAG_PRESENT,
        ids::CODE_SPECIFIC_TAG_MISMATCH,
        ids::CODE_INVALID_VALUE,
        ids::CODE_INVALID_FORMAT,
        ids::CODE_CASE_MISMATCH,
    ]
}

fn explain_missing_required_tag() -> Explanation {
    Explanation {
        title: "Missing Required Tag",
        description: "\
The resource lacks a tag listed in `required_tags` of the criteria that apply to its
resource type (or of the compliance level those criteria reference).

The criteria may also set `minimum_required_tags`. When fewer required tags are present
than that minimum and the shortfall is not already explained by individually missing
keys, one additional violation reports the count.",
        remediation: "\
Add every required tag to the resource. Tag keys are case-sensitive: `environment`
does not satisfy a requirement for `Environment`.",
        examples: ExamplePair {
            before: r#"{"Environment": "prod"}"#,
            after: r#"{"Environment": "prod", "Project": "billing"}"#,
        },
    }
}

fn explain_forbidden_tag_present() -> Explanation {
    Explanation {
        title: "Forbidden Tag Present",
        description: "\
The resource carries a tag listed in `forbidden_tags`. Forbidden tags usually mark
temporary or legacy conventions that must not reach long-lived resources.",
        remediation: "\
Remove the tag from the resource, or move the resource to a resource type whose
criteria do not forbid it.",
        examples: ExamplePair {
            before: r#"{"Environment": "prod", "Temporary": "true"}"#,
            after: r#"{"Environment": "prod"}"#,
        },
    }
}

fn explain_specific_tag_mismatch() -> Explanation {
    Explanation {
        title: "Specific Tag Mismatch",
        description: "\
The criteria pin a tag to an exact value through `specific_tags`, and the resource
either lacks the tag or carries a different value. Comparison is exact and
case-sensitive.",
        remediation: "\
Set the tag to the exact value configured in the policy.",
        examples: ExamplePair {
            before: r#"{"CostCenter": "cc-99"}"#,
            after: r#"{"CostCenter": "cc-42"}"#,
        },
    }
}

fn explain_invalid_value() -> Explanation {
    Explanation {
        title: "Invalid Tag Value",
        description: "\
`tag_validation.allowed_values` restricts the tag to a fixed set of values and the
resource uses a value outside that set. Tags without an allow-list are not checked.",
        remediation: "\
Change the tag value to one of the allowed values, or extend the allow-list in the
policy if the new value is legitimate.",
        examples: ExamplePair {
            before: r#"{"Environment": "qa"}"#,
            after: r#"{"Environment": "staging"}"#,
        },
    }
}

fn explain_invalid_format() -> Explanation {
    Explanation {
        title: "Invalid Tag Format",
        description: "\
`tag_validation.pattern_rules` requires the tag value to match a regular expression
and the resource value does not. Patterns are unanchored: use `^` and `$` to require
a full match.",
        remediation: "\
Rewrite the tag value so that it matches the configured pattern.",
        examples: ExamplePair {
            before: r#"{"CostCenter": "marketing"}"#,
            after: r#"{"CostCenter": "cc-1042"}"#,
        },
    }
}

fn explain_case_mismatch() -> Explanation {
    Explanation {
        title: "Tag Case Mismatch",
        description: "\
`tag_validation.case_rules` requires the tag value to be entirely lowercase or
entirely uppercase. Characters without case (digits, punctuation) are ignored.
A `mixed` rule accepts any casing.",
        remediation: "\
Normalize the tag value to the configured casing.",
        examples: ExamplePair {
            before: r#"{"Project": "MyApp"}"#,
            after: r#"{"Project": "myapp"}"#,
        },
    }
}
