//! Shared test utilities for the tagguard workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at runtime (not behind
//! `#[cfg(test)]`), so a test module inside `tagguard-types` would not suffice.

use serde_json::Value;

pub const VERSION_PLACEHOLDER: &str = "__VERSION__";
pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

const ENVELOPE_KEYS: [&str; 5] = ["schema", "tool", "verdict", "resources", "summary"];

/// Normalize non-deterministic report fields for golden-file comparison.
///
/// Only a root object that looks like a report envelope is touched: `tool.version`,
/// `started_at`, and `finished_at` are replaced with placeholders. Nested objects are left
/// alone, since resource tag maps may legitimately use keys like `started_at`.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    if !ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k)) {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }
    for key in ["started_at", "finished_at"] {
        if obj.contains_key(key) {
            obj.insert(
                key.to_string(),
                Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
            );
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope() -> Value {
        json!({
            "schema": "tagguard.report.v1",
            "tool": { "name": "tagguard", "version": "0.1.0" },
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "verdict": "pass",
            "resources": [
                {
                    "resource_id": "i-1",
                    "resource_type": "ec2",
                    "result": {
                        "is_compliant": true,
                        "resource_tags": { "started_at": "2025-12-01", "version": "3" },
                        "violations": [],
                        "compliance_level": null
                    }
                }
            ],
            "summary": { "total_resources": 1 },
            "data": { "policy_version": "1.0" }
        })
    }

    #[test]
    fn normalizes_envelope_version_and_timestamps() {
        let result = normalize_nondeterministic(envelope());
        assert_eq!(result["tool"]["version"], VERSION_PLACEHOLDER);
        assert_eq!(result["tool"]["name"], "tagguard");
        assert_eq!(result["started_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(result["finished_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(result["data"]["policy_version"], "1.0");
    }

    #[test]
    fn resource_tags_are_never_rewritten() {
        let result = normalize_nondeterministic(envelope());
        let tags = &result["resources"][0]["result"]["resource_tags"];
        assert_eq!(tags["started_at"], "2025-12-01");
        assert_eq!(tags["version"], "3");
    }

    #[test]
    fn non_envelope_is_untouched() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "started_at": "2025-01-01T00:00:00Z"
        });
        assert_eq!(normalize_nondeterministic(input.clone()), input);
        assert_eq!(normalize_nondeterministic(json!([1, 2])), json!([1, 2]));
    }
}
