use crate::{RenderableReport, RenderableResource, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str("# Tagguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Fail => "FAIL",
    };
    out.push_str(&format!("- Verdict: **{verdict}**\n"));
    out.push_str(&format!(
        "- Resources: {} evaluated / {} inventoried ({} excluded, {} skipped)\n",
        s.evaluated,
        s.inventoried,
        report.exclusions.len(),
        s.skipped
    ));
    out.push_str(&format!(
        "- Compliant: {}, non-compliant: {}\n",
        s.compliant, s.non_compliant
    ));

    if !s.violations_by_kind.is_empty() {
        out.push_str("\n## Violations by kind\n\n");
        out.push_str("| Kind | Count |\n| --- | --- |\n");
        for (kind, count) in &s.violations_by_kind {
            out.push_str(&format!("| `{kind}` | {count} |\n"));
        }
    }

    let failing: Vec<&RenderableResource> =
        report.resources.iter().filter(|r| !r.compliant).collect();
    if failing.is_empty() {
        out.push_str("\nAll evaluated resources are compliant.\n");
    } else {
        out.push_str("\n## Non-compliant resources\n");
        for r in failing {
            push_resource(&mut out, r);
        }
    }

    if !report.exclusions.is_empty() {
        out.push_str("\n## Excluded resources\n\n");
        for e in &report.exclusions {
            out.push_str(&format!(
                "- `{}` ({}): {}\n",
                e.resource_id, e.resource_type, e.reason
            ));
        }
    }

    out
}

fn push_resource(out: &mut String, r: &RenderableResource) {
    let mut context = vec![r.resource_type.clone()];
    if let Some(region) = &r.region {
        context.push(region.clone());
    }
    if let Some(level) = &r.compliance_level {
        context.push(format!("level `{level}`"));
    }
    out.push_str(&format!(
        "\n### `{}` ({})\n\n",
        r.resource_id,
        context.join(", ")
    ));

    for v in &r.violations {
        match &v.tag {
            Some(tag) => out.push_str(&format!("- `{}` on `{}`: {}\n", v.kind, tag, v.message)),
            None => out.push_str(&format!("- `{}`: {}\n", v.kind, v.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableExclusion, RenderableSummary, RenderableViolation};

    fn violation(kind: &str, tag: Option<&str>, message: &str) -> RenderableViolation {
        RenderableViolation {
            kind: kind.to_string(),
            tag: tag.map(str::to_string),
            message: message.to_string(),
        }
    }

    fn failing_report() -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdict::Fail,
            resources: vec![
                RenderableResource {
                    resource_id: "i-1".to_string(),
                    resource_type: "ec2".to_string(),
                    region: Some("us-east-1".to_string()),
                    compliant: true,
                    compliance_level: None,
                    violations: Vec::new(),
                },
                RenderableResource {
                    resource_id: "i-2".to_string(),
                    resource_type: "ec2".to_string(),
                    region: Some("us-west-2".to_string()),
                    compliant: false,
                    compliance_level: Some("high".to_string()),
                    violations: vec![
                        violation(
                            "missing_required_tag",
                            Some("Project"),
                            "missing required tag 'Project'",
                        ),
                        violation(
                            "forbidden_tag_present",
                            Some("Temporary"),
                            "forbidden tag 'Temporary' is present",
                        ),
                    ],
                },
            ],
            exclusions: vec![RenderableExclusion {
                resource_id: "aws-logs-1".to_string(),
                resource_type: "s3".to_string(),
                reason: "Service-managed log buckets".to_string(),
            }],
            summary: RenderableSummary {
                inventoried: 4,
                evaluated: 2,
                compliant: 1,
                non_compliant: 1,
                skipped: 1,
                violations_by_kind: vec![
                    ("missing_required_tag".to_string(), 1),
                    ("forbidden_tag_present".to_string(), 1),
                ],
            },
        }
    }

    #[test]
    fn renders_failing_report() {
        insta::assert_snapshot!(render_markdown(&failing_report()), @r"
        # Tagguard report

        - Verdict: **FAIL**
        - Resources: 2 evaluated / 4 inventoried (1 excluded, 1 skipped)
        - Compliant: 1, non-compliant: 1

        ## Violations by kind

        | Kind | Count |
        | --- | --- |
        | `missing_required_tag` | 1 |
        | `forbidden_tag_present` | 1 |

        ## Non-compliant resources

        ### `i-2` (ec2, us-west-2, level `high`)

        - `missing_required_tag` on `Project`: missing required tag 'Project'
        - `forbidden_tag_present` on `Temporary`: forbidden tag 'Temporary' is present

        ## Excluded resources

        - `aws-logs-1` (s3): Service-managed log buckets
        ");
    }

    #[test]
    fn renders_passing_report() {
        let report = RenderableReport {
            verdict: RenderableVerdict::Pass,
            resources: Vec::new(),
            exclusions: Vec::new(),
            summary: RenderableSummary::default(),
        };
        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("All evaluated resources are compliant."));
        assert!(!md.contains("## Violations by kind"));
        assert!(!md.contains("## Excluded resources"));
    }

    #[test]
    fn untagged_violation_has_no_tag_reference() {
        let mut report = failing_report();
        report.resources[1].region = None;
        report.resources[1].compliance_level = None;
        report.resources[1].violations = vec![violation(
            "missing_required_tag",
            None,
            "only 0 required tag(s) present; at least 3 required",
        )];

        let md = render_markdown(&report);
        assert!(md.contains("### `i-2` (ec2)\n"));
        assert!(md.contains("- `missing_required_tag`: only 0 required tag(s) present"));
    }
}
