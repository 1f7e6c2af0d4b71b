use anyhow::Context;
use tagguard_render::{
    RenderableExclusion, RenderableReport, RenderableResource, RenderableSummary,
    RenderableVerdict, RenderableViolation,
};
use tagguard_types::{SCHEMA_REPORT_V1, TagguardReport, Verdict};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

pub fn serialize_report(report: &TagguardReport, format: ReportFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        ReportFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(report).context("serialize json report")?;
            bytes.push(b'\n');
            Ok(bytes)
        }
        ReportFormat::Yaml => serde_yaml::to_string(report)
            .map(String::into_bytes)
            .context("serialize yaml report"),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<TagguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: '{schema}' (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse tagguard report")
}

pub fn to_renderable(report: &TagguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        resources: report
            .resources
            .iter()
            .map(|r| RenderableResource {
                resource_id: r.resource_id.clone(),
                resource_type: r.resource_type.clone(),
                region: r.region.clone(),
                compliant: r.result.is_compliant,
                compliance_level: r.result.compliance_level.clone(),
                violations: r
                    .result
                    .violations
                    .iter()
                    .map(|v| RenderableViolation {
                        kind: v.kind.as_str().to_string(),
                        tag: v.tag.clone(),
                        message: v.message.clone(),
                    })
                    .collect(),
            })
            .collect(),
        exclusions: report
            .data
            .exclusions
            .iter()
            .map(|e| RenderableExclusion {
                resource_id: e.resource_id.clone(),
                resource_type: e.resource_type.clone(),
                reason: e.reason.clone(),
            })
            .collect(),
        summary: RenderableSummary {
            inventoried: report.data.resources_inventoried,
            evaluated: report.summary.total_resources,
            compliant: report.summary.compliant_resources,
            non_compliant: report.summary.non_compliant_resources,
            skipped: report.data.resources_skipped,
            // Histogram keys are ordered by evaluation stage.
            violations_by_kind: report
                .summary
                .global_violations
                .iter()
                .map(|(kind, count)| (kind.as_str().to_string(), *count))
                .collect(),
        },
    }
}
