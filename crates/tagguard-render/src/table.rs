use crate::RenderableReport;

const HEADERS: [&str; 5] = ["RESOURCE", "TYPE", "REGION", "STATUS", "VIOLATIONS"];

/// Fixed-width plain-text table, one row per evaluated resource, then a totals line.
pub fn render_table(report: &RenderableReport) -> String {
    let rows: Vec<[String; 5]> = report
        .resources
        .iter()
        .map(|r| {
            [
                r.resource_id.clone(),
                r.resource_type.clone(),
                r.region.clone().unwrap_or_else(|| "-".to_string()),
                if r.compliant { "ok" } else { "FAIL" }.to_string(),
                r.violations.len().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\n{} evaluated, {} compliant, {} non-compliant, {} excluded, {} skipped\n",
        s.evaluated,
        s.compliant,
        s.non_compliant,
        report.exclusions.len(),
        s.skipped
    ));
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{cell:<width$}  "));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableResource, RenderableSummary, RenderableVerdict, RenderableViolation};

    fn resource(id: &str, rt: &str, region: Option<&str>, violations: usize) -> RenderableResource {
        RenderableResource {
            resource_id: id.to_string(),
            resource_type: rt.to_string(),
            region: region.map(str::to_string),
            compliant: violations == 0,
            compliance_level: None,
            violations: (0..violations)
                .map(|_| RenderableViolation {
                    kind: "missing_required_tag".to_string(),
                    tag: None,
                    message: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn renders_aligned_columns() {
        let report = RenderableReport {
            verdict: RenderableVerdict::Fail,
            resources: vec![
                resource("i-1", "ec2", Some("us-east-1"), 0),
                resource("bucket-logs", "s3", None, 2),
            ],
            exclusions: Vec::new(),
            summary: RenderableSummary {
                inventoried: 2,
                evaluated: 2,
                compliant: 1,
                non_compliant: 1,
                skipped: 0,
                violations_by_kind: vec![("missing_required_tag".to_string(), 2)],
            },
        };

        insta::assert_snapshot!(render_table(&report), @r"
        RESOURCE     TYPE  REGION     STATUS  VIOLATIONS
        i-1          ec2   us-east-1  ok      0
        bucket-logs  s3    -          FAIL    2

        2 evaluated, 1 compliant, 1 non-compliant, 0 excluded, 0 skipped
        ");
    }

    #[test]
    fn empty_report_has_header_and_totals() {
        let report = RenderableReport {
            verdict: RenderableVerdict::Pass,
            resources: Vec::new(),
            exclusions: Vec::new(),
            summary: RenderableSummary::default(),
        };
        let table = render_table(&report);
        assert!(table.starts_with("RESOURCE  TYPE  REGION  STATUS  VIOLATIONS\n"));
        assert!(table.ends_with("0 evaluated, 0 compliant, 0 non-compliant, 0 excluded, 0 skipped\n"));
    }
}
