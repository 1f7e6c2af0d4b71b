//! The `check` use case: validate the policy, evaluate the inventory, and produce a report.

use crate::inventory::{InventoryFormat, parse_inventory};
use anyhow::Context;
use rayon::prelude::*;
use tagguard_domain::assess;
use tagguard_domain::report::{Assessment, DomainReport};
use tagguard_settings::ResolvedPolicy;
use tagguard_types::{
    ReportEnvelope, SCHEMA_REPORT_V1, TagguardData, TagguardReport, ToolMeta, Verdict,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Policy document contents (YAML).
    pub policy_text: &'a str,
    /// Inventory contents.
    pub inventory_text: &'a str,
    pub inventory_format: InventoryFormat,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: TagguardReport,
    /// The validated policy used for evaluation.
    pub resolved_policy: ResolvedPolicy,
}

/// Run the check use case: load policy, parse inventory, evaluate, produce report.
///
/// Policy errors abort before any resource is evaluated.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = tagguard_settings::load_policy(input.policy_text).context("load policy")?;
    let inventory = parse_inventory(input.inventory_text, input.inventory_format)?;
    let policy = &resolved.effective;

    debug!(
        resources = inventory.len(),
        batch_size = policy.batch_size,
        "evaluating inventory"
    );

    // Batches run in parallel; the report sorts results so ordering here does not matter.
    let assessments: Vec<Assessment> = inventory
        .par_chunks(policy.batch_size.max(1))
        .flat_map_iter(|batch| batch.iter().map(|r| assess(r, policy)))
        .collect();

    for a in &assessments {
        match a {
            Assessment::Skipped {
                resource_id,
                reason,
            } => warn!(resource_id = %resource_id, reason = reason.as_str(), "resource not evaluated"),
            Assessment::Excluded(e) => {
                debug!(resource_id = %e.resource_id, pattern = %e.pattern, "resource excluded")
            }
            Assessment::Evaluated(_) => {}
        }
    }

    let DomainReport {
        verdict,
        resources,
        exclusions,
        inventoried,
        skipped,
        summary,
    } = DomainReport::from_assessments(assessments);

    info!(
        evaluated = summary.total_resources,
        compliant = summary.compliant_resources,
        non_compliant = summary.non_compliant_resources,
        excluded = exclusions.len(),
        skipped,
        "check complete"
    );

    let finished_at = OffsetDateTime::now_utc();
    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "tagguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        data: TagguardData {
            policy_version: policy.version.clone(),
            resources_inventoried: inventoried,
            resources_evaluated: summary.total_resources,
            resources_skipped: skipped,
            exclusions,
        },
        resources,
        summary,
    };

    Ok(CheckOutput {
        report,
        resolved_policy: resolved,
    })
}

/// Map verdict to exit code: 0 = every evaluated resource compliant, 2 = any non-compliant.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
