use tagguard_types::{ComplianceResult, ComplianceSummary, ExclusionEntry, ResourceEntry, Verdict};

/// Why a resource was not evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No enabled resource config and global evaluation disabled.
    NoCriteria,
    /// Region not in `aws.regions.list` while mode is `specific`.
    OutOfRegionScope,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoCriteria => "no_criteria",
            SkipReason::OutOfRegionScope => "out_of_region_scope",
        }
    }
}

/// Outcome of looking at one inventory resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assessment {
    Evaluated(ResourceEntry),
    Excluded(ExclusionEntry),
    Skipped {
        resource_id: String,
        reason: SkipReason,
    },
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// Sorted by resource id, then resource type.
    pub resources: Vec<ResourceEntry>,
    pub exclusions: Vec<ExclusionEntry>,
    pub inventoried: u32,
    pub skipped: u32,
    pub summary: ComplianceSummary,
}

impl DomainReport {
    /// Fold assessments (in any order) into a deterministic report.
    pub fn from_assessments(assessments: Vec<Assessment>) -> Self {
        let inventoried = assessments.len() as u32;
        let mut resources = Vec::new();
        let mut exclusions = Vec::new();
        let mut skipped = 0u32;

        for a in assessments {
            match a {
                Assessment::Evaluated(entry) => resources.push(entry),
                Assessment::Excluded(entry) => exclusions.push(entry),
                Assessment::Skipped { .. } => skipped += 1,
            }
        }

        resources.sort_by(|a, b| {
            a.resource_id
                .cmp(&b.resource_id)
                .then_with(|| a.resource_type.cmp(&b.resource_type))
        });
        exclusions.sort_by(|a, b| {
            a.resource_id
                .cmp(&b.resource_id)
                .then_with(|| a.resource_type.cmp(&b.resource_type))
        });

        let summary = aggregate(resources.iter().map(|r| &r.result));
        let verdict = if summary.non_compliant_resources > 0 {
            Verdict::Fail
        } else {
            Verdict::Pass
        };

        DomainReport {
            verdict,
            resources,
            exclusions,
            inventoried,
            skipped,
            summary,
        }
    }
}

/// Fold per-resource results into compliant/non-compliant totals and a violation histogram.
pub fn aggregate<'a>(results: impl IntoIterator<Item = &'a ComplianceResult>) -> ComplianceSummary {
    let mut summary = ComplianceSummary::default();
    for result in results {
        summary.total_resources += 1;
        if result.is_compliant {
            summary.compliant_resources += 1;
        } else {
            summary.non_compliant_resources += 1;
        }
        for v in &result.violations {
            *summary.global_violations.entry(v.kind).or_insert(0) += 1;
        }
    }
    summary
}
