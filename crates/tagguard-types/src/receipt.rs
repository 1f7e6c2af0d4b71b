use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for tagguard reports.
pub const SCHEMA_REPORT_V1: &str = "tagguard.report.v1";

/// Closed set of reasons a resource can fail its tag criteria.
///
/// Declaration order is evaluation stage order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingRequiredTag,
    ForbiddenTagPresent,
    SpecificTagMismatch,
    InvalidValue,
    InvalidFormat,
    CaseMismatch,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 6] = [
        ViolationKind::MissingRequiredTag,
        ViolationKind::ForbiddenTagPresent,
        ViolationKind::SpecificTagMismatch,
        ViolationKind::InvalidValue,
        ViolationKind::InvalidFormat,
        ViolationKind::CaseMismatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredTag => ids::CODE_MISSING_REQUIRED_TAG,
            ViolationKind::ForbiddenTagPresent => ids::CODE_FORBIDDEN_TAG_PRESENT,
            ViolationKind::SpecificTagMismatch => ids::CODE_SPECIFIC_TAG_MISMATCH,
            ViolationKind::InvalidValue => ids::CODE_INVALID_VALUE,
            ViolationKind::InvalidFormat => ids::CODE_INVALID_FORMAT,
            ViolationKind::CaseMismatch => ids::CODE_CASE_MISMATCH,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == code)
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed reason a resource failed policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,

    /// Tag key the violation is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Violation {
    pub fn new(kind: ViolationKind, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tag: Some(tag.into()),
        }
    }
}

/// Per-resource verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceResult {
    pub is_compliant: bool,
    pub resource_tags: BTreeMap<String, String>,
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub compliance_level: Option<String>,
}

/// Aggregate over a batch of results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceSummary {
    pub total_resources: u32,
    pub compliant_resources: u32,
    pub non_compliant_resources: u32,
    /// Violation count per kind; kinds that never fired are absent.
    #[serde(default)]
    pub global_violations: BTreeMap<ViolationKind, u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// One evaluated resource in a report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceEntry {
    pub resource_id: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub result: ComplianceResult,
}

/// A resource exempted by an `excluded_resources` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExclusionEntry {
    pub resource_id: String,
    pub resource_type: String,
    pub pattern: String,
    pub reason: String,
}

/// Tagguard-specific run payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct TagguardData {
    pub policy_version: String,

    pub resources_inventoried: u32,
    pub resources_evaluated: u32,
    /// Resources with no applicable criteria (disabled type, disabled global, filtered region).
    pub resources_skipped: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<ExclusionEntry>,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = TagguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub resources: Vec<ResourceEntry>,
    pub summary: ComplianceSummary,
    pub data: TData,
}

pub type TagguardReportV1 = ReportEnvelope<TagguardData>;

pub type TagguardReport = TagguardReportV1;
