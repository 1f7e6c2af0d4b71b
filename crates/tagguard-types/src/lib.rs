//! Stable DTOs and IDs used across the tagguard workspace.
//!
//! This crate is intentionally boring:
//! - violation kinds, compliance results, and summaries
//! - stable string codes for violation kinds
//! - the emitted report envelope
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use receipt::{
    ComplianceResult, ComplianceSummary, ExclusionEntry, ReportEnvelope, ResourceEntry,
    TagguardData, TagguardReport, TagguardReportV1, ToolMeta, Verdict, Violation, ViolationKind,
    SCHEMA_REPORT_V1,
};
