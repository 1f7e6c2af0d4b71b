//! Use case orchestration for tagguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and process concerns.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod init;
mod inventory;
mod render;
mod report;
mod validate;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use init::{InitOutcome, run_init};
pub use inventory::{InventoryFormat, parse_inventory};
pub use render::{
    MarkdownInput, render_markdown, render_table, run_markdown, write_report, write_text,
};
pub use report::{ReportFormat, parse_report_json, serialize_report, to_renderable};
pub use validate::{ValidateOutput, run_validate};
